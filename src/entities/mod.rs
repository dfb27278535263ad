pub mod prelude;

pub mod personal_records;
pub mod routines;
pub mod users;
pub mod workout_history;
