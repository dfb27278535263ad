pub use super::personal_records::Entity as PersonalRecords;
pub use super::routines::Entity as Routines;
pub use super::users::Entity as Users;
pub use super::workout_history::Entity as WorkoutHistory;
