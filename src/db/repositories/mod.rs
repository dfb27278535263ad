pub mod history;
pub mod records;
pub mod routine;
pub mod user;
