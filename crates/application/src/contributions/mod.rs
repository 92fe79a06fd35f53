//! Built-in variable contributions
//!
//! Contributions are written against ports only; the infrastructure layer
//! supplies the file system, clock and quick input they run on.

mod file;
mod today;

pub use file::{FILE_URI_ARG, FILE_VARIABLE_ID, FILE_VARIABLE_NAME, FileVariableContribution, file_variable};
pub use today::{
    TODAY_IN_ISO_8601_ARG, TODAY_IN_UNIX_SECONDS_ARG, TODAY_VARIABLE_ID, TODAY_VARIABLE_NAME,
    TodayVariableContribution, today_variable,
};
