//! Clock port for time-related operations

use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Date-valued variables read the clock through this trait so tests can pin
/// the date.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
