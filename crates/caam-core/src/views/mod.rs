//! Page-ready views derived from the domain models.
//!
//! - `EventSchedule`: next / upcoming / past split for the immersion page
//! - `EventCalendar`: date-sorted events indexed by day
//! - `DirectoryData`, `FilterOptions`: listed members and search choices

pub mod directory;
pub mod events;

pub use directory::{DirectoryData, FilterOptions, CA, NON_CA};
pub use events::{EventCalendar, EventSchedule};
