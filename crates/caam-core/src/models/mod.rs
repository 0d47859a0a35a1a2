//! Domain models for the site's two data sources.
//!
//! - `ImmersionEvent`: one row of the events calendar sheet
//! - `Professional`: one listed member of the directory sheet
//!
//! Each model carries its own mapper from a `NormalizedRecord`.

pub mod event;
pub mod professional;

pub use event::{map_events, parse_event_date, ImmersionEvent, DEFAULT_EVENT_IMAGE, UNTITLED_EVENT};
pub use professional::{map_professionals, Professional};
