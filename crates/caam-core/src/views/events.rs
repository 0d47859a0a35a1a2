use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::ImmersionEvent;

/// Events split around "now" for the immersion page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventSchedule {
    /// Soonest upcoming event, featured on its own.
    #[serde(rename = "nextEvent")]
    pub next_event: Option<ImmersionEvent>,
    /// Remaining upcoming events, soonest first. Never contains `next_event`.
    #[serde(rename = "upcomingEvents")]
    pub upcoming: Vec<ImmersionEvent>,
    /// Past events, most recent first.
    #[serde(rename = "pastEvents")]
    pub past: Vec<ImmersionEvent>,
}

fn dated(events: &[ImmersionEvent]) -> Vec<(DateTime<Utc>, &ImmersionEvent)> {
    events
        .iter()
        .filter_map(|event| match event.parsed_date() {
            Some(date) => Some((date, event)),
            None => {
                warn!(id = %event.id, date = %event.date, "Event date not recognized, leaving it off the schedule");
                None
            }
        })
        .collect()
}

impl EventSchedule {
    /// Partition `events` around `now`. Events on or after `now` are
    /// upcoming. Equal dates keep their source order. Events whose date
    /// does not parse appear in neither list.
    pub fn partition(events: &[ImmersionEvent], now: DateTime<Utc>) -> Self {
        let dated = dated(events);

        let mut upcoming: Vec<_> = dated.iter().filter(|(date, _)| *date >= now).collect();
        upcoming.sort_by(|a, b| a.0.cmp(&b.0));

        let mut past: Vec<_> = dated.iter().filter(|(date, _)| *date < now).collect();
        past.sort_by(|a, b| b.0.cmp(&a.0));

        let next_event = upcoming.first().map(|(_, event)| (*event).clone());
        let upcoming = match &next_event {
            Some(next) => upcoming
                .iter()
                .filter(|(_, event)| event.id != next.id)
                .map(|(_, event)| (*event).clone())
                .collect(),
            None => Vec::new(),
        };

        Self {
            next_event,
            upcoming,
            past: past.iter().map(|(_, event)| (*event).clone()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.next_event.is_none() && self.upcoming.is_empty() && self.past.is_empty()
    }
}

/// All events for the calendar page, plus a per-day index for the month grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventCalendar {
    /// Every event, oldest first; undated events trail in source order.
    pub events: Vec<ImmersionEvent>,
    /// `YYYY-MM-DD` to the events on that day.
    #[serde(rename = "eventsByDate")]
    pub events_by_date: BTreeMap<String, Vec<ImmersionEvent>>,
}

impl EventCalendar {
    pub fn build(events: &[ImmersionEvent]) -> Self {
        let mut sorted: Vec<(Option<DateTime<Utc>>, &ImmersionEvent)> =
            events.iter().map(|e| (e.parsed_date(), e)).collect();
        // None sorts first for Option, so compare undated as greatest
        sorted.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut events_by_date: BTreeMap<String, Vec<ImmersionEvent>> = BTreeMap::new();
        for (date, event) in &sorted {
            if let Some(date) = date {
                events_by_date
                    .entry(date.format("%Y-%m-%d").to_string())
                    .or_default()
                    .push((*event).clone());
            }
        }

        Self {
            events: sorted.into_iter().map(|(_, e)| e.clone()).collect(),
            events_by_date,
        }
    }

    /// Events on `key` (`YYYY-MM-DD`), empty when none.
    pub fn on_date(&self, key: &str) -> &[ImmersionEvent] {
        self.events_by_date.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}
