#![forbid(unsafe_code)]

//! Merge heterogeneous clinical records into one chronological event list.
//!
//! The pipeline is `aggregate` (normalize + sort descending) →
//! [`filter_events`] (category selection) → [`group_by_date`] (calendar
//! buckets). Each stage is a pure function over the previous stage's
//! output; the caller memoizes by recomputing only when its source
//! collections change.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDateTime};

use crate::category::CategoryFilter;
use crate::event::{Event, SubItem};
use crate::sources::{EventSources, ProviderDirectory};

/// Bucket key used for events whose timestamp cannot be parsed.
pub const UNKNOWN_DATE_KEY: &str = "Unknown";

/// Flowsheet map keys that are metadata, not recorded data fields.
const FLOWSHEET_METADATA_KEYS: [&str; 3] = ["id", "recorded_at", "recorded_by"];

/// Parse an ISO-ish timestamp.
///
/// Accepts RFC 3339, `%Y-%m-%dT%H:%M:%S`, and `%Y-%m-%dT%H:%M`.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
}

fn resolve_author(providers: &ProviderDirectory, id: Option<&str>) -> String {
    match id {
        // Fall back to the raw id when the directory has no entry.
        Some(id) => providers.get(id).cloned().unwrap_or_else(|| id.to_string()),
        None => String::new(),
    }
}

/// Merge every source collection into one event list, sorted by timestamp
/// descending (most recent first).
///
/// The sort is stable, so events sharing a timestamp keep their insertion
/// order; events with unparseable timestamps order last. Flowsheet entries
/// sharing a timestamp merge into a single event accumulating one
/// label/value sub-item per non-metadata field across the group.
#[must_use]
pub fn aggregate(sources: &EventSources<'_>) -> Vec<Event> {
    let mut events = Vec::with_capacity(
        sources.labs.len()
            + sources.imaging.len()
            + sources.notes.len()
            + sources.flowsheets.len()
            + sources.orders.len(),
    );

    for lab in sources.labs {
        events.push(Event {
            id: format!("lab-{}", lab.id),
            category: "labs".into(),
            title: lab.name.clone(),
            timestamp: lab.collected_at.clone(),
            details: lab.status.clone(),
            tag: lab.abnormal.then(|| "Abnormal".to_string()),
            author: resolve_author(sources.providers, lab.ordered_by.as_deref()),
            sub_items: lab
                .components
                .iter()
                .map(|component| {
                    let mut value = component.value.clone();
                    if let Some(unit) = &component.unit {
                        value.push(' ');
                        value.push_str(unit);
                    }
                    if let Some(flag) = &component.flag {
                        value.push_str(" (");
                        value.push_str(flag);
                        value.push(')');
                    }
                    SubItem::new(component.label.clone(), value)
                })
                .collect(),
        });
    }

    for study in sources.imaging {
        events.push(Event {
            id: format!("imaging-{}", study.id),
            category: "imaging".into(),
            title: study.name.clone(),
            timestamp: study.resulted_at.clone(),
            details: study.impression.clone(),
            tag: None,
            author: resolve_author(sources.providers, study.read_by.as_deref()),
            sub_items: Vec::new(),
        });
    }

    for note in sources.notes {
        events.push(Event {
            id: format!("note-{}", note.id),
            category: "notes".into(),
            title: note.title.clone(),
            timestamp: note.created_at.clone(),
            details: note.body.lines().next().unwrap_or_default().to_string(),
            tag: None,
            author: resolve_author(sources.providers, note.author.as_deref()),
            sub_items: Vec::new(),
        });
    }

    // Flowsheet entries at the same timestamp merge into one event.
    let mut flowsheet_events: Vec<Event> = Vec::new();
    for entry in sources.flowsheets {
        let sub_items: Vec<SubItem> = entry
            .fields
            .iter()
            .filter(|(key, _)| !FLOWSHEET_METADATA_KEYS.contains(&key.as_str()))
            .map(|(key, value)| {
                let label = sources
                    .field_defs
                    .iter()
                    .find(|def| def.key == *key)
                    .map_or_else(|| key.clone(), |def| def.label.clone());
                SubItem::new(label, value.clone())
            })
            .collect();
        match flowsheet_events
            .iter_mut()
            .find(|event| event.timestamp == entry.recorded_at)
        {
            Some(event) => event.sub_items.extend(sub_items),
            None => flowsheet_events.push(Event {
                id: format!("flowsheet-{}", entry.recorded_at),
                category: "flowsheets".into(),
                title: "Flowsheet".into(),
                timestamp: entry.recorded_at.clone(),
                details: String::new(),
                tag: None,
                author: resolve_author(sources.providers, entry.recorded_by.as_deref()),
                sub_items,
            }),
        }
    }
    events.extend(flowsheet_events);

    for order in sources.orders {
        events.push(Event {
            id: format!("order-{}", order.id),
            category: order.kind.category().into(),
            title: order.name.clone(),
            timestamp: order.placed_at.clone(),
            details: order.status.clone(),
            tag: None,
            author: resolve_author(sources.providers, order.ordered_by.as_deref()),
            sub_items: Vec::new(),
        });
    }

    // Descending; `None` (unparseable) sorts after every parsed timestamp.
    events.sort_by_cached_key(|event| Reverse(parse_timestamp(&event.timestamp)));
    tracing::debug!(message = "timeline.aggregate", count = events.len());
    events
}

/// Keep only events passing the category selection.
#[must_use]
pub fn filter_events(events: Vec<Event>, filter: &CategoryFilter) -> Vec<Event> {
    events
        .into_iter()
        .filter(|event| filter.passes(&event.category))
        .collect()
}

/// Events sharing one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    /// Bucket key: `YYYY-MM-DD`, or [`UNKNOWN_DATE_KEY`].
    pub date: String,
    /// Header label, e.g. `"Mar 04, 2024"`.
    pub label: String,
    pub events: Vec<Event>,
}

/// Group a sorted event list by the calendar-date portion of each
/// timestamp.
///
/// Input order is preserved inside buckets, and buckets appear in input
/// order of first occurrence, so descending dates for an [`aggregate`]d
/// list, with the `"Unknown"` bucket last.
#[must_use]
pub fn group_by_date(events: Vec<Event>) -> Vec<DateBucket> {
    let mut buckets: Vec<DateBucket> = Vec::new();
    for event in events {
        let (date, label) = match parse_timestamp(&event.timestamp) {
            Some(parsed) => (
                parsed.format("%Y-%m-%d").to_string(),
                parsed.format("%b %d, %Y").to_string(),
            ),
            None => (UNKNOWN_DATE_KEY.to_string(), "Unknown date".to_string()),
        };
        match buckets.iter_mut().find(|bucket| bucket.date == date) {
            Some(bucket) => bucket.events.push(event),
            None => buckets.push(DateBucket {
                date,
                label,
                events: vec![event],
            }),
        }
    }
    buckets
}
