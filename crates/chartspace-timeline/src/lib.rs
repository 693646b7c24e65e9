#![forbid(unsafe_code)]

//! Chronological event log for chartspace.
//!
//! # Role in chartspace
//! Merges heterogeneous clinical record collections (labs, imaging,
//! notes, flowsheet entries, and orders) into one normalized, descending
//! chronological event list, grouped by calendar date and filterable by a
//! two-level category hierarchy.
//!
//! # This crate provides
//! - [`Event`] / [`SubItem`]: the normalized display-ready record shape.
//! - Source record types and [`EventSources`], the consumer-supplied
//!   already-resolved collections plus display-label lookup tables.
//! - [`aggregate`], [`filter_events`], and [`group_by_date`]: the
//!   merge → filter → bucket pipeline, recomputed from sources on demand.
//! - [`Category`], [`CategoryFilter`], and [`TriState`]: hierarchical
//!   category selection with functionally derived indeterminate state.
//!
//! The aggregator never fetches or caches anything itself; it operates on
//! fully in-memory collections owned by the caller.

pub mod aggregate;
pub mod category;
pub mod event;
pub mod sources;

pub use aggregate::{DateBucket, aggregate, filter_events, group_by_date, parse_timestamp};
pub use category::{Category, CategoryFilter, TriState};
pub use event::{Event, SubItem};
pub use sources::{
    EventSources, FlowsheetEntry, FlowsheetFieldDef, ImagingResult, LabComponent, LabResult,
    NoteRecord, OrderKind, OrderRecord, ProviderDirectory,
};
