#![forbid(unsafe_code)]

//! Source record collections supplied by the hosting screen.
//!
//! The aggregator consumes these as already-resolved, fully in-memory
//! data. The lookup tables (provider directory, flowsheet field
//! definitions) are used only for display-label resolution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Provider id → display name.
pub type ProviderDirectory = BTreeMap<String, String>;

/// One component of a lab panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabComponent {
    /// Component label, e.g. `"WBC"`.
    pub label: String,
    /// Result value.
    pub value: String,
    /// Unit, when applicable.
    pub unit: Option<String>,
    /// Abnormality flag, e.g. `"H"`/`"L"`.
    pub flag: Option<String>,
}

/// A resulted lab panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabResult {
    pub id: String,
    pub name: String,
    /// Collection timestamp (ISO-ish).
    pub collected_at: String,
    /// Result status, e.g. `"Final"`.
    pub status: String,
    /// Whether any component is out of range.
    pub abnormal: bool,
    /// Ordering provider id.
    pub ordered_by: Option<String>,
    pub components: Vec<LabComponent>,
}

/// A resulted imaging study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagingResult {
    pub id: String,
    pub name: String,
    pub resulted_at: String,
    /// Radiologist impression line.
    pub impression: String,
    pub modality: Option<String>,
    /// Reading provider id.
    pub read_by: Option<String>,
}

/// A signed clinical note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: String,
    pub title: String,
    pub created_at: String,
    /// Authoring provider id.
    pub author: Option<String>,
    pub body: String,
}

/// One flowsheet row: a timestamp plus raw field key/value pairs.
///
/// The raw map may carry metadata keys (`id`, `recorded_at`,
/// `recorded_by`) alongside data fields; the aggregator skips those when
/// building sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowsheetEntry {
    pub recorded_at: String,
    pub recorded_by: Option<String>,
    /// Raw field key → recorded value.
    pub fields: BTreeMap<String, String>,
}

/// Display-label definition for one flowsheet field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowsheetFieldDef {
    /// Raw field key, e.g. `"hr"`.
    pub key: String,
    /// Display label, e.g. `"Heart rate"`.
    pub label: String,
}

/// What kind of order was placed; determines the child category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    Medication,
    Lab,
    Imaging,
    Consult,
}

impl OrderKind {
    /// Two-level category tag for this kind, under the `orders` parent.
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            Self::Medication => "orders_med",
            Self::Lab => "orders_lab",
            Self::Imaging => "orders_imaging",
            Self::Consult => "orders_consult",
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub name: String,
    pub placed_at: String,
    /// Order status, e.g. `"Active"`.
    pub status: String,
    pub kind: OrderKind,
    /// Ordering provider id.
    pub ordered_by: Option<String>,
}

/// Borrowed view over every source collection the aggregator reads.
#[derive(Debug, Clone, Copy)]
pub struct EventSources<'a> {
    pub labs: &'a [LabResult],
    pub imaging: &'a [ImagingResult],
    pub notes: &'a [NoteRecord],
    pub flowsheets: &'a [FlowsheetEntry],
    pub orders: &'a [OrderRecord],
    /// Provider id → display name.
    pub providers: &'a ProviderDirectory,
    /// Flowsheet field key → display label.
    pub field_defs: &'a [FlowsheetFieldDef],
}
