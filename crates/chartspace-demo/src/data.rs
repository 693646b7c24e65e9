#![forbid(unsafe_code)]

//! Sample chart data for the demo patient.

use std::collections::BTreeMap;

use chartspace_core::{DefaultTabSets, TabEntry};
use chartspace_timeline::{
    Category, EventSources, FlowsheetEntry, FlowsheetFieldDef, ImagingResult, LabComponent,
    LabResult, NoteRecord, OrderKind, OrderRecord, ProviderDirectory,
};

/// What a tab shows; looked up by tab name in the view's directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabKind {
    ChartReview,
    Timeline,
    Notes,
    Orders,
    Flowsheets,
    Allergies,
    GrowthChart,
    EventDetail,
}

/// The whole in-memory chart for the demo patient.
pub struct ChartData {
    pub patient_name: String,
    pub patient_id: String,
    pub encounter_id: String,
    pub labs: Vec<LabResult>,
    pub imaging: Vec<ImagingResult>,
    pub notes: Vec<NoteRecord>,
    pub flowsheets: Vec<FlowsheetEntry>,
    pub field_defs: Vec<FlowsheetFieldDef>,
    pub orders: Vec<OrderRecord>,
    pub providers: ProviderDirectory,
}

impl ChartData {
    /// Borrowed view for the aggregator.
    #[must_use]
    pub fn sources(&self) -> EventSources<'_> {
        EventSources {
            labs: &self.labs,
            imaging: &self.imaging,
            notes: &self.notes,
            flowsheets: &self.flowsheets,
            orders: &self.orders,
            providers: &self.providers,
            field_defs: &self.field_defs,
        }
    }
}

/// Initial tab configuration for the demo workspace.
#[must_use]
pub fn default_tabs() -> DefaultTabSets<TabKind> {
    DefaultTabSets {
        main: vec![
            TabEntry::new("Chart Review", TabKind::ChartReview),
            TabEntry::new("Notes", TabKind::Notes),
            TabEntry::new("Orders", TabKind::Orders),
        ],
        side: vec![
            TabEntry::new("Timeline", TabKind::Timeline),
            TabEntry::new("Flowsheets", TabKind::Flowsheets),
        ],
        overflow_only: vec![
            TabEntry::new("Allergies", TabKind::Allergies),
            TabEntry::new("Growth Chart", TabKind::GrowthChart),
        ],
    }
}

/// Category catalog for the timeline filter panel.
#[must_use]
pub fn category_catalog() -> Vec<Category> {
    vec![
        Category::new("labs", "Labs", "◆", "blue"),
        Category::new("imaging", "Imaging", "◉", "magenta"),
        Category::new("notes", "Notes", "✎", "yellow"),
        Category::new("flowsheets", "Flowsheets", "≡", "cyan"),
        Category::new("orders", "Orders", "⚑", "green"),
        Category::new("orders_med", "Medications", "⚑", "green").child_of("orders"),
        Category::new("orders_lab", "Lab orders", "⚑", "green").child_of("orders"),
        Category::new("orders_imaging", "Imaging orders", "⚑", "green").child_of("orders"),
        Category::new("orders_consult", "Consults", "⚑", "green").child_of("orders"),
    ]
}

fn vitals(hr: &str, bp: &str, temp: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("hr".to_string(), hr.to_string()),
        ("bp".to_string(), bp.to_string()),
        ("temp".to_string(), temp.to_string()),
    ])
}

/// Build the demo chart.
#[must_use]
pub fn sample_chart() -> ChartData {
    ChartData {
        patient_name: "Rivera, Marisol".to_string(),
        patient_id: "mrn-448291".to_string(),
        encounter_id: "enc-2024-0317".to_string(),
        labs: vec![
            LabResult {
                id: "lab-cbc-1".to_string(),
                name: "CBC with Differential".to_string(),
                collected_at: "2024-03-17T06:12:00".to_string(),
                status: "Final".to_string(),
                abnormal: true,
                ordered_by: Some("prov-osei".to_string()),
                components: vec![
                    LabComponent {
                        label: "WBC".to_string(),
                        value: "14.2".to_string(),
                        unit: Some("K/uL".to_string()),
                        flag: Some("H".to_string()),
                    },
                    LabComponent {
                        label: "Hgb".to_string(),
                        value: "12.8".to_string(),
                        unit: Some("g/dL".to_string()),
                        flag: None,
                    },
                    LabComponent {
                        label: "Platelets".to_string(),
                        value: "301".to_string(),
                        unit: Some("K/uL".to_string()),
                        flag: None,
                    },
                ],
            },
            LabResult {
                id: "lab-bmp-1".to_string(),
                name: "Basic Metabolic Panel".to_string(),
                collected_at: "2024-03-17T06:12:00".to_string(),
                status: "Final".to_string(),
                abnormal: false,
                ordered_by: Some("prov-osei".to_string()),
                components: vec![
                    LabComponent {
                        label: "Sodium".to_string(),
                        value: "139".to_string(),
                        unit: Some("mmol/L".to_string()),
                        flag: None,
                    },
                    LabComponent {
                        label: "Creatinine".to_string(),
                        value: "0.7".to_string(),
                        unit: Some("mg/dL".to_string()),
                        flag: None,
                    },
                ],
            },
            LabResult {
                id: "lab-crp-1".to_string(),
                name: "C-Reactive Protein".to_string(),
                collected_at: "2024-03-16T18:40:00".to_string(),
                status: "Final".to_string(),
                abnormal: true,
                ordered_by: Some("prov-tran".to_string()),
                components: vec![LabComponent {
                    label: "CRP".to_string(),
                    value: "8.4".to_string(),
                    unit: Some("mg/dL".to_string()),
                    flag: Some("H".to_string()),
                }],
            },
        ],
        imaging: vec![ImagingResult {
            id: "img-cxr-1".to_string(),
            name: "XR Chest 2 Views".to_string(),
            resulted_at: "2024-03-16T20:05:00".to_string(),
            impression: "Right lower lobe consolidation, consistent with pneumonia.".to_string(),
            modality: Some("XR".to_string()),
            read_by: Some("prov-khan".to_string()),
        }],
        notes: vec![
            NoteRecord {
                id: "note-hp-1".to_string(),
                title: "H&P - Admission".to_string(),
                created_at: "2024-03-16T17:30:00".to_string(),
                author: Some("prov-tran".to_string()),
                body: "8yo previously healthy, 3 days of fever and cough. \
                       Focal crackles RLL. Admitted for community-acquired pneumonia."
                    .to_string(),
            },
            NoteRecord {
                id: "note-prog-1".to_string(),
                title: "Progress Note".to_string(),
                created_at: "2024-03-17T08:15:00".to_string(),
                author: Some("prov-osei".to_string()),
                body: "Afebrile overnight. Breathing comfortably on room air. \
                       Continue ampicillin, anticipate discharge tomorrow."
                    .to_string(),
            },
        ],
        flowsheets: vec![
            FlowsheetEntry {
                recorded_at: "2024-03-17T04:00:00".to_string(),
                recorded_by: Some("prov-ng".to_string()),
                fields: vitals("96", "104/62", "37.1"),
            },
            FlowsheetEntry {
                recorded_at: "2024-03-16T22:00:00".to_string(),
                recorded_by: Some("prov-ng".to_string()),
                fields: vitals("118", "108/66", "38.9"),
            },
        ],
        field_defs: vec![
            FlowsheetFieldDef {
                key: "hr".to_string(),
                label: "Heart rate".to_string(),
            },
            FlowsheetFieldDef {
                key: "bp".to_string(),
                label: "Blood pressure".to_string(),
            },
            FlowsheetFieldDef {
                key: "temp".to_string(),
                label: "Temperature".to_string(),
            },
        ],
        orders: vec![
            OrderRecord {
                id: "ord-amp-1".to_string(),
                name: "Ampicillin 500 mg IV q6h".to_string(),
                placed_at: "2024-03-16T21:10:00".to_string(),
                status: "Active".to_string(),
                kind: OrderKind::Medication,
                ordered_by: Some("prov-tran".to_string()),
            },
            OrderRecord {
                id: "ord-cbc-2".to_string(),
                name: "CBC with Differential - AM draw".to_string(),
                placed_at: "2024-03-16T21:12:00".to_string(),
                status: "Completed".to_string(),
                kind: OrderKind::Lab,
                ordered_by: Some("prov-tran".to_string()),
            },
        ],
        providers: ProviderDirectory::from([
            ("prov-osei".to_string(), "Dr. Osei".to_string()),
            ("prov-tran".to_string(), "Dr. Tran".to_string()),
            ("prov-khan".to_string(), "Dr. Khan".to_string()),
            ("prov-ng".to_string(), "RN Ng".to_string()),
        ]),
    }
}
