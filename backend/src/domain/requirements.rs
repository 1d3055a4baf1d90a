//! Required documents and inspections per service type.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

/// What an employee must file before a service of some type is complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[schema(example = json!(["Work order", "Installation certificate"]))]
    pub required_documents: Vec<String>,
    #[schema(example = json!(["Leak test"]))]
    pub required_inspections: Vec<String>,
}

impl Requirements {
    fn from_lists(documents: &[&str], inspections: &[&str]) -> Self {
        Self {
            required_documents: documents.iter().map(|s| (*s).to_owned()).collect(),
            required_inspections: inspections.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    pub fn total_required(&self) -> usize {
        self.required_documents.len() + self.required_inspections.len()
    }
}

/// Lookup table from service type to [`Requirements`].
///
/// Keys are matched case-insensitively after trimming. Unknown service types
/// have no requirements.
#[derive(Debug, Clone)]
pub struct RequirementsCatalogue {
    entries: HashMap<String, Requirements>,
}

impl RequirementsCatalogue {
    pub fn new(entries: impl IntoIterator<Item = (String, Requirements)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (normalise(&key), value))
                .collect(),
        }
    }

    pub fn requirements_for(&self, service_type: &str) -> Requirements {
        self.entries
            .get(&normalise(service_type))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for RequirementsCatalogue {
    fn default() -> Self {
        let entries = [
            (
                "installation",
                Requirements::from_lists(
                    &["Work order", "Installation certificate", "Client ID copy"],
                    &["Pre-installation survey", "Leak test"],
                ),
            ),
            (
                "maintenance",
                Requirements::from_lists(&["Work order", "Maintenance report"], &["Safety check"]),
            ),
            (
                "repair",
                Requirements::from_lists(
                    &["Work order", "Repair report"],
                    &["Damage assessment", "Post-repair test"],
                ),
            ),
            (
                "inspection",
                Requirements::from_lists(
                    &["Inspection certificate"],
                    &["Visual inspection", "Pressure test", "Ventilation check"],
                ),
            ),
        ];
        Self::new(entries.map(|(key, value)| (key.to_owned(), value)))
    }
}

fn normalise(service_type: &str) -> String {
    service_type.trim().to_lowercase()
}
