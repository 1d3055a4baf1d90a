//! Work records attached to a service and administrator document templates.
//!
//! Documents, inspections, and evidences are written by the assigned employee
//! while the service is `IN_PROGRESS` and are read-only for everybody else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{ServiceId, UserId};

/// Maximum characters in a short label such as a document name.
pub const LABEL_MAX: usize = 200;
/// Maximum characters in free text such as inspection notes.
pub const TEXT_MAX: usize = 4000;
/// Maximum characters in a URL.
pub const URL_MAX: usize = 2048;

/// Validation errors for record drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be an http or https URL")]
    InvalidUrl { field: &'static str },
}

impl RecordValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field } | Self::TooLong { field, .. } | Self::InvalidUrl { field } => {
                field
            }
        }
    }
}

fn text(field: &'static str, raw: &str, max: usize) -> Result<String, RecordValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RecordValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(RecordValidationError::TooLong { field, max });
    }
    Ok(value.to_owned())
}

fn url(field: &'static str, raw: &str) -> Result<String, RecordValidationError> {
    let value = text(field, raw, URL_MAX)?;
    let has_host = ["https://", "http://"]
        .iter()
        .find_map(|scheme| value.strip_prefix(scheme))
        .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'));
    if has_host {
        Ok(value)
    } else {
        Err(RecordValidationError::InvalidUrl { field })
    }
}

/// Document attached to a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub service_id: ServiceId,
    #[schema(example = "Signed work order")]
    pub name: String,
    #[schema(example = "https://files.example.com/work-order.pdf")]
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Inspection carried out during a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub service_id: ServiceId,
    #[schema(example = "Gas line pressure checked at the meter")]
    pub notes: String,
    #[schema(example = "PASSED")]
    pub result: String,
    pub created_at: DateTime<Utc>,
}

/// Evidence such as a photo of completed work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    pub id: Uuid,
    #[schema(value_type = String)]
    pub service_id: ServiceId,
    #[schema(example = "Photo of the repaired valve")]
    pub description: String,
    #[schema(example = "https://files.example.com/valve.jpg")]
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Template an administrator keeps for generating documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTemplate {
    pub id: Uuid,
    #[schema(example = "Installation certificate")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String)]
    pub user_id: UserId,
}

/// Every record attached to one service, oldest first within each list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRecords {
    pub documents: Vec<Document>,
    pub inspections: Vec<Inspection>,
    pub evidences: Vec<Evidence>,
}

/// Validated input for a new child record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDraft {
    Document { name: String, url: String },
    Inspection { notes: String, result: String },
    Evidence { description: String, url: String },
}

impl RecordDraft {
    pub fn document(name: &str, link: &str) -> Result<Self, RecordValidationError> {
        Ok(Self::Document {
            name: text("name", name, LABEL_MAX)?,
            url: url("url", link)?,
        })
    }

    pub fn inspection(notes: &str, result: &str) -> Result<Self, RecordValidationError> {
        Ok(Self::Inspection {
            notes: text("notes", notes, TEXT_MAX)?,
            result: text("result", result, LABEL_MAX)?,
        })
    }

    pub fn evidence(description: &str, link: &str) -> Result<Self, RecordValidationError> {
        Ok(Self::Evidence {
            description: text("description", description, TEXT_MAX)?,
            url: url("url", link)?,
        })
    }

    /// Materialise the draft as a stored record of `service_id`.
    pub fn into_record(self, id: Uuid, service_id: ServiceId, created_at: DateTime<Utc>) -> ServiceRecord {
        match self {
            Self::Document { name, url } => ServiceRecord::Document(Document {
                id,
                service_id,
                name,
                url,
                created_at,
            }),
            Self::Inspection { notes, result } => ServiceRecord::Inspection(Inspection {
                id,
                service_id,
                notes,
                result,
                created_at,
            }),
            Self::Evidence { description, url } => ServiceRecord::Evidence(Evidence {
                id,
                service_id,
                description,
                url,
                created_at,
            }),
        }
    }
}

/// A stored child record of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRecord {
    Document(Document),
    Inspection(Inspection),
    Evidence(Evidence),
}

impl ServiceRecord {
    pub fn service_id(&self) -> ServiceId {
        match self {
            Self::Document(record) => record.service_id,
            Self::Inspection(record) => record.service_id,
            Self::Evidence(record) => record.service_id,
        }
    }
}
