//! PostgreSQL-backed `ServiceRecordRepository`.
//!
//! Each record kind lives in its own table; listings return each kind in
//! creation order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ServiceRecordRepository, ServiceRecordRepositoryError};
use crate::domain::{Document, Evidence, Inspection, ServiceId, ServiceRecord, ServiceRecords};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DocumentRow, EvidenceRow, InspectionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{service_documents, service_evidences, service_inspections};

/// Diesel implementation of [`ServiceRecordRepository`].
#[derive(Clone)]
pub struct DieselServiceRecordRepository {
    pool: DbPool,
}

impl DieselServiceRecordRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ServiceRecordRepositoryError {
    map_pool_error(error, ServiceRecordRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> ServiceRecordRepositoryError {
    map_diesel_error(
        error,
        ServiceRecordRepositoryError::query,
        ServiceRecordRepositoryError::connection,
    )
}

impl From<&Document> for DocumentRow {
    fn from(doc: &Document) -> Self {
        Self {
            id: doc.id,
            service_id: *doc.service_id.as_uuid(),
            name: doc.name.clone(),
            url: doc.url.clone(),
            created_at: doc.created_at,
        }
    }
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            service_id: ServiceId::from_uuid(row.service_id),
            name: row.name,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

impl From<&Inspection> for InspectionRow {
    fn from(inspection: &Inspection) -> Self {
        Self {
            id: inspection.id,
            service_id: *inspection.service_id.as_uuid(),
            notes: inspection.notes.clone(),
            result: inspection.result.clone(),
            created_at: inspection.created_at,
        }
    }
}

impl From<InspectionRow> for Inspection {
    fn from(row: InspectionRow) -> Self {
        Self {
            id: row.id,
            service_id: ServiceId::from_uuid(row.service_id),
            notes: row.notes,
            result: row.result,
            created_at: row.created_at,
        }
    }
}

impl From<&Evidence> for EvidenceRow {
    fn from(evidence: &Evidence) -> Self {
        Self {
            id: evidence.id,
            service_id: *evidence.service_id.as_uuid(),
            description: evidence.description.clone(),
            url: evidence.url.clone(),
            created_at: evidence.created_at,
        }
    }
}

impl From<EvidenceRow> for Evidence {
    fn from(row: EvidenceRow) -> Self {
        Self {
            id: row.id,
            service_id: ServiceId::from_uuid(row.service_id),
            description: row.description,
            url: row.url,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ServiceRecordRepository for DieselServiceRecordRepository {
    async fn insert(&self, record: &ServiceRecord) -> Result<(), ServiceRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let inserted = match record {
            ServiceRecord::Document(doc) => {
                diesel::insert_into(service_documents::table)
                    .values(DocumentRow::from(doc))
                    .execute(&mut conn)
                    .await
            }
            ServiceRecord::Inspection(inspection) => {
                diesel::insert_into(service_inspections::table)
                    .values(InspectionRow::from(inspection))
                    .execute(&mut conn)
                    .await
            }
            ServiceRecord::Evidence(evidence) => {
                diesel::insert_into(service_evidences::table)
                    .values(EvidenceRow::from(evidence))
                    .execute(&mut conn)
                    .await
            }
        };
        inserted.map(|_| ()).map_err(diesel_error)
    }

    async fn list_for_service(
        &self,
        service_id: &ServiceId,
    ) -> Result<ServiceRecords, ServiceRecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id = *service_id.as_uuid();

        let documents: Vec<DocumentRow> = service_documents::table
            .filter(service_documents::service_id.eq(id))
            .order((service_documents::created_at.asc(), service_documents::id.asc()))
            .select(DocumentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let inspections: Vec<InspectionRow> = service_inspections::table
            .filter(service_inspections::service_id.eq(id))
            .order((
                service_inspections::created_at.asc(),
                service_inspections::id.asc(),
            ))
            .select(InspectionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let evidences: Vec<EvidenceRow> = service_evidences::table
            .filter(service_evidences::service_id.eq(id))
            .order((service_evidences::created_at.asc(), service_evidences::id.asc()))
            .select(EvidenceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(ServiceRecords {
            documents: documents.into_iter().map(Document::from).collect(),
            inspections: inspections.into_iter().map(Inspection::from).collect(),
            evidences: evidences.into_iter().map(Evidence::from).collect(),
        })
    }
}
