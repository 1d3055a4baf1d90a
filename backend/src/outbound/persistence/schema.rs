//! Diesel table definitions.
//!
//! Keep in step with `backend/migrations`. Enumerated columns (`role`,
//! `status`) are stored as text and constrained by `CHECK`s in the migration.

diesel::table! {
    /// Accounts for every role.
    users (id) {
        id -> Uuid,
        /// `ADMINISTRADOR`, `EMPLEADO`, or `CLIENTE`.
        role -> Varchar,
        name -> Varchar,
        /// Lower-cased; unique.
        email -> Varchar,
        phone -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Service requests and their workflow status.
    services (id) {
        id -> Uuid,
        client_id -> Uuid,
        /// Null exactly while `status = 'PENDING'`.
        employee_id -> Nullable<Uuid>,
        status -> Varchar,
        service_type -> Varchar,
        start_date -> Timestamptz,
        /// Set exactly when `status = 'COMPLETED'`.
        completed_at -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    service_documents (id) {
        id -> Uuid,
        service_id -> Uuid,
        name -> Varchar,
        url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    service_inspections (id) {
        id -> Uuid,
        service_id -> Uuid,
        notes -> Text,
        result -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    service_evidences (id) {
        id -> Uuid,
        service_id -> Uuid,
        description -> Text,
        url -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Administrator-owned document templates.
    document_templates (id) {
        id -> Uuid,
        name -> Varchar,
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(service_documents -> services (service_id));
diesel::joinable!(service_inspections -> services (service_id));
diesel::joinable!(service_evidences -> services (service_id));
diesel::joinable!(document_templates -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    services,
    service_documents,
    service_inspections,
    service_evidences,
    document_templates,
);
