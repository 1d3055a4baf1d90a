//! Builders for the HTTP state: the same domain services over either store.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use service_desk::demo_data::DemoData;
use service_desk::domain::ports::{
    ServiceRecordRepository, ServiceRepository, TemplateRepository, UserRepository,
};
use service_desk::domain::{
    ConfigurationService, DirectoryLoginService, RequirementsCatalogue, ServiceDeskService,
    UserDirectoryService,
};
use service_desk::inbound::http::state::{HttpState, HttpStatePorts};
use service_desk::outbound::memory::MemoryStore;
use service_desk::outbound::persistence::{
    DbPool, DieselServiceRecordRepository, DieselServiceRepository, DieselTemplateRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Repository adapters for one store, shared by every domain service.
struct Repositories<S, R, U, T> {
    services: Arc<S>,
    records: Arc<R>,
    users: Arc<U>,
    templates: Arc<T>,
}

fn assemble<S, R, U, T>(
    repos: Repositories<S, R, U, T>,
    shared_password: &str,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    S: ServiceRepository + 'static,
    R: ServiceRecordRepository + 'static,
    U: UserRepository + 'static,
    T: TemplateRepository + 'static,
{
    let Repositories {
        services,
        records,
        users,
        templates,
    } = repos;
    let desk = Arc::new(ServiceDeskService::new(
        services,
        records,
        users.clone(),
        clock,
    ));
    HttpState::new(HttpStatePorts {
        login: Arc::new(DirectoryLoginService::new(users.clone(), shared_password)),
        services: desk.clone(),
        services_query: desk,
        directory: Arc::new(UserDirectoryService::new(users)),
        configuration: Arc::new(ConfigurationService::new(
            Arc::new(RequirementsCatalogue::default()),
            templates,
        )),
    })
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselServiceRepository,
    DieselServiceRecordRepository,
    DieselUserRepository,
    DieselTemplateRepository,
> {
    Repositories {
        services: Arc::new(DieselServiceRepository::new(pool.clone())),
        records: Arc::new(DieselServiceRecordRepository::new(pool.clone())),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        templates: Arc::new(DieselTemplateRepository::new(pool.clone())),
    }
}

fn seeded_memory_store(clock: &dyn Clock) -> std::io::Result<Arc<MemoryStore>> {
    let data = DemoData::build(clock.utc())
        .map_err(|e| std::io::Error::other(format!("demo data is invalid: {e}")))?;
    let store = Arc::new(MemoryStore::new());
    store
        .seed(data)
        .map_err(|e| std::io::Error::other(format!("seeding memory store failed: {e}")))?;
    Ok(store)
}

/// Build the handler state for `config`.
///
/// Uses the Diesel adapters when a pool is configured, otherwise an
/// in-memory store loaded with the demo data set.
///
/// # Errors
/// [`std::io::Error`] when the demo data cannot be loaded into memory.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            assemble(diesel_repositories(pool), &config.shared_password, clock)
        }
        None => {
            info!("no database configured; serving demo data from memory");
            let store = seeded_memory_store(clock.as_ref())?;
            assemble(
                Repositories {
                    services: store.clone(),
                    records: store.clone(),
                    users: store.clone(),
                    templates: store,
                },
                &config.shared_password,
                clock,
            )
        }
    };
    Ok(web::Data::new(state))
}
