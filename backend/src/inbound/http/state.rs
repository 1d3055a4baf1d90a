//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ConfigurationQuery, LoginService, ServiceDeskCommand, ServiceDeskQuery, UserDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub services: Arc<dyn ServiceDeskCommand>,
    pub services_query: Arc<dyn ServiceDeskQuery>,
    pub directory: Arc<dyn UserDirectory>,
    pub configuration: Arc<dyn ConfigurationQuery>,
}

/// Parameter object for [`HttpState::new`].
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub services: Arc<dyn ServiceDeskCommand>,
    pub services_query: Arc<dyn ServiceDeskQuery>,
    pub directory: Arc<dyn UserDirectory>,
    pub configuration: Arc<dyn ConfigurationQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use service_desk::domain::{
    ///     ConfigurationService, DirectoryLoginService, RequirementsCatalogue,
    ///     ServiceDeskService, UserDirectoryService, DEFAULT_SHARED_PASSWORD,
    /// };
    /// use service_desk::inbound::http::state::{HttpState, HttpStatePorts};
    /// use service_desk::outbound::memory::MemoryStore;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let desk = Arc::new(ServiceDeskService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     Arc::new(mockable::DefaultClock),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: Arc::new(DirectoryLoginService::new(store.clone(), DEFAULT_SHARED_PASSWORD)),
    ///     services: desk.clone(),
    ///     services_query: desk,
    ///     directory: Arc::new(UserDirectoryService::new(store.clone())),
    ///     configuration: Arc::new(ConfigurationService::new(
    ///         Arc::new(RequirementsCatalogue::default()),
    ///         store,
    ///     )),
    /// });
    /// # let _ = state;
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            services,
            services_query,
            directory,
            configuration,
        } = ports;
        Self {
            login,
            services,
            services_query,
            directory,
            configuration,
        }
    }
}
