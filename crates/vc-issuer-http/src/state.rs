use crate::config::HTTPConfig;
use crate::health::HealthChecker;
use std::sync::Arc;
use vc_issuer_core::{
    claim::ClaimsService, identity::IdentityService, protocol::PackageManager,
    publisher::Publisher, schema::SchemaService,
};

/// Collaborators the issuer delegates domain work to.
#[derive(Clone)]
pub struct IssuerServices {
    pub identity_service: Arc<dyn IdentityService>,
    pub claims_service: Arc<dyn ClaimsService>,
    pub schema_service: Arc<dyn SchemaService>,
    pub publisher: Arc<dyn Publisher>,
    pub package_manager: Arc<PackageManager>,
    pub health: Arc<dyn HealthChecker>,
}

/// A shared app state for handlers.
pub struct AppState {
    pub config: HTTPConfig,
    pub identity_service: Arc<dyn IdentityService>,
    pub claims_service: Arc<dyn ClaimsService>,
    pub schema_service: Arc<dyn SchemaService>,
    pub publisher: Arc<dyn Publisher>,
    pub package_manager: Arc<PackageManager>,
    pub health: Arc<dyn HealthChecker>,
}

impl AppState {
    pub fn new(config: HTTPConfig, services: IssuerServices) -> Self {
        Self {
            config,
            identity_service: services.identity_service,
            claims_service: services.claims_service,
            schema_service: services.schema_service,
            publisher: services.publisher,
            package_manager: services.package_manager,
            health: services.health,
        }
    }
}
