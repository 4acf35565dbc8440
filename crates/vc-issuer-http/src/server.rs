use crate::config::HTTPConfig;
use crate::state::{AppState, IssuerServices};
use crate::{
    agent, claims::IssuerClaimsHTTPHandler, health, identity::IssuerIdentityHTTPHandler, publish,
    revocation, static_handlers,
};
use axum::routing::{get, post, IntoMakeService};
use axum::Router;
use hyper::server::conn::AddrIncoming;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct IssuerRouter {
    router: Router,
}

impl From<Arc<AppState>> for IssuerRouter {
    fn from(app_state: Arc<AppState>) -> Self {
        Self {
            router: Self::generate_router(app_state),
        }
    }
}

impl IssuerRouter {
    /// Constructs the router of all issuer routes over a shared state.
    fn generate_router(shared_state: Arc<AppState>) -> Router {
        Router::new()
            .route("/status", get(health::get_health))
            .route("/", get(static_handlers::documentation))
            .route("/static/docs/api/api.yaml", get(static_handlers::api_spec))
            .route(
                "/v1/identities",
                post(IssuerIdentityHTTPHandler::post_identity)
                    .get(IssuerIdentityHTTPHandler::get_identities),
            )
            .route(
                "/v1/:identifier/claims",
                post(IssuerClaimsHTTPHandler::post_claim)
                    .get(IssuerClaimsHTTPHandler::get_claims_by_filter),
            )
            .route(
                "/v1/:identifier/claims/:id",
                get(IssuerClaimsHTTPHandler::get_claim_by_id),
            )
            .route(
                "/v1/:identifier/claims/revoke/:nonce",
                post(IssuerClaimsHTTPHandler::post_revoke),
            )
            .route(
                "/v1/:identifier/claims/revocation/status/:nonce",
                get(revocation::get_revocation_status),
            )
            .route(
                "/v1/:identifier/state/publish",
                post(publish::post_publish_state),
            )
            .route("/v1/agent", post(agent::post_agent))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(shared_state)
    }

    /// Moves wrapped app router and consumes.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Builds an issuer server bound to the configured address.
pub fn server(
    config: HTTPConfig,
    services: IssuerServices,
) -> axum::Server<AddrIncoming, IntoMakeService<Router>> {
    let addr = config.to_socket_address();
    let shared_state = Arc::new(AppState::new(config, services));
    let app = IssuerRouter::from(shared_state).into_router();
    axum::Server::bind(&addr).serve(app.into_make_service())
}

/// Runs an issuer server until it fails.
pub async fn http_server(config: HTTPConfig, services: IssuerServices) -> hyper::Result<()> {
    info!("Starting issuer server at {}", config.to_socket_address());
    server(config, services).await
}
