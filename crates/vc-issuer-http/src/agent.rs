//! Dispatcher for agent protocol messages sent by holders.
use crate::errors::IssuerHTTPError;
use crate::state::AppState;
use axum::extract::rejection::StringRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use vc_issuer_core::claim::ClaimsService;
use vc_issuer_core::protocol::{AgentRequest, AgentResponse, PackageManager};

/// Reply envelope returned to the holder agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponseBody {
    pub body: Value,
    pub from: String,
    pub to: String,
    pub id: String,
    #[serde(rename = "threadID")]
    pub thread_id: String,
    pub typ: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl AgentResponseBody {
    /// Wraps a handler reply, keeping the request's thread unless the handler started a new one.
    fn new(response: AgentResponse, request_thread_id: String) -> Self {
        let thread_id = if response.thread_id.is_empty() {
            request_thread_id
        } else {
            response.thread_id
        };
        Self {
            body: response.body,
            from: response.from,
            to: response.to,
            id: response.id,
            thread_id,
            typ: response.typ,
            type_: response.type_,
        }
    }
}

/// Unpacks a raw envelope, translates it into an agent request and hands it to the claims
/// service. Every failure along the way is reported as invalid input.
pub async fn dispatch(
    raw: &str,
    media_type: &str,
    package_manager: &PackageManager,
    claims_service: &dyn ClaimsService,
) -> Result<AgentResponseBody, IssuerHTTPError> {
    if raw.trim().is_empty() {
        return Err(IssuerHTTPError::EmptyAgentRequest);
    }
    let message = package_manager.unpack_with_type(media_type, raw.as_bytes())?;
    let request = AgentRequest::new(message)?;
    let thread_id = request.thread_id.clone();
    debug!("Dispatching agent request {} in thread {}", request.id, thread_id);
    let response = claims_service
        .agent(request)
        .await
        .map_err(IssuerHTTPError::AgentHandler)?;
    Ok(AgentResponseBody::new(response, thread_id))
}

/// Handles post request carrying a packed agent message.
pub async fn post_agent(
    State(app_state): State<Arc<AppState>>,
    body: Result<String, StringRejection>,
) -> Result<impl IntoResponse, IssuerHTTPError> {
    let body = body?;
    dispatch(
        &body,
        &app_state.config.agent_media_type,
        &app_state.package_manager,
        app_state.claims_service.as_ref(),
    )
    .await
    .map(|response| (StatusCode::OK, Json(response)))
}
