//! Triggering publication of an identity's pending state.
use crate::errors::IssuerHTTPError;
use crate::state::AppState;
use crate::validation::parse_did;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::info;
use serde_json::json;
use std::sync::Arc;
use vc_issuer_core::publisher::{PublishedState, Publisher, PublisherError};

/// Result of a publication request that is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// A new state was submitted.
    Published(PublishedState),
    /// The identity has no pending state.
    NothingToPublish(String),
    /// A publication for the identity is already in progress.
    AlreadyInFlight(String),
}

impl IntoResponse for PublishOutcome {
    fn into_response(self) -> Response {
        match self {
            PublishOutcome::Published(state) => (StatusCode::ACCEPTED, Json(state)).into_response(),
            PublishOutcome::NothingToPublish(message) | PublishOutcome::AlreadyInFlight(message) => {
                (StatusCode::OK, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}

/// Publishes the pending state of an identity. Serializing concurrent publications is left to
/// the publisher, whose conflict errors are reported as outcomes rather than failures.
pub async fn publish_state(
    identifier: &str,
    publisher: &dyn Publisher,
) -> Result<PublishOutcome, IssuerHTTPError> {
    let did = parse_did(identifier)?;
    match publisher.publish_state(&did).await {
        Ok(state) => Ok(PublishOutcome::Published(state)),
        Err(err @ PublisherError::NoStatesToProcess) => {
            Ok(PublishOutcome::NothingToPublish(err.to_string()))
        }
        Err(err @ PublisherError::StateIsBeingProcessed) => {
            Ok(PublishOutcome::AlreadyInFlight(err.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

/// Handles post request publishing an identity's state.
pub async fn post_publish_state(
    Path(identifier): Path<String>,
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    info!("Received state publication request for {}", identifier);
    publish_state(&identifier, app_state.publisher.as_ref()).await
}
