//! Handlers and trait for creating and listing issuer identities.
use crate::errors::IssuerHTTPError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vc_issuer_core::identity::{DIDMetadata, Identity, IdentityService};

/// Body of an identity creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdentityRequest {
    pub did_metadata: DIDMetadata,
}

/// An HTTP API for managing issuer identities.
#[async_trait]
pub trait IssuerIdentityHTTP {
    /// Creates an identity with the requested DID metadata.
    async fn create_identity(
        request: CreateIdentityRequest,
        server_url: &str,
        identity_service: &dyn IdentityService,
    ) -> Result<Identity, IssuerHTTPError> {
        Ok(identity_service
            .create(&request.did_metadata, server_url)
            .await?)
    }

    /// Lists the DIDs of all identities managed by the issuer.
    async fn list_identities(
        identity_service: &dyn IdentityService,
    ) -> Result<Vec<String>, IssuerHTTPError> {
        Ok(identity_service
            .list()
            .await?
            .iter()
            .map(ToString::to_string)
            .collect())
    }
}

/// Type for implementing the IssuerIdentityHTTP trait that will contain additional handler methods.
pub struct IssuerIdentityHTTPHandler;

#[async_trait]
impl IssuerIdentityHTTP for IssuerIdentityHTTPHandler {}

impl IssuerIdentityHTTPHandler {
    /// Handles post request creating an identity.
    pub async fn post_identity(
        State(app_state): State<Arc<AppState>>,
        request: Result<Json<CreateIdentityRequest>, JsonRejection>,
    ) -> Result<impl IntoResponse, IssuerHTTPError> {
        let Json(request) = request?;
        info!("Received identity request: {:?}", request.did_metadata);
        IssuerIdentityHTTPHandler::create_identity(
            request,
            &app_state.config.server_url,
            app_state.identity_service.as_ref(),
        )
        .await
        .map(|identity| (StatusCode::CREATED, Json(identity)))
    }

    /// Handles get request listing identities.
    pub async fn get_identities(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
        IssuerIdentityHTTPHandler::list_identities(app_state.identity_service.as_ref())
            .await
            .map(|identities| (StatusCode::OK, Json(identities)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ISSUER_DID, TEST_CLAIMS_TREE_ROOT, TEST_STATE, USER_DID};
    use crate::mocks::TestServices;
    use chrono::{TimeZone, Utc};
    use hyper::StatusCode;
    use serde_json::{json, Value};
    use vc_issuer_core::identity::{IdentityError, IdentityState, StateStatus};

    fn genesis_identity() -> Identity {
        let created_at = Utc.with_ymd_and_hms(2023, 5, 22, 10, 0, 0).unwrap();
        Identity {
            identifier: ISSUER_DID.parse().unwrap(),
            state: IdentityState {
                state: Some(TEST_STATE.to_string()),
                root_of_roots: None,
                claims_tree_root: Some(TEST_CLAIMS_TREE_ROOT.to_string()),
                revocation_tree_root: None,
                block_timestamp: None,
                block_number: None,
                tx_id: None,
                previous_state: None,
                status: StateStatus::Confirmed,
                created_at,
                modified_at: created_at,
            },
        }
    }

    #[tokio::test]
    async fn test_post_identity() {
        let mut services = TestServices::new();
        services
            .identity
            .expect_create()
            .withf(|metadata, host_url| {
                metadata.method == "polygonid"
                    && metadata.blockchain == "polygon"
                    && metadata.network == "mumbai"
                    && host_url == "http://localhost:3001"
            })
            .times(1)
            .returning(|_, _| Ok(genesis_identity()));
        let client = services.into_client();
        let response = client
            .post("/v1/identities")
            .json(&json!({
                "didMetadata": {
                    "method": "polygonid",
                    "blockchain": "polygon",
                    "network": "mumbai"
                }
            }))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.json::<Value>().await;
        assert_eq!(body["identifier"], json!(ISSUER_DID));
        assert_eq!(body["state"]["state"], json!(TEST_STATE));
        assert_eq!(body["state"]["status"], json!("confirmed"));
        assert_eq!(body["state"]["txID"], Value::Null);
    }

    #[tokio::test]
    async fn test_post_identity_wrong_metadata() {
        let mut services = TestServices::new();
        services
            .identity
            .expect_create()
            .returning(|_, _| Err(IdentityError::WrongDIDMetadata));
        let client = services.into_client();
        let response = client
            .post("/v1/identities")
            .json(&json!({
                "didMetadata": {
                    "method": "polygonid",
                    "blockchain": "bitcoin",
                    "network": "mumbai"
                }
            }))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>().await,
            json!({"message": "wrong DID Metadata"})
        );
    }

    #[tokio::test]
    async fn test_post_identity_malformed_body() {
        let client = TestServices::new().into_client();
        let response = client
            .post("/v1/identities")
            .json(&json!({"didMetadata": {"method": "polygonid"}}))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = response.json::<Value>().await["message"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(message.starts_with("invalid request body:"));
    }

    #[tokio::test]
    async fn test_get_identities() {
        let mut services = TestServices::new();
        services.identity.expect_list().times(1).returning(|| {
            Ok(vec![
                ISSUER_DID.parse().unwrap(),
                USER_DID.parse().unwrap(),
            ])
        });
        let client = services.into_client();
        let response = client.get("/v1/identities").send().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.json::<Vec<String>>().await,
            vec![ISSUER_DID.to_string(), USER_DID.to_string()]
        );
    }

    #[tokio::test]
    async fn test_get_identities_internal_error() {
        let mut services = TestServices::new();
        services
            .identity
            .expect_list()
            .returning(|| Err(IdentityError::Internal("storage unavailable".to_string())));
        let client = services.into_client();
        let response = client.get("/v1/identities").send().await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>().await,
            json!({"message": "storage unavailable"})
        );
    }
}
