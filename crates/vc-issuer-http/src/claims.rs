//! Handlers and trait for issuing, retrieving and revoking claims.
use crate::credential::{to_get_claim_response, to_get_claims_response, GetClaimResponse};
use crate::errors::IssuerHTTPError;
use crate::state::AppState;
use crate::validation::{parse_claim_id, parse_did, parse_nonce};
use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;
use vc_issuer_core::claim::{
    parse_flag, ClaimsError, ClaimsFilter, ClaimsService, CreateClaimRequest,
};
use vc_issuer_core::schema::SchemaService;

/// Body of a claim issuance request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimBody {
    pub credential_schema: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub credential_subject: Map<String, Value>,
    pub expiration: Option<i64>,
    pub version: Option<u32>,
    pub subject_position: Option<String>,
    pub merklized_root_position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateClaimResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Query parameters filtering the claims of an identity. Flags are kept as text so that an empty
/// value reads as absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetClaimsParams {
    pub schema_hash: Option<String>,
    pub schema_type: Option<String>,
    pub subject: Option<String>,
    pub query_field: Option<String>,
    #[serde(rename = "self")]
    pub self_claims: Option<String>,
    pub revoked: Option<String>,
}

/// An HTTP API for the claims of issuer identities.
#[async_trait]
pub trait IssuerClaimsHTTP {
    /// Issues a claim, returning its ID.
    async fn create_claim(
        identifier: &str,
        body: CreateClaimBody,
        claims_service: &dyn ClaimsService,
    ) -> Result<Uuid, IssuerHTTPError>;

    /// Revokes the claim with a given revocation nonce.
    async fn revoke_claim(
        identifier: &str,
        nonce: &str,
        claims_service: &dyn ClaimsService,
    ) -> Result<(), IssuerHTTPError>;

    /// Gets a single credential by claim ID.
    async fn get_claim(
        identifier: &str,
        id: &str,
        claims_service: &dyn ClaimsService,
        schema_service: &dyn SchemaService,
    ) -> Result<GetClaimResponse, IssuerHTTPError>;

    /// Gets the credentials of an identity matching a filter.
    async fn get_claims(
        identifier: &str,
        params: GetClaimsParams,
        claims_service: &dyn ClaimsService,
    ) -> Result<Vec<GetClaimResponse>, IssuerHTTPError>;
}

/// Type for implementing the IssuerClaimsHTTP trait that will contain additional handler methods.
pub struct IssuerClaimsHTTPHandler;

#[async_trait]
impl IssuerClaimsHTTP for IssuerClaimsHTTPHandler {
    async fn create_claim(
        identifier: &str,
        body: CreateClaimBody,
        claims_service: &dyn ClaimsService,
    ) -> Result<Uuid, IssuerHTTPError> {
        let did = parse_did(identifier)?;
        let request = CreateClaimRequest::new(
            did,
            body.credential_schema,
            body.credential_subject,
            body.expiration,
            body.type_,
            body.version,
            body.subject_position.as_deref(),
            body.merklized_root_position.as_deref(),
        )?;
        let claim = claims_service.create_claim(request).await?;
        Ok(claim.id)
    }

    async fn revoke_claim(
        identifier: &str,
        nonce: &str,
        claims_service: &dyn ClaimsService,
    ) -> Result<(), IssuerHTTPError> {
        let did = parse_did(identifier)?;
        let nonce = parse_nonce(nonce)?;
        claims_service
            .revoke(&did, nonce)
            .await
            .map_err(|err| match err {
                ClaimsError::ClaimNotFound | ClaimsError::ClaimDoesNotExist => {
                    IssuerHTTPError::ClaimDoesNotExist
                }
                err => err.into(),
            })
    }

    async fn get_claim(
        identifier: &str,
        id: &str,
        claims_service: &dyn ClaimsService,
        schema_service: &dyn SchemaService,
    ) -> Result<GetClaimResponse, IssuerHTTPError> {
        let did = parse_did(identifier)?;
        let id = parse_claim_id(id)?;
        let claim = claims_service.get_by_id(&did, &id).await?;
        let credential = schema_service.to_w3c_credential(&claim)?;
        Ok(to_get_claim_response(credential))
    }

    async fn get_claims(
        identifier: &str,
        params: GetClaimsParams,
        claims_service: &dyn ClaimsService,
    ) -> Result<Vec<GetClaimResponse>, IssuerHTTPError> {
        let did = parse_did(identifier)?;
        let filter = ClaimsFilter::new(
            params.schema_hash,
            params.schema_type,
            params.subject,
            params.query_field,
            parse_flag("self", params.self_claims)?,
            parse_flag("revoked", params.revoked)?,
        )?;
        let credentials = claims_service.get_all(&did, &filter).await?;
        Ok(to_get_claims_response(credentials))
    }
}

impl IssuerClaimsHTTPHandler {
    /// Handles post request issuing a claim.
    pub async fn post_claim(
        Path(identifier): Path<String>,
        State(app_state): State<Arc<AppState>>,
        body: Result<Json<CreateClaimBody>, JsonRejection>,
    ) -> Result<impl IntoResponse, IssuerHTTPError> {
        let Json(body) = body?;
        info!("Received claim request for {} with schema {}", identifier, body.credential_schema);
        IssuerClaimsHTTPHandler::create_claim(&identifier, body, app_state.claims_service.as_ref())
            .await
            .map(|id| {
                (
                    StatusCode::CREATED,
                    Json(CreateClaimResponse { id: id.to_string() }),
                )
            })
    }

    /// Handles post request revoking a claim by revocation nonce.
    pub async fn post_revoke(
        Path((identifier, nonce)): Path<(String, String)>,
        State(app_state): State<Arc<AppState>>,
    ) -> impl IntoResponse {
        info!("Received revocation of nonce {} for {}", nonce, identifier);
        IssuerClaimsHTTPHandler::revoke_claim(&identifier, &nonce, app_state.claims_service.as_ref())
            .await
            .map(|_| {
                (
                    StatusCode::ACCEPTED,
                    Json(MessageResponse {
                        message: "claim revocation request sent".to_string(),
                    }),
                )
            })
    }

    /// Handles get request for a single claim.
    pub async fn get_claim_by_id(
        Path((identifier, id)): Path<(String, String)>,
        State(app_state): State<Arc<AppState>>,
    ) -> impl IntoResponse {
        debug!("Received claim {} request for {}", id, identifier);
        IssuerClaimsHTTPHandler::get_claim(
            &identifier,
            &id,
            app_state.claims_service.as_ref(),
            app_state.schema_service.as_ref(),
        )
        .await
        .map(|claim| (StatusCode::OK, Json(claim)))
    }

    /// Handles get request for the filtered claims of an identity.
    pub async fn get_claims_by_filter(
        Path(identifier): Path<String>,
        params: Result<Query<GetClaimsParams>, QueryRejection>,
        State(app_state): State<Arc<AppState>>,
    ) -> Result<impl IntoResponse, IssuerHTTPError> {
        let Query(params) = params?;
        debug!("Received claims request for {}: {:?}", identifier, params);
        IssuerClaimsHTTPHandler::get_claims(&identifier, params, app_state.claims_service.as_ref())
            .await
            .map(|claims| (StatusCode::OK, Json(claims)))
    }
}
