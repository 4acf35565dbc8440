//! Wire representation of issued credentials.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use vc_issuer_core::claim::{CredentialSchema, W3CCredential};

/// A credential as returned by the claims endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetClaimResponse {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub credential_schema: CredentialSchema,
    pub credential_status: Value,
    pub credential_subject: Map<String, Value>,
    #[serde(rename = "expirationDate", skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance_date: Option<DateTime<Utc>>,
    pub issuer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Value>,
    #[serde(rename = "type")]
    pub type_: Vec<String>,
}

/// Projects a credential onto its wire representation.
pub fn to_get_claim_response(credential: W3CCredential) -> GetClaimResponse {
    GetClaimResponse {
        context: credential.context,
        credential_schema: credential.credential_schema,
        credential_status: credential.credential_status,
        credential_subject: credential.credential_subject,
        expiration: credential.expiration_date,
        id: credential.id,
        issuance_date: credential.issuance_date,
        issuer: credential.issuer,
        proof: credential.proof,
        type_: credential.type_,
    }
}

/// Projects credentials onto their wire representation, preserving order.
pub fn to_get_claims_response(credentials: Vec<W3CCredential>) -> Vec<GetClaimResponse> {
    credentials.into_iter().map(to_get_claim_response).collect()
}
