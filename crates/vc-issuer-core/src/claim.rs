//! Claims service API: issuance, revocation, retrieval and revocation status of claims.
use crate::did::{DIDError, DID};
use crate::identity::StateStatus;
use crate::merkle::Proof;
use crate::protocol::{AgentRequest, AgentResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// An error relating to the claims service.
#[derive(Error, Debug)]
pub enum ClaimsError {
    /// The JSON-LD context referenced by the schema is not usable.
    #[error("jsonLdContext must be a string")]
    InvalidSchemaContext,
    /// The schema was loaded but could not be processed.
    #[error("cannot process schema")]
    SchemaProcessingFailed,
    /// The schema could not be loaded from its URL.
    #[error("cannot load schema")]
    SchemaLoadFailed,
    #[error("malformed url")]
    MalformedURL,
    #[error("claim not found")]
    ClaimNotFound,
    /// No claim is recorded for the given revocation nonce.
    #[error("claim does not exist")]
    ClaimDoesNotExist,
    /// Failure of the agent protocol handler.
    #[error("{0}")]
    Agent(String),
    /// Failure internal to the claims service.
    #[error("{0}")]
    Internal(String),
}

/// An error relating to malformed claim requests or claim filters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimInputError {
    #[error("self and subject filter can not be used together")]
    SelfAndSubject,
    #[error("invalid subject: {0}")]
    InvalidSubject(DIDError),
    #[error("invalid schema hash: {0}")]
    InvalidSchemaHash(String),
    #[error("invalid {0} position: {1}")]
    InvalidPosition(&'static str, String),
    #[error("credentialSchema must not be empty")]
    EmptySchema,
    #[error("invalid {0} filter: {1}")]
    InvalidFlag(&'static str, String),
}

/// Position of a value inside a claim: unset, in the index slots or in the value slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimPosition {
    #[default]
    Unset,
    Index,
    Value,
}

impl ClaimPosition {
    fn parse(field: &'static str, s: &str) -> Result<Self, ClaimInputError> {
        match s {
            "" => Ok(ClaimPosition::Unset),
            "index" => Ok(ClaimPosition::Index),
            "value" => Ok(ClaimPosition::Value),
            other => Err(ClaimInputError::InvalidPosition(field, other.to_string())),
        }
    }
}

/// Internal claim record held by the claims service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    pub issuer: DID,
    pub schema_hash: String,
    pub schema_url: String,
    pub schema_type: String,
    pub other_identifier: String,
    pub expiration: Option<i64>,
    pub version: u32,
    pub rev_nonce: u64,
    pub revoked: bool,
    /// Serialized W3C credential.
    pub data: Value,
}

/// Reference to the schema of a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSchema {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
}

/// A W3C verifiable credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct W3CCredential {
    pub id: String,
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    #[serde(rename = "type")]
    pub type_: Vec<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub issuance_date: Option<DateTime<Utc>>,
    pub credential_subject: Map<String, Value>,
    pub credential_status: Value,
    pub issuer: String,
    pub credential_schema: CredentialSchema,
    pub proof: Option<Value>,
}

/// Validated request to issue a claim.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateClaimRequest {
    pub did: DID,
    pub schema: String,
    pub credential_subject: Map<String, Value>,
    pub expiration: Option<i64>,
    pub type_: String,
    pub version: Option<u32>,
    pub subject_position: ClaimPosition,
    pub merklized_root_position: ClaimPosition,
}

impl CreateClaimRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        did: DID,
        schema: String,
        credential_subject: Map<String, Value>,
        expiration: Option<i64>,
        type_: String,
        version: Option<u32>,
        subject_position: Option<&str>,
        merklized_root_position: Option<&str>,
    ) -> Result<Self, ClaimInputError> {
        if schema.trim().is_empty() {
            return Err(ClaimInputError::EmptySchema);
        }
        Ok(Self {
            did,
            schema,
            credential_subject,
            expiration,
            type_,
            version,
            subject_position: ClaimPosition::parse("subject", subject_position.unwrap_or(""))?,
            merklized_root_position: ClaimPosition::parse(
                "merklized root",
                merklized_root_position.unwrap_or(""),
            )?,
        })
    }
}

/// Predicates restricting the claims returned for an identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimsFilter {
    pub schema_hash: Option<String>,
    pub schema_type: Option<String>,
    pub subject: Option<DID>,
    pub query_field: Option<String>,
    pub self_claims: Option<bool>,
    pub revoked: Option<bool>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Parses a boolean filter parameter. An empty value is absent.
pub fn parse_flag(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<bool>, ClaimInputError> {
    non_empty(value)
        .map(|s| {
            s.parse::<bool>()
                .map_err(|_| ClaimInputError::InvalidFlag(name, s))
        })
        .transpose()
}

impl ClaimsFilter {
    /// Validates and builds a filter. Empty strings are treated as absent predicates.
    pub fn new(
        schema_hash: Option<String>,
        schema_type: Option<String>,
        subject: Option<String>,
        query_field: Option<String>,
        self_claims: Option<bool>,
        revoked: Option<bool>,
    ) -> Result<Self, ClaimInputError> {
        let subject = non_empty(subject);
        let self_claims = match self_claims {
            Some(true) if subject.is_some() => return Err(ClaimInputError::SelfAndSubject),
            Some(true) => Some(true),
            _ => None,
        };
        let subject = subject
            .map(|s| DID::from_str(&s))
            .transpose()
            .map_err(ClaimInputError::InvalidSubject)?;
        let schema_hash = non_empty(schema_hash);
        if let Some(hash) = &schema_hash {
            hex::decode(hash).map_err(|err| ClaimInputError::InvalidSchemaHash(err.to_string()))?;
        }
        Ok(Self {
            schema_hash,
            schema_type: non_empty(schema_type),
            subject,
            query_field: non_empty(query_field),
            self_claims,
            revoked,
        })
    }
}

/// Issuer roots at the time a revocation status is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerState {
    pub state: Option<String>,
    pub claims_tree_root: Option<String>,
    pub revocation_tree_root: Option<String>,
    pub root_of_roots: Option<String>,
    pub status: Option<StateStatus>,
}

/// Issuer state and the revocation tree proof for a nonce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationStatus {
    pub issuer: IssuerState,
    pub mtp: Proof,
}

/// Issues, revokes and queries the claims of identities.
#[async_trait]
pub trait ClaimsService: Send + Sync {
    /// Issues a claim.
    async fn create_claim(&self, request: CreateClaimRequest) -> Result<Claim, ClaimsError>;

    /// Revokes the claim with the given revocation nonce.
    async fn revoke(&self, did: &DID, nonce: u64) -> Result<(), ClaimsError>;

    /// Computes the revocation status of a nonce against the issuer's current revocation tree.
    async fn get_revocation_status(
        &self,
        did: &DID,
        nonce: u64,
    ) -> Result<RevocationStatus, ClaimsError>;

    async fn get_by_id(&self, did: &DID, id: &Uuid) -> Result<Claim, ClaimsError>;

    /// Returns credentials of an identity matching a filter, in issuance order.
    async fn get_all(
        &self,
        did: &DID,
        filter: &ClaimsFilter,
    ) -> Result<Vec<W3CCredential>, ClaimsError>;

    /// Handles an agent protocol request.
    async fn agent(&self, request: AgentRequest) -> Result<AgentResponse, ClaimsError>;
}
