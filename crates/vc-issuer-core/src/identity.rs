//! Identity service API.
use crate::did::DID;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error relating to identity management.
#[derive(Error, Debug)]
pub enum IdentityError {
    /// The requested method, blockchain and network do not form a supported DID.
    #[error("wrong DID Metadata")]
    WrongDIDMetadata,
    /// Failure internal to the identity service.
    #[error("{0}")]
    Internal(String),
}

/// Publication status of an identity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateStatus {
    Pending,
    Confirmed,
    Failed,
    Transacted,
}

/// Snapshot of the cryptographic commitments of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityState {
    pub state: Option<String>,
    pub root_of_roots: Option<String>,
    pub claims_tree_root: Option<String>,
    pub revocation_tree_root: Option<String>,
    pub block_timestamp: Option<i64>,
    pub block_number: Option<i64>,
    #[serde(rename = "txID")]
    pub tx_id: Option<String>,
    pub previous_state: Option<String>,
    pub status: StateStatus,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

/// An identity controlled by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub identifier: DID,
    pub state: IdentityState,
}

/// Requested DID method, blockchain and network for a new identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DIDMetadata {
    pub method: String,
    pub blockchain: String,
    pub network: String,
}

/// Creates and lists the identities managed by the issuer.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates an identity, returning its DID and genesis state. `host_url` is the public base
    /// URL embedded in credential status endpoints.
    async fn create(
        &self,
        metadata: &DIDMetadata,
        host_url: &str,
    ) -> Result<Identity, IdentityError>;

    /// Lists identities managed by the issuer.
    async fn list(&self) -> Result<Vec<DID>, IdentityError>;
}
