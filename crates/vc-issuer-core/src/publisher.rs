//! State publisher API.
use crate::did::DID;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error relating to state publication.
#[derive(Error, Debug)]
pub enum PublisherError {
    /// The identity has no pending state.
    #[error("no states to process")]
    NoStatesToProcess,
    /// A publication for the identity is already in progress.
    #[error("state is being processed")]
    StateIsBeingProcessed,
    #[error("{0}")]
    Internal(String),
}

/// State submitted on chain by a publication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedState {
    #[serde(rename = "txID")]
    pub tx_id: Option<String>,
    pub claims_tree_root: Option<String>,
    pub state: Option<String>,
    pub revocation_tree_root: Option<String>,
    pub root_of_roots: Option<String>,
}

/// Publishes the latest pending state of an identity on chain.
///
/// Implementations own the pending-state queue and serialize concurrent publications of the same
/// identity, reporting [`PublisherError::StateIsBeingProcessed`] to the later caller.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish_state(&self, did: &DID) -> Result<PublishedState, PublisherError>;
}
