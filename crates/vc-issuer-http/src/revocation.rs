//! Assembly of revocation status responses from Merkle proof primitives.
use crate::errors::IssuerHTTPError;
use crate::state::AppState;
use crate::validation::{parse_did, parse_nonce};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vc_issuer_core::claim::{ClaimsService, IssuerState, RevocationStatus};
use vc_issuer_core::merkle::{Hash, MerkleError, NodeAux};

/// Wire form of a sparse Merkle tree proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mtp {
    pub existence: bool,
    /// Full sibling path, one hash per level, in tree order.
    pub siblings: Vec<Hash>,
    /// Leaf occupying the slot of the queried key in a non-membership proof.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub node_aux: Option<NodeAux>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationStatusResponse {
    pub issuer: IssuerState,
    pub mtp: Mtp,
}

/// Assembles the wire revocation status. Issuer roots are copied verbatim and the siblings keep
/// the order of the expanded proof path. The aux node is only carried by non-membership proofs.
pub fn assemble(status: RevocationStatus) -> Result<RevocationStatusResponse, MerkleError> {
    let siblings = status.mtp.all_siblings()?;
    let node_aux = match status.mtp.existence {
        true => None,
        false => status.mtp.node_aux,
    };
    Ok(RevocationStatusResponse {
        issuer: status.issuer,
        mtp: Mtp {
            existence: status.mtp.existence,
            siblings,
            node_aux,
        },
    })
}

/// Computes the revocation status of a nonce for an issuer.
pub async fn revocation_status(
    identifier: &str,
    nonce: &str,
    claims_service: &dyn ClaimsService,
) -> Result<RevocationStatusResponse, IssuerHTTPError> {
    let did = parse_did(identifier)?;
    let nonce = parse_nonce(nonce)?;
    let status = claims_service.get_revocation_status(&did, nonce).await?;
    Ok(assemble(status)?)
}

/// Handles get request for the revocation status of a nonce.
pub async fn get_revocation_status(
    Path((identifier, nonce)): Path<(String, String)>,
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    debug!("Received revocation status request of nonce {} for {}", nonce, identifier);
    revocation_status(&identifier, &nonce, app_state.claims_service.as_ref())
        .await
        .map(|status| (StatusCode::OK, Json(status)))
}
