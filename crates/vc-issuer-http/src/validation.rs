//! Validation of identifiers received from untrusted input.
//!
//! Parsing is purely syntactic and never reaches a collaborator.
use crate::errors::IssuerHTTPError;
use uuid::Uuid;
use vc_issuer_core::did::DID;

/// Parses a DID, reporting empty input separately from malformed input.
pub fn parse_did(raw: &str) -> Result<DID, IssuerHTTPError> {
    Ok(raw.parse::<DID>()?)
}

/// Parses a claim ID (a UUID).
pub fn parse_claim_id(raw: &str) -> Result<Uuid, IssuerHTTPError> {
    if raw.is_empty() {
        return Err(IssuerHTTPError::EmptyClaimID);
    }
    Uuid::parse_str(raw).map_err(IssuerHTTPError::InvalidClaimID)
}

/// Parses a revocation nonce.
pub fn parse_nonce(raw: &str) -> Result<u64, IssuerHTTPError> {
    if raw.trim().is_empty() {
        return Err(IssuerHTTPError::EmptyNonce);
    }
    raw.parse::<u64>().map_err(IssuerHTTPError::InvalidNonce)
}
