//! Error type, outcome classification and conversions.
use axum::extract::rejection::{JsonRejection, QueryRejection, StringRejection};
use axum::{response::IntoResponse, Json};
use hyper::StatusCode;
use log::error;
use serde_json::json;
use std::num::ParseIntError;
use thiserror::Error;
use vc_issuer_core::{
    claim::{ClaimInputError, ClaimsError},
    did::DIDError,
    identity::IdentityError,
    merkle::MerkleError,
    protocol::{AgentRequestError, PackerError},
    publisher::PublisherError,
    schema::SchemaError,
};

/// Externally observable class of a failed or short-circuited operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Malformed identifier, claim ID, nonce, filter or envelope.
    InvalidInput,
    /// Well-formed request rejected by a domain rule the caller can correct.
    DomainValidation,
    /// An external resource referenced by the request could not be loaded.
    ResourceUnavailable,
    NotFound,
    /// Nothing to do, or the operation is already in progress.
    Conflict,
    Internal,
}

impl OutcomeKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OutcomeKind::InvalidInput | OutcomeKind::DomainValidation => StatusCode::BAD_REQUEST,
            OutcomeKind::ResourceUnavailable => StatusCode::UNPROCESSABLE_ENTITY,
            OutcomeKind::NotFound => StatusCode::NOT_FOUND,
            OutcomeKind::Conflict => StatusCode::OK,
            OutcomeKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// VC issuer HTTP error type.
#[derive(Error, Debug)]
pub enum IssuerHTTPError {
    #[error("invalid did, can not be empty")]
    EmptyDID,
    #[error("invalid did")]
    InvalidDID(DIDError),
    #[error("can not proceed with an empty claim id")]
    EmptyClaimID,
    #[error("invalid claim id")]
    InvalidClaimID(uuid::Error),
    #[error("can not proceed with an empty nonce")]
    EmptyNonce,
    #[error("invalid nonce")]
    InvalidNonce(ParseIntError),
    #[error("{0}")]
    ClaimInput(ClaimInputError),
    /// Body that could not be read or deserialized into the expected request.
    #[error("invalid request body: {0}")]
    InvalidBody(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("can not proceed with an empty request")]
    EmptyAgentRequest,
    #[error("can not proceed with the given request")]
    Unpack(PackerError),
    #[error("{0}")]
    AgentRequest(AgentRequestError),
    /// Any failure of the agent handler; agent failures are correctable by the holder.
    #[error("{0}")]
    AgentHandler(ClaimsError),
    #[error("{0}")]
    Identity(IdentityError),
    #[error("{0}")]
    Claims(ClaimsError),
    /// Revocation of a nonce with no recorded claim.
    #[error("the claim does not exist")]
    ClaimDoesNotExist,
    #[error("invalid claim format")]
    Schema(SchemaError),
    #[error("{0}")]
    Publisher(PublisherError),
    /// Proof returned by the claims service that does not expand to a full path.
    #[error("invalid revocation proof")]
    Proof(MerkleError),
}

impl From<DIDError> for IssuerHTTPError {
    fn from(err: DIDError) -> Self {
        match err {
            DIDError::Empty => IssuerHTTPError::EmptyDID,
            err => IssuerHTTPError::InvalidDID(err),
        }
    }
}

impl From<ClaimInputError> for IssuerHTTPError {
    fn from(err: ClaimInputError) -> Self {
        IssuerHTTPError::ClaimInput(err)
    }
}

impl From<PackerError> for IssuerHTTPError {
    fn from(err: PackerError) -> Self {
        IssuerHTTPError::Unpack(err)
    }
}

impl From<AgentRequestError> for IssuerHTTPError {
    fn from(err: AgentRequestError) -> Self {
        IssuerHTTPError::AgentRequest(err)
    }
}

impl From<IdentityError> for IssuerHTTPError {
    fn from(err: IdentityError) -> Self {
        IssuerHTTPError::Identity(err)
    }
}

impl From<ClaimsError> for IssuerHTTPError {
    fn from(err: ClaimsError) -> Self {
        IssuerHTTPError::Claims(err)
    }
}

impl From<SchemaError> for IssuerHTTPError {
    fn from(err: SchemaError) -> Self {
        IssuerHTTPError::Schema(err)
    }
}

impl From<PublisherError> for IssuerHTTPError {
    fn from(err: PublisherError) -> Self {
        IssuerHTTPError::Publisher(err)
    }
}

impl From<MerkleError> for IssuerHTTPError {
    fn from(err: MerkleError) -> Self {
        IssuerHTTPError::Proof(err)
    }
}

impl From<JsonRejection> for IssuerHTTPError {
    fn from(rejection: JsonRejection) -> Self {
        IssuerHTTPError::InvalidBody(rejection.body_text())
    }
}

impl From<StringRejection> for IssuerHTTPError {
    fn from(rejection: StringRejection) -> Self {
        IssuerHTTPError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for IssuerHTTPError {
    fn from(rejection: QueryRejection) -> Self {
        IssuerHTTPError::InvalidQuery(rejection.body_text())
    }
}

impl IssuerHTTPError {
    /// Classifies the error. The message is the error's own display text.
    pub fn outcome(&self) -> (OutcomeKind, String) {
        let kind = match self {
            IssuerHTTPError::EmptyDID
            | IssuerHTTPError::InvalidDID(_)
            | IssuerHTTPError::EmptyClaimID
            | IssuerHTTPError::InvalidClaimID(_)
            | IssuerHTTPError::EmptyNonce
            | IssuerHTTPError::InvalidNonce(_)
            | IssuerHTTPError::ClaimInput(_)
            | IssuerHTTPError::InvalidBody(_)
            | IssuerHTTPError::InvalidQuery(_)
            | IssuerHTTPError::EmptyAgentRequest
            | IssuerHTTPError::Unpack(_)
            | IssuerHTTPError::AgentRequest(_)
            | IssuerHTTPError::AgentHandler(_) => OutcomeKind::InvalidInput,
            IssuerHTTPError::Identity(err) => match err {
                IdentityError::WrongDIDMetadata => OutcomeKind::DomainValidation,
                IdentityError::Internal(_) => OutcomeKind::Internal,
            },
            IssuerHTTPError::Claims(err) => match err {
                ClaimsError::InvalidSchemaContext
                | ClaimsError::SchemaProcessingFailed
                | ClaimsError::MalformedURL => OutcomeKind::DomainValidation,
                ClaimsError::SchemaLoadFailed => OutcomeKind::ResourceUnavailable,
                ClaimsError::ClaimNotFound | ClaimsError::ClaimDoesNotExist => {
                    OutcomeKind::NotFound
                }
                ClaimsError::Agent(_) => OutcomeKind::InvalidInput,
                ClaimsError::Internal(_) => OutcomeKind::Internal,
            },
            IssuerHTTPError::ClaimDoesNotExist => OutcomeKind::NotFound,
            IssuerHTTPError::Schema(_) | IssuerHTTPError::Proof(_) => OutcomeKind::Internal,
            IssuerHTTPError::Publisher(err) => match err {
                PublisherError::NoStatesToProcess | PublisherError::StateIsBeingProcessed => {
                    OutcomeKind::Conflict
                }
                PublisherError::Internal(_) => OutcomeKind::Internal,
            },
        };
        (kind, self.to_string())
    }
}

// Make IssuerHTTPError suitable for axum responses.
impl IntoResponse for IssuerHTTPError {
    fn into_response(self) -> axum::response::Response {
        let (kind, message) = self.outcome();
        if kind == OutcomeKind::Internal {
            error!("Internal error: {:?}", self);
        }
        let body = Json(json!({ "message": message }));
        (kind.status_code(), body).into_response()
    }
}
