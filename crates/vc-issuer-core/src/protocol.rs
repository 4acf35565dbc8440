//! Agent protocol envelopes exchanged with holder agents, and the package manager used to
//! unpack them.
use crate::did::{DIDError, DID};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Media type of unencrypted, unsigned envelopes.
pub const MEDIA_TYPE_PLAIN_MESSAGE: &str = "application/iden3comm-plain-json";
/// Media type of envelopes authenticated with a zero-knowledge proof.
pub const MEDIA_TYPE_ZKP_MESSAGE: &str = "application/iden3-zkp-json";
/// Message type of a holder fetching an offered credential.
pub const CREDENTIAL_FETCH_REQUEST_MESSAGE_TYPE: &str =
    "https://iden3-communication.io/credentials/1.0/fetch-request";
/// Message type of an issuer replying with a credential.
pub const CREDENTIAL_ISSUANCE_RESPONSE_MESSAGE_TYPE: &str =
    "https://iden3-communication.io/credentials/1.0/issuance-response";

/// An error relating to unpacking an envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PackerError {
    #[error("No packer registered for media type: {0}")]
    UnsupportedMediaType(String),
    /// The envelope could not be decoded or its protection could not be verified.
    #[error("Failed to unpack message: {0}")]
    Unpack(String),
}

/// An error relating to translating an envelope into an agent request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentRequestError {
    #[error("'{0}' field cannot be empty")]
    EmptyField(&'static str),
    #[error("invalid '{0}' field: {1}")]
    InvalidDID(&'static str, DIDError),
    #[error("invalid type: {0}")]
    InvalidType(String),
}

/// An unpacked protocol message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub typ: String,
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(rename = "thid", default)]
    pub thread_id: String,
    #[serde(default)]
    pub body: Value,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// A typed agent request addressed from a holder to an issuer identity.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRequest {
    pub id: String,
    pub thread_id: String,
    pub typ: String,
    pub type_: String,
    pub body: Value,
    pub user_did: DID,
    pub issuer_did: DID,
}

fn required_did(field: &'static str, value: &str) -> Result<DID, AgentRequestError> {
    if value.is_empty() {
        return Err(AgentRequestError::EmptyField(field));
    }
    value
        .parse()
        .map_err(|err| AgentRequestError::InvalidDID(field, err))
}

impl AgentRequest {
    /// Translates an unpacked message into an agent request.
    pub fn new(message: BasicMessage) -> Result<Self, AgentRequestError> {
        let issuer_did = required_did("to", &message.to)?;
        let user_did = required_did("from", &message.from)?;
        if message.id.is_empty() {
            return Err(AgentRequestError::EmptyField("id"));
        }
        if message.type_ != CREDENTIAL_FETCH_REQUEST_MESSAGE_TYPE {
            return Err(AgentRequestError::InvalidType(message.type_));
        }
        Ok(Self {
            id: message.id,
            thread_id: message.thread_id,
            typ: message.typ,
            type_: message.type_,
            body: message.body,
            user_did,
            issuer_did,
        })
    }
}

/// Reply produced by the claims service for an agent request.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentResponse {
    pub id: String,
    pub thread_id: String,
    pub typ: String,
    pub type_: String,
    pub body: Value,
    pub from: String,
    pub to: String,
}

/// Unpacks envelopes of a single media type.
pub trait Packer: Send + Sync {
    fn media_type(&self) -> &str;

    fn unpack(&self, envelope: &[u8]) -> Result<BasicMessage, PackerError>;
}

/// Packer for plain JSON envelopes.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainMessagePacker;

impl Packer for PlainMessagePacker {
    fn media_type(&self) -> &str {
        MEDIA_TYPE_PLAIN_MESSAGE
    }

    fn unpack(&self, envelope: &[u8]) -> Result<BasicMessage, PackerError> {
        serde_json::from_slice(envelope).map_err(|err| PackerError::Unpack(err.to_string()))
    }
}

/// Registry of packers keyed by media type.
#[derive(Default)]
pub struct PackageManager {
    packers: HashMap<String, Box<dyn Packer>>,
}

impl PackageManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a packer, replacing any packer previously registered for its media type.
    pub fn register(&mut self, packer: Box<dyn Packer>) {
        self.packers.insert(packer.media_type().to_string(), packer);
    }

    /// Unpacks an envelope expected to be of the given media type.
    pub fn unpack_with_type(
        &self,
        media_type: &str,
        envelope: &[u8],
    ) -> Result<BasicMessage, PackerError> {
        self.packers
            .get(media_type)
            .ok_or_else(|| PackerError::UnsupportedMediaType(media_type.to_string()))?
            .unpack(envelope)
    }
}
