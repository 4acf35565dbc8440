//! Verifiable credential issuer core: domain types and the contracts of the identity, claims,
//! schema, publisher and agent protocol collaborators.
pub mod claim;
pub mod did;
pub mod identity;
pub mod merkle;
pub mod protocol;
pub mod publisher;
pub mod schema;
