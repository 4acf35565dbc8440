//! Schema service API.
use crate::claim::{Claim, W3CCredential};
use thiserror::Error;

/// An error relating to schema processing.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The stored claim data is not a valid W3C credential.
    #[error("invalid claim format: {0}")]
    InvalidFormat(String),
}

/// Converts internal claim records to W3C credentials.
pub trait SchemaService: Send + Sync {
    fn to_w3c_credential(&self, claim: &Claim) -> Result<W3CCredential, SchemaError>;
}

/// Schema service reading the credential stored in the claim's `data` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredCredentialSchemaService;

impl SchemaService for StoredCredentialSchemaService {
    fn to_w3c_credential(&self, claim: &Claim) -> Result<W3CCredential, SchemaError> {
        serde_json::from_value(claim.data.clone())
            .map_err(|err| SchemaError::InvalidFormat(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn claim(data: serde_json::Value) -> Claim {
        Claim {
            id: Uuid::new_v4(),
            issuer: "did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5"
                .parse()
                .unwrap(),
            schema_hash: "c9b2370371b7fa8b3dab2a5ba81b6838".to_string(),
            schema_url: "https://example.com/kyc.json".to_string(),
            schema_type: "KYCAgeCredential".to_string(),
            other_identifier: "".to_string(),
            expiration: None,
            version: 0,
            rev_nonce: 7,
            revoked: false,
            data,
        }
    }

    #[test]
    fn test_stored_credential() {
        let data = json!({
            "id": "http://localhost:3001/v1/credentials/1",
            "@context": ["https://www.w3.org/2018/credentials/v1"],
            "type": ["VerifiableCredential", "KYCAgeCredential"],
            "expirationDate": null,
            "issuanceDate": "2023-01-02T10:00:00Z",
            "credentialSubject": {"birthday": 19960424},
            "credentialStatus": {"revocationNonce": 7},
            "issuer": "did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5",
            "credentialSchema": {"id": "https://example.com/kyc.json", "type": "JsonSchemaValidator2018"},
            "proof": null
        });
        let credential = StoredCredentialSchemaService
            .to_w3c_credential(&claim(data))
            .unwrap();
        assert_eq!(credential.type_[1], "KYCAgeCredential");
        assert_eq!(credential.credential_schema.type_, "JsonSchemaValidator2018");
        assert!(credential.issuance_date.is_some());
    }

    #[test]
    fn test_invalid_format() {
        let result = StoredCredentialSchemaService.to_w3c_credential(&claim(json!({"id": 1})));
        assert!(matches!(result, Err(SchemaError::InvalidFormat(_))));
    }
}
