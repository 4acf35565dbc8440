pub(crate) const ISSUER_DID: &str =
    "did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5";

pub(crate) const USER_DID: &str =
    "did:polygonid:polygon:mumbai:2qFpPHotk6oyaX1fcrpQFT4BMnmg8YszUwxYtaoGoe";

pub(crate) const TEST_CLAIM_ID: &str = "46cb84e2-fa10-11ed-a0d4-bbb4e61d1556";

pub(crate) const TEST_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/iden3/claim-schema-vocab/main/schemas/json/KYCAgeCredential-v3.json";

pub(crate) const TEST_CREDENTIAL: &str = r#"{
    "id": "http://localhost:3001/v1/did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5/claims/46cb84e2-fa10-11ed-a0d4-bbb4e61d1556",
    "@context": [
        "https://www.w3.org/2018/credentials/v1",
        "https://schema.iden3.io/core/jsonld/iden3proofs.jsonld",
        "https://raw.githubusercontent.com/iden3/claim-schema-vocab/main/schemas/json-ld/kyc-v3.json-ld"
    ],
    "type": ["VerifiableCredential", "KYCAgeCredential"],
    "expirationDate": "2030-04-25T14:00:00Z",
    "issuanceDate": "2023-05-22T10:04:22Z",
    "credentialSubject": {
        "birthday": 19960424,
        "documentType": 2,
        "id": "did:polygonid:polygon:mumbai:2qFpPHotk6oyaX1fcrpQFT4BMnmg8YszUwxYtaoGoe",
        "type": "KYCAgeCredential"
    },
    "credentialStatus": {
        "id": "http://localhost:3001/v1/did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5/claims/revocation/status/3126003221",
        "revocationNonce": 3126003221,
        "type": "SparseMerkleTreeProof"
    },
    "issuer": "did:polygonid:polygon:mumbai:2qH7XAwYQzCp9VfhpNgeLtK2iCehDDrfMWUCEg5ig5",
    "credentialSchema": {
        "id": "https://raw.githubusercontent.com/iden3/claim-schema-vocab/main/schemas/json/KYCAgeCredential-v3.json",
        "type": "JsonSchemaValidator2018"
    },
    "proof": [
        {
            "type": "BJJSignature2021",
            "signature": "0f5c39fd2a1b8b94c8e1f72de0d1dcd3b2ec3a1a57c4e0d0f6c7b5b1e5a3d2c1"
        }
    ]
}"#;

pub(crate) const TEST_STATE: &str =
    "a9bd4b4bde8fd1bca4a4b1b3e7fb39d43dc7b3a06f9ab53b1cb8a1e2f9a5ae1b";
pub(crate) const TEST_CLAIMS_TREE_ROOT: &str =
    "0c7ed5b5c0e40dc3b4a3d7d8e0ac5fbcfb9e9c0d6e6e0e5b3f3e3b9e8a1b2c3d";
pub(crate) const TEST_REVOCATION_TREE_ROOT: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";
pub(crate) const TEST_ROOT_OF_ROOTS: &str =
    "1d7a8e1b3c2b0e3d9f5e4c3b2a1908f7e6d5c4b3a29180f7e6d5c4b3a2918071";
