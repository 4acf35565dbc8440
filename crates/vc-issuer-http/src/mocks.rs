//! Mocked collaborators and a test client wired to them.
use crate::config::HTTPConfig;
use crate::health::HealthChecker;
use crate::server::IssuerRouter;
use crate::state::{AppState, IssuerServices};
use async_trait::async_trait;
use axum_test_helper::TestClient;
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vc_issuer_core::{
    claim::{
        Claim, ClaimsError, ClaimsFilter, ClaimsService, CreateClaimRequest, RevocationStatus,
        W3CCredential,
    },
    did::DID,
    identity::{DIDMetadata, Identity, IdentityError, IdentityService},
    protocol::{
        AgentRequest, AgentResponse, BasicMessage, PackageManager, Packer, PackerError,
        PlainMessagePacker, MEDIA_TYPE_PLAIN_MESSAGE,
    },
    publisher::{PublishedState, Publisher, PublisherError},
    schema::{SchemaError, SchemaService},
};

mock! {
    pub Identities {}
    #[async_trait]
    impl IdentityService for Identities {
        async fn create(
            &self,
            metadata: &DIDMetadata,
            host_url: &str,
        ) -> Result<Identity, IdentityError>;
        async fn list(&self) -> Result<Vec<DID>, IdentityError>;
    }
}

mock! {
    pub Claims {}
    #[async_trait]
    impl ClaimsService for Claims {
        async fn create_claim(&self, request: CreateClaimRequest) -> Result<Claim, ClaimsError>;
        async fn revoke(&self, did: &DID, nonce: u64) -> Result<(), ClaimsError>;
        async fn get_revocation_status(
            &self,
            did: &DID,
            nonce: u64,
        ) -> Result<RevocationStatus, ClaimsError>;
        async fn get_by_id(&self, did: &DID, id: &uuid::Uuid) -> Result<Claim, ClaimsError>;
        async fn get_all(
            &self,
            did: &DID,
            filter: &ClaimsFilter,
        ) -> Result<Vec<W3CCredential>, ClaimsError>;
        async fn agent(&self, request: AgentRequest) -> Result<AgentResponse, ClaimsError>;
    }
}

mock! {
    pub SchemaConverter {}
    impl SchemaService for SchemaConverter {
        fn to_w3c_credential(&self, claim: &Claim) -> Result<W3CCredential, SchemaError>;
    }
}

mock! {
    pub StatePublisher {}
    #[async_trait]
    impl Publisher for StatePublisher {
        async fn publish_state(&self, did: &DID) -> Result<PublishedState, PublisherError>;
    }
}

mock! {
    pub HealthMonitor {}
    #[async_trait]
    impl HealthChecker for HealthMonitor {
        async fn status(&self) -> HashMap<String, bool>;
    }
}

/// Plain message packer counting its invocations.
pub(crate) struct RecordingPacker {
    calls: Arc<AtomicUsize>,
}

impl Packer for RecordingPacker {
    fn media_type(&self) -> &str {
        MEDIA_TYPE_PLAIN_MESSAGE
    }

    fn unpack(&self, envelope: &[u8]) -> Result<BasicMessage, PackerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        PlainMessagePacker.unpack(envelope)
    }
}

/// Mocked collaborators. Any call without a matching expectation fails the test.
pub(crate) struct TestServices {
    pub identity: MockIdentities,
    pub claims: MockClaims,
    pub schema: MockSchemaConverter,
    pub publisher: MockStatePublisher,
    pub health: MockHealthMonitor,
    pub unpack_calls: Arc<AtomicUsize>,
    pub config: HTTPConfig,
}

impl TestServices {
    pub fn new() -> Self {
        Self {
            identity: MockIdentities::new(),
            claims: MockClaims::new(),
            schema: MockSchemaConverter::new(),
            publisher: MockStatePublisher::new(),
            health: MockHealthMonitor::new(),
            unpack_calls: Arc::new(AtomicUsize::new(0)),
            config: HTTPConfig {
                agent_media_type: MEDIA_TYPE_PLAIN_MESSAGE.to_string(),
                ..HTTPConfig::default()
            },
        }
    }

    pub fn into_state(self) -> Arc<AppState> {
        let mut package_manager = PackageManager::new();
        package_manager.register(Box::new(RecordingPacker {
            calls: self.unpack_calls,
        }));
        Arc::new(AppState::new(
            self.config,
            IssuerServices {
                identity_service: Arc::new(self.identity),
                claims_service: Arc::new(self.claims),
                schema_service: Arc::new(self.schema),
                publisher: Arc::new(self.publisher),
                package_manager: Arc::new(package_manager),
                health: Arc::new(self.health),
            },
        ))
    }

    pub fn into_client(self) -> TestClient {
        TestClient::new(IssuerRouter::from(self.into_state()).into_router())
    }
}
