//! Decentralized identifiers for issuer and holder identities.
//!
//! A DID has the shape `did:<method>:<blockchain>:<network>:<id>`, where `<id>` is the base58
//! encoding of a 31 byte identity ID: two type bytes, the 27 byte genesis segment of the
//! identity state and a two byte checksum.
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the genesis segment of an identity ID.
pub const GENESIS_LEN: usize = 27;
/// Length of a decoded identity ID.
pub const ID_LEN: usize = 2 + GENESIS_LEN + 2;

/// An error relating to parsing a DID.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DIDError {
    /// Empty input.
    #[error("DID must not be empty.")]
    Empty,
    /// Input does not follow `did:<method>:<blockchain>:<network>:<id>`.
    #[error("DID does not match the expected format: {0}")]
    InvalidFormat(String),
    #[error("Unsupported DID method: {0}")]
    UnsupportedMethod(String),
    #[error("Unsupported DID network: {0}:{1}")]
    UnsupportedNetwork(String, String),
    #[error("Invalid base58 encoding of identity ID: {0}")]
    InvalidEncoding(String),
    #[error("Identity ID has length {0}, expected 31.")]
    InvalidLength(usize),
    #[error("Invalid identity ID checksum.")]
    InvalidChecksum,
    /// The ID type bytes disagree with the method and network of the DID.
    #[error("Identity ID type does not match DID method and network.")]
    TypeMismatch,
}

/// Supported DID methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DIDMethod {
    Iden3,
    PolygonID,
}

impl DIDMethod {
    /// First type byte of an identity ID created under this method.
    pub fn byte(&self) -> u8 {
        match self {
            DIDMethod::Iden3 => 0b0000_0001,
            DIDMethod::PolygonID => 0b0000_0010,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DIDMethod::Iden3 => "iden3",
            DIDMethod::PolygonID => "polygonid",
        }
    }
}

impl FromStr for DIDMethod {
    type Err = DIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iden3" => Ok(DIDMethod::Iden3),
            "polygonid" => Ok(DIDMethod::PolygonID),
            other => Err(DIDError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for DIDMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blockchain an identity publishes its state to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blockchain {
    Ethereum,
    Polygon,
}

impl Blockchain {
    fn flag(&self) -> u8 {
        match self {
            Blockchain::Polygon => 0b0001_0000,
            Blockchain::Ethereum => 0b0010_0000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Blockchain::Ethereum => "eth",
            Blockchain::Polygon => "polygon",
        }
    }
}

/// Network of a blockchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkID {
    Main,
    Mumbai,
    Goerli,
}

impl NetworkID {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkID::Main => "main",
            NetworkID::Mumbai => "mumbai",
            NetworkID::Goerli => "goerli",
        }
    }
}

/// Returns the second type byte for a supported blockchain and network pair.
fn network_byte(blockchain: Blockchain, network: NetworkID) -> Option<u8> {
    match (blockchain, network) {
        (Blockchain::Polygon, NetworkID::Main) | (Blockchain::Ethereum, NetworkID::Main) => {
            Some(blockchain.flag() | 0b0000_0001)
        }
        (Blockchain::Polygon, NetworkID::Mumbai) | (Blockchain::Ethereum, NetworkID::Goerli) => {
            Some(blockchain.flag() | 0b0000_0010)
        }
        _ => None,
    }
}

/// Parses a blockchain and network pair, rejecting unsupported combinations.
pub fn parse_network(blockchain: &str, network: &str) -> Result<(Blockchain, NetworkID), DIDError> {
    let unsupported = || DIDError::UnsupportedNetwork(blockchain.to_string(), network.to_string());
    let chain = match blockchain {
        "eth" => Blockchain::Ethereum,
        "polygon" => Blockchain::Polygon,
        _ => return Err(unsupported()),
    };
    let net = match network {
        "main" => NetworkID::Main,
        "mumbai" => NetworkID::Mumbai,
        "goerli" => NetworkID::Goerli,
        _ => return Err(unsupported()),
    };
    network_byte(chain, net).ok_or_else(unsupported)?;
    Ok((chain, net))
}

/// Checksum over the type and genesis bytes: the little-endian wrapping sum of all bytes.
fn checksum(type_and_genesis: &[u8]) -> [u8; 2] {
    type_and_genesis
        .iter()
        .fold(0u16, |acc, b| acc.wrapping_add(u16::from(*b)))
        .to_le_bytes()
}

/// An identity ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ID([u8; ID_LEN]);

impl ID {
    /// Constructs an ID from its type bytes and genesis segment, appending the checksum.
    pub fn new(id_type: [u8; 2], genesis: [u8; GENESIS_LEN]) -> Self {
        let mut bytes = [0u8; ID_LEN];
        bytes[..2].copy_from_slice(&id_type);
        bytes[2..2 + GENESIS_LEN].copy_from_slice(&genesis);
        let cs = checksum(&bytes[..2 + GENESIS_LEN]);
        bytes[2 + GENESIS_LEN..].copy_from_slice(&cs);
        Self(bytes)
    }

    /// Decodes an ID from raw bytes, verifying length and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DIDError> {
        let bytes: [u8; ID_LEN] = bytes
            .try_into()
            .map_err(|_| DIDError::InvalidLength(bytes.len()))?;
        if checksum(&bytes[..2 + GENESIS_LEN]) != bytes[2 + GENESIS_LEN..] {
            return Err(DIDError::InvalidChecksum);
        }
        Ok(Self(bytes))
    }

    pub fn id_type(&self) -> [u8; 2] {
        [self.0[0], self.0[1]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl FromStr for ID {
    type Err = DIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|err| DIDError::InvalidEncoding(err.to_string()))?;
        ID::from_bytes(&bytes)
    }
}

/// A parsed decentralized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DID {
    method: DIDMethod,
    blockchain: Blockchain,
    network: NetworkID,
    id: ID,
}

impl DID {
    /// Constructs a DID, checking the ID type agrees with the method and network.
    pub fn new(
        method: DIDMethod,
        blockchain: Blockchain,
        network: NetworkID,
        id: ID,
    ) -> Result<Self, DIDError> {
        let expected = [
            method.byte(),
            network_byte(blockchain, network).ok_or_else(|| {
                DIDError::UnsupportedNetwork(
                    blockchain.as_str().to_string(),
                    network.as_str().to_string(),
                )
            })?,
        ];
        if id.id_type() != expected {
            return Err(DIDError::TypeMismatch);
        }
        Ok(Self {
            method,
            blockchain,
            network,
            id,
        })
    }

    /// Constructs the DID of an identity from its genesis segment.
    pub fn from_genesis(
        method: DIDMethod,
        blockchain: Blockchain,
        network: NetworkID,
        genesis: [u8; GENESIS_LEN],
    ) -> Result<Self, DIDError> {
        let network_byte = network_byte(blockchain, network).ok_or_else(|| {
            DIDError::UnsupportedNetwork(
                blockchain.as_str().to_string(),
                network.as_str().to_string(),
            )
        })?;
        let id = ID::new([method.byte(), network_byte], genesis);
        DID::new(method, blockchain, network, id)
    }

    pub fn method(&self) -> DIDMethod {
        self.method
    }

    pub fn blockchain(&self) -> Blockchain {
        self.blockchain
    }

    pub fn network(&self) -> NetworkID {
        self.network
    }

    pub fn id(&self) -> &ID {
        &self.id
    }
}

impl FromStr for DID {
    type Err = DIDError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DIDError::Empty);
        }
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            ["did", method, blockchain, network, id] => {
                let method = method.parse::<DIDMethod>()?;
                let (blockchain, network) = parse_network(blockchain, network)?;
                let id = id.parse::<ID>()?;
                DID::new(method, blockchain, network, id)
            }
            _ => Err(DIDError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "did:{}:{}:{}:{}",
            self.method,
            self.blockchain.as_str(),
            self.network.as_str(),
            self.id
        )
    }
}

impl Serialize for DID {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DID {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
