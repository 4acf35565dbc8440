//! Sparse Merkle tree proof primitives as returned by the claims service.
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Byte length of a tree element.
pub const HASH_LEN: usize = 32;

/// An error relating to Merkle tree elements.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("Invalid hex encoding of tree element: {0}")]
    InvalidHex(String),
    #[error("Tree element has length {0}, expected 32.")]
    InvalidLength(usize),
    #[error("Proof marks {0} non-empty siblings but stores {1}.")]
    InconsistentSiblings(usize, usize),
}

/// A tree element (node hash, key or value) held as big-endian bytes.
///
/// The canonical text form is exactly 64 lowercase hex characters, leading zeros included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash(pub [u8; HASH_LEN]);

impl Hash {
    /// The empty node.
    pub const ZERO: Hash = Hash([0u8; HASH_LEN]);

    pub fn is_zero(&self) -> bool {
        self == &Hash::ZERO
    }

    /// Canonical fixed-width text encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl From<[u8; HASH_LEN]> for Hash {
    fn from(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Hash {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|err| MerkleError::InvalidHex(err.to_string()))?;
        let bytes: [u8; HASH_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| MerkleError::InvalidLength(bytes.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Leaf occupying the slot of a queried key in a non-membership proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAux {
    pub key: Hash,
    pub value: Hash,
}

/// A compressed existence or non-existence proof.
///
/// Only non-empty siblings are stored; bit `i` of `not_empties` is set when the sibling at level
/// `i` (counted from the root) is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub existence: bool,
    pub depth: usize,
    pub not_empties: Vec<u8>,
    pub siblings: Vec<Hash>,
    pub node_aux: Option<NodeAux>,
}

fn test_bit(bitmap: &[u8], n: usize) -> bool {
    bitmap
        .get(n / 8)
        .map_or(false, |byte| byte & (1 << (n % 8)) != 0)
}

impl Proof {
    /// Builds a compressed proof from the full sibling path.
    pub fn new(existence: bool, all_siblings: &[Hash], node_aux: Option<NodeAux>) -> Self {
        let depth = all_siblings.len();
        let mut not_empties = vec![0u8; (depth + 7) / 8];
        let mut siblings = Vec::new();
        for (level, sibling) in all_siblings.iter().enumerate() {
            if !sibling.is_zero() {
                not_empties[level / 8] |= 1 << (level % 8);
                siblings.push(*sibling);
            }
        }
        Self {
            existence,
            depth,
            not_empties,
            siblings,
            node_aux,
        }
    }

    /// Expands the stored siblings into the full path, one entry per level, using the zero hash
    /// for empty levels.
    ///
    /// Fails if the bitmap does not mark exactly as many levels as there are stored siblings.
    pub fn all_siblings(&self) -> Result<Vec<Hash>, MerkleError> {
        let marked = (0..self.depth)
            .filter(|level| test_bit(&self.not_empties, *level))
            .count();
        let inconsistent = || MerkleError::InconsistentSiblings(marked, self.siblings.len());
        if marked != self.siblings.len() {
            return Err(inconsistent());
        }
        let mut stored = self.siblings.iter().copied();
        (0..self.depth)
            .map(|level| match test_bit(&self.not_empties, level) {
                true => stored.next().ok_or_else(inconsistent),
                false => Ok(Hash::ZERO),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(byte: u8) -> Hash {
        let mut bytes = [0u8; HASH_LEN];
        bytes[HASH_LEN - 1] = byte;
        Hash(bytes)
    }

    #[test]
    fn test_hash_hex_is_fixed_width() {
        let h = hash(0x0a);
        assert_eq!(h.to_hex().len(), 64);
        assert_eq!(
            h.to_hex(),
            "000000000000000000000000000000000000000000000000000000000000000a"
        );
        assert_eq!(h.to_hex().parse::<Hash>().unwrap(), h);
        assert_eq!(
            "0a".parse::<Hash>(),
            Err(MerkleError::InvalidLength(1))
        );
        assert!(matches!("zz".parse::<Hash>(), Err(MerkleError::InvalidHex(_))));
    }

    #[test]
    fn test_all_siblings_expands_bitmap() {
        let proof = Proof {
            existence: false,
            depth: 10,
            // Levels 1 and 9 are non-empty.
            not_empties: vec![0b0000_0010, 0b0000_0010],
            siblings: vec![hash(1), hash(9)],
            node_aux: None,
        };
        let all = proof.all_siblings().unwrap();
        assert_eq!(all.len(), 10);
        assert_eq!(all[1], hash(1));
        assert_eq!(all[9], hash(9));
        assert!(all
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1 && *i != 9)
            .all(|(_, h)| h.is_zero()));
    }

    #[test]
    fn test_new_compresses_path() {
        let path = vec![hash(3), Hash::ZERO, Hash::ZERO, hash(4)];
        let proof = Proof::new(true, &path, None);
        assert_eq!(proof.depth, 4);
        assert_eq!(proof.not_empties, vec![0b0000_1001]);
        assert_eq!(proof.siblings, vec![hash(3), hash(4)]);
        assert_eq!(proof.all_siblings().unwrap(), path);
    }

    #[test]
    fn test_all_siblings_inconsistent_bitmap() {
        // Levels 0 and 2 marked, one sibling stored.
        let mut proof = Proof {
            existence: true,
            depth: 4,
            not_empties: vec![0b0000_0101],
            siblings: vec![hash(1)],
            node_aux: None,
        };
        assert_eq!(
            proof.all_siblings(),
            Err(MerkleError::InconsistentSiblings(2, 1))
        );

        // Three stored for the same two marked levels.
        proof.siblings = vec![hash(1), hash(2), hash(3)];
        assert_eq!(
            proof.all_siblings(),
            Err(MerkleError::InconsistentSiblings(2, 3))
        );

        // Bits beyond the depth do not count.
        proof.depth = 2;
        proof.siblings = vec![hash(1)];
        assert_eq!(proof.all_siblings(), Ok(vec![hash(1), Hash::ZERO]));
    }
}
