//! Identity and wire types for the hopline payment-channel node.
//!
//! This crate provides the data types shared by every layer of the node:
//!
//! - **Identity**: peer fingerprints ([`HopId`]) derived from public keys,
//!   and channel identifiers ([`ChannelId`]) derived from funding outpoints
//! - **Payments**: payment hashes, preimages, and the [`Amount`] unit
//! - **Wire updates**: the closed set of HTLC update messages exchanged
//!   over a channel ([`HtlcUpdate`]) and the [`FailCode`] byte codec
//!
//! It contains no business logic, only type definitions with
//! serialization support.
//!
//! # Example
//!
//! ```
//! use hopline_types::{hop_id_from_public_key, ChannelId, OutPoint, Preimage, PublicKey};
//!
//! let public_key = PublicKey::from_bytes([0x02; 33]);
//! let hop = hop_id_from_public_key(&public_key);
//! assert_eq!(hop.0.len(), 20);
//!
//! let outpoint = OutPoint { txid: [0xab; 32], vout: 1 };
//! let channel = ChannelId::from_outpoint(&outpoint);
//! assert_eq!(channel.0.len(), 32);
//!
//! let preimage = Preimage([7u8; 32]);
//! let hash = preimage.payment_hash();
//! assert_eq!(preimage.payment_hash(), hash);
//! ```
//!
//! # Type Conventions
//!
//! - Fixed-width byte values are newtype structs with public inner arrays
//! - Derive `Copy` for small types, `Hash` where used as a map key
//! - Human-readable serialization is hex (or the `hop1…` form for
//!   [`HopId`]); binary formats get raw bytes

mod error;
mod hash;
mod identity;
mod serde_impl;
mod wire;

pub use error::WireError;
pub use hash::{channel_id_from_outpoint, payment_hash_from_preimage};
pub use identity::{hop_id_from_public_key, hop_id_from_string, hop_id_to_string};
pub use wire::{FailCode, HtlcUpdate, UpdateAddHtlc, UpdateFailHtlc, UpdateSettleHtlc};

/// Amount in millisatoshis, the base monetary unit of the node.
pub type Amount = u64;

/// A compressed secp256k1 public key (33 bytes).
///
/// The key is treated as an opaque identity value at this layer; no curve
/// arithmetic is performed in this crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 33]);

impl PublicKey {
    /// Create a PublicKey from raw bytes.
    pub fn from_bytes(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the public key.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", hex_string(&self.0[..8]))
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A peer identifier derived from a public key (20 bytes).
///
/// The HopId is the first 20 bytes of `H(0x01 || public_key)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HopId(pub [u8; 20]);

impl HopId {
    /// Create a HopId from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the HopId.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl std::fmt::Debug for HopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HopId({})", hop_id_to_string(self))
    }
}

impl std::fmt::Display for HopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hop_id_to_string(self))
    }
}

impl AsRef<[u8]> for HopId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An identifier for one payment channel (32 bytes).
///
/// Derived from the channel's funding outpoint as
/// `H(0x02 || txid || vout_be)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub [u8; 32]);

impl ChannelId {
    /// Create a ChannelId from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derive the ChannelId for a funding outpoint.
    pub fn from_outpoint(outpoint: &OutPoint) -> Self {
        channel_id_from_outpoint(outpoint)
    }

    /// Get the raw bytes of the ChannelId.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChannelId({})", hex_string(&self.0[..8]))
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for ChannelId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The funding transaction output that anchors a channel on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutPoint {
    /// Funding transaction id.
    pub txid: [u8; 32],
    /// Output index within the funding transaction.
    pub vout: u32,
}

/// The hash that locks an HTLC (32 bytes).
///
/// Revealing the matching [`Preimage`] settles the contract.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentHash(pub [u8; 32]);

impl PaymentHash {
    /// Create a PaymentHash from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the PaymentHash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Debug for PaymentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PaymentHash({})", hex_string(&self.0[..8]))
    }
}

impl std::fmt::Display for PaymentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl AsRef<[u8]> for PaymentHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The secret that unlocks an HTLC (32 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preimage(pub [u8; 32]);

/// The all-zero preimage, returned on failure paths where no secret was
/// revealed.
pub const ZERO_PREIMAGE: Preimage = Preimage([0u8; 32]);

impl Preimage {
    /// The all-zero preimage.
    pub const ZERO: Preimage = ZERO_PREIMAGE;

    /// Create a Preimage from raw bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the Preimage.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Compute the payment hash this preimage unlocks.
    pub fn payment_hash(&self) -> PaymentHash {
        payment_hash_from_preimage(self)
    }
}

impl std::fmt::Debug for Preimage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Preimage({})", hex_string(&self.0[..8]))
    }
}

impl AsRef<[u8]> for Preimage {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Helper function to convert bytes to hex string (for Debug output).
fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
        + "..."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_id_display() {
        let public_key = PublicKey::from_bytes([0x02; 33]);
        let hop = hop_id_from_public_key(&public_key);
        let s = format!("{}", hop);
        assert!(s.starts_with("hop1"));
    }

    #[test]
    fn test_channel_id_display() {
        let outpoint = OutPoint {
            txid: [0x11; 32],
            vout: 0,
        };
        let channel = ChannelId::from_outpoint(&outpoint);
        let s = format!("{}", channel);
        assert_eq!(s.len(), 64); // 32 bytes as hex
    }

    #[test]
    fn test_preimage_hash_roundtrip() {
        let preimage = Preimage([0x42; 32]);
        let hash = preimage.payment_hash();
        assert_eq!(preimage.payment_hash(), hash);
        assert_ne!(Preimage([0x43; 32]).payment_hash(), hash);
    }

    #[test]
    fn test_zero_preimage_is_zero() {
        assert!(Preimage::ZERO.0.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_types_are_copy() {
        let hash = PaymentHash([1u8; 32]);
        let hash_copy = hash; // This should compile because PaymentHash is Copy
        assert_eq!(hash.0, hash_copy.0);

        let hop = HopId([2u8; 20]);
        let hop_copy = hop;
        assert_eq!(hop.0, hop_copy.0);
    }
}
