//! Peer identity derivation.
//!
//! A hop is a peer in the payment graph, identified by a fingerprint of
//! its public key:
//! ```text
//! HopId = H(0x01 || public_key)[0:20]
//! ```
//!
//! Human-readable format: `hop1` + base58(HopId)

use sha2::{Digest, Sha256};

use crate::error::WireError;
use crate::{HopId, PublicKey};

/// Domain separator for hop fingerprints.
const DOMAIN_HOP: u8 = 0x01;

/// Human-readable HopId prefix.
const HOP_ID_PREFIX: &str = "hop1";

/// Derive a HopId from a public key.
///
/// # Algorithm
/// ```text
/// HopId = H(0x01 || public_key)[0:20]
/// ```
///
/// # Example
/// ```
/// use hopline_types::{hop_id_from_public_key, PublicKey};
///
/// let public_key = PublicKey::from_bytes([0x03; 33]);
/// let hop = hop_id_from_public_key(&public_key);
/// assert_eq!(hop.0.len(), 20);
/// ```
pub fn hop_id_from_public_key(public_key: &PublicKey) -> HopId {
    let mut hasher = Sha256::new();
    hasher.update([DOMAIN_HOP]);
    hasher.update(public_key.0);
    let hash: [u8; 32] = hasher.finalize().into();

    // Truncate to 20 bytes
    let mut hop = [0u8; 20];
    hop.copy_from_slice(&hash[..20]);
    HopId(hop)
}

/// Convert a HopId to its human-readable string format.
///
/// Format: `hop1` + base58(HopId)
pub fn hop_id_to_string(hop: &HopId) -> String {
    let encoded = bs58::encode(&hop.0).into_string();
    format!("{}{}", HOP_ID_PREFIX, encoded)
}

/// Parse a human-readable HopId string.
///
/// # Errors
/// - `InvalidHopIdPrefix` if the string doesn't start with `hop1`
/// - `InvalidBase58` if the base58 decoding fails
/// - `InvalidLength` if the decoded data isn't 20 bytes
pub fn hop_id_from_string(s: &str) -> Result<HopId, WireError> {
    if !s.starts_with(HOP_ID_PREFIX) {
        let prefix = if s.len() >= 4 { &s[..4] } else { s };
        return Err(WireError::InvalidHopIdPrefix(prefix.to_string()));
    }

    let base58_part = &s[HOP_ID_PREFIX.len()..];
    let decoded = bs58::decode(base58_part)
        .into_vec()
        .map_err(|e| WireError::InvalidBase58(e.to_string()))?;

    if decoded.len() != 20 {
        return Err(WireError::InvalidLength {
            expected: 20,
            actual: decoded.len(),
        });
    }

    let mut hop = [0u8; 20];
    hop.copy_from_slice(&decoded);
    Ok(HopId(hop))
}
