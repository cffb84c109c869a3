//! Payment-hash and channel-id derivation.
//!
//! Payment hashes follow HTLC semantics: the hash is the plain SHA-256 of
//! the preimage, with no domain separation, so that the same preimage
//! settles the contract at every hop along a route.
//!
//! Channel identifiers are derived from the funding outpoint with a
//! domain-separation byte:
//! ```text
//! ChannelId = H(0x02 || txid || vout as u32be)
//! ```

use sha2::{Digest, Sha256};

use crate::{ChannelId, OutPoint, PaymentHash, Preimage};

/// Domain separator for channel identifiers.
const DOMAIN_CHANNEL: u8 = 0x02;

/// Compute the payment hash a preimage unlocks.
///
/// # Example
/// ```
/// use hopline_types::{payment_hash_from_preimage, Preimage};
///
/// let preimage = Preimage([9u8; 32]);
/// let hash = payment_hash_from_preimage(&preimage);
/// assert_eq!(hash, preimage.payment_hash());
/// ```
pub fn payment_hash_from_preimage(preimage: &Preimage) -> PaymentHash {
    let mut hasher = Sha256::new();
    hasher.update(preimage.0);
    let hash: [u8; 32] = hasher.finalize().into();
    PaymentHash(hash)
}

/// Derive the channel identifier for a funding outpoint.
pub fn channel_id_from_outpoint(outpoint: &OutPoint) -> ChannelId {
    let mut hasher = Sha256::new();
    hasher.update([DOMAIN_CHANNEL]);
    hasher.update(outpoint.txid);
    hasher.update(outpoint.vout.to_be_bytes());
    let hash: [u8; 32] = hasher.finalize().into();
    ChannelId(hash)
}
