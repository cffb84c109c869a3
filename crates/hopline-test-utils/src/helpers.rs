//! Shared helpers for hopline tests.

use std::sync::Arc;

use hopline_switch::{ChanClose, SwitchConfig};
use hopline_types::{
    hop_id_from_public_key, Amount, ChannelId, HopId, OutPoint, PaymentHash, Preimage, PublicKey,
    UpdateAddHtlc,
};
use rand::Rng;
use tokio::sync::mpsc;

/// Generate a fresh random public key.
pub fn test_public_key() -> PublicKey {
    let mut bytes = [0u8; 33];
    rand::thread_rng().fill(&mut bytes[..]);
    PublicKey::from_bytes(bytes)
}

/// Generate a fresh random hop fingerprint.
pub fn test_hop_id() -> HopId {
    hop_id_from_public_key(&test_public_key())
}

/// Generate a fresh random funding outpoint.
pub fn test_outpoint() -> OutPoint {
    OutPoint {
        txid: rand::thread_rng().gen(),
        vout: 0,
    }
}

/// Generate a fresh random channel id.
pub fn test_channel_id() -> ChannelId {
    ChannelId::from_outpoint(&test_outpoint())
}

/// Generate a fresh random preimage.
pub fn test_preimage() -> Preimage {
    Preimage::from_bytes(rand::thread_rng().gen())
}

/// Build an add update for the given hash and amount.
pub fn test_add(payment_hash: PaymentHash, amount: Amount) -> UpdateAddHtlc {
    UpdateAddHtlc {
        id: 0,
        payment_hash,
        amount,
        expiry: 144,
    }
}

/// A switch configuration whose close callback does nothing.
pub fn noop_switch_config() -> SwitchConfig {
    SwitchConfig::new(Arc::new(|_, _| {}))
}

/// A switch configuration whose close callback records each invocation.
///
/// Returns the configuration and the receiver the recorded
/// `(peer, request)` pairs arrive on.
pub fn close_capture_config() -> (SwitchConfig, mpsc::UnboundedReceiver<(HopId, ChanClose)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = SwitchConfig::new(Arc::new(move |peer, request| {
        let _ = tx.send((peer, request));
    }));
    (config, rx)
}
