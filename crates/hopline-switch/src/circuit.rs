//! In-flight payment circuits.
//!
//! When the switch forwards an add between two links it records a
//! circuit: the pair of channel ids the HTLC crossed, keyed by payment
//! hash. The eventual settle or fail consults the circuit to find its way
//! back to the upstream link, and removes it.
//!
//! The map is owned exclusively by the dispatch task, so it carries no
//! lock; at most one circuit exists per payment hash at any time.

use std::collections::HashMap;

use hopline_types::{ChannelId, PaymentHash};

use crate::error::{SwitchError, SwitchResult};

/// The reverse-path record for one forwarded HTLC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentCircuit {
    /// Channel the add arrived on.
    pub source: ChannelId,
    /// Channel the add was forwarded over.
    pub destination: ChannelId,
    /// Payment hash of the HTLC.
    pub payment_hash: PaymentHash,
}

impl PaymentCircuit {
    /// Create a new circuit record.
    pub fn new(source: ChannelId, destination: ChannelId, payment_hash: PaymentHash) -> Self {
        Self {
            source,
            destination,
            payment_hash,
        }
    }
}

/// Storage for in-flight circuits, keyed by payment hash.
#[derive(Debug, Default)]
pub(crate) struct CircuitMap {
    circuits: HashMap<PaymentHash, PaymentCircuit>,
}

impl CircuitMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a circuit for a newly forwarded add.
    ///
    /// Rejects the insert if a circuit for the same payment hash is
    /// already in flight.
    pub(crate) fn add(&mut self, circuit: PaymentCircuit) -> SwitchResult<()> {
        if self.circuits.contains_key(&circuit.payment_hash) {
            return Err(SwitchError::DuplicateCircuit(circuit.payment_hash));
        }
        self.circuits.insert(circuit.payment_hash, circuit);
        Ok(())
    }

    /// Remove and return the circuit for a payment hash.
    pub(crate) fn remove(&mut self, payment_hash: &PaymentHash) -> SwitchResult<PaymentCircuit> {
        self.circuits
            .remove(payment_hash)
            .ok_or(SwitchError::CircuitNotFound(*payment_hash))
    }

    /// True if a circuit is in flight for the payment hash.
    pub(crate) fn contains(&self, payment_hash: &PaymentHash) -> bool {
        self.circuits.contains_key(payment_hash)
    }

    /// Number of circuits currently in flight.
    pub(crate) fn len(&self) -> usize {
        self.circuits.len()
    }
}
