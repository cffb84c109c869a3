//! Pending local payments.
//!
//! Every `send_htlc` call registers a pending payment before its add
//! packet is injected, and blocks on the payment's two response slots
//! until the matching settle or fail travels back. Identity within the
//! table is `(payment_hash, amount)`: concurrent sends may share a hash
//! as long as their amounts differ (two simultaneous sends with identical
//! hash and amount are a caller error).
//!
//! The table is the one piece of switch state touched from outside the
//! dispatch task, so it is guarded by a read/write lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use hopline_types::{Amount, PaymentHash, Preimage};
use tokio::sync::oneshot;

use crate::error::{SwitchError, SwitchResult};

/// A user payment awaiting its settle or fail response.
///
/// Resolution writes the error slot first and the preimage slot second;
/// each slot fires at most once.
pub(crate) struct PendingPayment {
    payment_hash: PaymentHash,
    amount: Amount,
    error_slot: Mutex<Option<oneshot::Sender<Option<SwitchError>>>>,
    preimage_slot: Mutex<Option<oneshot::Sender<Preimage>>>,
}

/// Receiving halves of a pending payment's response slots.
pub(crate) struct PaymentResolution {
    pub(crate) error: oneshot::Receiver<Option<SwitchError>>,
    pub(crate) preimage: oneshot::Receiver<Preimage>,
}

impl PendingPayment {
    /// Create a pending payment and the receivers its originator awaits.
    pub(crate) fn new(
        payment_hash: PaymentHash,
        amount: Amount,
    ) -> (Arc<Self>, PaymentResolution) {
        let (error_tx, error_rx) = oneshot::channel();
        let (preimage_tx, preimage_rx) = oneshot::channel();

        let payment = Arc::new(Self {
            payment_hash,
            amount,
            error_slot: Mutex::new(Some(error_tx)),
            preimage_slot: Mutex::new(Some(preimage_tx)),
        });
        let resolution = PaymentResolution {
            error: error_rx,
            preimage: preimage_rx,
        };
        (payment, resolution)
    }

    pub(crate) fn payment_hash(&self) -> PaymentHash {
        self.payment_hash
    }

    pub(crate) fn amount(&self) -> Amount {
        self.amount
    }

    /// Deliver the payment outcome: `None` error and the revealed
    /// preimage on success, the failure and [`Preimage::ZERO`] otherwise.
    ///
    /// The error slot is written before the preimage slot; the originator
    /// awaits them in the same order. Repeated resolution is a no-op.
    pub(crate) fn resolve(&self, error: Option<SwitchError>, preimage: Preimage) {
        if let Ok(mut slot) = self.error_slot.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(error);
            }
        }
        if let Ok(mut slot) = self.preimage_slot.lock() {
            if let Some(tx) = slot.take() {
                let _ = tx.send(preimage);
            }
        }
    }
}

/// The table of in-flight local payments, keyed by payment hash.
#[derive(Default)]
pub(crate) struct PendingPaymentTable {
    payments: RwLock<HashMap<PaymentHash, Vec<Arc<PendingPayment>>>>,
}

impl PendingPaymentTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a pending payment.
    pub(crate) fn insert(&self, payment: Arc<PendingPayment>) {
        if let Ok(mut payments) = self.payments.write() {
            payments
                .entry(payment.payment_hash())
                .or_default()
                .push(payment);
        }
    }

    /// Look up the pending payment matching a hash and amount.
    pub(crate) fn find(
        &self,
        payment_hash: &PaymentHash,
        amount: Amount,
    ) -> Option<Arc<PendingPayment>> {
        self.payments.read().ok().and_then(|payments| {
            payments
                .get(payment_hash)?
                .iter()
                .find(|p| p.amount() == amount)
                .cloned()
        })
    }

    /// Remove the pending payment matching a hash and amount.
    pub(crate) fn remove(&self, payment_hash: &PaymentHash, amount: Amount) -> SwitchResult<()> {
        if let Ok(mut payments) = self.payments.write() {
            if let Some(bucket) = payments.get_mut(payment_hash) {
                if let Some(pos) = bucket.iter().position(|p| p.amount() == amount) {
                    bucket.swap_remove(pos);
                    if bucket.is_empty() {
                        payments.remove(payment_hash);
                    }
                    return Ok(());
                }
            }
        }

        Err(SwitchError::PendingPaymentNotFound {
            payment_hash: *payment_hash,
            amount,
        })
    }

    /// Overall number of pending payments across all hashes.
    pub(crate) fn len(&self) -> usize {
        self.payments
            .read()
            .map(|payments| payments.values().map(Vec::len).sum())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(byte: u8) -> PaymentHash {
        PaymentHash([byte; 32])
    }

    #[test]
    fn test_insert_find_remove() {
        let table = PendingPaymentTable::new();
        let (payment, _resolution) = PendingPayment::new(hash(0xaa), 100);

        table.insert(payment);
        assert_eq!(table.len(), 1);
        assert!(table.find(&hash(0xaa), 100).is_some());
        assert!(table.find(&hash(0xaa), 101).is_none());
        assert!(table.find(&hash(0xab), 100).is_none());

        table.remove(&hash(0xaa), 100).unwrap();
        assert_eq!(table.len(), 0);
        assert!(table.find(&hash(0xaa), 100).is_none());
    }

    #[test]
    fn test_remove_missing() {
        let table = PendingPaymentTable::new();
        let result = table.remove(&hash(0x01), 10);
        assert!(matches!(
            result,
            Err(SwitchError::PendingPaymentNotFound { amount: 10, .. })
        ));
    }

    #[test]
    fn test_same_hash_distinct_amounts() {
        let table = PendingPaymentTable::new();
        let (first, _r1) = PendingPayment::new(hash(0x03), 10);
        let (second, _r2) = PendingPayment::new(hash(0x03), 20);

        table.insert(first);
        table.insert(second);
        assert_eq!(table.len(), 2);

        table.remove(&hash(0x03), 10).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.find(&hash(0x03), 10).is_none());
        assert!(table.find(&hash(0x03), 20).is_some());
    }

    #[tokio::test]
    async fn test_resolve_writes_error_before_preimage() {
        let (payment, mut resolution) = PendingPayment::new(hash(0xbb), 50);

        payment.resolve(None, Preimage([9u8; 32]));

        // Both slots are readable immediately, error first by contract.
        let err = resolution.error.try_recv().unwrap();
        assert!(err.is_none());
        let preimage = resolution.preimage.try_recv().unwrap();
        assert_eq!(preimage, Preimage([9u8; 32]));
    }

    #[tokio::test]
    async fn test_resolve_is_single_shot() {
        let (payment, mut resolution) = PendingPayment::new(hash(0xcc), 50);

        payment.resolve(Some(SwitchError::LinkNotFound), Preimage::ZERO);
        // Second resolution must not overwrite the first.
        payment.resolve(None, Preimage([1u8; 32]));

        let err = resolution.error.try_recv().unwrap();
        assert!(matches!(err, Some(SwitchError::LinkNotFound)));
        let preimage = resolution.preimage.try_recv().unwrap();
        assert_eq!(preimage, Preimage::ZERO);
    }
}
