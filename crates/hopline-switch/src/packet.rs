//! The routed unit of the switch.
//!
//! An [`HtlcPacket`] wraps one channel update together with the routing
//! context the switch needs: where the packet entered the switch
//! ([`Origin`]) and, for adds, which hop it should leave toward. The
//! origin is fixed at construction, so the dispatch loop can branch on it
//! exhaustively instead of probing shared state to guess where a packet
//! came from.

use hopline_types::{
    Amount, ChannelId, HopId, HtlcUpdate, PaymentHash, UpdateAddHtlc, UpdateFailHtlc,
    UpdateSettleHtlc,
};

/// Where a packet entered the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Injected by a local subsystem via `send_htlc`.
    Local,
    /// Handed in by the link managing the given channel.
    Channel(ChannelId),
}

/// One HTLC update travelling through the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtlcPacket {
    /// Where the packet entered the switch.
    pub origin: Origin,
    /// Target peer for add packets; settles and fails derive their
    /// direction from the in-flight circuit instead.
    pub destination: Option<HopId>,
    /// Payment hash of the HTLC the update belongs to.
    pub payment_hash: PaymentHash,
    /// HTLC value in millisatoshis.
    pub amount: Amount,
    /// The channel update being routed.
    pub update: HtlcUpdate,
}

impl HtlcPacket {
    /// Build the initial packet for a locally originated payment.
    pub fn local_add(destination: HopId, update: UpdateAddHtlc) -> Self {
        Self {
            origin: Origin::Local,
            destination: Some(destination),
            payment_hash: update.payment_hash,
            amount: update.amount,
            update: HtlcUpdate::Add(update),
        }
    }

    /// Build a packet for an add handed in by a channel link.
    pub fn add(source: ChannelId, destination: HopId, update: UpdateAddHtlc) -> Self {
        Self {
            origin: Origin::Channel(source),
            destination: Some(destination),
            payment_hash: update.payment_hash,
            amount: update.amount,
            update: HtlcUpdate::Add(update),
        }
    }

    /// Build a packet for a settle handed in by a channel link.
    ///
    /// Settles do not carry the payment hash or amount on the wire, so
    /// the link supplies them from its own HTLC state.
    pub fn settle(
        source: ChannelId,
        update: UpdateSettleHtlc,
        payment_hash: PaymentHash,
        amount: Amount,
    ) -> Self {
        Self {
            origin: Origin::Channel(source),
            destination: None,
            payment_hash,
            amount,
            update: HtlcUpdate::Settle(update),
        }
    }

    /// Build a packet for a fail handed in by a channel link.
    pub fn fail(
        source: ChannelId,
        update: UpdateFailHtlc,
        payment_hash: PaymentHash,
        amount: Amount,
    ) -> Self {
        Self {
            origin: Origin::Channel(source),
            destination: None,
            payment_hash,
            amount,
            update: HtlcUpdate::Fail(update),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hopline_types::{FailCode, Preimage};

    fn test_add(hash: PaymentHash, amount: Amount) -> UpdateAddHtlc {
        UpdateAddHtlc {
            id: 1,
            payment_hash: hash,
            amount,
            expiry: 144,
        }
    }

    #[test]
    fn test_local_add_origin() {
        let hash = PaymentHash([0xaa; 32]);
        let hop = HopId([1u8; 20]);
        let packet = HtlcPacket::local_add(hop, test_add(hash, 50));

        assert_eq!(packet.origin, Origin::Local);
        assert_eq!(packet.destination, Some(hop));
        assert_eq!(packet.payment_hash, hash);
        assert_eq!(packet.amount, 50);
        assert!(packet.update.is_add());
    }

    #[test]
    fn test_forwarded_add_origin() {
        let source = ChannelId([2u8; 32]);
        let hop = HopId([1u8; 20]);
        let packet = HtlcPacket::add(source, hop, test_add(PaymentHash([0xbb; 32]), 10));

        assert_eq!(packet.origin, Origin::Channel(source));
        assert_eq!(packet.destination, Some(hop));
    }

    #[test]
    fn test_settle_has_no_destination() {
        let source = ChannelId([3u8; 32]);
        let hash = PaymentHash([0xcc; 32]);
        let packet = HtlcPacket::settle(
            source,
            UpdateSettleHtlc {
                id: 2,
                payment_preimage: Preimage([7u8; 32]),
            },
            hash,
            25,
        );

        assert_eq!(packet.origin, Origin::Channel(source));
        assert_eq!(packet.destination, None);
        assert_eq!(packet.payment_hash, hash);
        assert_eq!(packet.amount, 25);
    }

    #[test]
    fn test_fail_carries_reason() {
        let packet = HtlcPacket::fail(
            ChannelId([4u8; 32]),
            UpdateFailHtlc::from_code(3, FailCode::InsufficientCapacity),
            PaymentHash([0xdd; 32]),
            99,
        );

        match packet.update {
            HtlcUpdate::Fail(ref fail) => {
                assert_eq!(fail.fail_code().unwrap(), FailCode::InsufficientCapacity);
            }
            _ => panic!("expected fail update"),
        }
    }
}
