//! Switch error types.

use hopline_types::{Amount, ChannelId, FailCode, HopId, PaymentHash, WireError};
use thiserror::Error;

/// Errors produced by the switch and its routing paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SwitchError {
    /// No link is registered for the requested channel.
    #[error("channel link not found")]
    LinkNotFound,

    /// The destination hop has no registered links.
    #[error("no channel links found for hop {0}")]
    NoLinksForHop(HopId),

    /// No candidate link had enough outbound capacity.
    #[error("insufficient capacity to forward {amount} msat")]
    InsufficientCapacity { amount: Amount },

    /// No in-flight circuit exists for the payment hash.
    #[error("payment circuit not found for hash {0}")]
    CircuitNotFound(PaymentHash),

    /// A circuit for the payment hash is already in flight.
    #[error("duplicate payment circuit for hash {0}")]
    DuplicateCircuit(PaymentHash),

    /// A link for this channel is already registered.
    #[error("channel link already registered for channel {0}")]
    DuplicateLink(ChannelId),

    /// No pending payment matches the given hash and amount.
    #[error("unable to find pending payment with hash {payment_hash} and amount {amount}")]
    PendingPaymentNotFound {
        payment_hash: PaymentHash,
        amount: Amount,
    },

    /// The update variant is not valid on this code path.
    #[error("wrong update type")]
    WrongUpdateType,

    /// An add packet carried no destination hop.
    #[error("add packet is missing a destination hop")]
    MissingDestination,

    /// The switch has been stopped.
    #[error("htlc switch was stopped")]
    Stopped,

    /// A payment was rejected with the given wire failure code.
    #[error("payment failed: {0}")]
    Rejected(FailCode),

    /// The failure reason of a fail update could not be decoded.
    #[error("unable to decode failure reason for update {id}")]
    ReasonDecode {
        id: u64,
        #[source]
        source: WireError,
    },

    /// A channel link failed to start.
    #[error("channel link failed to start: {0}")]
    LinkStart(String),
}

/// Result type alias using SwitchError.
pub type SwitchResult<T> = Result<T, SwitchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SwitchError::LinkNotFound;
        assert_eq!(format!("{}", err), "channel link not found");

        let err = SwitchError::InsufficientCapacity { amount: 50 };
        assert_eq!(format!("{}", err), "insufficient capacity to forward 50 msat");

        let err = SwitchError::Rejected(FailCode::UnknownDestination);
        assert_eq!(format!("{}", err), "payment failed: unknown destination");

        let err = SwitchError::Stopped;
        assert_eq!(format!("{}", err), "htlc switch was stopped");
    }

    #[test]
    fn test_reason_decode_source() {
        use std::error::Error;

        let err = SwitchError::ReasonDecode {
            id: 3,
            source: WireError::UnknownFailCode(0x99),
        };
        assert!(err.source().is_some());
    }
}
