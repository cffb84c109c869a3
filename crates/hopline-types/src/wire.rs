//! HTLC channel update messages.
//!
//! The switch routes exactly three kinds of channel update: an `Add` that
//! offers a new HTLC, and the `Settle`/`Fail` pair that resolves one. The
//! set is closed, so routing code can match exhaustively instead of
//! type-switching at runtime.

use serde::{Deserialize, Serialize};

use crate::error::WireError;
use crate::{Amount, PaymentHash, Preimage};

/// Offer a new HTLC over a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateAddHtlc {
    /// Update id, scoped to the channel the HTLC rides on.
    pub id: u64,
    /// Hash locking the HTLC.
    pub payment_hash: PaymentHash,
    /// HTLC value in millisatoshis.
    pub amount: Amount,
    /// Absolute block height after which the HTLC times out.
    pub expiry: u32,
}

/// Settle an outstanding HTLC by revealing its preimage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateSettleHtlc {
    /// Update id of the HTLC being settled.
    pub id: u64,
    /// The revealed secret.
    pub payment_preimage: Preimage,
}

/// Cancel an outstanding HTLC, carrying an opaque failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UpdateFailHtlc {
    /// Update id of the HTLC being failed.
    pub id: u64,
    /// Encoded failure reason; the first byte is a [`FailCode`].
    pub reason: Vec<u8>,
}

impl UpdateFailHtlc {
    /// Build a fail update carrying the given code as its reason.
    pub fn from_code(id: u64, code: FailCode) -> Self {
        Self {
            id,
            reason: vec![code as u8],
        }
    }

    /// Decode the failure reason into a fail code.
    pub fn fail_code(&self) -> Result<FailCode, WireError> {
        FailCode::from_reason(&self.reason)
    }
}

/// The closed set of HTLC updates a channel link can hand to the switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HtlcUpdate {
    /// A newly offered HTLC.
    Add(UpdateAddHtlc),
    /// A settled HTLC with its preimage.
    Settle(UpdateSettleHtlc),
    /// A cancelled HTLC with a failure reason.
    Fail(UpdateFailHtlc),
}

impl HtlcUpdate {
    /// The channel-scoped update id.
    pub fn id(&self) -> u64 {
        match self {
            HtlcUpdate::Add(add) => add.id,
            HtlcUpdate::Settle(settle) => settle.id,
            HtlcUpdate::Fail(fail) => fail.id,
        }
    }

    /// True if this is an `Add` update.
    pub fn is_add(&self) -> bool {
        matches!(self, HtlcUpdate::Add(_))
    }
}

/// Failure reasons carried on the wire in a fail update.
///
/// Encoded as a single byte at the head of [`UpdateFailHtlc::reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
#[non_exhaustive]
pub enum FailCode {
    /// Failure with no more specific cause.
    UnknownError = 0x00,
    /// No route to the destination hop.
    UnknownDestination = 0x01,
    /// No candidate channel had enough outbound capacity.
    InsufficientCapacity = 0x02,
}

impl FailCode {
    /// Decode a fail code from its wire byte.
    pub fn from_byte(byte: u8) -> Result<Self, WireError> {
        match byte {
            0x00 => Ok(FailCode::UnknownError),
            0x01 => Ok(FailCode::UnknownDestination),
            0x02 => Ok(FailCode::InsufficientCapacity),
            other => Err(WireError::UnknownFailCode(other)),
        }
    }

    /// Decode a fail code from an encoded reason field.
    ///
    /// Only the first byte carries the code; any trailing bytes are
    /// opaque padding and ignored.
    pub fn from_reason(reason: &[u8]) -> Result<Self, WireError> {
        match reason.first() {
            Some(&byte) => Self::from_byte(byte),
            None => Err(WireError::EmptyFailReason),
        }
    }
}

impl std::fmt::Display for FailCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailCode::UnknownError => "unknown error",
            FailCode::UnknownDestination => "unknown destination",
            FailCode::InsufficientCapacity => "insufficient capacity",
        };
        write!(f, "{}", s)
    }
}
