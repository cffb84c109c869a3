//! The channel link contract consumed by the switch.
//!
//! A link is the switch's handle to the task managing one open payment
//! channel. The switch never drives commitment updates itself; it only
//! hands packets across this seam and reads the link's advertised
//! identity, capacity, and counters.

use async_trait::async_trait;
use hopline_types::{Amount, ChannelId, HopId};

use crate::error::SwitchResult;
use crate::packet::HtlcPacket;

/// Running totals a link reports for its channel.
///
/// All counters are monotonically non-decreasing for the lifetime of the
/// link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Number of commitment updates applied.
    pub updates: u64,
    /// Total millisatoshis sent over the channel.
    pub sent: Amount,
    /// Total millisatoshis received over the channel.
    pub received: Amount,
}

/// Interface the switch requires from a per-channel link.
///
/// Links are shared as `Arc<dyn ChannelLink>`; every method takes `&self`
/// and implementations must be safe to call from the dispatch task and
/// from detached hand-off tasks concurrently.
#[async_trait]
pub trait ChannelLink: Send + Sync {
    /// Identifier of the channel this link manages. Stable for the
    /// lifetime of the link.
    fn channel_id(&self) -> ChannelId;

    /// Fingerprint of the peer on the other end of the channel.
    fn peer_id(&self) -> HopId;

    /// Currently available outbound capacity in millisatoshis.
    fn bandwidth(&self) -> Amount;

    /// Current forwarding totals for the channel.
    fn stats(&self) -> LinkStats;

    /// Hand a packet to the link for further dispatch.
    ///
    /// Must not block: a link that cannot process the packet immediately
    /// has to buffer it internally. The dispatch loop calls this inline.
    fn offer_packet(&self, packet: HtlcPacket);

    /// Start the link's processing task.
    async fn start(&self) -> SwitchResult<()>;

    /// Stop the link and release its resources.
    async fn stop(&self);
}
