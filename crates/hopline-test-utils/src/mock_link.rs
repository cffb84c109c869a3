//! Mock implementation of the `ChannelLink` trait for testing.
//!
//! Records every packet offered to the link and every lifecycle call,
//! and reports a configurable bandwidth and stats snapshot.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hopline_switch::{ChannelLink, HtlcPacket, LinkStats, SwitchError, SwitchResult};
use hopline_types::{Amount, ChannelId, HopId};
use tokio::sync::mpsc;

struct MockLinkInner {
    /// Currently advertised outbound capacity.
    bandwidth: Amount,
    /// Currently advertised forwarding totals.
    stats: LinkStats,
    /// Every packet offered to this link, in order (spy pattern).
    packets: Vec<HtlcPacket>,
    /// Whether start() succeeded.
    started: bool,
    /// Whether stop() was called.
    stopped: bool,
    /// When set, start() fails with this message.
    fail_start: Option<String>,
}

/// A mock implementation of the `ChannelLink` trait for testing.
///
/// Uses `Arc<Mutex<...>>` internally, so it is cheap to clone and all
/// clones share the same state. Tests typically keep one clone for
/// assertions and hand another to the switch as `Arc<dyn ChannelLink>`.
#[derive(Clone)]
pub struct MockChannelLink {
    channel_id: ChannelId,
    peer_id: HopId,
    inner: Arc<Mutex<MockLinkInner>>,
    packet_tx: mpsc::UnboundedSender<HtlcPacket>,
    packet_rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<HtlcPacket>>>,
}

impl MockChannelLink {
    /// Create a mock link with the given identity and zero bandwidth.
    pub fn new(channel_id: ChannelId, peer_id: HopId) -> Self {
        let (packet_tx, packet_rx) = mpsc::unbounded_channel();
        Self {
            channel_id,
            peer_id,
            inner: Arc::new(Mutex::new(MockLinkInner {
                bandwidth: 0,
                stats: LinkStats::default(),
                packets: Vec::new(),
                started: false,
                stopped: false,
                fail_start: None,
            })),
            packet_tx,
            packet_rx: Arc::new(tokio::sync::Mutex::new(packet_rx)),
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the advertised bandwidth.
    pub fn with_bandwidth(self, bandwidth: Amount) -> Self {
        self.set_bandwidth(bandwidth);
        self
    }

    /// Set the advertised stats snapshot.
    pub fn with_stats(self, stats: LinkStats) -> Self {
        self.set_stats(stats);
        self
    }

    /// Make start() fail with the given message.
    pub fn failing_start(self, message: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_start = Some(message.into());
        }
        self
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Update the advertised bandwidth.
    pub fn set_bandwidth(&self, bandwidth: Amount) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.bandwidth = bandwidth;
        }
    }

    /// Update the advertised stats snapshot.
    pub fn set_stats(&self, stats: LinkStats) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.stats = stats;
        }
    }

    // =========================================================================
    // Assertion Accessors
    // =========================================================================

    /// Every packet offered to this link so far, in order.
    pub fn offered_packets(&self) -> Vec<HtlcPacket> {
        self.inner
            .lock()
            .map(|inner| inner.packets.clone())
            .unwrap_or_default()
    }

    /// True once start() has succeeded.
    pub fn started(&self) -> bool {
        self.inner.lock().map(|inner| inner.started).unwrap_or(false)
    }

    /// True once stop() has been called.
    pub fn stopped(&self) -> bool {
        self.inner.lock().map(|inner| inner.stopped).unwrap_or(false)
    }

    /// Await the next packet offered to this link.
    ///
    /// Returns `None` if every clone of the link has been dropped. Wrap
    /// in `tokio::time::timeout` to bound the wait.
    pub async fn next_packet(&self) -> Option<HtlcPacket> {
        let mut rx = self.packet_rx.lock().await;
        rx.recv().await
    }
}

#[async_trait]
impl ChannelLink for MockChannelLink {
    fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    fn peer_id(&self) -> HopId {
        self.peer_id
    }

    fn bandwidth(&self) -> Amount {
        self.inner.lock().map(|inner| inner.bandwidth).unwrap_or(0)
    }

    fn stats(&self) -> LinkStats {
        self.inner
            .lock()
            .map(|inner| inner.stats)
            .unwrap_or_default()
    }

    fn offer_packet(&self, packet: HtlcPacket) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.packets.push(packet.clone());
        }
        let _ = self.packet_tx.send(packet);
    }

    async fn start(&self) -> SwitchResult<()> {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(message) = inner.fail_start.clone() {
            return Err(SwitchError::LinkStart(message));
        }
        inner.started = true;
        Ok(())
    }

    async fn stop(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.stopped = true;
        }
    }
}
