//! Switch configuration.

use std::sync::Arc;
use std::time::Duration;

use hopline_types::HopId;

use crate::close::ChanClose;

/// Callback that executes a cooperative or forced closure of a channel
/// initiated by a local subsystem.
///
/// Invoked with the fingerprint of the peer owning the channel and the
/// close request; the callback owns the workflow and reports progress on
/// the request's channels.
pub type LocalChannelClose = Arc<dyn Fn(HopId, ChanClose) + Send + Sync>;

/// Configuration for the switch.
///
/// The close callback is mandatory; the remaining knobs default to
/// values suitable for a production node.
#[derive(Clone)]
pub struct SwitchConfig {
    /// Kicks off the workflow to execute a cooperative or forced
    /// unilateral closure of a channel.
    pub local_channel_close: LocalChannelClose,

    /// Buffer size of each command channel feeding the dispatch loop.
    ///
    /// Default: 16.
    pub command_buffer: usize,

    /// Interval of the forwarding-statistics log tick.
    ///
    /// Default: 10 seconds.
    pub stats_interval: Duration,
}

impl SwitchConfig {
    /// Create a configuration with the given close callback and default
    /// values for everything else.
    pub fn new(local_channel_close: LocalChannelClose) -> Self {
        Self {
            local_channel_close,
            command_buffer: 16,
            stats_interval: Duration::from_secs(10),
        }
    }

    /// Set the command channel buffer size.
    pub fn with_command_buffer(mut self, size: usize) -> Self {
        self.command_buffer = size;
        self
    }

    /// Set the statistics log interval.
    pub fn with_stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = interval;
        self
    }
}

impl std::fmt::Debug for SwitchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwitchConfig")
            .field("command_buffer", &self.command_buffer)
            .field("stats_interval", &self.stats_interval)
            .finish_non_exhaustive()
    }
}
