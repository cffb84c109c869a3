//! Channel close requests.
//!
//! The switch does not drive channel closure itself; it resolves the
//! owning link for the requested outpoint and hands the request to the
//! configured close workflow. Status updates and errors flow back to the
//! requester over the channels embedded in the request.

use hopline_types::OutPoint;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::SwitchError;

/// The kind of closure the peer should execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelCloseType {
    /// A cooperative channel closure negotiated with the peer.
    Regular,
    /// A channel breach was detected; the channel is force-closed and
    /// every other channel with the same peer is torn down.
    Breach,
}

/// Progress notification for an in-flight channel closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseUpdate {
    /// The closing transaction has been broadcast.
    Pending { txid: [u8; 32] },
    /// The closure workflow finished.
    Completed { success: bool },
}

/// A request to close the channel anchored at a particular outpoint.
#[derive(Debug)]
pub struct ChanClose {
    /// The kind of closure the peer should execute.
    pub close_type: ChannelCloseType,
    /// Funding outpoint of the channel to close.
    pub outpoint: OutPoint,
    /// Delivers closure progress to the requester.
    pub updates: mpsc::Sender<CloseUpdate>,
    /// Delivers the request's error, if any, to the requester.
    pub err: mpsc::Sender<SwitchError>,
}
