//! The HTLC switch: the message-routing core of the hopline
//! payment-channel node.
//!
//! Each peer connection exposes one or more payment channels (links); the
//! switch routes HTLC updates between links to realize multi-hop
//! payments. It behaves like a packet switch whose interfaces are channel
//! links and whose packets are HTLC add/settle/fail updates keyed by
//! payment hash:
//!
//! - **Forwarded HTLCs**: an add arriving over one link is sent out over
//!   a link to the target hop, and a payment circuit remembers the
//!   reverse path for the eventual settle or fail.
//! - **Local payments**: `send_htlc` injects an add for a user payment
//!   and blocks until the route reports the preimage or a failure.
//! - **Link registry**: links are registered and unregistered as
//!   channels open and close, indexed by channel id and by peer.
//!
//! Everything that touches routing state runs on a single dispatch task
//! fed by command channels; see [`Switch`] for the concurrency contract.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hopline_switch::{Switch, SwitchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The close callback hands channel-close requests to the peer
//!     // connection that owns the channel.
//!     let config = SwitchConfig::new(Arc::new(|peer, request| {
//!         println!("close requested for a channel of {}: {:?}", peer, request.outpoint);
//!     }));
//!
//!     let switch = Switch::new(config);
//!     switch.start()?;
//!
//!     // ... register links, forward packets, send payments ...
//!
//!     switch.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! The per-channel link state machine, onion construction, and the
//! on-chain close workflow live outside this crate; the switch consumes
//! them through the [`ChannelLink`] trait and the
//! [`LocalChannelClose`] callback.

pub mod circuit;
pub mod close;
pub mod config;
pub mod error;
pub mod link;
pub mod packet;
pub mod switch;

mod pending;

// Re-export main types at crate root

// The switch itself
pub use switch::Switch;

// Configuration
pub use config::{LocalChannelClose, SwitchConfig};

// Error types
pub use error::{SwitchError, SwitchResult};

// The channel link contract
pub use link::{ChannelLink, LinkStats};

// Packets and circuits
pub use circuit::PaymentCircuit;
pub use packet::{HtlcPacket, Origin};

// Close requests
pub use close::{ChanClose, ChannelCloseType, CloseUpdate};

// Re-export the wire and identity types commonly used with the switch
pub use hopline_types::{
    Amount, ChannelId, FailCode, HopId, HtlcUpdate, OutPoint, PaymentHash, Preimage, PublicKey,
    UpdateAddHtlc, UpdateFailHtlc, UpdateSettleHtlc,
};
