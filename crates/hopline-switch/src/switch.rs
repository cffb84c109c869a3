//! The switch: a central messaging bus for all incoming and outgoing
//! HTLCs.
//!
//! Connected peers with active channels are treated as named interfaces
//! which refer to active channels as links. The switch manages the
//! hand-off for multi-hop HTLCs, forwards HTLCs initiated from within the
//! node, and notifies local subsystems of the outcome of their
//! outstanding payments.
//!
//! All routing state — the link registry, the peer index, the circuit map
//! and the stats counters — is owned by a single dispatch task. The
//! public methods marshal work onto that task through command channels
//! and await per-command reply slots, so no lock covers the routing state
//! itself. The pending-payment table is the one exception and carries its
//! own read/write lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use hopline_types::{
    Amount, ChannelId, FailCode, HopId, HtlcUpdate, OutPoint, Preimage, UpdateAddHtlc,
    UpdateFailHtlc,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::circuit::{CircuitMap, PaymentCircuit};
use crate::close::{ChanClose, ChannelCloseType, CloseUpdate};
use crate::config::{LocalChannelClose, SwitchConfig};
use crate::error::{SwitchError, SwitchResult};
use crate::link::{ChannelLink, LinkStats};
use crate::packet::{HtlcPacket, Origin};
use crate::pending::{PendingPayment, PendingPaymentTable};

/// A packet forward request together with its reply slot.
struct ForwardCommand {
    packet: HtlcPacket,
    reply: oneshot::Sender<SwitchResult<()>>,
}

/// Link registry commands executed on the dispatch task.
enum LinkCommand {
    /// Start and register a new link.
    Add {
        link: Arc<dyn ChannelLink>,
        reply: oneshot::Sender<SwitchResult<()>>,
    },

    /// Unregister and stop the link for a channel.
    Remove {
        channel: ChannelId,
        reply: oneshot::Sender<SwitchResult<()>>,
    },

    /// Look up the link for a channel.
    Get {
        channel: ChannelId,
        reply: oneshot::Sender<SwitchResult<Arc<dyn ChannelLink>>>,
    },

    /// Snapshot the links registered for a peer.
    GetByHop {
        hop: HopId,
        reply: oneshot::Sender<SwitchResult<Vec<Arc<dyn ChannelLink>>>>,
    },
}

/// Receiving halves of the command channels, handed to the dispatch task
/// on start.
struct CommandReceivers {
    forward: mpsc::Receiver<ForwardCommand>,
    link: mpsc::Receiver<LinkCommand>,
    close: mpsc::Receiver<ChanClose>,
}

/// The central HTLC switch.
///
/// Thread-safe: every method takes `&self` and may be called from any
/// task. After [`Switch::stop`] all operations fail with
/// [`SwitchError::Stopped`].
pub struct Switch {
    started: AtomicBool,
    stopped: AtomicBool,

    cfg: SwitchConfig,

    /// User payments awaiting their settle/fail response, keyed by
    /// payment hash.
    pending: Arc<PendingPaymentTable>,

    forward_tx: mpsc::Sender<ForwardCommand>,
    link_tx: mpsc::Sender<LinkCommand>,
    close_tx: mpsc::Sender<ChanClose>,

    /// Shutdown signal; flips to `true` exactly once, on stop.
    shutdown: watch::Sender<bool>,

    /// Command receivers stashed between `new` and `start`.
    receivers: StdMutex<Option<CommandReceivers>>,

    /// Handle of the dispatch task, awaited on stop.
    dispatch_handle: StdMutex<Option<JoinHandle<()>>>,
}

impl Switch {
    /// Create a new switch. The dispatch task is not running until
    /// [`Switch::start`] is called.
    pub fn new(cfg: SwitchConfig) -> Self {
        let buffer = cfg.command_buffer.max(1);
        let (forward_tx, forward_rx) = mpsc::channel(buffer);
        let (link_tx, link_rx) = mpsc::channel(buffer);
        let (close_tx, close_rx) = mpsc::channel(buffer);
        let (shutdown, _) = watch::channel(false);

        Self {
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            cfg,
            pending: Arc::new(PendingPaymentTable::new()),
            forward_tx,
            link_tx,
            close_tx,
            shutdown,
            receivers: StdMutex::new(Some(CommandReceivers {
                forward: forward_rx,
                link: link_rx,
                close: close_rx,
            })),
            dispatch_handle: StdMutex::new(None),
        }
    }

    /// Spawn the dispatch task. Calling `start` a second time is a no-op.
    pub fn start(&self) -> SwitchResult<()> {
        if self
            .started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("htlc switch already started");
            return Ok(());
        }

        info!("starting htlc switch");

        let Some(receivers) = self.receivers.lock().ok().and_then(|mut slot| slot.take()) else {
            return Ok(());
        };

        let forwarder = Forwarder {
            local_channel_close: self.cfg.local_channel_close.clone(),
            stats_interval: self.cfg.stats_interval,
            pending: self.pending.clone(),
            links: HashMap::new(),
            links_by_peer: HashMap::new(),
            circuits: CircuitMap::new(),
            link_stats: HashMap::new(),
            totals: LinkStats::default(),
        };
        let shutdown_rx = self.shutdown.subscribe();
        let handle = tokio::spawn(forwarder.run(receivers, shutdown_rx));

        if let Ok(mut slot) = self.dispatch_handle.lock() {
            *slot = Some(handle);
        }
        Ok(())
    }

    /// Signal shutdown and wait for the dispatch task to drain.
    ///
    /// Every remaining link is removed (and thereby stopped) before this
    /// returns. Calling `stop` a second time is a no-op.
    pub async fn stop(&self) {
        if self
            .stopped
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("htlc switch already stopped");
            return;
        }

        info!("htlc switch shutting down");
        let _ = self.shutdown.send(true);

        let handle = self.dispatch_handle.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Send a locally originated HTLC toward the given hop and wait for
    /// its resolution.
    ///
    /// Returns the revealed preimage when the payment settles. Any
    /// failure — before the packet leaves the switch, or reported back by
    /// the route — is returned as the error, with no preimage revealed.
    pub async fn send_htlc(
        &self,
        next_hop: HopId,
        update: UpdateAddHtlc,
    ) -> SwitchResult<Preimage> {
        // Register the payment first so the returning settle/fail can
        // find it.
        let (payment, resolution) = PendingPayment::new(update.payment_hash, update.amount);
        let payment_hash = payment.payment_hash();
        let amount = payment.amount();
        self.pending.insert(payment);

        // If the forward itself errors the packet never left the switch;
        // unregister the payment and surface the error directly.
        let packet = HtlcPacket::local_add(next_hop, update);
        if let Err(err) = self.forward(packet).await {
            let _ = self.pending.remove(&payment_hash, amount);
            return Err(err);
        }

        let mut shutdown = self.shutdown.subscribe();
        if *shutdown.borrow() {
            return Err(SwitchError::Stopped);
        }

        // The dispatch task writes the error slot before the preimage
        // slot; await them in the same order, unblocking on shutdown.
        let failure = tokio::select! {
            result = resolution.error => result.map_err(|_| SwitchError::Stopped)?,
            _ = shutdown.changed() => return Err(SwitchError::Stopped),
        };
        let preimage = tokio::select! {
            result = resolution.preimage => result.map_err(|_| SwitchError::Stopped)?,
            _ = shutdown.changed() => return Err(SwitchError::Stopped),
        };

        match failure {
            Some(err) => Err(err),
            None => Ok(preimage),
        }
    }

    /// Submit a packet for routing and wait for the dispatch outcome.
    ///
    /// Channel links call this to hand updates to the switch after they
    /// have been locked into their channel.
    pub async fn forward(&self, packet: HtlcPacket) -> SwitchResult<()> {
        let mut shutdown = self.guard()?;
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = ForwardCommand {
            packet,
            reply: reply_tx,
        };

        tokio::select! {
            result = self.forward_tx.send(command) => {
                if result.is_err() {
                    return Err(SwitchError::Stopped);
                }
            }
            _ = shutdown.changed() => return Err(SwitchError::Stopped),
        }

        tokio::select! {
            result = reply_rx => result.map_err(|_| SwitchError::Stopped)?,
            _ = shutdown.changed() => Err(SwitchError::Stopped),
        }
    }

    /// Start and register a new channel link.
    ///
    /// The link is started before registration; a start failure leaves
    /// the registry untouched. Registering a second link for the same
    /// channel is rejected.
    pub async fn add_link(&self, link: Arc<dyn ChannelLink>) -> SwitchResult<()> {
        self.submit_link_command(move |reply| LinkCommand::Add { link, reply })
            .await
    }

    /// Unregister the link for a channel and stop it.
    pub async fn remove_link(&self, channel: ChannelId) -> SwitchResult<()> {
        self.submit_link_command(move |reply| LinkCommand::Remove { channel, reply })
            .await
    }

    /// Look up the link registered for a channel.
    pub async fn get_link(&self, channel: ChannelId) -> SwitchResult<Arc<dyn ChannelLink>> {
        self.submit_link_command(move |reply| LinkCommand::Get { channel, reply })
            .await
    }

    /// Snapshot the links registered for a peer.
    ///
    /// The returned vector is a copy; it does not observe later registry
    /// mutation.
    pub async fn get_links(&self, hop: HopId) -> SwitchResult<Vec<Arc<dyn ChannelLink>>> {
        self.submit_link_command(move |reply| LinkCommand::GetByHop { hop, reply })
            .await
    }

    /// Request closure of the channel anchored at `outpoint`.
    ///
    /// Returns the receivers for closure progress and for the request's
    /// error, driven by the configured close workflow.
    pub async fn close_link(
        &self,
        outpoint: OutPoint,
        close_type: ChannelCloseType,
    ) -> SwitchResult<(mpsc::Receiver<CloseUpdate>, mpsc::Receiver<SwitchError>)> {
        let mut shutdown = self.guard()?;

        let (updates_tx, updates_rx) = mpsc::channel(1);
        let (err_tx, err_rx) = mpsc::channel(1);
        let request = ChanClose {
            close_type,
            outpoint,
            updates: updates_tx,
            err: err_tx,
        };

        tokio::select! {
            result = self.close_tx.send(request) => {
                if result.is_err() {
                    return Err(SwitchError::Stopped);
                }
            }
            _ = shutdown.changed() => return Err(SwitchError::Stopped),
        }

        Ok((updates_rx, err_rx))
    }

    /// Overall number of user payments still awaiting resolution.
    pub fn num_pending_payments(&self) -> usize {
        self.pending.len()
    }

    /// Subscribe to the shutdown signal, failing fast if it already
    /// fired.
    fn guard(&self) -> SwitchResult<watch::Receiver<bool>> {
        let shutdown = self.shutdown.subscribe();
        if *shutdown.borrow() {
            return Err(SwitchError::Stopped);
        }
        Ok(shutdown)
    }

    /// Submit a link command and await its reply, racing both phases
    /// against shutdown.
    async fn submit_link_command<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<SwitchResult<T>>) -> LinkCommand,
    ) -> SwitchResult<T> {
        let mut shutdown = self.guard()?;
        let (reply_tx, reply_rx) = oneshot::channel();
        let command = build(reply_tx);

        tokio::select! {
            result = self.link_tx.send(command) => {
                if result.is_err() {
                    return Err(SwitchError::Stopped);
                }
            }
            _ = shutdown.changed() => return Err(SwitchError::Stopped),
        }

        tokio::select! {
            result = reply_rx => result.map_err(|_| SwitchError::Stopped)?,
            _ = shutdown.changed() => Err(SwitchError::Stopped),
        }
    }
}

/// The dispatch task: sole owner of the link registry, the peer index,
/// the circuit map and the stats counters.
struct Forwarder {
    local_channel_close: LocalChannelClose,
    stats_interval: Duration,
    pending: Arc<PendingPaymentTable>,

    /// Channel id -> link managing that channel.
    links: HashMap<ChannelId, Arc<dyn ChannelLink>>,

    /// Peer fingerprint -> links for that peer's channels.
    links_by_peer: HashMap<HopId, Vec<Arc<dyn ChannelLink>>>,

    /// In-flight payment circuits.
    circuits: CircuitMap,

    /// Previous stats snapshot per link, for delta computation.
    link_stats: HashMap<ChannelId, LinkStats>,

    /// Running totals across all links since start.
    totals: LinkStats,
}

impl Forwarder {
    /// Serialize all decisions touching shared routing state.
    async fn run(mut self, mut receivers: CommandReceivers, mut shutdown: watch::Receiver<bool>) {
        let first_tick = tokio::time::Instant::now() + self.stats_interval;
        let mut ticker = tokio::time::interval_at(first_tick, self.stats_interval);

        loop {
            tokio::select! {
                Some(command) = receivers.forward.recv() => {
                    let result = self.handle_forward(command.packet);
                    let _ = command.reply.send(result);
                }

                Some(command) = receivers.link.recv() => {
                    self.handle_link_command(command).await;
                }

                Some(request) = receivers.close.recv() => {
                    self.handle_channel_close(request);
                }

                _ = ticker.tick() => {
                    self.log_stats();
                }

                _ = shutdown.changed() => break,
            }
        }

        // Remove all links once we've been signalled for shutdown; this
        // also stops each of them.
        let channels: Vec<ChannelId> = self.links.keys().copied().collect();
        for channel in channels {
            if let Err(err) = self.remove_link(&channel) {
                error!("unable to remove channel link on stop: {}", err);
            }
        }
    }

    /// Route one packet, branching on where it entered the switch.
    fn handle_forward(&mut self, packet: HtlcPacket) -> SwitchResult<()> {
        match packet.origin {
            // A local subsystem injected a fresh add; send it out over a
            // link with enough capacity. No circuit is created: the
            // pending-payment table tracks the response path instead.
            Origin::Local if packet.update.is_add() => self.route_local_add(packet),

            // Only adds originate locally.
            Origin::Local => Err(SwitchError::WrongUpdateType),

            // A link handed us a new add; forward it and remember the
            // reverse path.
            Origin::Channel(source) if packet.update.is_add() => self.forward_add(source, packet),

            // A settle or fail coming back from a link belongs to a
            // circuit we forwarded earlier.
            Origin::Channel(_) if self.circuits.contains(&packet.payment_hash) => {
                self.forward_resolution(packet)
            }

            // No circuit: the settle or fail terminates here as the
            // response to a local payment.
            Origin::Channel(_) => self.resolve_local_payment(packet),
        }
    }

    /// Inject a locally originated add over a link to the target hop.
    fn route_local_add(&mut self, packet: HtlcPacket) -> SwitchResult<()> {
        let hop = match packet.destination {
            Some(hop) => hop,
            None => return Err(SwitchError::MissingDestination),
        };

        let links = match self.links_for_hop(&hop) {
            Ok(links) => links,
            Err(err) => {
                error!("unable to find links for destination {}: {}", hop, err);
                return Err(SwitchError::Rejected(FailCode::UnknownDestination));
            }
        };

        let destination = match select_destination(&links, packet.amount) {
            Some(link) => link,
            None => {
                error!(
                    "no channel link with sufficient capacity, need {} msat",
                    packet.amount
                );
                return Err(SwitchError::Rejected(FailCode::InsufficientCapacity));
            }
        };

        destination.offer_packet(packet);
        Ok(())
    }

    /// Forward an add handed in by a channel link, creating the circuit
    /// that routes the eventual settle or fail back.
    fn forward_add(&mut self, source_channel: ChannelId, packet: HtlcPacket) -> SwitchResult<()> {
        let source = match self.links.get(&source_channel) {
            Some(link) => link.clone(),
            None => {
                error!(
                    "unable to find source channel link for channel {}",
                    source_channel
                );
                return Err(SwitchError::LinkNotFound);
            }
        };

        let hop = match packet.destination {
            Some(hop) => hop,
            None => {
                self.fail_back(&source, &packet, FailCode::UnknownDestination);
                return Err(SwitchError::MissingDestination);
            }
        };

        let links = match self.links_for_hop(&hop) {
            Ok(links) => links,
            Err(err) => {
                // The upstream link observes a protocol-level failure,
                // not a silent drop.
                self.fail_back(&source, &packet, FailCode::UnknownDestination);
                error!("unable to find links for destination {}: {}", hop, err);
                return Err(err);
            }
        };

        let destination = match select_destination(&links, packet.amount) {
            Some(link) => link,
            None => {
                self.fail_back(&source, &packet, FailCode::InsufficientCapacity);
                error!(
                    "no channel link with sufficient capacity, need {} msat",
                    packet.amount
                );
                return Err(SwitchError::InsufficientCapacity {
                    amount: packet.amount,
                });
            }
        };

        // Remember the reverse path before the add leaves the switch.
        let circuit = PaymentCircuit::new(
            source_channel,
            destination.channel_id(),
            packet.payment_hash,
        );
        if let Err(err) = self.circuits.add(circuit) {
            self.fail_back(&source, &packet, FailCode::UnknownError);
            error!(
                "unable to add circuit for hash {}: {}",
                packet.payment_hash, err
            );
            return Err(err);
        }

        destination.offer_packet(packet);
        Ok(())
    }

    /// Route a settle or fail back over the circuit it belongs to.
    fn forward_resolution(&mut self, packet: HtlcPacket) -> SwitchResult<()> {
        // The circuit is removed before the forward so that at most one
        // circuit exists per hash even if the source immediately recycles
        // it.
        let circuit = self.circuits.remove(&packet.payment_hash)?;

        let source = match self.links.get(&circuit.source) {
            Some(link) => link.clone(),
            None => {
                error!(
                    "unable to find source channel link to forward settle/fail for hash {}",
                    packet.payment_hash
                );
                return Err(SwitchError::LinkNotFound);
            }
        };

        debug!(
            "closing completed payment circuit for {}: {} <-> {}",
            packet.payment_hash, circuit.source, circuit.destination
        );

        source.offer_packet(packet);
        Ok(())
    }

    /// A settle or fail with no circuit terminates here: deliver the
    /// outcome to the matching pending local payment.
    fn resolve_local_payment(&mut self, packet: HtlcPacket) -> SwitchResult<()> {
        let payment = match self.pending.find(&packet.payment_hash, packet.amount) {
            Some(payment) => payment,
            None => {
                error!(
                    "no circuit or pending payment for hash {}, dropping packet",
                    packet.payment_hash
                );
                return Err(SwitchError::CircuitNotFound(packet.payment_hash));
            }
        };

        match packet.update {
            HtlcUpdate::Settle(settle) => {
                payment.resolve(None, settle.payment_preimage);
            }
            HtlcUpdate::Fail(fail) => {
                let failure = match fail.fail_code() {
                    Ok(code) => SwitchError::Rejected(code),
                    Err(err) => SwitchError::ReasonDecode {
                        id: fail.id,
                        source: err,
                    },
                };
                payment.resolve(Some(failure), Preimage::ZERO);
            }
            HtlcUpdate::Add(_) => return Err(SwitchError::WrongUpdateType),
        }

        if let Err(err) = self.pending.remove(&packet.payment_hash, packet.amount) {
            warn!("stale pending payment entry: {}", err);
        }
        Ok(())
    }

    /// Offer a fail packet back to the source link on a detached task.
    ///
    /// The hand-off must not run inline: the source link may itself be
    /// blocked on a call into the switch.
    fn fail_back(&self, source: &Arc<dyn ChannelLink>, packet: &HtlcPacket, code: FailCode) {
        let fail = HtlcPacket::fail(
            source.channel_id(),
            UpdateFailHtlc::from_code(packet.update.id(), code),
            packet.payment_hash,
            packet.amount,
        );
        let source = source.clone();
        tokio::spawn(async move {
            source.offer_packet(fail);
        });
    }

    async fn handle_link_command(&mut self, command: LinkCommand) {
        match command {
            LinkCommand::Add { link, reply } => {
                let _ = reply.send(self.add_link(link).await);
            }
            LinkCommand::Remove { channel, reply } => {
                let _ = reply.send(self.remove_link(&channel));
            }
            LinkCommand::Get { channel, reply } => {
                let _ = reply.send(self.get_link(&channel));
            }
            LinkCommand::GetByHop { hop, reply } => {
                let _ = reply.send(self.links_for_hop(&hop));
            }
        }
    }

    /// Start a link and register it in both maps.
    async fn add_link(&mut self, link: Arc<dyn ChannelLink>) -> SwitchResult<()> {
        let channel = link.channel_id();
        if self.links.contains_key(&channel) {
            return Err(SwitchError::DuplicateLink(channel));
        }

        link.start().await?;

        let hop = link.peer_id();
        self.links.insert(channel, link.clone());
        self.links_by_peer.entry(hop).or_default().push(link.clone());

        info!(
            "added channel link {} for peer {}, bandwidth={} msat",
            channel,
            hop,
            link.bandwidth()
        );
        Ok(())
    }

    /// Unregister a link from both maps and stop it on a detached task.
    fn remove_link(&mut self, channel: &ChannelId) -> SwitchResult<()> {
        let link = self
            .links
            .remove(channel)
            .ok_or(SwitchError::LinkNotFound)?;

        let hop = link.peer_id();
        if let Some(bucket) = self.links_by_peer.get_mut(&hop) {
            if let Some(pos) = bucket.iter().position(|l| l.channel_id() == *channel) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.links_by_peer.remove(&hop);
            }
        }
        self.link_stats.remove(channel);

        let stopping = link.clone();
        tokio::spawn(async move {
            stopping.stop().await;
        });

        info!("removed channel link {}", channel);
        Ok(())
    }

    fn get_link(&self, channel: &ChannelId) -> SwitchResult<Arc<dyn ChannelLink>> {
        self.links
            .get(channel)
            .cloned()
            .ok_or(SwitchError::LinkNotFound)
    }

    /// Snapshot the link list for a peer.
    fn links_for_hop(&self, hop: &HopId) -> SwitchResult<Vec<Arc<dyn ChannelLink>>> {
        match self.links_by_peer.get(hop) {
            Some(links) if !links.is_empty() => Ok(links.clone()),
            _ => Err(SwitchError::NoLinksForHop(*hop)),
        }
    }

    /// Resolve the owning link for a close request and hand the request
    /// to the configured close workflow.
    fn handle_channel_close(&mut self, request: ChanClose) {
        let channel = ChannelId::from_outpoint(&request.outpoint);

        let link = match self.links.get(&channel) {
            Some(link) => link.clone(),
            None => {
                let _ = request.err.try_send(SwitchError::LinkNotFound);
                return;
            }
        };

        let peer = link.peer_id();
        let close_type = request.close_type;
        debug!(
            "requesting local channel close, peer {} channel {}",
            peer, channel
        );

        (self.local_channel_close)(peer, request);

        // A breach close also tears down every other link registered to
        // the same peer. The breached channel's own link stays registered
        // until the close workflow removes it.
        if close_type == ChannelCloseType::Breach {
            self.teardown_peer_links(&peer, &channel);
        }
    }

    fn teardown_peer_links(&mut self, peer: &HopId, keep: &ChannelId) {
        let siblings: Vec<ChannelId> = self
            .links_by_peer
            .get(peer)
            .map(|links| {
                links
                    .iter()
                    .map(|link| link.channel_id())
                    .filter(|id| id != keep)
                    .collect()
            })
            .unwrap_or_default();

        for channel in siblings {
            info!(
                "tearing down sibling channel {} of breached peer {}",
                channel, peer
            );
            if let Err(err) = self.remove_link(&channel) {
                error!("unable to remove sibling channel link {}: {}", channel, err);
            }
        }
    }

    /// Compute forwarding deltas for the last interval and log them when
    /// something was forwarded.
    fn log_stats(&mut self) {
        let mut diff = LinkStats::default();
        for (channel, link) in &self.links {
            let current = link.stats();
            // Delta against this link's own previous snapshot, so a
            // removed and re-added link cannot regress the totals.
            let previous = self.link_stats.insert(*channel, current).unwrap_or_default();
            diff.updates += current.updates.saturating_sub(previous.updates);
            diff.sent += current.sent.saturating_sub(previous.sent);
            diff.received += current.received.saturating_sub(previous.received);
        }

        // Nothing was forwarded since the last tick.
        if diff.updates == 0 {
            return;
        }

        self.totals.updates += diff.updates;
        self.totals.sent += diff.sent;
        self.totals.received += diff.received;

        let rate = diff.updates as f64 / self.stats_interval.as_secs_f64();
        info!(
            "sent {} msat, received {} msat in the last {}s ({:.2} updates/s)",
            diff.sent,
            diff.received,
            self.stats_interval.as_secs(),
            rate
        );
    }
}

/// Pick the first link with enough outbound capacity for the amount.
fn select_destination(
    links: &[Arc<dyn ChannelLink>],
    amount: Amount,
) -> Option<Arc<dyn ChannelLink>> {
    links.iter().find(|link| link.bandwidth() >= amount).cloned()
}
