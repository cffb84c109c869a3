//! Integration tests for the switch's link registry.
//!
//! Verifies that the channel map and the peer index stay consistent
//! across add/remove sequences, that lookups snapshot rather than alias
//! live state, and that registry failures leave state untouched.

use std::sync::Arc;
use std::time::Duration;

use hopline_switch::{ChannelLink, Switch, SwitchError};
use hopline_test_utils::{noop_switch_config, test_channel_id, test_hop_id, MockChannelLink};
use tokio::time::timeout;

async fn started_switch() -> Switch {
    let switch = Switch::new(noop_switch_config());
    switch.start().unwrap();
    switch
}

/// Poll until the condition holds, with a deadline.
async fn wait_until(mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn add_then_get_link() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();
    assert!(link.started());

    let found = switch.get_link(link.channel_id()).await.unwrap();
    assert_eq!(found.channel_id(), link.channel_id());
    assert_eq!(found.peer_id(), link.peer_id());

    switch.stop().await;
}

#[tokio::test]
async fn get_links_contains_link_exactly_once() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();

    let links = switch.get_links(link.peer_id()).await.unwrap();
    let matching = links
        .iter()
        .filter(|l| l.channel_id() == link.channel_id())
        .count();
    assert_eq!(matching, 1);

    // After removal the peer has no links at all.
    switch.remove_link(link.channel_id()).await.unwrap();
    let result = switch.get_links(link.peer_id()).await;
    assert!(matches!(result, Err(SwitchError::NoLinksForHop(_))));

    switch.stop().await;
}

#[tokio::test]
async fn add_remove_restores_prior_state() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();
    switch.remove_link(link.channel_id()).await.unwrap();

    let result = switch.get_link(link.channel_id()).await;
    assert!(matches!(result, Err(SwitchError::LinkNotFound)));
    let result = switch.get_links(link.peer_id()).await;
    assert!(matches!(result, Err(SwitchError::NoLinksForHop(_))));

    // The removed link was stopped (on a detached task).
    wait_until(|| link.stopped()).await;

    switch.stop().await;
}

#[tokio::test]
async fn multiple_links_per_peer() {
    let switch = started_switch().await;

    let peer = test_hop_id();
    let first = MockChannelLink::new(test_channel_id(), peer).with_bandwidth(10);
    let second = MockChannelLink::new(test_channel_id(), peer).with_bandwidth(20);
    switch.add_link(Arc::new(first.clone())).await.unwrap();
    switch.add_link(Arc::new(second.clone())).await.unwrap();

    let links = switch.get_links(peer).await.unwrap();
    assert_eq!(links.len(), 2);

    // Removing one leaves the other registered and reachable.
    switch.remove_link(first.channel_id()).await.unwrap();
    let links = switch.get_links(peer).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].channel_id(), second.channel_id());

    switch.stop().await;
}

#[tokio::test]
async fn duplicate_channel_rejected() {
    let switch = started_switch().await;

    let channel = test_channel_id();
    let original = MockChannelLink::new(channel, test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(original.clone())).await.unwrap();

    let imposter = MockChannelLink::new(channel, test_hop_id());
    let result = switch.add_link(Arc::new(imposter.clone())).await;
    assert!(matches!(result, Err(SwitchError::DuplicateLink(c)) if c == channel));

    // The rejected link was never started; the original still serves the
    // channel.
    assert!(!imposter.started());
    let found = switch.get_link(channel).await.unwrap();
    assert_eq!(found.peer_id(), original.peer_id());

    switch.stop().await;
}

#[tokio::test]
async fn failed_start_leaves_registry_untouched() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).failing_start("no peer");
    let result = switch.add_link(Arc::new(link.clone())).await;
    assert!(matches!(result, Err(SwitchError::LinkStart(_))));

    let result = switch.get_link(link.channel_id()).await;
    assert!(matches!(result, Err(SwitchError::LinkNotFound)));
    let result = switch.get_links(link.peer_id()).await;
    assert!(matches!(result, Err(SwitchError::NoLinksForHop(_))));

    switch.stop().await;
}

#[tokio::test]
async fn remove_missing_channel_does_not_mutate() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();

    let result = switch.remove_link(test_channel_id()).await;
    assert!(matches!(result, Err(SwitchError::LinkNotFound)));

    // Registered state is unaffected.
    assert!(switch.get_link(link.channel_id()).await.is_ok());
    assert_eq!(switch.get_links(link.peer_id()).await.unwrap().len(), 1);
    assert!(!link.stopped());

    switch.stop().await;
}

#[tokio::test]
async fn get_links_returns_snapshot() {
    let switch = started_switch().await;

    let link = MockChannelLink::new(test_channel_id(), test_hop_id()).with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();

    let snapshot = switch.get_links(link.peer_id()).await.unwrap();
    switch.remove_link(link.channel_id()).await.unwrap();

    // The earlier snapshot still holds the link it captured.
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].channel_id(), link.channel_id());

    switch.stop().await;
}
