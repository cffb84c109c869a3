//! Integration tests for channel close routing.

use std::sync::Arc;
use std::time::Duration;

use hopline_switch::{ChannelCloseType, ChannelId, ChannelLink, CloseUpdate, Switch, SwitchError};
use hopline_test_utils::{close_capture_config, test_hop_id, test_outpoint, MockChannelLink};
use tokio::time::timeout;

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
async fn close_routes_to_owning_peer() {
    let (config, mut close_calls) = close_capture_config();
    let switch = Switch::new(config);
    switch.start().unwrap();

    let outpoint = test_outpoint();
    let link = MockChannelLink::new(ChannelId::from_outpoint(&outpoint), test_hop_id())
        .with_bandwidth(100);
    switch.add_link(Arc::new(link.clone())).await.unwrap();

    let (mut updates_rx, _err_rx) = switch
        .close_link(outpoint, ChannelCloseType::Regular)
        .await
        .unwrap();

    // The close workflow was invoked with the owning peer and the
    // request that carries our channels.
    let (peer, request) = timeout(Duration::from_secs(5), close_calls.recv())
        .await
        .expect("close callback not invoked")
        .unwrap();
    assert_eq!(peer, link.peer_id());
    assert_eq!(request.close_type, ChannelCloseType::Regular);
    assert_eq!(request.outpoint, outpoint);

    // Updates sent by the workflow arrive on the caller's receiver.
    request
        .updates
        .send(CloseUpdate::Completed { success: true })
        .await
        .unwrap();
    let update = timeout(Duration::from_secs(5), updates_rx.recv())
        .await
        .expect("no close update")
        .unwrap();
    assert_eq!(update, CloseUpdate::Completed { success: true });

    switch.stop().await;
}

#[tokio::test]
async fn close_unknown_channel_reports_not_found() {
    let (config, mut close_calls) = close_capture_config();
    let switch = Switch::new(config);
    switch.start().unwrap();

    let (_updates_rx, mut err_rx) = switch
        .close_link(test_outpoint(), ChannelCloseType::Regular)
        .await
        .unwrap();

    let err = timeout(Duration::from_secs(5), err_rx.recv())
        .await
        .expect("no error delivered")
        .unwrap();
    assert!(matches!(err, SwitchError::LinkNotFound));

    // The close workflow was never invoked.
    assert!(close_calls.try_recv().is_err());

    switch.stop().await;
}

#[tokio::test]
async fn breach_close_tears_down_sibling_links() {
    let (config, mut close_calls) = close_capture_config();
    let switch = Switch::new(config);
    switch.start().unwrap();

    // Two channels with the breaching peer, one with a bystander.
    let peer = test_hop_id();
    let breached_outpoint = test_outpoint();
    let breached = MockChannelLink::new(ChannelId::from_outpoint(&breached_outpoint), peer)
        .with_bandwidth(100);
    let sibling = MockChannelLink::new(ChannelId::from_outpoint(&test_outpoint()), peer)
        .with_bandwidth(100);
    let bystander =
        MockChannelLink::new(ChannelId::from_outpoint(&test_outpoint()), test_hop_id())
            .with_bandwidth(100);
    switch.add_link(Arc::new(breached.clone())).await.unwrap();
    switch.add_link(Arc::new(sibling.clone())).await.unwrap();
    switch.add_link(Arc::new(bystander.clone())).await.unwrap();

    let (_updates_rx, _err_rx) = switch
        .close_link(breached_outpoint, ChannelCloseType::Breach)
        .await
        .unwrap();

    let (peer_called, _request) = timeout(Duration::from_secs(5), close_calls.recv())
        .await
        .expect("close callback not invoked")
        .unwrap();
    assert_eq!(peer_called, peer);

    // The sibling channel with the breaching peer is removed and
    // stopped; the bystander and the breached channel itself are not.
    wait_until(|| sibling.stopped()).await;
    let result = switch.get_link(sibling.channel_id()).await;
    assert!(matches!(result, Err(SwitchError::LinkNotFound)));

    assert!(switch.get_link(breached.channel_id()).await.is_ok());
    assert!(switch.get_link(bystander.channel_id()).await.is_ok());
    assert!(!bystander.stopped());

    switch.stop().await;
}

#[tokio::test]
async fn regular_close_leaves_sibling_links() {
    let (config, mut close_calls) = close_capture_config();
    let switch = Switch::new(config);
    switch.start().unwrap();

    let peer = test_hop_id();
    let closing_outpoint = test_outpoint();
    let closing = MockChannelLink::new(ChannelId::from_outpoint(&closing_outpoint), peer)
        .with_bandwidth(100);
    let sibling = MockChannelLink::new(ChannelId::from_outpoint(&test_outpoint()), peer)
        .with_bandwidth(100);
    switch.add_link(Arc::new(closing.clone())).await.unwrap();
    switch.add_link(Arc::new(sibling.clone())).await.unwrap();

    let (_updates_rx, _err_rx) = switch
        .close_link(closing_outpoint, ChannelCloseType::Regular)
        .await
        .unwrap();
    let _ = timeout(Duration::from_secs(5), close_calls.recv())
        .await
        .expect("close callback not invoked");

    // A cooperative close touches nothing but the requested channel.
    assert!(switch.get_link(sibling.channel_id()).await.is_ok());
    assert!(!sibling.stopped());

    switch.stop().await;
}
