//! Integration tests for the delivery engine actor.
//!
//! Time is paused, so tokio advances the clock straight to the next timer
//! and completions fire without real waiting.

use std::time::Duration;

use courier_core::{ChannelKind, ChannelStats, CourierConfig, MessageStatus};
use courier_sim::{DeliveryEngineHandle, EngineError, spawn_delivery_engine};

/// Longest delay either channel can draw, plus slack.
const SETTLE: Duration = Duration::from_millis(200);

/// Test fixture wrapping a seeded engine actor.
struct EngineTestFixture {
    handle: DeliveryEngineHandle,
}

impl EngineTestFixture {
    fn new() -> Self {
        Self::with_config(CourierConfig::for_testing())
    }

    fn with_config(config: CourierConfig) -> Self {
        let handle = spawn_delivery_engine(config).unwrap();
        Self { handle }
    }

    async fn settle(&self) {
        tokio::time::sleep(SETTLE).await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_reliable_ping_is_delivered() {
    let fixture = EngineTestFixture::new();

    let id = fixture.handle.submit_reliable("ping").await.unwrap().unwrap();

    let pending = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    assert_eq!(pending.messages[0].status, MessageStatus::Pending);
    assert_eq!(pending.messages[0].acknowledged, Some(false));
    assert_eq!(pending.stats.messages_sent, 0);

    fixture.settle().await;

    let view = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    assert_eq!(view.messages.len(), 1);
    let message = &view.messages[0];
    assert_eq!(message.id, id);
    assert_eq!(message.content, "ping");
    assert_eq!(message.status, MessageStatus::Delivered);
    assert_eq!(message.sequence_number, Some(1));
    assert_eq!(message.acknowledged, Some(true));
    assert_eq!(view.stats.messages_sent, 1);
    assert_eq!(view.stats.messages_delivered, 1);
    assert_eq!(view.stats.delivery_rate, 100);
}

#[tokio::test(start_paused = true)]
async fn test_unreliable_messages_all_reach_terminal_status() {
    let fixture = EngineTestFixture::new();

    for i in 0..40 {
        fixture.handle.submit_unreliable(format!("datagram {i}")).await.unwrap();
    }
    fixture.settle().await;

    let view = fixture.handle.channel_view(ChannelKind::Unreliable).await.unwrap();
    assert_eq!(view.messages.len(), 40);
    assert_eq!(view.in_flight, 0);

    let delivered = view
        .messages
        .iter()
        .filter(|message| message.status == MessageStatus::Delivered)
        .count() as u64;
    let failed = view
        .messages
        .iter()
        .filter(|message| message.status == MessageStatus::Failed)
        .count() as u64;

    assert_eq!(delivered + failed, 40);
    assert_eq!(view.stats.messages_delivered, delivered);
    assert_eq!(view.stats.messages_lost, failed);
    assert_eq!(
        view.stats.delivery_rate,
        (delivered as f64 / 40.0 * 100.0).round() as u32
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_before_completion_does_not_resurrect() {
    let fixture = EngineTestFixture::new();

    fixture.handle.submit_reliable("ping").await.unwrap();
    fixture.handle.submit_unreliable("datagram").await.unwrap();
    fixture.handle.clear_all().await.unwrap();
    fixture.settle().await;

    for channel in ChannelKind::ALL {
        let view = fixture.handle.channel_view(channel).await.unwrap();
        assert!(view.messages.is_empty());
    }

    let reliable = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    assert_eq!(reliable.stats, ChannelStats::reliable_default());
    let unreliable = fixture.handle.channel_view(ChannelKind::Unreliable).await.unwrap();
    assert_eq!(unreliable.stats, ChannelStats::unreliable_default());
}

#[tokio::test(start_paused = true)]
async fn test_sequence_numbers_restart_after_clear() {
    let fixture = EngineTestFixture::new();

    for content in ["a", "b", "c"] {
        fixture.handle.submit_reliable(content).await.unwrap();
    }
    fixture.settle().await;

    let view = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    let sequence: Vec<_> = view.messages.iter().map(|m| m.sequence_number).collect();
    assert_eq!(sequence, vec![Some(1), Some(2), Some(3)]);

    fixture.handle.clear_all().await.unwrap();
    fixture.handle.submit_reliable("d").await.unwrap();

    let view = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    assert_eq!(view.messages[0].sequence_number, Some(1));
}

#[tokio::test(start_paused = true)]
async fn test_blank_submission_is_ignored() {
    let fixture = EngineTestFixture::new();

    assert_eq!(fixture.handle.submit_reliable("   ").await.unwrap(), None);
    assert_eq!(fixture.handle.submit_unreliable("").await.unwrap(), None);

    let view = fixture.handle.channel_view(ChannelKind::Reliable).await.unwrap();
    assert!(view.messages.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_operations_fail_after_shutdown() {
    let fixture = EngineTestFixture::new();
    assert!(fixture.handle.is_running());

    fixture.handle.shutdown().await.unwrap();

    assert!(matches!(
        fixture.handle.submit_reliable("late").await,
        Err(EngineError::Shutdown)
    ));
    assert!(!fixture.handle.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_certain_loss_configuration() {
    let mut config = CourierConfig::for_testing();
    config.unreliable.success_probability = 0.0;
    let fixture = EngineTestFixture::with_config(config);

    fixture.handle.submit_unreliable("doomed").await.unwrap();
    fixture.settle().await;

    let view = fixture.handle.channel_view(ChannelKind::Unreliable).await.unwrap();
    assert_eq!(view.messages[0].status, MessageStatus::Failed);
    assert_eq!(view.stats.messages_lost, 1);
    assert_eq!(view.stats.delivery_rate, 0);
}

#[tokio::test]
async fn test_invalid_configuration_is_rejected() {
    let mut config = CourierConfig::for_testing();
    config.unreliable.delay_ms = 35.0..5.0;

    assert!(matches!(
        spawn_delivery_engine(config),
        Err(EngineError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_non_finite_delay_is_rejected() {
    let mut config = CourierConfig::for_testing();
    config.reliable.delay_ms = 50.0..f64::INFINITY;

    assert!(matches!(
        spawn_delivery_engine(config),
        Err(EngineError::Configuration(_))
    ));
}
