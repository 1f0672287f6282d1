#![allow(clippy::unwrap_used)]
// Integration tests for `RemoteSession`: the event-channel boundary
// and the error-surfacing policy (alerts vs. reload cues vs. silence).

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bravia_core::{
    CommandRelay, GesturePrimitive, Haptic, MemoryCredentials, Mode, Point, RemoteSession,
    SemanticCommand, SessionEvent, TouchEvent,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RemoteSession) {
    let server = MockServer::start().await;
    let address = server.uri().strip_prefix("http://").unwrap().to_string();
    let credentials = Arc::new(MemoryCredentials::new(address, "0000"));
    let client = bravia_api::BraviaClient::with_client(reqwest::Client::new());
    let relay = Arc::new(CommandRelay::with_client(client, credentials));
    (server, RemoteSession::new(relay))
}

fn discovery_body() -> serde_json::Value {
    json!({
        "result": [
            {},
            [
                { "name": "VolumeUp", "value": "AAAA" },
                { "name": "VolumeDown", "value": "BBBB" },
                { "name": "Confirm", "value": "DDDD" },
                { "name": "Tv", "value": "EEEE" },
                { "name": "ChannelUp", "value": "FFFF" },
            ],
        ],
        "id": 54,
    })
}

async fn mount_happy_tv(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sony/IRCC"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_table_load_and_command_sent_events() {
    let (server, session) = setup().await;
    mount_happy_tv(&server).await;
    let mut events = session.subscribe();

    session.reload_table(false).await;
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::TableLoaded { command_count: 5 }
    );

    // Tap in app-control mode → Confirm.
    session.touch(TouchEvent::Tap).await;
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::CommandSent {
            command: SemanticCommand::Confirm,
            haptic: Haptic::Success,
        }
    );
}

#[tokio::test]
async fn test_crown_rotation_sends_volume_with_click_haptic() {
    let (server, session) = setup().await;
    mount_happy_tv(&server).await;
    session.reload_table(false).await;
    let mut events = session.subscribe();

    session.rotate(10).await; // baseline only
    session.rotate(11).await;
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::CommandSent {
            command: SemanticCommand::VolumeUp,
            haptic: Haptic::Click,
        }
    );
}

#[tokio::test]
async fn test_double_tap_requests_action_menu_without_network() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut events = session.subscribe();

    session.touch(TouchEvent::DoubleTap).await;
    assert_eq!(events.recv().await.unwrap(), SessionEvent::ActionMenuRequested);
}

#[tokio::test]
async fn test_mode_switch_announces_and_dispatches_activation() {
    let (server, session) = setup().await;
    mount_happy_tv(&server).await;
    session.reload_table(false).await;
    let mut events = session.subscribe();

    assert_eq!(session.mode(), Mode::AppControl);
    session.set_mode(Mode::TvControl).await;

    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::ModeChanged {
            mode: Mode::TvControl
        }
    );
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::CommandSent {
            command: SemanticCommand::Tv,
            haptic: Haptic::Success,
        }
    );

    // Same swipe now means channel-up instead of a directional move.
    session
        .touch(TouchEvent::Down(Point::new(10.0, 50.0)))
        .await;
    session.touch(TouchEvent::Up(Point::new(80.0, 50.0))).await;
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::CommandSent {
            command: SemanticCommand::ChannelUp,
            haptic: Haptic::Success,
        }
    );
}

#[tokio::test]
async fn test_set_mode_takes_effect_without_any_watcher() {
    // No subscribe() and no watch_mode() handle anywhere: the switch
    // must still land, not depend on a live receiver.
    let (_server, session) = setup().await;

    session.set_mode(Mode::TvControl).await;
    assert_eq!(session.mode(), Mode::TvControl);

    session.set_mode(Mode::AppControl).await;
    assert_eq!(session.mode(), Mode::AppControl);
}

#[tokio::test]
async fn test_setting_same_mode_is_a_no_op() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut events = session.subscribe();

    session.set_mode(Mode::AppControl).await;
    assert!(matches!(
        events.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}

// ── Error-surfacing policy ──────────────────────────────────────────

#[tokio::test]
async fn test_missing_credentials_alerts() {
    let credentials = Arc::new(MemoryCredentials::new("", ""));
    let client = bravia_api::BraviaClient::with_client(reqwest::Client::new());
    let relay = Arc::new(CommandRelay::with_client(client, credentials));
    let session = RemoteSession::new(relay);
    let mut events = session.subscribe();

    session.reload_table(false).await;
    assert!(matches!(
        events.recv().await.unwrap(),
        SessionEvent::Alert { .. }
    ));
}

#[tokio::test]
async fn test_unknown_command_is_a_reload_cue_not_an_alert() {
    let (server, session) = setup().await;
    mount_happy_tv(&server).await;
    session.reload_table(false).await;
    let mut events = session.subscribe();

    // Power ("TvPower") is absent from the mounted table.
    session.touch(TouchEvent::LongPress).await;
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::StaleTable {
            command: SemanticCommand::Power
        }
    );
}

#[tokio::test]
async fn test_transport_failure_alerts_verbatim() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sony/IRCC"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    session.reload_table(false).await;
    let mut events = session.subscribe();

    session.touch(TouchEvent::Tap).await;
    match events.recv().await.unwrap() {
        SessionEvent::Alert { message } => assert!(message.contains("500"), "{message}"),
        other => panic!("expected Alert, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_superseded_send_stays_silent() {
    let (server, session) = setup().await;
    Mock::given(method("POST"))
        .and(path("/sony/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(discovery_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sony/IRCC"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(400)))
        .mount(&server)
        .await;
    session.reload_table(false).await;

    let session = Arc::new(session);
    let mut events = session.subscribe();

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.send(SemanticCommand::VolumeUp).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.send(SemanticCommand::VolumeDown).await;
    first.await.unwrap();

    // Only the superseding send reports; the cancelled one is silent.
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::CommandSent {
            command: SemanticCommand::VolumeDown,
            haptic: Haptic::Click,
        }
    );
    assert!(matches!(
        events.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    ));
}
