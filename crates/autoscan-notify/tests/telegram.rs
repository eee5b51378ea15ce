//! Integration tests for `TelegramNotifier` against a mocked Bot API.

use std::time::Duration;

use autoscan_core::{Filter, VehicleRecord};
use autoscan_notify::{Notifier, NotifyConfig, NotifyError, TelegramNotifier};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEND_PATH: &str = "/bottest-token/sendMessage";

fn config_for(server: &MockServer) -> NotifyConfig {
    NotifyConfig {
        bot_token: Some("test-token".to_string()),
        chat_id: Some("42".to_string()),
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        top_n: 5,
    }
}

fn vehicle(i: usize) -> VehicleRecord {
    VehicleRecord {
        id: Some(format!("{i}")),
        title: Some(format!("VW Golf 1.6 TDI Nr. {i}")),
        price: Some("5.900 €".to_string()),
        platform: Some("Mobile.de".to_string()),
        link: Some(format!("https://suchen.mobile.de/details.html?id={i}")),
        ..VehicleRecord::default()
    }
}

fn ok_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "ok": true,
        "result": { "message_id": 1 }
    }))
}

async fn sent_texts(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
        .collect()
}

#[tokio::test]
async fn unconfigured_notifier_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_response())
        .expect(0)
        .mount(&server)
        .await;

    let config = NotifyConfig {
        chat_id: None,
        ..config_for(&server)
    };
    let notifier = TelegramNotifier::new(&config).unwrap();
    assert!(!notifier.is_configured());
    assert!(!notifier.notify(&[vehicle(1)], &Filter::default()).await);
    assert!(!notifier.send_vehicle_detail(&vehicle(1)).await);

    let err = notifier.send_test_message().await.unwrap_err();
    assert!(matches!(err, NotifyError::Unconfigured));
}

#[tokio::test]
async fn notify_posts_escaped_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({
            "chat_id": "42",
            "parse_mode": "MarkdownV2",
            "disable_web_page_preview": true
        })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    let records: Vec<VehicleRecord> = (1..=7).map(vehicle).collect();
    let filter = Filter {
        brand: Some("Volkswagen".to_string()),
        ..Filter::default()
    };

    assert!(notifier.notify(&records, &filter).await);

    let bodies = sent_texts(&server).await;
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("📊 *7* neue Inserate"));
    assert!(text.contains("🔹 *VW Golf 1\\.6 TDI Nr\\. 5*"));
    assert!(!text.contains("Nr\\. 6"));
    assert!(text.contains("und 2 weitere"));
    assert!(text.contains("[Zum Inserat](https://suchen.mobile.de/details.html?id=1)"));
}

#[tokio::test]
async fn empty_batch_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_response())
        .expect(0)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    assert!(!notifier.notify(&[], &Filter::default()).await);
}

#[tokio::test]
async fn api_rejection_returns_false() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: can't parse entities"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    assert!(!notifier.notify(&[vehicle(1)], &Filter::default()).await);
}

#[tokio::test]
async fn test_message_surfaces_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    let err = notifier.send_test_message().await.unwrap_err();
    assert!(
        matches!(err, NotifyError::Api { status: 403, ref description } if description.contains("blocked")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn test_message_is_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    notifier.send_test_message().await.unwrap();

    let bodies = sent_texts(&server).await;
    assert_eq!(
        bodies[0]["text"].as_str(),
        Some("✅ autoscan Telegram\\-Bot funktioniert\\!")
    );
}

#[tokio::test]
async fn vehicle_detail_enables_link_preview() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(body_partial_json(json!({ "disable_web_page_preview": false })))
        .respond_with(ok_response())
        .expect(1)
        .mount(&server)
        .await;

    let notifier = TelegramNotifier::new(&config_for(&server)).unwrap();
    assert!(notifier.send_vehicle_detail(&vehicle(3)).await);

    let bodies = sent_texts(&server).await;
    let text = bodies[0]["text"].as_str().unwrap();
    assert!(text.contains("🚘 *INTERESSANTES FAHRZEUG*"));
    assert!(text.contains("💶 Preis: *5\\.900 €*"));
}

#[tokio::test]
async fn slow_api_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok_response().set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = NotifyConfig {
        timeout: Duration::from_secs(1),
        ..config_for(&server)
    };
    let notifier = TelegramNotifier::new(&config).unwrap();
    let err = notifier.send_test_message().await.unwrap_err();
    assert!(matches!(err, NotifyError::Timeout { secs: 1 }), "got: {err:?}");
}
