//! Integration tests for the acquisition worker and orchestrator.
//!
//! The fan-out tests use an in-memory page source keyed on the locator host so
//! timing can be controlled exactly. `HttpPageSource` is exercised against a
//! local `wiremock` server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use autoscan_core::{Filter, Locator};
use autoscan_scraper::{
    AcquireError, AcquisitionOrchestrator, ContentLimits, HttpPageSource, PageSource,
    PlatformRegistry, ScraperConfig, ScraperError, SessionHost,
};
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves canned text per marketplace host; autoscout never answers in time.
struct CannedSource;

#[async_trait]
impl PageSource for CannedSource {
    async fn fetch_text(&self, locator: &Locator) -> Result<String, AcquireError> {
        let url = locator.as_str();
        if url.contains("autoscout24") {
            tokio::time::sleep(Duration::from_secs(5)).await;
            return Ok("too late".to_string());
        }
        if url.contains("mobile.de") {
            return Ok("VW Golf 1.6 TDI\nInserat 12345\n5.900 €".to_string());
        }
        if url.contains("ebay.de") {
            return Err(AcquireError::UnexpectedStatus {
                status: 403,
                url: url.to_string(),
            });
        }
        Ok(String::new())
    }
}

fn fast_config() -> ScraperConfig {
    ScraperConfig {
        nav_timeout: Duration::from_millis(200),
        ..ScraperConfig::default()
    }
}

fn golf_filter() -> Filter {
    Filter {
        brand: Some("Volkswagen".to_string()),
        model: Some("Golf".to_string()),
        price_from: Some("3500".to_string()),
        price_to: Some("6500".to_string()),
        ..Filter::default()
    }
}

fn canned_orchestrator() -> AcquisitionOrchestrator {
    AcquisitionOrchestrator::new(
        PlatformRegistry::builtin(),
        Arc::new(CannedSource),
        &fast_config(),
    )
}

// ---------------------------------------------------------------------------
// Fan-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn acquire_all_returns_one_result_per_requested_platform() {
    let orchestrator = canned_orchestrator();
    let mut results = orchestrator
        .acquire_all(&golf_filter(), &["mobile", "autoscout"])
        .await;
    results.sort_by(|a, b| a.platform_id.cmp(&b.platform_id));

    assert_eq!(results.len(), 2);

    let autoscout = &results[0];
    assert_eq!(autoscout.platform_id, "autoscout");
    assert!(autoscout.content.is_empty());
    assert!(
        autoscout
            .error
            .as_deref()
            .is_some_and(|e| e.contains("timed out")),
        "expected a timeout reason, got: {:?}",
        autoscout.error
    );

    let mobile = &results[1];
    assert_eq!(mobile.platform_id, "mobile");
    assert_eq!(mobile.platform_name, "Mobile.de");
    assert!(mobile.error.is_none());
    assert!(mobile.content.contains("VW Golf 1.6 TDI"));
    assert!(mobile.locator.as_str().contains("ms=Volkswagen;Golf;;;"));
}

#[tokio::test]
async fn slow_platform_does_not_hold_up_the_batch() {
    let orchestrator = canned_orchestrator();
    let started = std::time::Instant::now();
    let results = orchestrator
        .acquire_all(&golf_filter(), &["autoscout", "mobile", "ebay", "uncle"])
        .await;

    assert_eq!(results.len(), 4);
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "batch waited on the slow platform: {:?}",
        started.elapsed()
    );
    let failed: Vec<&str> = {
        let mut ids: Vec<&str> = results
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.platform_id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    };
    assert_eq!(failed, vec!["autoscout", "ebay"]);
}

#[tokio::test]
async fn acquire_all_skips_unknown_and_duplicate_ids() {
    let orchestrator = canned_orchestrator();
    let results = orchestrator
        .acquire_all(&golf_filter(), &["mobile", "craigslist", "mobile"])
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].platform_id, "mobile");
}

#[tokio::test]
async fn acquire_all_with_no_known_ids_is_empty() {
    let orchestrator = canned_orchestrator();
    let results = orchestrator
        .acquire_all(&Filter::default(), &["nope"])
        .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn single_platform_acquire_rejects_unknown_id() {
    let orchestrator = canned_orchestrator();
    let err = orchestrator
        .acquire("craigslist", &Filter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::UnknownPlatform { ref id } if id == "craigslist"));
}

#[tokio::test]
async fn single_platform_acquire_reports_failure_in_result() {
    let orchestrator = canned_orchestrator();
    let result = orchestrator
        .acquire("ebay", &Filter::default())
        .await
        .unwrap();
    assert!(result.is_failure());
    assert!(result.error.as_deref().unwrap_or_default().contains("403"));
}

// ---------------------------------------------------------------------------
// HttpPageSource
// ---------------------------------------------------------------------------

fn http_source(host: &Arc<SessionHost>) -> HttpPageSource {
    HttpPageSource::new(Arc::clone(host), ContentLimits::default())
}

#[tokio::test]
async fn http_page_source_extracts_listing_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auto/search.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(
                    "<html><body><div id=\"onetrust-consent-sdk\">Cookies?</div>\
                     <article><h2>VW Golf 1.6 TDI</h2><p>5.900 €</p></article></body></html>",
                ),
        )
        .expect(1)
        .mount(&server)
        .await;

    let host = Arc::new(SessionHost::new(&ScraperConfig::default()));
    let source = http_source(&host);
    let text = source
        .fetch_text(&Locator::new(format!("{}/auto/search.html", server.uri())))
        .await
        .expect("page text");

    assert_eq!(text, "VW Golf 1.6 TDI\n5.900 €");
    assert!(host.is_active().await);
}

#[tokio::test]
async fn http_page_source_sends_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/lst"))
        .and(header_exists("accept-language"))
        .and(header("user-agent", "autoscan-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>ok</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ScraperConfig {
        user_agent: "autoscan-test/0.1".to_string(),
        ..ScraperConfig::default()
    };
    let host = Arc::new(SessionHost::new(&config));
    let text = http_source(&host)
        .fetch_text(&Locator::new(format!("{}/lst", server.uri())))
        .await
        .expect("page text");
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn http_page_source_maps_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let host = Arc::new(SessionHost::new(&ScraperConfig::default()));
    let err = http_source(&host)
        .fetch_text(&Locator::new(format!("{}/blocked", server.uri())))
        .await
        .unwrap_err();
    assert!(
        matches!(err, AcquireError::UnexpectedStatus { status: 403, .. }),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn http_page_source_rejects_non_html_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .mount(&server)
        .await;

    let host = Arc::new(SessionHost::new(&ScraperConfig::default()));
    let err = http_source(&host)
        .fetch_text(&Locator::new(format!("{}/logo.png", server.uri())))
        .await
        .unwrap_err();
    assert!(matches!(err, AcquireError::NotHtml { .. }), "got: {err:?}");
}

#[tokio::test]
async fn concurrent_fetches_share_one_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>x</p>"))
        .expect(8)
        .mount(&server)
        .await;

    let host = Arc::new(SessionHost::new(&ScraperConfig::default()));
    let source = Arc::new(http_source(&host));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let source = Arc::clone(&source);
            let url = format!("{}/page/{i}", server.uri());
            tokio::spawn(async move { source.fetch_text(&Locator::new(url)).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "x");
    }
    assert!(host.is_active().await);

    host.shutdown().await;
    assert!(!host.is_active().await);
}
