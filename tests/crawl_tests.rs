//! Integration tests for the crawler
//!
//! These tests run the full crawl cycle against wiremock HTTP servers,
//! including timeout-driven retry behavior.

use hostbound::config::Config;
use hostbound::crawler::crawl;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config with short timeouts so delayed responses count as transient
/// failures without slowing the suite down too much.
fn test_config(max_retries: u32) -> Config {
    let mut config = Config::default();
    config.crawler.request_timeout_secs = 1;
    config.crawler.connect_timeout_secs = 1;
    config.crawler.max_retries = max_retries;
    config
}

fn html_response(body: &str) -> ResponseTemplate {
    // set_body_raw carries the mime type; wiremock overrides an
    // insert_header("content-type", ...) with the body's implied mime.
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_response(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_visits_all_same_host_pages() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"<a href="/page1">One</a><a href="/page2">Two</a>"#,
    )
    .await;
    mount_page(&server, "/page1", r#"<a href="/">Home</a>"#).await;
    mount_page(&server, "/page2", "No links").await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert_eq!(report.visited.len(), 3);
    assert!(report.visited.contains(&seed));
    assert!(report.visited.contains(&format!("{}page1", seed)));
    assert!(report.visited.contains(&format!("{}page2", seed)));
    assert!(report.abandoned.is_empty());
}

#[tokio::test]
async fn test_fragment_extension_and_foreign_links_are_excluded() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(
        &server,
        "/",
        r#"
        <a href="/a">A</a>
        <a href="/a#section">A section</a>
        <a href="https://other.invalid/x">Elsewhere</a>
        <a href="/b.pdf">Report</a>
        "#,
    )
    .await;
    mount_page(&server, "/a", "Leaf").await;

    // The denied extension must keep this from ever being requested.
    Mock::given(method("GET"))
        .and(path("/b.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert_eq!(
        report.visited,
        vec![seed.clone(), format!("{}a", seed)]
    );
}

#[tokio::test]
async fn test_transient_timeout_is_retried_and_succeeds() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<a href="/flaky">Flaky</a>"#).await;

    // First attempt stalls past the 1s client timeout, the retry answers.
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(html_response("Recovered").set_delay(Duration::from_secs(3)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_page(&server, "/flaky", "Recovered").await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert!(report.visited.contains(&format!("{}flaky", seed)));
    assert!(report.abandoned.is_empty());
    assert_eq!(report.retry_passes, 1);
}

#[tokio::test]
async fn test_retry_budget_bounds_attempts_and_abandons_url() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<a href="/slow">Slow</a>"#).await;

    // Always slower than the client timeout: 1 initial attempt + 1 retry.
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_response("Too late").set_delay(Duration::from_secs(3)))
        .expect(2)
        .mount(&server)
        .await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert!(!report.visited.contains(&format!("{}slow", seed)));
    assert_eq!(report.abandoned, vec![format!("{}slow", seed)]);
}

#[tokio::test]
async fn test_zero_retries_attempts_each_url_once() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<a href="/slow">Slow</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html_response("Too late").set_delay(Duration::from_secs(3)))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(test_config(0), &seed).await.expect("crawl failed");

    assert_eq!(report.retry_passes, 0);
    assert_eq!(report.abandoned, vec![format!("{}slow", seed)]);
}

#[tokio::test]
async fn test_http_error_pages_are_dropped_silently() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<a href="/missing">Gone</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(test_config(3), &seed).await.expect("crawl failed");

    // Permanent failure: not visited, not retried, crawl unaffected.
    assert_eq!(report.visited, vec![seed]);
    assert!(report.abandoned.is_empty());
}

#[tokio::test]
async fn test_non_html_content_type_is_not_visited() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    mount_page(&server, "/", r#"<a href="/data">Data</a>"#).await;

    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{\"not\": \"html\"}")
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert_eq!(report.visited, vec![seed]);
    assert!(report.abandoned.is_empty());
}

#[tokio::test]
async fn test_trailing_slash_seed_and_bare_link_deduplicate() {
    let server = MockServer::start().await;
    let seed = format!("{}/", server.uri());

    // The bare link resolves back to the already-visited seed.
    mount_page(
        &server,
        "/",
        &format!(r#"<a href="{}">Self</a><a href="/a">A</a>"#, server.uri()),
    )
    .await;
    mount_page(&server, "/a", "Leaf").await;

    let report = crawl(test_config(1), &seed).await.expect("crawl failed");

    assert_eq!(report.visited.len(), 2);
}
