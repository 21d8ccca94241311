//! End-to-end crawl tests against a wiremock site: temp input CSV in,
//! JSON store and CSV export out.

use std::path::PathBuf;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use upcwatch_core::{AppConfig, PriceDelta, ResultRecord, NOT_AVAILABLE};
use upcwatch_store::ResultStore;

use super::run;

fn temp_path(tag: &str, ext: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    std::env::temp_dir().join(format!(
        "upcwatch-crawl-{tag}-{}-{nanos}.{ext}",
        std::process::id()
    ))
}

/// Writes a temp input CSV with the given `(upc_code, zoro_no, sales_price)`
/// rows and returns its path.
fn write_input(rows: &[(&str, &str, &str)]) -> PathBuf {
    let mut contents = String::from("upc_code,zoro_no,sales_price\n");
    for (upc, zoro, price) in rows {
        contents.push_str(&format!("{upc},{zoro},{price}\n"));
    }
    let path = temp_path("input", "csv");
    std::fs::write(&path, contents).expect("failed to write input CSV");
    path
}

fn test_config(base_url: &str, input: PathBuf) -> AppConfig {
    AppConfig {
        input_path: input,
        results_path: temp_path("store", "json"),
        export_path: temp_path("export", "csv"),
        search_base_url: base_url.to_owned(),
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        user_agent: "upcwatch-test/0.1".to_owned(),
        http_proxy: None,
        inter_request_delay_ms: 0,
        delay_jitter_ms: 0,
        max_retries: 0,
        retry_backoff_base_secs: 0,
        blocked_retry_delay_secs: 0,
    }
}

fn cleanup(config: &AppConfig) {
    std::fs::remove_file(&config.input_path).ok();
    std::fs::remove_file(&config.results_path).ok();
    std::fs::remove_file(&config.export_path).ok();
}

fn blocked_page() -> String {
    "<html><head><title>Sorry! Something went wrong!</title></head>\
     <body><p>robot check</p></body></html>"
        .to_owned()
}

fn no_results_page() -> String {
    "<html><head><title>Search results</title></head><body>\
     <span> No results for </span></body></html>"
        .to_owned()
}

fn search_page_with_card(href: &str) -> String {
    format!(
        "<html><head><title>Search results</title></head><body>\
         <div class=\"s-card puis-card-border\"><h2><a href=\"{href}\">Widget</a></h2></div>\
         </body></html>"
    )
}

fn product_page() -> String {
    "<html><head><title>Widget</title></head><body>\
     <div class=\"a-section a-spacing-none aok-align-center aok-relative\">$45.07</div>\
     <div class=\"offer-display-feature-text\">\
       <span class=\"offer-display-feature-text-message\">Acme Corp</span>\
     </div>\
     <table><tr><th>Best Sellers Rank</th>\
     <td>#12,345 in Power Tools (See Top 100 in Power Tools)</td></tr></table>\
     </body></html>"
        .to_owned()
}

#[tokio::test]
async fn no_results_search_emits_one_sentinel_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "087302660521"))
        .respond_with(ResponseTemplate::new(200).set_body_string(no_results_page()))
        .expect(1)
        .mount(&server)
        .await;

    let input = write_input(&[("87302660521", "G100", "9.99")]);
    let config = test_config(&server.uri(), input);

    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.rows_processed, 1);
    assert_eq!(summary.rows_failed, 0);
    assert_eq!(summary.records_added, 1);

    let records = ResultStore::new(&config.results_path).load();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.upc, "87302660521");
    assert_eq!(record.zoro_no, "G100");
    assert_eq!(record.url, format!("{}/s?k=087302660521", server.uri()));
    assert_eq!(record.asin, NOT_AVAILABLE);
    assert_eq!(record.price, NOT_AVAILABLE);
    assert_eq!(record.price_difference, PriceDelta::NotAvailable);

    let export = std::fs::read_to_string(&config.export_path).expect("export missing");
    assert_eq!(export.lines().count(), 2);
    cleanup(&config);
}

#[tokio::test]
async fn candidate_product_page_yields_fully_populated_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "087302660521"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page_with_card(
            "/widget/dp/B00B1CGEI8/ref=sr_1_1",
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/widget/dp/B00B1CGEI8/ref=sr_1_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(1)
        .mount(&server)
        .await;

    let input = write_input(&[("87302660521", "G100", "28.52")]);
    let config = test_config(&server.uri(), input);

    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.records_added, 1);

    let records = ResultStore::new(&config.results_path).load();
    let record = &records[0];
    assert_eq!(record.upc, "87302660521");
    assert_eq!(record.asin, "B00B1CGEI8");
    assert_eq!(record.price, "45.07");
    assert_eq!(record.bsr, "12,345");
    assert_eq!(record.first_category, "Power Tools");
    assert_eq!(record.seller, "Acme Corp");
    // 45.07 - 28.52 * 1.203
    match record.price_difference {
        PriceDelta::Value(v) => assert!((v - 10.760_44).abs() < 1e-9),
        PriceDelta::NotAvailable => panic!("expected numeric price difference"),
    }
    cleanup(&config);
}

#[tokio::test]
async fn crawl_resumes_after_last_persisted_upc() {
    let server = MockServer::start().await;
    // Only the second row's search is mocked; a request for the first row
    // would 404 and show up as a failed row.
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "000000000222"))
        .respond_with(ResponseTemplate::new(200).set_body_string(no_results_page()))
        .expect(1)
        .mount(&server)
        .await;

    let input = write_input(&[("111", "G1", "1.00"), ("222", "G2", "2.00")]);
    let config = test_config(&server.uri(), input);

    let store = ResultStore::new(&config.results_path);
    store
        .append(&[ResultRecord::no_results(
            "111",
            "G1",
            "https://example.com/s?k=000000000111",
        )])
        .expect("failed to seed store");

    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.rows_processed, 1);
    assert_eq!(summary.rows_failed, 0);
    assert_eq!(summary.records_added, 1);

    let records = store.load();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].upc, "111");
    assert_eq!(records[1].upc, "222");
    cleanup(&config);
}

#[tokio::test]
async fn blocked_search_leaves_row_unrecorded_and_recrawlable() {
    // Run 1: the search stays blocked through its single re-fetch. The row
    // must not be persisted, or dedup would lock the UPC to sentinel data.
    let blocked = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "087302660521"))
        .respond_with(ResponseTemplate::new(200).set_body_string(blocked_page()))
        .expect(2)
        .mount(&blocked)
        .await;

    let input = write_input(&[("87302660521", "G100", "28.52")]);
    let mut config = test_config(&blocked.uri(), input);

    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.rows_failed, 1);
    assert_eq!(summary.records_added, 0);
    assert!(ResultStore::new(&config.results_path).load().is_empty());

    // Run 2: same store, against a site that now answers. The row is
    // re-crawled and gets real data.
    let healthy = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "087302660521"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page_with_card(
            "/widget/dp/B00B1CGEI8/ref=sr_1_1",
        )))
        .expect(1)
        .mount(&healthy)
        .await;
    Mock::given(method("GET"))
        .and(path("/widget/dp/B00B1CGEI8/ref=sr_1_1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(product_page()))
        .expect(1)
        .mount(&healthy)
        .await;

    config.search_base_url = healthy.uri();
    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.rows_failed, 0);
    assert_eq!(summary.records_added, 1);

    let records = ResultStore::new(&config.results_path).load();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, "45.07");
    cleanup(&config);
}

#[tokio::test]
async fn failed_search_fetch_skips_row_and_continues() {
    let server = MockServer::start().await;
    // First row's search has no mock (404, not retried); second row works.
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "000000000222"))
        .respond_with(ResponseTemplate::new(200).set_body_string(no_results_page()))
        .expect(1)
        .mount(&server)
        .await;

    let input = write_input(&[("111", "G1", "1.00"), ("222", "G2", "2.00")]);
    let config = test_config(&server.uri(), input);

    let summary = run(&config).await.expect("crawl failed");
    assert_eq!(summary.rows_processed, 2);
    assert_eq!(summary.rows_failed, 1);
    assert_eq!(summary.records_added, 1);

    let records = ResultStore::new(&config.results_path).load();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].upc, "222");
    cleanup(&config);
}

#[tokio::test]
async fn missing_input_file_is_fatal() {
    let config = test_config("http://127.0.0.1:9", temp_path("missing", "csv"));
    let err = run(&config).await.expect_err("expected a fatal error");
    assert!(format!("{err}").contains("input"));
}
