//! The crawl orchestrator: input rows in, result records out.
//!
//! Per-row flow: politeness pause, fetch the search page for the padded
//! UPC, then either emit one synthetic no-results record or walk every
//! candidate product page. Each row's records are flushed to the store
//! before the next row starts, so an interrupted run resumes at the row
//! after the last persisted UPC.

use upcwatch_core::{AppConfig, InputRow, PriceDelta, ResultRecord, NOT_AVAILABLE};
use upcwatch_scraper::asin::extract_asin;
use upcwatch_scraper::price::price_difference;
use upcwatch_scraper::{
    parse_product_page, parse_search_page, ProductExtract, ScraperError, SearchOutcome, SiteClient,
};
use upcwatch_store::{read_input_rows, resume_index, ResultStore};

/// Run-level totals logged when the crawl finishes.
#[derive(Debug)]
pub struct CrawlSummary {
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub records_added: usize,
}

/// What one input row produced.
enum RowOutcome {
    Records(Vec<ResultRecord>),
    /// The search never yielded a usable page (fetch error, or still
    /// blocked after the single re-fetch). The row is left unpersisted so
    /// the next run retries it.
    Failed,
}

/// Crawls the input list end to end and exports the store to CSV.
///
/// Per-row and per-candidate failures are logged and counted but never
/// stop the run.
///
/// # Errors
///
/// A missing or unreadable input file, a client build failure, and store
/// or export write failures are fatal.
pub async fn run(config: &AppConfig) -> anyhow::Result<CrawlSummary> {
    let rows = read_input_rows(&config.input_path)?;
    let store = ResultStore::new(&config.results_path);

    let last = store.last_upc();
    let start = resume_index(&rows, last.as_deref());
    tracing::info!(
        total_rows = rows.len(),
        start_index = start,
        "starting crawl"
    );

    let client = SiteClient::new(config)?;

    let mut summary = CrawlSummary {
        rows_processed: 0,
        rows_failed: 0,
        records_added: 0,
    };

    for row in &rows[start..] {
        summary.rows_processed += 1;
        match process_row(&client, config, row).await {
            RowOutcome::Records(records) => {
                summary.records_added += store.append(&records)?;
            }
            RowOutcome::Failed => summary.rows_failed += 1,
        }
    }

    let exported = upcwatch_store::export_csv(&store, &config.export_path)?;
    tracing::info!(rows = exported, path = %config.export_path.display(), "store exported");

    Ok(summary)
}

async fn process_row(client: &SiteClient, config: &AppConfig, row: &InputRow) -> RowOutcome {
    let padded = row.padded_upc();
    client.politeness_pause().await;

    let page = match client.fetch_search_page(&padded).await {
        Ok(page) => page,
        // A still-blocked search persists nothing: writing a sentinel
        // record here would dedup the UPC out of every future run, so the
        // row stays unrecorded and gets retried next time.
        Err(ScraperError::Blocked { url }) => {
            tracing::warn!(upc = %padded, %url, "search page blocked, leaving row for a later run");
            return RowOutcome::Failed;
        }
        Err(e) => {
            tracing::warn!(upc = %padded, error = %e, "search fetch failed, skipping row");
            return RowOutcome::Failed;
        }
    };

    match parse_search_page(&page.html, &config.search_base_url) {
        SearchOutcome::NoResults => {
            tracing::info!(upc = %padded, "no search results");
            RowOutcome::Records(vec![synthetic_record(row, &page.url)])
        }
        SearchOutcome::Candidates(urls) => {
            if urls.is_empty() {
                tracing::warn!(upc = %padded, "search page had neither marker nor result cards");
                return RowOutcome::Records(Vec::new());
            }
            let mut records = Vec::with_capacity(urls.len());
            for url in &urls {
                client.politeness_pause().await;
                match client.fetch_product_page(url).await {
                    Ok(product_page) => {
                        let extract = parse_product_page(&product_page.html);
                        records.push(assemble_record(row, &product_page.url, &extract));
                    }
                    Err(e) => {
                        tracing::warn!(upc = %padded, %url, error = %e, "candidate fetch failed, skipping");
                    }
                }
            }
            RowOutcome::Records(records)
        }
    }
}

/// The all-sentinel record for a row whose search showed the explicit
/// no-results marker. The persisted UPC is the un-padded input value.
fn synthetic_record(row: &InputRow, url: &str) -> ResultRecord {
    ResultRecord::no_results(row.upc_code.trim(), &row.zoro_no, url)
}

/// Assembles a persisted record from one candidate product page. The ASIN
/// comes from the final (post-redirect) URL; every missing field collapses
/// to the sentinel here and only here.
fn assemble_record(row: &InputRow, page_url: &str, extract: &ProductExtract) -> ResultRecord {
    let price = extract
        .price
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_owned());
    let price_difference = PriceDelta::from(price_difference(&price, &row.sales_price));

    ResultRecord {
        upc: row.upc_code.trim().to_owned(),
        zoro_no: row.zoro_no.clone(),
        url: page_url.to_owned(),
        asin: extract_asin(page_url)
            .unwrap_or(NOT_AVAILABLE)
            .to_owned(),
        bsr: extract.bsr.clone().unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        price,
        price_difference,
        first_category: extract
            .category
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        seller: extract
            .seller
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod crawl_test;
