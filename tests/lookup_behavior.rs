//! Behavior-driven tests for the end-to-end lookup pipeline.
//!
//! These tests verify HOW the system sequences the two-stage location,
//! the document fetch, and the error mapping, using a scripted offline
//! transport.

use std::sync::Arc;

use fundscope_core::{DocumentLocation, HttpError, LocatedFiling, LookupPipeline};
use fundscope_tests::{
    forbidden, manifest_body, nport_body, ok, submissions_body, test_config, ScriptedHttpClient,
};

fn pipeline_with(client: Arc<ScriptedHttpClient>) -> LookupPipeline {
    LookupPipeline::new(client, test_config())
}

fn happy_path_client() -> Arc<ScriptedHttpClient> {
    ScriptedHttpClient::new(vec![
        ok(submissions_body(
            "Example Fund Trust",
            &[
                ("0000000000-24-000001", "10-K", "2024-02-01"),
                ("0000000000-24-000002", "NPORT-P", "2024-03-28"),
            ],
        )),
        ok(manifest_body(&["primary_doc.html", "primary_doc.xml"])),
        ok(nport_body(&[
            ("11111AAA1", "Beta Corp", "10", "5"),
            ("22222BBB2", "Alpha Corp", "5", "10"),
        ])),
    ])
}

// =============================================================================
// Pipeline: Successful lookups
// =============================================================================

#[tokio::test]
async fn when_everything_resolves_the_result_carries_sorted_holdings() {
    // Given: a registrant with one qualifying filing and a parseable document
    let client = happy_path_client();
    let pipeline = pipeline_with(client.clone());

    // When: the lookup runs with the default sort
    let result = pipeline.run("320193", "value").await;

    // Then: holdings are populated, value-descending, with the fund name
    assert_eq!(result.error, None);
    assert_eq!(result.fund_name, "Example Fund Trust");
    let holdings = result.holdings.expect("holdings should be populated");
    assert_eq!(holdings.len(), 2);
    assert_eq!(holdings[0].title, "Alpha Corp");
    assert_eq!(holdings[0].value_usd, 10.0);
    assert_eq!(holdings[1].value_usd, 5.0);
    assert_eq!(client.request_count(), 3);
}

#[tokio::test]
async fn when_the_identifier_carries_a_prefix_it_is_normalized_before_any_request() {
    // Given: raw input with whitespace and a case-insensitive CIK prefix
    let client = happy_path_client();
    let pipeline = pipeline_with(client.clone());

    // When: the lookup runs
    let result = pipeline.run("  CIK0000320193 ", "value").await;

    // Then: the submissions URL uses the canonical 10-digit form
    assert!(result.error.is_none());
    let urls = client.requested_urls();
    assert_eq!(
        urls[0],
        "https://data.sec.gov/submissions/CIK0000320193.json"
    );
    assert!(urls[1].ends_with("/index.json"));
    assert!(urls[2].ends_with("primary_doc.xml"));
}

#[tokio::test]
async fn when_the_sort_param_is_unrecognized_value_order_is_used() {
    // Given: a happy-path registrant
    let pipeline = pipeline_with(happy_path_client());

    // When: the caller passes an unknown sort key
    let result = pipeline.run("320193", "sharpe-ratio").await;

    // Then: holdings come back in the default value-descending order
    let holdings = result.holdings.expect("holdings should be populated");
    assert_eq!(holdings[0].value_usd, 10.0);
}

#[tokio::test]
async fn when_title_sort_is_requested_holdings_come_back_alphabetical() {
    let pipeline = pipeline_with(happy_path_client());

    let result = pipeline.run("320193", "title").await;

    let holdings = result.holdings.expect("holdings should be populated");
    assert_eq!(holdings[0].title, "Alpha Corp");
    assert_eq!(holdings[1].title, "Beta Corp");
}

#[tokio::test]
async fn when_filing_dates_tie_the_first_seen_entry_wins() {
    // Given: two qualifying filings on the same maximum date
    let client = ScriptedHttpClient::new(vec![
        ok(submissions_body(
            "Tie Fund",
            &[
                ("0000000000-23-000001", "NPORT-P", "2023-01-01"),
                ("0000000000-23-000007", "NPORT-P", "2023-06-01"),
                ("0000000000-23-000008", "NPORT-P", "2023-06-01"),
            ],
        )),
        ok(manifest_body(&["doc.xml"])),
        ok(nport_body(&[("1", "Only", "1", "1")])),
    ]);
    let pipeline = pipeline_with(client.clone());

    // When: the lookup runs
    let result = pipeline.run("320193", "value").await;

    // Then: the manifest request targets the first-seen accession number
    assert!(result.error.is_none());
    assert!(client.requested_urls()[1].contains("/000000000023000007/"));
}

// =============================================================================
// Pipeline: Failure mapping and halting
// =============================================================================

#[tokio::test]
async fn when_the_input_is_blank_no_request_is_made() {
    let client = ScriptedHttpClient::new(vec![]);
    let pipeline = pipeline_with(client.clone());

    let result = pipeline.run("   ", "value").await;

    assert_eq!(result.error.as_deref(), Some("Please enter a valid CIK"));
    assert!(result.holdings.is_none());
    assert_eq!(result.fund_name, "");
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn when_the_input_is_not_numeric_no_request_is_made() {
    let client = ScriptedHttpClient::new(vec![]);
    let pipeline = pipeline_with(client.clone());

    let result = pipeline.run("APPLE", "value").await;

    assert_eq!(result.error.as_deref(), Some("Please enter a valid CIK"));
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn when_edgar_returns_403_the_pipeline_halts_at_the_first_stage() {
    // Given: the submissions endpoint blocks the request
    let client = ScriptedHttpClient::new(vec![forbidden()]);
    let pipeline = pipeline_with(client.clone());

    // When: the lookup runs
    let result = pipeline.run("320193", "value").await;

    // Then: the access-denied message surfaces and no later stage runs
    assert_eq!(
        result.error.as_deref(),
        Some("SEC API access denied. Try again later.")
    );
    assert!(result.holdings.is_none());
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn when_the_document_download_is_denied_the_fund_name_is_kept() {
    // Given: location succeeds but the document itself is blocked
    let client = ScriptedHttpClient::new(vec![
        ok(submissions_body(
            "Blocked Fund",
            &[("0000000000-24-000002", "NPORT-P", "2024-03-28")],
        )),
        ok(manifest_body(&["doc.xml"])),
        forbidden(),
    ]);
    let pipeline = pipeline_with(client);

    // When: the lookup runs
    let result = pipeline.run("320193", "value").await;

    // Then: the parser error surfaces with the located fund name
    assert_eq!(
        result.error.as_deref(),
        Some("Access denied to SEC filing. Try again later.")
    );
    assert_eq!(result.fund_name, "Blocked Fund");
    assert!(result.holdings.is_none());
}

#[tokio::test]
async fn when_no_qualifying_filing_exists_the_error_still_names_the_fund() {
    let client = ScriptedHttpClient::new(vec![ok(submissions_body(
        "Equity Only Fund",
        &[("0000000000-24-000001", "10-Q", "2024-01-15")],
    ))]);
    let pipeline = pipeline_with(client.clone());

    let result = pipeline.run("320193", "value").await;

    assert_eq!(
        result.error.as_deref(),
        Some("No NPORT-P filings found in recent submissions.")
    );
    assert_eq!(result.fund_name, "Equity Only Fund");
    assert_eq!(client.request_count(), 1, "manifest must not be fetched");
}

#[tokio::test]
async fn when_the_document_has_no_holdings_the_lookup_reports_not_found() {
    let empty_document = String::from(
        r#"<edgarSubmission xmlns="http://www.sec.gov/edgar/nport"><formData/></edgarSubmission>"#,
    );
    let client = ScriptedHttpClient::new(vec![
        ok(submissions_body(
            "Hollow Fund",
            &[("0000000000-24-000002", "NPORT-P", "2024-03-28")],
        )),
        ok(manifest_body(&["doc.xml"])),
        ok(empty_document),
    ]);
    let pipeline = pipeline_with(client);

    let result = pipeline.run("320193", "value").await;

    assert_eq!(
        result.error.as_deref(),
        Some("No holdings found in the filing.")
    );
    assert!(result.holdings.is_none());
}

#[tokio::test]
async fn when_a_transport_failure_hits_the_lookup_stays_sanitized() {
    // Given: a network-layer failure at the submissions call
    let client = ScriptedHttpClient::new(vec![Err(HttpError::new(
        "connection failed: dns error for data.sec.gov",
    ))]);
    let pipeline = pipeline_with(client);

    // When: the lookup runs
    let result = pipeline.run("320193", "value").await;

    // Then: the raw transport detail never reaches the caller
    let message = result.error.expect("error should be populated");
    assert_eq!(
        message,
        "There was a problem fetching data from the SEC. Try again later."
    );
    assert!(!message.contains("dns"));
}

#[tokio::test]
async fn when_a_located_filing_has_no_document_url_the_defensive_branch_answers() {
    // Given: a pre-seeded location success with an empty document URL,
    // a state the locator cannot produce on its own
    let client = ScriptedHttpClient::new(vec![]);
    let pipeline = pipeline_with(client.clone());
    pipeline
        .locate_cache()
        .put(
            String::from("0000320193"),
            Ok(LocatedFiling {
                document: DocumentLocation(String::new()),
                fund_name: String::from("Phantom Fund"),
            }),
        )
        .await;

    // When: the lookup runs
    let result = pipeline.run("320193", "value").await;

    // Then: defined behavior, no document fetch attempted
    assert_eq!(
        result.error.as_deref(),
        Some("Could not find recent N-Port filing for this CIK")
    );
    assert_eq!(result.fund_name, "Phantom Fund");
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn every_result_carries_the_as_of_date_regardless_of_outcome() {
    let today = time::OffsetDateTime::now_utc().date();

    let failing = pipeline_with(ScriptedHttpClient::new(vec![forbidden()]));
    let failed = failing.run("320193", "value").await;
    assert_eq!(failed.as_of, today);

    let succeeding = pipeline_with(happy_path_client());
    let succeeded = succeeding.run("320193", "value").await;
    assert_eq!(succeeded.as_of, today);
}

#[tokio::test]
async fn concurrent_lookups_for_different_registrants_do_not_interfere() {
    // Given: two pipelines with independent transports
    let first = pipeline_with(happy_path_client());
    let second = pipeline_with(ScriptedHttpClient::new(vec![forbidden()]));

    // When: both lookups run concurrently
    let (ok_result, err_result) =
        tokio::join!(first.run("320193", "value"), second.run("884394", "value"));

    // Then: each sees only its own outcome
    assert!(ok_result.holdings.is_some());
    assert!(err_result.error.is_some());
}
