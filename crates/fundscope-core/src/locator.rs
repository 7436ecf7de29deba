//! Two-stage filing location: submissions history, then directory manifest.

use std::sync::Arc;

use serde::Deserialize;

use crate::config::EdgarConfig;
use crate::domain::{Cik, DocumentLocation, FilingReference};
use crate::error::LookupError;
use crate::http::{HttpClient, HttpRequest};

/// Portfolio-holdings disclosure form this lookup targets.
pub const TARGET_FORM_TYPE: &str = "NPORT-P";

const DOCUMENT_EXTENSION: &str = ".xml";
const FALLBACK_FUND_NAME: &str = "Unknown Fund";

/// Successful location of the latest qualifying filing's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedFiling {
    pub document: DocumentLocation,
    pub fund_name: String,
}

/// Location failure plus whatever display name was recovered first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocateError {
    pub error: LookupError,
    pub fund_name: Option<String>,
}

impl LocateError {
    fn bare(error: LookupError) -> Self {
        Self {
            error,
            fund_name: None,
        }
    }

    fn named(error: LookupError, fund_name: &str) -> Self {
        Self {
            error,
            fund_name: Some(fund_name.to_owned()),
        }
    }
}

/// Resolves a registrant to the XML document of its most recent
/// NPORT-P filing via two sequential EDGAR calls.
#[derive(Clone)]
pub struct FilingLocator {
    http: Arc<dyn HttpClient>,
    config: EdgarConfig,
}

impl FilingLocator {
    pub fn new(http: Arc<dyn HttpClient>, config: EdgarConfig) -> Self {
        Self { http, config }
    }

    pub async fn locate(&self, cik: &Cik) -> Result<LocatedFiling, LocateError> {
        let submissions_url = format!("{}/CIK{}.json", self.config.submissions_base, cik);
        let body = self
            .fetch(&submissions_url, "SEC API access denied. Try again later.")
            .await
            .map_err(LocateError::bare)?;

        let submissions: SubmissionsResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(url = %submissions_url, error = %e, "submissions JSON did not parse");
            LocateError::bare(LookupError::malformed(
                "Error processing SEC data. Please try again.",
            ))
        })?;

        let fund_name = submissions
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| String::from(FALLBACK_FUND_NAME));

        let recent = submissions
            .filings
            .and_then(|filings| filings.recent)
            .filter(|recent| !recent.form.is_empty());
        let Some(recent) = recent else {
            return Err(LocateError::named(
                LookupError::not_found("No recent filings found for this CIK."),
                &fund_name,
            ));
        };

        let Some(latest) = latest_qualifying(&recent) else {
            return Err(LocateError::named(
                LookupError::not_found("No NPORT-P filings found in recent submissions."),
                &fund_name,
            ));
        };
        tracing::info!(
            cik = %cik,
            accession = %latest.accession_number,
            filing_date = %latest.filing_date,
            "selected latest qualifying filing"
        );

        let accession = latest.accession_number.replace('-', "");
        let manifest_url = format!(
            "{}/edgar/data/{}/{}/index.json",
            self.config.archives_base, cik, accession
        );
        let body = self
            .fetch(&manifest_url, "SEC is blocking this request. Try again later.")
            .await
            .map_err(|error| LocateError::named(error, &fund_name))?;

        let manifest: ManifestResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(url = %manifest_url, error = %e, "manifest JSON did not parse");
            LocateError::named(
                LookupError::malformed("Error processing SEC data. Please try again."),
                &fund_name,
            )
        })?;

        let document = manifest
            .directory
            .map(|directory| directory.item)
            .unwrap_or_default()
            .into_iter()
            .find(|item| item.name.to_ascii_lowercase().ends_with(DOCUMENT_EXTENSION))
            .map(|item| {
                DocumentLocation(format!(
                    "{}/edgar/data/{}/{}/{}",
                    self.config.archives_base, cik, accession, item.name
                ))
            });

        match document {
            Some(document) => Ok(LocatedFiling {
                document,
                fund_name,
            }),
            None => Err(LocateError::named(
                LookupError::not_found("NPORT XML file not found in the filing directory."),
                &fund_name,
            )),
        }
    }

    /// Throttled GET with the status and transport mapping shared by
    /// both lookup stages. `denied_message` is surfaced on 403.
    async fn fetch(&self, url: &str, denied_message: &str) -> Result<String, LookupError> {
        self.config.throttle.pause().await;

        let request = HttpRequest::get(url)
            .with_header("user-agent", self.config.user_agent.clone())
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms());

        let response = self.http.execute(request).await.map_err(|error| {
            tracing::error!(url, error = %error, "EDGAR request failed");
            if error.timed_out() {
                LookupError::unavailable("SEC API is taking too long to respond. Try again later.")
            } else {
                LookupError::unavailable(
                    "There was a problem fetching data from the SEC. Try again later.",
                )
            }
        })?;

        if response.status == 403 {
            tracing::error!(url, "EDGAR returned 403; check the identifying User-Agent header");
            return Err(LookupError::access_denied(denied_message));
        }
        if !response.is_success() {
            tracing::error!(url, status = response.status, "EDGAR returned non-success status");
            return Err(LookupError::unavailable(
                "There was a problem fetching data from the SEC. Try again later.",
            ));
        }

        Ok(response.body)
    }
}

/// Latest entry of the target form type by string date comparison;
/// strictly-greater keeps the first-seen entry on date ties.
fn latest_qualifying(recent: &RecentFilings) -> Option<FilingReference> {
    let mut latest: Option<FilingReference> = None;

    for (index, form) in recent.form.iter().enumerate() {
        if form != TARGET_FORM_TYPE {
            continue;
        }
        let (Some(accession), Some(date)) = (
            recent.accession_number.get(index),
            recent.filing_date.get(index),
        ) else {
            continue;
        };

        let newer = latest
            .as_ref()
            .map_or(true, |current| date.as_str() > current.filing_date.as_str());
        if newer {
            latest = Some(FilingReference {
                accession_number: accession.clone(),
                form_type: form.clone(),
                filing_date: date.clone(),
            });
        }
    }

    latest
}

#[derive(Debug, Deserialize)]
struct SubmissionsResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    filings: Option<Filings>,
}

#[derive(Debug, Deserialize)]
struct Filings {
    #[serde(default)]
    recent: Option<RecentFilings>,
}

/// Parallel arrays; the same index across all three describes one filing.
#[derive(Debug, Default, Deserialize)]
struct RecentFilings {
    #[serde(rename = "accessionNumber", default)]
    accession_number: Vec<String>,
    #[serde(default)]
    form: Vec<String>,
    #[serde(rename = "filingDate", default)]
    filing_date: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestResponse {
    #[serde(default)]
    directory: Option<Directory>,
}

#[derive(Debug, Default, Deserialize)]
struct Directory {
    #[serde(default)]
    item: Vec<DirectoryItem>,
}

#[derive(Debug, Deserialize)]
struct DirectoryItem {
    name: String,
}
