//! Lookup orchestration: normalize input, locate, fetch, assemble.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::cache::{Clock, MemoCache, SystemClock, DEFAULT_TTL};
use crate::config::EdgarConfig;
use crate::domain::{Cik, DocumentLocation, Holding, LookupResult, SortKey};
use crate::error::LookupError;
use crate::http::HttpClient;
use crate::locator::{FilingLocator, LocateError, LocatedFiling};
use crate::nport::HoldingsParser;

/// Memoized outcome of the location stage. Sanitized errors are cached
/// alongside successes, matching the memoization of whole stage
/// outputs.
pub type LocateOutcome = Result<LocatedFiling, LocateError>;

/// Memoized outcome of the fetch-and-parse stage.
pub type HoldingsOutcome = Result<Vec<Holding>, LookupError>;

const INVALID_INPUT_MESSAGE: &str = "Please enter a valid CIK";
const NO_LOCATION_MESSAGE: &str = "Could not find recent N-Port filing for this CIK";

/// Sequences locator and parser for one interactive lookup, memoizing
/// each stage for the cache window. Stages run strictly in order and
/// the first failure is terminal.
#[derive(Clone)]
pub struct LookupPipeline {
    locator: FilingLocator,
    parser: HoldingsParser,
    locate_cache: MemoCache<LocateOutcome>,
    holdings_cache: MemoCache<HoldingsOutcome>,
}

impl LookupPipeline {
    pub fn new(http: Arc<dyn HttpClient>, config: EdgarConfig) -> Self {
        Self::with_clock(http, config, Arc::new(SystemClock))
    }

    /// Injectable clock so tests drive cache expiry deterministically.
    pub fn with_clock(
        http: Arc<dyn HttpClient>,
        config: EdgarConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            locator: FilingLocator::new(http.clone(), config.clone()),
            parser: HoldingsParser::new(http, config),
            locate_cache: MemoCache::new(DEFAULT_TTL, clock.clone()),
            holdings_cache: MemoCache::new(DEFAULT_TTL, clock),
        }
    }

    pub fn locate_cache(&self) -> &MemoCache<LocateOutcome> {
        &self.locate_cache
    }

    pub fn holdings_cache(&self) -> &MemoCache<HoldingsOutcome> {
        &self.holdings_cache
    }

    pub async fn run(&self, raw_input: &str, sort_param: &str) -> LookupResult {
        let as_of = OffsetDateTime::now_utc().date();

        let cik = match Cik::parse(raw_input) {
            Ok(cik) => cik,
            Err(error) => {
                tracing::warn!(input = raw_input, error = %error, "rejected registrant identifier");
                return LookupResult {
                    holdings: None,
                    error: Some(String::from(INVALID_INPUT_MESSAGE)),
                    fund_name: String::new(),
                    as_of,
                };
            }
        };
        let sort = SortKey::from_param(sort_param);

        let located = match self.locate_memoized(&cik).await {
            Ok(located) => located,
            Err(failure) => {
                return LookupResult {
                    holdings: None,
                    error: Some(failure.error.message().to_owned()),
                    fund_name: failure.fund_name.unwrap_or_default(),
                    as_of,
                };
            }
        };

        // Defensive: a located filing always carries a document URL, but
        // the branch stays defined rather than assumed unreachable.
        if located.document.as_str().is_empty() {
            return LookupResult {
                holdings: None,
                error: Some(String::from(NO_LOCATION_MESSAGE)),
                fund_name: located.fund_name,
                as_of,
            };
        }

        match self.holdings_memoized(&located.document, sort).await {
            Ok(holdings) => LookupResult {
                holdings: Some(holdings),
                error: None,
                fund_name: located.fund_name,
                as_of,
            },
            Err(error) => LookupResult {
                holdings: None,
                error: Some(error.message().to_owned()),
                fund_name: located.fund_name,
                as_of,
            },
        }
    }

    async fn locate_memoized(&self, cik: &Cik) -> LocateOutcome {
        let key = cik.as_str();
        if let Some(outcome) = self.locate_cache.get(key).await {
            tracing::debug!(cik = %cik, "location served from cache");
            return outcome;
        }

        let outcome = self.locator.locate(cik).await;
        self.locate_cache.put(key.to_owned(), outcome.clone()).await;
        outcome
    }

    async fn holdings_memoized(
        &self,
        location: &DocumentLocation,
        sort: SortKey,
    ) -> HoldingsOutcome {
        let key = format!("{}|{}", location.as_str(), sort.as_str());
        if let Some(outcome) = self.holdings_cache.get(&key).await {
            tracing::debug!(url = %location, sort = %sort, "holdings served from cache");
            return outcome;
        }

        let outcome = self.parser.fetch_and_parse(location, sort).await;
        self.holdings_cache.put(key, outcome.clone()).await;
        outcome
    }
}
