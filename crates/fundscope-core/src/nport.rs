//! NPORT-P document retrieval and holdings extraction.

use std::sync::Arc;

use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::config::EdgarConfig;
use crate::domain::{DocumentLocation, Holding, SortKey};
use crate::error::LookupError;
use crate::http::{HttpClient, HttpRequest};

/// Default namespace of NPORT investment entries. Elements outside it
/// are ignored; no further schema-version validation is performed.
pub const NPORT_NAMESPACE: &str = "http://www.sec.gov/edgar/nport";

const PARSE_ERROR_MESSAGE: &str = "Error reading SEC filing data. Please try again later.";

/// Downloads a located filing document and extracts sorted holdings.
#[derive(Clone)]
pub struct HoldingsParser {
    http: Arc<dyn HttpClient>,
    config: EdgarConfig,
}

impl HoldingsParser {
    pub fn new(http: Arc<dyn HttpClient>, config: EdgarConfig) -> Self {
        Self { http, config }
    }

    pub async fn fetch_and_parse(
        &self,
        location: &DocumentLocation,
        sort: SortKey,
    ) -> Result<Vec<Holding>, LookupError> {
        self.config.throttle.pause().await;

        let request = HttpRequest::get(location.as_str())
            .with_header("user-agent", self.config.user_agent.clone())
            .with_header("accept", "application/xml")
            .with_timeout_ms(self.config.timeout_ms());

        let response = self.http.execute(request).await.map_err(|error| {
            tracing::error!(url = %location, error = %error, "filing download failed");
            if error.timed_out() {
                LookupError::unavailable("The SEC server took too long to respond. Try again later.")
            } else {
                LookupError::unavailable("Error retrieving SEC filing data. Please try again.")
            }
        })?;

        if response.status == 403 {
            tracing::error!(url = %location, "EDGAR returned 403 for filing document");
            return Err(LookupError::access_denied(
                "Access denied to SEC filing. Try again later.",
            ));
        }
        if !response.is_success() {
            tracing::error!(url = %location, status = response.status, "filing download returned non-success status");
            return Err(LookupError::unavailable(
                "Error retrieving SEC filing data. Please try again.",
            ));
        }

        let mut holdings = extract_holdings(&response.body).map_err(|e| {
            tracing::error!(url = %location, error = %e, "filing XML did not parse");
            LookupError::malformed(PARSE_ERROR_MESSAGE)
        })?;

        if holdings.is_empty() {
            return Err(LookupError::not_found("No holdings found in the filing."));
        }

        sort.sort(&mut holdings);
        Ok(holdings)
    }
}

#[derive(Debug, Default)]
struct PartialHolding {
    cusip: Option<String>,
    title: Option<String>,
    balance: Option<String>,
    value_usd: Option<String>,
}

impl PartialHolding {
    fn slot(&mut self, field: CaptureField) -> &mut Option<String> {
        match field {
            CaptureField::Cusip => &mut self.cusip,
            CaptureField::Title => &mut self.title,
            CaptureField::Balance => &mut self.balance,
            CaptureField::ValueUsd => &mut self.value_usd,
        }
    }

    fn finish(self) -> Holding {
        Holding::from_fields(self.cusip, self.title, self.balance, self.value_usd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureField {
    Cusip,
    Title,
    Balance,
    ValueUsd,
}

fn field_for(local_name: &[u8]) -> Option<CaptureField> {
    match local_name {
        b"cusip" => Some(CaptureField::Cusip),
        b"title" => Some(CaptureField::Title),
        b"balance" => Some(CaptureField::Balance),
        b"valUSD" => Some(CaptureField::ValueUsd),
        _ => None,
    }
}

fn capture(
    current: Option<&mut PartialHolding>,
    capturing: Option<CaptureField>,
    value: String,
) {
    if let (Some(partial), Some(field)) = (current, capturing) {
        let slot = partial.slot(field);
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

fn is_nport(resolution: &ResolveResult) -> bool {
    matches!(resolution, ResolveResult::Bound(Namespace(ns)) if *ns == NPORT_NAMESPACE.as_bytes())
}

/// Streams the document, emitting one holding per `invstOrSec` element
/// in the NPORT namespace, self-closing entries included. Only direct
/// children are read as fields, and only the first occurrence of each
/// field is kept, mirroring a first-match child lookup. Document order
/// is preserved.
fn extract_holdings(body: &str) -> Result<Vec<Holding>, quick_xml::Error> {
    let mut reader = NsReader::from_str(body);
    reader.config_mut().trim_text(true);

    let mut holdings = Vec::new();
    let mut current: Option<PartialHolding> = None;
    // Element depth relative to the open invstOrSec; 1 = direct child.
    let mut depth = 0_usize;
    let mut capturing: Option<CaptureField> = None;

    loop {
        match reader.read_resolved_event()? {
            (resolution, Event::Start(start)) => {
                if current.is_none() {
                    if is_nport(&resolution) && start.local_name().as_ref() == b"invstOrSec" {
                        current = Some(PartialHolding::default());
                        depth = 0;
                        capturing = None;
                    }
                } else {
                    depth += 1;
                    if depth == 1 && capturing.is_none() && is_nport(&resolution) {
                        capturing = field_for(start.local_name().as_ref());
                    }
                }
            }
            (resolution, Event::Empty(start)) => {
                // A self-closing invstOrSec is still one holding, all
                // fields absent. A self-closing field child carries no
                // text, so its slot stays absent.
                if current.is_none()
                    && is_nport(&resolution)
                    && start.local_name().as_ref() == b"invstOrSec"
                {
                    holdings.push(PartialHolding::default().finish());
                }
            }
            (_, Event::Text(text)) => {
                capture(current.as_mut(), capturing, text.unescape()?.into_owned());
            }
            (_, Event::CData(text)) => {
                capture(
                    current.as_mut(),
                    capturing,
                    String::from_utf8_lossy(&text).into_owned(),
                );
            }
            (_, Event::End(_)) => {
                if current.is_some() {
                    if depth == 0 {
                        if let Some(partial) = current.take() {
                            holdings.push(partial.finish());
                        }
                    } else {
                        if depth == 1 {
                            capturing = None;
                        }
                        depth -= 1;
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    Ok(holdings)
}
