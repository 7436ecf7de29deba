//! # Fundscope Core
//!
//! Lookup pipeline resolving an SEC registrant number (CIK) to the
//! holdings of its most recent NPORT-P portfolio filing.
//!
//! ## Overview
//!
//! One lookup runs three strictly sequential EDGAR calls: the
//! submissions history for the registrant, the directory manifest of
//! the latest qualifying filing, and the filing's XML document. Each
//! call is preceded by a courtesy pause and bounded by a timeout; both
//! stage outcomes are memoized for an hour.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Time-bounded memoization with an injectable clock |
//! | [`config`] | EDGAR endpoints, identifying headers, timeouts |
//! | [`domain`] | CIK, holdings, sort keys, lookup results |
//! | [`error`] | Sanitized error taxonomy |
//! | [`http`] | HTTP client abstraction (reqwest in production) |
//! | [`locator`] | Two-stage filing location |
//! | [`nport`] | Document download and holdings extraction |
//! | [`pipeline`] | Stage sequencing and memoization |
//! | [`throttle`] | Fixed pre-call courtesy pause |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fundscope_core::{EdgarConfig, LookupPipeline, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let http = Arc::new(ReqwestHttpClient::new());
//!     let pipeline = LookupPipeline::new(http, EdgarConfig::default());
//!
//!     let result = pipeline.run("CIK0000320193", "value").await;
//!     match (result.holdings, result.error) {
//!         (Some(holdings), _) => println!("{} holdings", holdings.len()),
//!         (_, Some(error)) => eprintln!("{error}"),
//!         _ => unreachable!("pipeline always populates one side"),
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every stage translates its own transport and parse faults into a
//! [`LookupError`] with a sanitized message; raw upstream errors are
//! logged via `tracing` and never surface to the caller.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod locator;
pub mod nport;
pub mod pipeline;
pub mod throttle;

// Re-export commonly used types at crate root for convenience

pub use cache::{Clock, ManualClock, MemoCache, SystemClock, DEFAULT_TTL};
pub use config::{EdgarConfig, DEFAULT_USER_AGENT};
pub use domain::{Cik, CikError, DocumentLocation, FilingReference, Holding, LookupResult, SortKey};
pub use error::{LookupError, LookupErrorKind};
pub use http::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use locator::{FilingLocator, LocateError, LocatedFiling, TARGET_FORM_TYPE};
pub use nport::{HoldingsParser, NPORT_NAMESPACE};
pub use pipeline::{HoldingsOutcome, LocateOutcome, LookupPipeline};
pub use throttle::Throttle;
