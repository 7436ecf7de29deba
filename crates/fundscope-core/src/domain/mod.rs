//! # Domain Models
//!
//! Canonical domain types for an EDGAR holdings lookup.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Cik`] | Canonical 10-digit registrant identifier |
//! | [`Holding`] | One security position from an NPORT-P document |
//! | [`SortKey`] | Requested holdings ordering |
//! | [`FilingReference`] | One row of the recent-filings table |
//! | [`DocumentLocation`] | URL of the filing's XML document |
//! | [`LookupResult`] | Final outcome shaped for rendering |
//!
//! All types validate their invariants at construction time and carry
//! full serde support where they cross the rendering boundary.

mod cik;
mod models;

pub use cik::{Cik, CikError};
pub use models::{DocumentLocation, FilingReference, Holding, LookupResult, SortKey};
