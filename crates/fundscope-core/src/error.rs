use std::fmt::{Display, Formatter};

/// Failure classification for a lookup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Empty or malformed registrant identifier.
    InvalidInput,
    /// EDGAR answered 403; usually a missing identifying User-Agent.
    AccessDenied,
    /// Timeout or network-layer failure reaching EDGAR.
    ServiceUnavailable,
    /// Upstream JSON or XML did not parse.
    MalformedUpstreamData,
    /// No qualifying filing, no document, or no holdings extracted.
    NotFound,
}

/// Structured lookup error carrying a sanitized, user-facing message.
///
/// Underlying transport and parse causes are logged at the failure site
/// and never stored here; the message is safe to render verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    kind: LookupErrorKind,
    message: String,
}

impl LookupError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::InvalidInput,
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::AccessDenied,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::ServiceUnavailable,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::MalformedUpstreamData,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> LookupErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_the_sanitized_message() {
        let error = LookupError::access_denied("SEC API access denied. Try again later.");
        assert_eq!(error.kind(), LookupErrorKind::AccessDenied);
        assert_eq!(
            error.to_string(),
            "SEC API access denied. Try again later."
        );
    }
}
