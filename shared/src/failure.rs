use std::fmt;

/// Every way a remote call can fail, as reported by the endpoint or by the
/// transport itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    BadSecret,
    BadPin,
    ConsentRequired,
    MissingFields,
    RateLimit,
    StoreNotFound,
    Network,
    Timeout,
    /// A code outside the fixed taxonomy, kept verbatim.
    Other(String),
}

impl FailureKind {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "bad_secret" => Self::BadSecret,
            "bad_pin" => Self::BadPin,
            "consent_required" => Self::ConsentRequired,
            "missing_fields" => Self::MissingFields,
            "rate_limit" => Self::RateLimit,
            "store_not_found" => Self::StoreNotFound,
            "network" => Self::Network,
            "timeout" => Self::Timeout,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::BadSecret => "bad_secret",
            Self::BadPin => "bad_pin",
            Self::ConsentRequired => "consent_required",
            Self::MissingFields => "missing_fields",
            Self::RateLimit => "rate_limit",
            Self::StoreNotFound => "store_not_found",
            Self::Network => "network",
            Self::Timeout => "timeout",
            Self::Other(code) => code,
        }
    }

    /// Network and timeout failures mean the endpoint could not be reached;
    /// everything else is an answer from a reachable endpoint.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network | Self::Timeout)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    pub detail: Option<String>,
    pub version: Option<String>,
}

impl Failure {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind, detail: None, version: None }
    }

    pub fn with_detail(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self { kind, detail: Some(detail.into()), version: None }
    }

    pub fn timeout() -> Self {
        Self::with_detail(FailureKind::Timeout, "API timeout")
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::with_detail(FailureKind::Network, detail)
    }

    pub fn bad_response(detail: impl Into<String>) -> Self {
        Self::with_detail(FailureKind::Other("bad_response".to_string()), detail)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) if !detail.is_empty() => write!(f, "{}: {}", self.kind, detail),
            _ => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Failure {}
