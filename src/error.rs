use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure taxonomy for the completion gateway.
///
/// Everything except `Config` is recovered inside the router: a failed
/// completion resolves to a fallback phrase and never reaches the caller.
/// `Config` surfaces only from constructors, before any request is in flight.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API credential for {provider} is not configured")]
    MissingCredential { provider: &'static str },

    #[error("request to {provider} timed out after {timeout_ms}ms")]
    Timeout {
        provider: &'static str,
        timeout_ms: u64,
    },

    #[error("could not reach {provider}: {message}")]
    NetworkUnreachable {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} rejected the request with status {status}: {body}")]
    UpstreamRejected {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned no usable text: {detail}")]
    MalformedResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("configuration error: {0}")]
    Config(String),
}
