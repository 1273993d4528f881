//! Error types for the aggregation pipeline and its source adapters.

/// Errors raised by the pipeline itself. These are caller programming
/// errors and fail fast at construction time; a built pipeline never
/// returns an error from `aggregate`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A threshold, cap, or timeout outside its valid domain.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Failure outcomes of a single source adapter call.
///
/// An adapter never panics across its boundary; any failure becomes one
/// of these variants and the orchestrator converts it into a zero-record
/// outcome for that source.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Required configuration (typically a credential) is missing.
    /// Treated as a skip, not a failure.
    #[error("source unavailable: {0}")]
    Unavailable(String),

    /// HTTP/network error, non-success status, upstream error code,
    /// or a timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream payload as a whole could not be decoded. A single
    /// bad item inside an otherwise good payload is skipped instead.
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_configuration() {
        let err = PipelineError::InvalidConfiguration("threshold 1.5 outside [0, 1]".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: threshold 1.5 outside [0, 1]"
        );
    }

    #[test]
    fn display_adapter_variants() {
        let err = AdapterError::Unavailable("FINANCE_API_TOKEN not set".into());
        assert!(err.to_string().starts_with("source unavailable"));

        let err = AdapterError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = AdapterError::MalformedPayload("expected JSON object".into());
        assert!(err.to_string().contains("malformed upstream payload"));
    }
}
