use std::error::Error;
use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Renders an error and every `source()` below it, one cause per line.
pub fn format_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();

    while let Some(err) = source {
        chain.push(format!("  caused by: {}", err));
        source = err.source();
    }

    chain.join("\n")
}

/// Logs an error with its full chain. Callers keep going afterwards.
pub fn log_error(context: &str, error: &(dyn Error + 'static)) {
    let error_chain = format_error_chain(error);
    tracing::error!(
        context = context,
        error = %error_chain,
        "error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_includes_sources() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CoreError::from(io);
        let rendered = format_error_chain(&err);
        assert!(rendered.starts_with("io error: denied"));
        assert!(rendered.contains("caused by: denied"));
    }

    #[test]
    fn chain_without_source_is_single_line() {
        let err = CoreError::Config("missing root_dir".to_string());
        assert_eq!(format_error_chain(&err), "config error: missing root_dir");
    }
}
