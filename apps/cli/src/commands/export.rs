//! # Export Command
//!
//! Writes the current results to CSV. Without a path the configured
//! export file is used.

use std::path::Path;

use pricedesk_io::export_to_path;
use tracing::debug;

use crate::error::CliError;
use crate::state::{AppConfig, Session};

/// Exports the session's results.
pub fn export_results(
    session: &Session,
    config: &AppConfig,
    path: Option<&Path>,
) -> Result<String, CliError> {
    let path = path.unwrap_or(config.export_file.as_path());
    debug!(path = %path.display(), "export command");

    let results = session.results();
    export_to_path(path, &results)?;
    Ok(format!(
        "Exported {} products to {}",
        results.len(),
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_export_to_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            export_file: dir.path().join("default.csv"),
            ..AppConfig::default()
        };
        let session = Session::new(&config).with_example();

        let reply = export_results(&session, &config, None).unwrap();

        assert!(reply.starts_with("Exported 1 products"));
        let written = std::fs::read_to_string(dir.path().join("default.csv")).unwrap();
        assert!(written.contains("Example Product,100,10,60,0,120.00,12.00,108.00,48.00,44.44"));
    }

    #[test]
    fn test_export_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chosen.csv");
        let config = AppConfig::default();
        let session = Session::new(&config);

        export_results(&session, &config, Some(path.as_path())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.csv");
        let config = AppConfig::default();
        let session = Session::new(&config);

        let err = export_results(&session, &config, Some(path.as_path())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportFailed);
    }
}
