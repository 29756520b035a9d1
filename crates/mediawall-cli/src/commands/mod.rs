pub mod completions;
pub mod copy;
pub mod list;
pub mod man_pages;
pub mod render;
pub mod tui;

use indicatif::{ProgressBar, ProgressStyle};
use mediawall_remote::{FetchError, ManifestFetcher, RemoteConfig};
use mediawall_schema::MediaEntry;
use std::path::PathBuf;
use std::time::Duration;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;
pub const EXIT_TRANSPORT_ERROR: u8 = 3;

/// Map an error message to its exit code by taxonomy prefix.
pub fn exit_code_for(msg: &str) -> u8 {
    if msg.starts_with("manifest error:") || msg.starts_with("failed to parse manifest") {
        EXIT_MANIFEST_ERROR
    } else if msg.starts_with("transport error:") {
        EXIT_TRANSPORT_ERROR
    } else {
        EXIT_FAILURE
    }
}

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .expect("valid template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn spin_ok(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✓ {msg}"));
}

pub fn spin_fail(pb: &ProgressBar, msg: &str) {
    pb.set_style(ProgressStyle::with_template("{msg}").expect("valid template"));
    pb.finish_with_message(format!("✗ {msg}"));
}

/// Where the manifest comes from for this invocation.
pub enum Source {
    Remote(ManifestFetcher),
    File {
        path: PathBuf,
        image_base: Option<String>,
    },
    /// Commands that never touch a manifest (completions, man pages).
    Unconfigured,
}

impl Source {
    pub fn resolve(
        manifest_url: Option<&str>,
        manifest_file: Option<PathBuf>,
        image_base: Option<&str>,
        cache_bust: bool,
        needs_manifest: bool,
    ) -> Result<Self, String> {
        if !needs_manifest {
            return Ok(Source::Unconfigured);
        }
        if let Some(path) = manifest_file {
            return Ok(Source::File {
                path,
                image_base: image_base.map(str::to_owned),
            });
        }
        let mut config = match manifest_url {
            Some(url) => RemoteConfig::new(url),
            None => RemoteConfig::load_default()
                .map_err(|e| format!("no --manifest-url and no config: {e}"))?,
        };
        if let Some(base) = image_base {
            config = config.with_image_base(base);
        }
        if cache_bust {
            config = config.with_cache_bust(true);
        }
        Ok(Source::Remote(ManifestFetcher::new(config)))
    }

    /// Load and flatten the manifest from wherever it lives.
    pub fn entries(&self) -> Result<Vec<MediaEntry>, FetchError> {
        match self {
            Source::Remote(fetcher) => fetcher.fetch_entries(),
            Source::File { path, image_base } => {
                let doc = mediawall_schema::parse_manifest_file(path)?;
                Ok(doc.entries(image_base.as_deref()))
            }
            Source::Unconfigured => Err(FetchError::Config(
                "no manifest source configured".to_owned(),
            )),
        }
    }

    pub fn into_fetcher(self) -> Option<ManifestFetcher> {
        match self {
            Source::Remote(fetcher) => Some(fetcher),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_pretty_serializes_string() {
        let val = serde_json::json!({"key": "value"});
        let result = json_pretty(&val).unwrap();
        assert!(result.contains("\"key\""));
        assert!(result.contains("\"value\""));
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
        assert_ne!(EXIT_FAILURE, EXIT_MANIFEST_ERROR);
        assert_ne!(EXIT_MANIFEST_ERROR, EXIT_TRANSPORT_ERROR);
    }

    #[test]
    fn exit_code_for_transport_prefix() {
        assert_eq!(
            exit_code_for("transport error: HTTP 503 for x"),
            EXIT_TRANSPORT_ERROR
        );
    }

    #[test]
    fn exit_code_for_manifest_prefix() {
        assert_eq!(
            exit_code_for("manifest error: unexpected token"),
            EXIT_MANIFEST_ERROR
        );
    }

    #[test]
    fn exit_code_for_other_messages() {
        assert_eq!(exit_code_for("clipboard error: no display"), EXIT_FAILURE);
    }

    #[test]
    fn source_resolve_prefers_manifest_file() {
        let source = Source::resolve(
            Some("http://example.com/m.json"),
            Some(PathBuf::from("/tmp/m.json")),
            None,
            false,
            true,
        )
        .unwrap();
        assert!(matches!(source, Source::File { .. }));
    }

    #[test]
    fn source_resolve_with_url() {
        let source =
            Source::resolve(Some("http://example.com/m.json"), None, None, true, true).unwrap();
        match source {
            Source::Remote(fetcher) => assert!(fetcher.config().cache_bust),
            _ => panic!("expected remote source"),
        }
    }

    #[test]
    fn source_entries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, r#"["a.jpg", "b.jpg"]"#).unwrap();
        let source = Source::File {
            path,
            image_base: Some("https://img.example.com".to_owned()),
        };
        let entries = source.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://img.example.com/a.jpg");
    }

    #[test]
    fn source_entries_from_missing_file_fails() {
        let source = Source::File {
            path: PathBuf::from("/nonexistent/m.json"),
            image_base: None,
        };
        assert!(source.entries().is_err());
    }

    #[test]
    fn spinner_creates_progress_bar() {
        let pb = spinner("testing...");
        spin_ok(&pb, "done");
    }

    #[test]
    fn spinner_fail_creates_progress_bar() {
        let pb = spinner("testing...");
        spin_fail(&pb, "failed");
    }
}
