use crate::{FetchError, RemoteConfig};
use mediawall_schema::{parse_manifest_bytes, ManifestDocument, MediaEntry};
use std::io::Read;

/// Blocking HTTP fetcher for the gallery manifest.
///
/// One GET request per call, no retries, no timeout tuning; failures are
/// surfaced to the caller directly. Cache-busting, when enabled in the
/// config, appends a `ts=<unix-millis>` query parameter so intermediaries
/// never serve a stale manifest.
pub struct ManifestFetcher {
    config: RemoteConfig,
    agent: ureq::Agent,
}

impl ManifestFetcher {
    pub fn new(config: RemoteConfig) -> Self {
        let agent = ureq::Agent::new_with_defaults();
        Self { config, agent }
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// The exact URL the next fetch will request.
    pub fn request_url(&self) -> String {
        if self.config.cache_bust {
            let ts = chrono::Utc::now().timestamp_millis();
            let sep = if self.config.manifest_url.contains('?') {
                '&'
            } else {
                '?'
            };
            format!("{}{sep}ts={ts}", self.config.manifest_url)
        } else {
            self.config.manifest_url.clone()
        }
    }

    /// Fetch and parse the manifest document.
    pub fn fetch(&self) -> Result<ManifestDocument, FetchError> {
        let url = self.request_url();
        tracing::debug!("GET {url}");
        let resp = match self.agent.get(&url).call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(code)) => {
                return Err(FetchError::Transport(format!("HTTP {code} for {url}")));
            }
            Err(e) => {
                return Err(FetchError::Transport(e.to_string()));
            }
        };

        let code = resp.status().as_u16();
        if code >= 400 {
            return Err(FetchError::Transport(format!("HTTP {code} for {url}")));
        }

        let mut reader = resp.into_body().into_reader();
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        tracing::debug!("manifest body: {} bytes", body.len());
        Ok(parse_manifest_bytes(&body)?)
    }

    /// Fetch, parse, and flatten in one step.
    pub fn fetch_entries(&self) -> Result<Vec<MediaEntry>, FetchError> {
        let doc = self.fetch()?;
        Ok(doc.entries(self.config.image_base.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};

    /// Single-purpose mock manifest server: answers every GET with a fixed
    /// status and body, recording request paths for inspection.
    struct MockServer {
        addr: String,
        _handle: std::thread::JoinHandle<()>,
        paths: Arc<Mutex<Vec<String>>>,
    }

    impl MockServer {
        fn start(status: u16, body: &str) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = format!("http://{}", listener.local_addr().unwrap());
            let paths: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
            let body = body.to_owned();

            let paths_clone = Arc::clone(&paths);
            let handle = std::thread::spawn(move || {
                for stream in listener.incoming() {
                    let Ok(mut stream) = stream else { break };
                    let mut reader = BufReader::new(stream.try_clone().unwrap());
                    let mut request_line = String::new();
                    if reader.read_line(&mut request_line).is_err() {
                        continue;
                    }
                    let parts: Vec<&str> = request_line.trim().splitn(3, ' ').collect();
                    if parts.len() < 2 {
                        continue;
                    }
                    paths_clone.lock().unwrap().push(parts[1].to_owned());

                    loop {
                        let mut line = String::new();
                        if reader.read_line(&mut line).is_err() || line.trim().is_empty() {
                            break;
                        }
                    }

                    let reason = match status {
                        200 => "OK",
                        404 => "Not Found",
                        500 => "Internal Server Error",
                        _ => "Status",
                    };
                    let response = format!(
                        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                }
            });

            MockServer {
                addr,
                _handle: handle,
                paths,
            }
        }

        fn requested_paths(&self) -> Vec<String> {
            self.paths.lock().unwrap().clone()
        }
    }

    const TREE_BODY: &str = r#"
{
  "tree": {
    "type": "folder",
    "children": [
      {
        "type": "img",
        "name": "a",
        "filename": "a.jpg",
        "url": "https://cdn.example.com/a.jpg",
        "thumburl": "https://cdn.example.com/t/a.jpg"
      }
    ]
  }
}
"#;

    fn fetcher_for(addr: &str) -> ManifestFetcher {
        ManifestFetcher::new(RemoteConfig::new(&format!("{addr}/gallery.json")))
    }

    #[test]
    fn fetch_parses_tree_manifest() {
        let server = MockServer::start(200, TREE_BODY);
        let fetcher = fetcher_for(&server.addr);
        let entries = fetcher.fetch_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "a.jpg");
    }

    #[test]
    fn fetch_legacy_manifest_applies_image_base() {
        let server = MockServer::start(200, r#"["pics/a.jpg"]"#);
        let config = RemoteConfig::new(&format!("{}/gallery.json", server.addr))
            .with_image_base("https://img.example.com");
        let fetcher = ManifestFetcher::new(config);
        let entries = fetcher.fetch_entries().unwrap();
        assert_eq!(entries[0].url, "https://img.example.com/pics/a.jpg");
    }

    #[test]
    fn non_2xx_status_is_transport_error() {
        let server = MockServer::start(404, "gone");
        let fetcher = fetcher_for(&server.addr);
        let err = fetcher.fetch().unwrap_err();
        match err {
            FetchError::Transport(msg) => assert!(msg.contains("404"), "{msg}"),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn server_error_status_is_transport_error() {
        let server = MockServer::start(500, "boom");
        let fetcher = fetcher_for(&server.addr);
        assert!(matches!(
            fetcher.fetch(),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn connection_refused_is_transport_error() {
        let fetcher = ManifestFetcher::new(RemoteConfig::new("http://127.0.0.1:1/gallery.json"));
        assert!(matches!(
            fetcher.fetch(),
            Err(FetchError::Transport(_))
        ));
    }

    #[test]
    fn invalid_body_is_parse_error() {
        let server = MockServer::start(200, "<html>not a manifest</html>");
        let fetcher = fetcher_for(&server.addr);
        assert!(matches!(fetcher.fetch(), Err(FetchError::Parse(_))));
    }

    #[test]
    fn cache_bust_appends_timestamp_parameter() {
        let server = MockServer::start(200, TREE_BODY);
        let config =
            RemoteConfig::new(&format!("{}/gallery.json", server.addr)).with_cache_bust(true);
        let fetcher = ManifestFetcher::new(config);
        fetcher.fetch().unwrap();

        let paths = server.requested_paths();
        assert_eq!(paths.len(), 1);
        assert!(paths[0].starts_with("/gallery.json?ts="), "{}", paths[0]);
    }

    #[test]
    fn cache_bust_uses_ampersand_when_query_present() {
        let config = RemoteConfig::new("http://example.com/m.json?v=2").with_cache_bust(true);
        let fetcher = ManifestFetcher::new(config);
        assert!(fetcher.request_url().contains("?v=2&ts="));
    }

    #[test]
    fn no_cache_bust_leaves_url_untouched() {
        let server = MockServer::start(200, TREE_BODY);
        let fetcher = fetcher_for(&server.addr);
        fetcher.fetch().unwrap();
        assert_eq!(server.requested_paths(), vec!["/gallery.json"]);
    }
}
