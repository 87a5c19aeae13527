use crate::error::{BumpError, Result};
use crate::repository::PackageIndex;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/pypi";

/// Client for the PyPI JSON API (`GET {index}/{package}/json`).
pub struct PypiClient {
    client: Client,
    index_url: String,
}

impl PypiClient {
    pub fn new(index_url: &str, timeout: Duration) -> Result<Self> {
        Self::validate_index_url(index_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bump-deps/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BumpError::Http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            index_url: index_url.trim_end_matches('/').to_string(),
        })
    }

    fn package_url(&self, package: &str) -> String {
        format!("{}/{}/json", self.index_url, package)
    }

    /// Fetch `info.version` for a package.
    ///
    /// Connection failures and non-success statuses are reported as `Ok(None)`
    /// so a single unreachable package never stops the run.
    pub fn fetch_latest_version(&self, package: &str) -> Result<Option<String>> {
        let url = self.package_url(package);
        debug!(%url, "fetching package metadata");

        let response = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                debug!(%url, error = %e, "request failed");
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            debug!(%url, status = %response.status(), "index returned an error status");
            return Ok(None);
        }

        let body = response.text().map_err(|e| {
            BumpError::Http(format!("Failed to read metadata for '{package}': {e}"))
        })?;
        let metadata: PackageMetadata = serde_json::from_str(&body)?;

        debug!(package, version = %metadata.info.version, "latest version");
        Ok(Some(metadata.info.version))
    }

    fn validate_index_url(url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|_| BumpError::Config(format!("Invalid index URL: {url}")))?;

        match parsed.scheme() {
            "https" | "http" => Ok(()),
            scheme => Err(BumpError::Config(format!(
                "Unsupported index URL scheme: {scheme}"
            ))),
        }
    }
}

impl PackageIndex for PypiClient {
    fn latest_version(&self, package: &str) -> Result<Option<String>> {
        self.fetch_latest_version(package)
    }
}

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    info: PackageInfo,
}

#[derive(Debug, Deserialize)]
struct PackageInfo {
    version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn client_for(server: &Server) -> PypiClient {
        PypiClient::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn accepts_https_index() {
        assert!(PypiClient::validate_index_url("https://pypi.org/pypi").is_ok());
    }

    #[test]
    fn rejects_invalid_scheme() {
        let err = PypiClient::validate_index_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, BumpError::Config(_)));
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = PypiClient::validate_index_url("not a url").unwrap_err();
        assert!(matches!(err, BumpError::Config(_)));
    }

    #[test]
    fn builds_package_url_without_double_slash() {
        let client = PypiClient::new("https://pypi.org/pypi/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.package_url("requests"),
            "https://pypi.org/pypi/requests/json"
        );
    }

    #[test]
    fn reads_info_version() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/requests/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"info": {"name": "requests", "version": "2.31.0"}, "releases": {}}"#)
            .create();

        let client = client_for(&server);
        assert_eq!(
            client.latest_version("requests").unwrap(),
            Some("2.31.0".to_string())
        );
    }

    #[test]
    fn not_found_is_none() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/definitely-not-a-package/json")
            .with_status(404)
            .create();

        let client = client_for(&server);
        assert_eq!(client.latest_version("definitely-not-a-package").unwrap(), None);
    }

    #[test]
    fn unreachable_host_is_none() {
        let client = PypiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert_eq!(client.latest_version("requests").unwrap(), None);
    }

    #[test]
    fn undecodable_body_is_an_error() {
        let mut server = Server::new();
        let _mock = server
            .mock("GET", "/requests/json")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create();

        let client = client_for(&server);
        assert!(matches!(
            client.latest_version("requests"),
            Err(BumpError::Json(_))
        ));
    }

    #[test]
    #[ignore] // Requires network access
    fn fetches_requests_from_pypi() {
        let client = PypiClient::new(DEFAULT_INDEX_URL, Duration::from_secs(30)).unwrap();
        let version = client.latest_version("requests").unwrap().unwrap();
        assert!(version.chars().next().unwrap().is_ascii_digit());
    }
}
