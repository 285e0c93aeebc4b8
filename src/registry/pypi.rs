//! PyPI JSON API package index
//!
//! Fetches the latest published version of a package from PyPI.
//! API endpoint: https://pypi.org/pypi/{package}/json

use crate::error::RegistryError;
use crate::registry::{HttpClient, PackageIndex};
use async_trait::async_trait;
use serde::Deserialize;

/// PyPI base URL
const PYPI_BASE_URL: &str = "https://pypi.org";

/// PyPI package index
pub struct PyPIIndex {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    info: PyPIInfo,
}

#[derive(Debug, Deserialize)]
struct PyPIInfo {
    /// Latest non-yanked release as chosen by PyPI
    version: String,
}

impl PyPIIndex {
    /// Create a PyPI index pointing at pypi.org
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, PYPI_BASE_URL)
    }

    /// Create a PyPI index pointing at another server
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl PackageIndex for PyPIIndex {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn latest_version(&self, package: &str) -> Result<String, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, &[], package, self.registry_name())
            .await?;

        Ok(response.info.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_pypi_index_registry_name() {
        let index = PyPIIndex::new(HttpClient::new().unwrap());
        assert_eq!(index.registry_name(), "PyPI");
    }

    #[test]
    fn test_build_url() {
        let index = PyPIIndex::new(HttpClient::new().unwrap());
        assert_eq!(
            index.build_url("flake8-bugbear"),
            "https://pypi.org/pypi/flake8-bugbear/json"
        );
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        let index = PyPIIndex::with_base_url(HttpClient::new().unwrap(), "http://localhost:1/");
        assert_eq!(index.build_url("black"), "http://localhost:1/pypi/black/json");
    }

    #[tokio::test]
    async fn test_latest_version_reads_info_version() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/black/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "info": {"name": "black", "version": "24.10.0"},
                    "releases": {"24.8.0": [], "24.10.0": []}
                }"#,
            )
            .create_async()
            .await;

        let index = PyPIIndex::with_base_url(HttpClient::new().unwrap(), &server.url());
        let version = index.latest_version("black").await.unwrap();

        mock.assert_async().await;
        assert_eq!(version, "24.10.0");
    }

    #[tokio::test]
    async fn test_latest_version_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/no-such-package/json")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let index = PyPIIndex::with_base_url(HttpClient::new().unwrap(), &server.url());
        let result = index.latest_version("no-such-package").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::PackageNotFound { ref package, .. }) if package == "no-such-package"
        ));
    }

    #[tokio::test]
    async fn test_latest_version_missing_info() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/pypi/odd/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"releases": {}}"#)
            .create_async()
            .await;

        let index = PyPIIndex::with_base_url(HttpClient::new().unwrap(), &server.url());
        let result = index.latest_version("odd").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse { .. })));
    }
}
