//! GitHub REST API tag source
//!
//! API endpoint: https://api.github.com/repos/{owner}/{repo}/tags

use crate::error::RegistryError;
use crate::registry::{HttpClient, TagInfo, TagSource, GITHUB_ACCEPT, GITHUB_API_VERSION};
use async_trait::async_trait;

/// GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// Environment variable holding an optional API token
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Tag listings fetched directly over HTTPS
pub struct GitHubApiTags {
    client: HttpClient,
    base_url: String,
    token: Option<String>,
}

impl GitHubApiTags {
    /// Create a tag source for api.github.com, authenticated with
    /// `GITHUB_TOKEN` when it is set
    pub fn new(client: HttpClient) -> Self {
        let token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty());
        Self::with_base_url(client, GITHUB_API_URL, token)
    }

    /// Create a tag source pointing at another server
    pub fn with_base_url(client: HttpClient, base_url: &str, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn build_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/tags", self.base_url, owner, repo)
    }
}

#[async_trait]
impl TagSource for GitHubApiTags {
    fn source_name(&self) -> &'static str {
        "GitHub"
    }

    async fn fetch_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagInfo>, RegistryError> {
        let url = self.build_url(owner, repo);
        let authorization = self.token.as_ref().map(|t| format!("Bearer {}", t));

        let mut headers = vec![
            ("Accept", GITHUB_ACCEPT),
            ("X-GitHub-Api-Version", GITHUB_API_VERSION),
        ];
        if let Some(value) = authorization.as_deref() {
            headers.push(("Authorization", value));
        }

        self.client
            .get_json(
                &url,
                &headers,
                &format!("{}/{}", owner, repo),
                self.source_name(),
            )
            .await
    }
}
