//! GitHub CLI tag source
//!
//! Uses an authenticated local `gh` to list tags, which avoids the
//! unauthenticated API rate limit. `GhAuthCheck` decides whether `gh` is
//! usable and remembers the answer for the rest of the run.

use crate::command::CommandRunner;
use crate::error::RegistryError;
use crate::registry::{TagInfo, TagSource, GITHUB_ACCEPT, GITHUB_API_VERSION};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tracing::{debug, warn};

const GH: &str = "gh";

/// Memoized "is `gh` installed and logged in" check
pub struct GhAuthCheck {
    runner: Arc<dyn CommandRunner>,
    cached: Option<bool>,
}

impl GhAuthCheck {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            cached: None,
        }
    }

    /// Returns true if `gh` is on `PATH` and `gh auth status` succeeds
    ///
    /// Only the first call runs anything.
    pub async fn is_available(&mut self) -> bool {
        if let Some(available) = self.cached {
            return available;
        }
        let available = self.check().await;
        debug!(available, "checked gh CLI");
        self.cached = Some(available);
        available
    }

    /// Forget the memoized answer
    pub fn reset(&mut self) {
        self.cached = None;
    }

    async fn check(&self) -> bool {
        if !self.runner.which(GH) {
            return false;
        }
        match self.runner.run(GH, &["auth", "status"]).await {
            Ok(output) => output.success,
            Err(e) => {
                if e.kind() == io::ErrorKind::TimedOut {
                    warn!("`gh auth status` timed out, using the GitHub API instead");
                }
                false
            }
        }
    }
}

/// Tag listings fetched through `gh api`
pub struct GhCliTags {
    runner: Arc<dyn CommandRunner>,
}

impl GhCliTags {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn build_args(owner: &str, repo: &str) -> Vec<String> {
        vec![
            "api".to_string(),
            "-H".to_string(),
            format!("Accept: {}", GITHUB_ACCEPT),
            "-H".to_string(),
            format!("X-GitHub-Api-Version: {}", GITHUB_API_VERSION),
            format!("/repos/{}/{}/tags", owner, repo),
        ]
    }
}

#[async_trait]
impl TagSource for GhCliTags {
    fn source_name(&self) -> &'static str {
        "gh"
    }

    async fn fetch_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagInfo>, RegistryError> {
        let args = Self::build_args(owner, repo);
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = format!("{} {}", GH, args.join(" "));

        let output = self
            .runner
            .run(GH, &arg_refs)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::TimedOut => {
                    RegistryError::timeout(format!("{}/{}", owner, repo), self.source_name())
                }
                _ => RegistryError::cli(&command, e.to_string()),
            })?;
        if !output.success {
            return Err(RegistryError::cli(&command, output.stderr_text()));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            RegistryError::invalid_response(
                format!("{}/{}", owner, repo),
                self.source_name(),
                format!("failed to parse JSON: {}", e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandOutput;
    use std::sync::Mutex;

    /// Mock runner that records invocations and replays canned outputs
    struct MockRunner {
        on_path: bool,
        auth_ok: bool,
        api_output: CommandOutput,
        timed_out: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockRunner {
        fn new(on_path: bool, auth_ok: bool) -> Self {
            Self {
                on_path,
                auth_ok,
                api_output: CommandOutput::success("[]"),
                timed_out: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Every command times out
        fn hanging(mut self) -> Self {
            self.timed_out = true;
            self
        }

        fn with_api_output(mut self, output: CommandOutput) -> Self {
            self.api_output = output;
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for MockRunner {
        fn which(&self, program: &str) -> bool {
            self.calls.lock().unwrap().push(format!("which {}", program));
            self.on_path
        }

        async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{} {}", program, args.join(" ")));
            if self.timed_out {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "too slow"));
            }
            if args.first() == Some(&"auth") {
                return Ok(if self.auth_ok {
                    CommandOutput::success("")
                } else {
                    CommandOutput::failure("You are not logged into any GitHub hosts.")
                });
            }
            Ok(self.api_output.clone())
        }
    }

    #[tokio::test]
    async fn test_gh_available_when_installed_and_authenticated() {
        let runner = Arc::new(MockRunner::new(true, true));
        let mut check = GhAuthCheck::new(runner.clone());
        assert!(check.is_available().await);
        assert_eq!(runner.calls(), vec!["which gh", "gh auth status"]);
    }

    #[tokio::test]
    async fn test_gh_unavailable_when_not_installed() {
        let runner = Arc::new(MockRunner::new(false, true));
        let mut check = GhAuthCheck::new(runner.clone());
        assert!(!check.is_available().await);
        assert_eq!(runner.calls(), vec!["which gh"]);
    }

    #[tokio::test]
    async fn test_gh_unavailable_when_not_authenticated() {
        let runner = Arc::new(MockRunner::new(true, false));
        let mut check = GhAuthCheck::new(runner);
        assert!(!check.is_available().await);
    }

    #[tokio::test]
    async fn test_gh_unavailable_when_auth_status_times_out() {
        let runner = Arc::new(MockRunner::new(true, true).hanging());
        let mut check = GhAuthCheck::new(runner);
        assert!(!check.is_available().await);
    }

    #[tokio::test]
    async fn test_gh_check_is_memoized_until_reset() {
        let runner = Arc::new(MockRunner::new(true, true));
        let mut check = GhAuthCheck::new(runner.clone());

        assert!(check.is_available().await);
        assert!(check.is_available().await);
        assert_eq!(runner.calls().len(), 2);

        check.reset();
        assert!(check.is_available().await);
        assert_eq!(runner.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_fetch_tags_invokes_gh_api() {
        let runner = Arc::new(MockRunner::new(true, true).with_api_output(
            CommandOutput::success(r#"[{"name": "v1.2.3", "commit": {"sha": "cafe"}}]"#),
        ));
        let source = GhCliTags::new(runner.clone());

        let tags = source.fetch_tags("owner", "repo").await.unwrap();

        assert_eq!(tags, vec![TagInfo::new("v1.2.3", "cafe")]);
        assert_eq!(
            runner.calls(),
            vec![
                "gh api -H Accept: application/vnd.github+json \
                 -H X-GitHub-Api-Version: 2022-11-28 /repos/owner/repo/tags"
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_tags_command_failure() {
        let runner = Arc::new(
            MockRunner::new(true, true)
                .with_api_output(CommandOutput::failure("HTTP 404: Not Found")),
        );
        let source = GhCliTags::new(runner);

        let err = source.fetch_tags("owner", "repo").await.unwrap_err();

        match err {
            RegistryError::Cli { command, message } => {
                assert!(command.starts_with("gh api"));
                assert_eq!(message, "HTTP 404: Not Found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_tags_timeout() {
        let runner = Arc::new(MockRunner::new(true, true).hanging());
        let source = GhCliTags::new(runner);

        let err = source.fetch_tags("owner", "repo").await.unwrap_err();

        match err {
            RegistryError::Timeout { package, registry } => {
                assert_eq!(package, "owner/repo");
                assert_eq!(registry, "gh");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_tags_invalid_json() {
        let runner = Arc::new(
            MockRunner::new(true, true).with_api_output(CommandOutput::success("oops")),
        );
        let source = GhCliTags::new(runner);

        let result = source.fetch_tags("owner", "repo").await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse { .. })));
    }
}
