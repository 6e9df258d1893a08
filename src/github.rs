use async_trait::async_trait;
use futures::{StreamExt, TryStreamExt};
use reqwest::Client;
use tracing::debug;

use crate::{
    error::{MirrorError, Result},
    source::{ByteStream, RemoteSource},
    types::NodeResponse,
};

/// Default base URL of the contents API
pub const API_BASE_URL: &str = "https://api.github.com";

/// GitHub-backed remote source
///
/// Fetches tree metadata from the GitHub REST contents API and raw file
/// bytes from the `download_url` each entry advertises.
#[derive(Clone)]
pub struct GithubSource {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
}

impl GithubSource {
    /// Create a source for a repository URL such as
    /// `https://github.com/owner/repo`, talking to the public API.
    pub fn from_repo_url(repo_url: &str) -> Result<Self> {
        Self::with_api_base(repo_url, API_BASE_URL)
    }

    /// Create a source with an explicit API base URL (for tests and
    /// self-hosted instances).
    pub fn with_api_base(repo_url: &str, api_base: &str) -> Result<Self> {
        let url = reqwest::Url::parse(repo_url).map_err(|e| MirrorError::InvalidConfig {
            message: format!("invalid repository URL {repo_url}: {e}"),
        })?;
        let path = url.path().trim_matches('/');
        let (owner, repo) =
            path.rsplit_once('/')
                .ok_or_else(|| MirrorError::InvalidConfig {
                    message: format!("repository URL {repo_url} has no owner/name path"),
                })?;

        let client = Client::builder()
            .user_agent(concat!("repo-mirror/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build the contents API URL for a node path; the empty path is the
    /// tree root and must not leave a trailing slash.
    fn contents_url(&self, path: &str) -> String {
        let base = format!(
            "{}/repos/{}/{}/contents",
            self.api_base, self.owner, self.repo
        );
        let path = path.trim_matches('/');
        if path.is_empty() {
            base
        } else {
            format!("{base}/{path}")
        }
    }
}

#[async_trait]
impl RemoteSource for GithubSource {
    fn name(&self) -> &str {
        &self.repo
    }

    async fn fetch(&self, path: &str) -> Result<NodeResponse> {
        let url = self.contents_url(path);
        debug!(%url, "fetching metadata");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::RemoteStatus {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_raw(&self, url: &str) -> Result<ByteStream> {
        debug!(%url, "opening raw stream");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::RemoteStatus {
                status: status.as_u16(),
                path: url.to_string(),
            });
        }

        Ok(response
            .bytes_stream()
            .map_err(MirrorError::from)
            .boxed())
    }
}
