mod http;

pub use http::HttpLookup;

use anyhow::Error;
use serde::Deserialize;

/// Repository record returned by the Docker Hub API. Missing fields
/// deserialize to their empty/zero defaults so a sparse response still
/// yields a usable record.
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct HubRepository {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub star_count: u64,
    #[serde(default)]
    pub pull_count: u64,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct GithubLicense {
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// Repository record returned by the GitHub API.
#[derive(Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct GithubRepository {
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub license: Option<GithubLicense>,
}

impl GithubRepository {
    pub fn spdx_id(&self) -> Option<String> {
        self.license.as_ref().and_then(|l| l.spdx_id.clone())
    }
}

/// Read-only Docker Hub repository lookup.
///
/// `Ok(None)` means "no data for this repository": not found, or a transport
/// failure the implementation has already reported. Implementations must not
/// error for those cases; `Err` is reserved for genuinely unexpected
/// failures, which the driver absorbs per entry.
#[async_trait::async_trait]
pub trait DockerHubApi {
    async fn repository_info(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<HubRepository>, Error>;
}

/// Read-only GitHub repository lookup. Same `Ok(None)` contract as
/// [`DockerHubApi`].
#[async_trait::async_trait]
pub trait GithubApi {
    async fn repository_info(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<GithubRepository>, Error>;
}
