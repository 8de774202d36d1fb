mod util;

use std::time::Duration;

use anyhow::Error;
use http::Uri;

use hyper::Client;
use hyper_rustls::ConfigBuilderExt;

use serde::de::DeserializeOwned;

use super::{DockerHubApi, GithubApi, GithubRepository, HubRepository};

const USER_AGENT: &str = "catalog-enricher/0.1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

type HttpCli = Client<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// HTTPS client for both public APIs. One hyper client is shared; which API
/// a request goes to only decides the base URI and whether the GitHub token
/// is attached.
pub struct HttpLookup {
    hub_base: Uri,
    github_base: Uri,
    github_token: Option<String>,
    http_client: HttpCli,
}

impl HttpLookup {
    pub fn from_bases<S: AsRef<str>, S2: AsRef<str>>(
        hub_base: S,
        github_base: S2,
        github_token: Option<String>,
    ) -> Result<HttpLookup, Error> {
        let tls = rustls::ClientConfig::builder()
            .with_safe_defaults()
            .with_native_roots()
            .with_no_client_auth();

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpCli = Client::builder().build::<_, hyper::Body>(https);

        Ok(HttpLookup {
            hub_base: normalized_base(hub_base.as_ref())?,
            github_base: normalized_base(github_base.as_ref())?,
            github_token,
            http_client,
        })
    }

    /// Issue one GET and absorb every lookup failure into `None`, logging a
    /// diagnostic line. Not-found stays silent.
    async fn fetch<T: DeserializeOwned>(&self, uri: &Uri, token: Option<&str>) -> Option<T> {
        match util::get_json(&self.http_client, uri, token).await {
            Ok(found) => found,
            Err(failure) => {
                eprintln!("  {}", failure);
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl DockerHubApi for HttpLookup {
    async fn repository_info(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<HubRepository>, Error> {
        let uri = uri_under_base(&self.hub_base, &format!("{}/{}/", namespace, name))?;
        Ok(self.fetch(&uri, None).await)
    }
}

#[async_trait::async_trait]
impl GithubApi for HttpLookup {
    async fn repository_info(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<GithubRepository>, Error> {
        let uri = uri_under_base(&self.github_base, &format!("{}/{}", owner, repo))?;
        Ok(self.fetch(&uri, self.github_token.as_deref()).await)
    }
}

fn normalized_base(base: &str) -> Result<Uri, Error> {
    let mut uri_parts = base.parse::<Uri>()?.into_parts();
    // default to using https
    if uri_parts.scheme.is_none() {
        uri_parts.scheme = Some("https".parse()?);
    }
    if uri_parts.path_and_query.is_none() {
        uri_parts.path_and_query = Some("/".try_into()?);
    }
    Ok(Uri::from_parts(uri_parts)?)
}

fn uri_under_base(base: &Uri, path: &str) -> Result<Uri, Error> {
    let mut uri_parts = base.clone().into_parts();
    let base_path = base.path().trim_end_matches('/');
    uri_parts.path_and_query = Some(format!("{}/{}", base_path, path).try_into()?);
    Ok(Uri::from_parts(uri_parts)?)
}
