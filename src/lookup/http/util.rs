use http::Uri;
use http::{Response, StatusCode};
use hyper::body::HttpBody as _;

use hyper::Body;

use serde::de::DeserializeOwned;

use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use super::{HttpCli, REQUEST_TIMEOUT, USER_AGENT};

const MAX_REDIRECT_HOPS: usize = 5;

#[derive(thiserror::Error, Debug)]
pub(super) enum LookupFailure {
    #[error("Request to {uri} timed out after {timeout_secs}s")]
    Timeout { uri: Uri, timeout_secs: u64 },
    #[error("Request failed for {0}: {1}")]
    Transport(Uri, hyper::Error),
    #[error("HTTP {code} for {uri}")]
    Status { code: u16, uri: Uri },
    #[error("Malformed response body from {0}: {1}")]
    MalformedBody(Uri, serde_json::Error),
    #[error("Internal error: '{0:?}'")]
    AnyhowError(anyhow::Error),
}
impl From<anyhow::Error> for LookupFailure {
    fn from(e: anyhow::Error) -> Self {
        LookupFailure::AnyhowError(e)
    }
}

#[async_recursion::async_recursion]
async fn inner_redirect_uri_fetch<F>(
    client: &HttpCli,
    configure_request_builder: F,
    uri: &Uri,
    hops: usize,
) -> Result<Response<Body>, LookupFailure>
where
    F: Fn(http::request::Builder) -> http::request::Builder + Send + Sync,
{
    let req_builder = http::request::Builder::default()
        .method(http::Method::GET)
        .uri(uri);
    let req_builder = configure_request_builder(req_builder);

    let request = req_builder
        .body(Body::from(""))
        .map_err(|e| LookupFailure::AnyhowError(e.into()))?;

    let r: Response<Body> = client
        .request(request)
        .await
        .map_err(|e| LookupFailure::Transport(uri.clone(), e))?;

    let status = r.status();
    if status.is_redirection() && hops < MAX_REDIRECT_HOPS {
        if let Some(location_header) = r.headers().get(http::header::LOCATION) {
            let location_str = location_header
                .to_str()
                .map_err(|e| LookupFailure::AnyhowError(e.into()))?;
            let next_uri = location_str
                .parse::<Uri>()
                .map_err(|e| LookupFailure::AnyhowError(e.into()))?;
            return inner_redirect_uri_fetch(
                client,
                configure_request_builder,
                &next_uri,
                hops + 1,
            )
            .await;
        }
    }

    Ok(r)
}

pub(super) async fn dump_body_to_string(
    response: &mut Response<Body>,
) -> Result<String, anyhow::Error> {
    let mut buffer = Vec::default();
    while let Some(chunk) = response.body_mut().data().await {
        buffer.write_all(&chunk?).await?;
    }
    let body = std::str::from_utf8(&buffer)?;
    Ok(body.to_string())
}

/// GET a JSON document. `Ok(None)` is a 404: the repository does not exist
/// and no diagnostic should be printed. All other failures surface in the
/// error so the caller can log them.
pub(super) async fn get_json<T: DeserializeOwned>(
    client: &HttpCli,
    uri: &Uri,
    token: Option<&str>,
) -> Result<Option<T>, LookupFailure> {
    let req_future = inner_redirect_uri_fetch(
        client,
        |req| {
            let req = req
                .header(http::header::USER_AGENT, USER_AGENT)
                .header(http::header::ACCEPT, "application/json");
            match token {
                Some(t) => req.header(http::header::AUTHORIZATION, format!("token {}", t)),
                None => req,
            }
        },
        uri,
        0,
    );

    let mut response = match timeout(REQUEST_TIMEOUT, req_future).await {
        Err(_) => {
            return Err(LookupFailure::Timeout {
                uri: uri.clone(),
                timeout_secs: REQUEST_TIMEOUT.as_secs(),
            })
        }
        Ok(Err(e)) => return Err(e),
        Ok(Ok(r)) => r,
    };

    let status = response.status();
    tracing::debug!("GET {} -> {}", uri, status);

    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    let body = dump_body_to_string(&mut response).await?;

    if !status.is_success() {
        return Err(LookupFailure::Status {
            code: status.as_u16(),
            uri: uri.clone(),
        });
    }

    match serde_json::from_str(&body) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => Err(LookupFailure::MalformedBody(uri.clone(), e)),
    }
}
