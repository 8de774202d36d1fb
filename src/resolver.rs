use std::sync::OnceLock;

use regex::Regex;

use crate::image_ref::ImageRef;

// Publisher known to name its image sources `docker-{image}` on GitHub.
const CONVENTION_PUBLISHER: &str = "linuxserver";

fn github_url_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"github\.com/([^/\s]+)/([^/\s)"]+)"#).unwrap())
}

fn github_pages_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://([^/]+)\.github\.io/([^/\s)"]+)"#).unwrap())
}

/// Best-effort guess at the GitHub `(owner, repo)` behind an image.
///
/// Scans the Docker Hub description for a `github.com/owner/repo` link, then
/// for an `owner.github.io/repo` pages link, then falls back to the
/// `docker-{name}` naming convention for known publishers. Text matching
/// only; false positives are possible and tolerated downstream, where a
/// wrong guess simply fails its lookup.
pub fn resolve_source_repo(
    hub_description: Option<&str>,
    image: &str,
) -> Option<(String, String)> {
    let description = hub_description.unwrap_or("");

    for pattern in [github_url_pattern(), github_pages_pattern()] {
        if let Some(captures) = pattern.captures(description) {
            let owner = captures[1].to_string();
            let repo = captures[2]
                .trim_end_matches(".git")
                .trim_end_matches('/')
                .to_string();
            return Some((owner, repo));
        }
    }

    let image_ref = ImageRef::parse(image)?;
    if image_ref.namespace == CONVENTION_PUBLISHER {
        return Some((
            CONVENTION_PUBLISHER.to_string(),
            format!("docker-{}", image_ref.name),
        ));
    }

    None
}
