/// Namespace Docker Hub reserves for its curated official images.
pub const OFFICIAL_NAMESPACE: &str = "library";

pub const DEFAULT_TAG: &str = "latest";

// Registries we never query; only Docker Hub images are enriched.
const FOREIGN_REGISTRY_HOSTS: &[&str] =
    &["ghcr.io", "gcr.io", "quay.io", "mcr.microsoft.com", "lscr.io"];

/// A Docker Hub image reference, decomposed into its addressable parts.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ImageRef {
    pub namespace: String,
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    /// Parse an image string of the shape `[namespace/]name[:tag]`.
    ///
    /// Returns `None` for images hosted outside Docker Hub: either a known
    /// foreign registry hostname appears anywhere in the string, or the
    /// segment before the first `/` contains a dot. The dot heuristic also
    /// rejects Hub namespaces that contain a dot; that tradeoff is accepted.
    pub fn parse(image: &str) -> Option<ImageRef> {
        if FOREIGN_REGISTRY_HOSTS.iter().any(|r| image.contains(r)) {
            return None;
        }

        if let Some((first_segment, _)) = image.split_once('/') {
            if first_segment.contains('.') {
                return None;
            }
        }

        let (remainder, tag) = match image.rsplit_once(':') {
            Some((remainder, tag)) => (remainder, tag.to_string()),
            None => (image, DEFAULT_TAG.to_string()),
        };

        let (namespace, name) = match remainder.split_once('/') {
            Some((namespace, name)) => (namespace.to_string(), name.to_string()),
            None => (OFFICIAL_NAMESPACE.to_string(), remainder.to_string()),
        };

        Some(ImageRef {
            namespace,
            name,
            tag,
        })
    }

    pub fn is_official(&self) -> bool {
        self.namespace == OFFICIAL_NAMESPACE
    }

    /// Browse URL for this repository on Docker Hub.
    pub fn hub_url(&self) -> String {
        if self.is_official() {
            format!("https://hub.docker.com/_/{}", self.name)
        } else {
            format!("https://hub.docker.com/r/{}/{}", self.namespace, self.name)
        }
    }
}

/// Format large counts with a K/M suffix, one decimal place.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000_f64)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000_f64)
    } else {
        n.to_string()
    }
}
