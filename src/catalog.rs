use std::path::Path;

use serde::{Deserialize, Serialize};

use anyhow::{Context, Error};

/// The templates catalog document. Fields this tool does not know about are
/// carried through `extra` untouched, so re-writing the file never drops data.
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Catalog {
    #[serde(default)]
    pub templates: Vec<Template>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enriched_at: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Template {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Unknown")
    }
}

/// Enrichment output attached to a template. A missing sub-key means the
/// corresponding lookup failed or was never attempted.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker: Option<DockerMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<GithubMetadata>,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct DockerMetadata {
    pub pulls: u64,
    pub pulls_formatted: String,
    pub stars: u64,
    pub hub_url: String,
    pub last_updated: String,
    pub is_official: bool,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone)]
pub struct GithubMetadata {
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub issues: u64,
    pub updated: String,
    // null when the repository reports no license
    pub license: Option<String>,
}

impl Catalog {
    pub fn parse_file(f: impl AsRef<Path>) -> Result<Catalog, Error> {
        let content = std::fs::read_to_string(f.as_ref())?;
        let c: Catalog = serde_json::from_str(content.as_str()).with_context(|| {
            format!(
                "Attempting to parse templates catalog from file: {}",
                f.as_ref().to_string_lossy()
            )
        })?;

        Ok(c)
    }

    pub fn write_file(&self, f: impl AsRef<Path>) -> Result<(), Error> {
        use std::fs::File;
        use std::io::BufWriter;

        let file = File::create(f.as_ref())?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
