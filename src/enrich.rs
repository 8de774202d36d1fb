use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use chrono::Utc;

use crate::catalog::{Catalog, DockerMetadata, GithubMetadata, Metadata, Template};
use crate::image_ref::{format_number, ImageRef};
use crate::lookup::{DockerHubApi, GithubApi};
use crate::resolver::resolve_source_repo;

/// Walks the catalog one template at a time, merging whatever the two
/// lookups return into each entry's `metadata`.
pub struct Enricher {
    hub: Arc<dyn DockerHubApi + Send + Sync>,
    github: Arc<dyn GithubApi + Send + Sync>,
    request_delay: Duration,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub enriched: usize,
    pub total: usize,
}

impl std::fmt::Display for EnrichmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enriched {}/{} templates", self.enriched, self.total)
    }
}

impl Enricher {
    pub fn new(
        hub: Arc<dyn DockerHubApi + Send + Sync>,
        github: Arc<dyn GithubApi + Send + Sync>,
        request_delay: Duration,
    ) -> Enricher {
        Enricher {
            hub,
            github,
            request_delay,
        }
    }

    /// Enrich one template in place.
    ///
    /// Entries whose image is absent or does not resolve to Docker Hub are
    /// left untouched. Otherwise the Hub lookup runs first, then the source
    /// resolver, then the GitHub lookup when a candidate was found; each
    /// network call is followed by the configured courtesy delay. `metadata`
    /// is only written when at least one lookup produced data.
    pub async fn enrich_template(&self, template: &mut Template) -> Result<(), Error> {
        let Some(image) = template.image.clone().filter(|i| !i.is_empty()) else {
            return Ok(());
        };
        let Some(image_ref) = ImageRef::parse(&image) else {
            return Ok(());
        };

        eprintln!("  Fetching: {}/{}", image_ref.namespace, image_ref.name);

        let hub_info = self
            .hub
            .repository_info(&image_ref.namespace, &image_ref.name)
            .await?;
        tokio::time::sleep(self.request_delay).await;

        let mut metadata = Metadata::default();

        if let Some(hub_info) = &hub_info {
            metadata.docker = Some(DockerMetadata {
                pulls: hub_info.pull_count,
                pulls_formatted: format_number(hub_info.pull_count),
                stars: hub_info.star_count,
                hub_url: image_ref.hub_url(),
                last_updated: hub_info.last_updated.clone(),
                is_official: image_ref.is_official(),
            });

            let has_description = template
                .description
                .as_deref()
                .is_some_and(|d| !d.is_empty());
            if !hub_info.description.is_empty() && !has_description {
                template.description = Some(hub_info.description.clone());
            }
        }

        let hub_description = hub_info.as_ref().map(|h| h.description.as_str());
        if let Some((owner, repo)) = resolve_source_repo(hub_description, &image) {
            let github_info = self.github.repository_info(&owner, &repo).await?;
            tokio::time::sleep(self.request_delay).await;

            if let Some(github_info) = github_info {
                metadata.github = Some(GithubMetadata {
                    url: github_info.html_url.clone(),
                    stars: github_info.stargazers_count,
                    forks: github_info.forks_count,
                    issues: github_info.open_issues_count,
                    updated: github_info.updated_at.clone(),
                    license: github_info.spdx_id(),
                });
            }
        }

        if metadata.docker.is_some() || metadata.github.is_some() {
            template.metadata = Some(metadata);
        }

        Ok(())
    }

    /// Run the enrichment over every template, then stamp the catalog with
    /// the completion time. A failure while enriching one entry is logged
    /// and leaves that entry exactly as it was; it never stops the run.
    pub async fn run(&self, catalog: &mut Catalog) -> Result<EnrichmentSummary, Error> {
        let total = catalog.templates.len();
        eprintln!("Found {} templates to process\n", total);

        let mut summary = EnrichmentSummary {
            total,
            ..Default::default()
        };

        for (idx, template) in catalog.templates.iter_mut().enumerate() {
            eprintln!("[{}/{}] {}", idx + 1, total, template.display_title());

            let mut updated = template.clone();
            match self.enrich_template(&mut updated).await {
                Ok(()) => {
                    if updated.metadata.is_some() {
                        summary.enriched += 1;
                    }
                    *template = updated;
                }
                Err(e) => {
                    eprintln!("  Error: {:#}", e);
                    continue;
                }
            }
        }

        catalog.enriched_at = Some(Utc::now().to_rfc3339());

        Ok(summary)
    }
}
