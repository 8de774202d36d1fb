use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use clap::Parser;
use console::style;

use catalog::Catalog;
use enrich::Enricher;
use lookup::HttpLookup;

pub const DEFAULT_HUB_API_BASE: &str = "https://hub.docker.com/v2/repositories";
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com/repos";

#[derive(Parser, Debug)]
#[clap(name = "enricher app")]
pub struct Opt {
    #[clap(long)]
    pub templates_path: PathBuf,

    #[clap(long, default_value = DEFAULT_HUB_API_BASE)]
    pub hub_api_base: String,

    #[clap(long, default_value = DEFAULT_GITHUB_API_BASE)]
    pub github_api_base: String,

    /// Pause after every API request, to stay under the public rate limits.
    #[clap(long, default_value_t = 500)]
    pub request_delay_ms: u64,

    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,
}

pub async fn enrich_main(opt: Opt) -> Result<(), Error> {
    eprintln!(
        "Loading templates from {}",
        opt.templates_path.to_string_lossy()
    );
    let mut catalog = Catalog::parse_file(&opt.templates_path)?;

    let lookup = Arc::new(HttpLookup::from_bases(
        &opt.hub_api_base,
        &opt.github_api_base,
        opt.github_token.clone(),
    )?);

    let enricher = Enricher::new(
        lookup.clone(),
        lookup,
        Duration::from_millis(opt.request_delay_ms),
    );

    let summary = enricher.run(&mut catalog).await?;

    eprintln!(
        "\nWriting enriched data back to {}",
        opt.templates_path.to_string_lossy()
    );
    catalog.write_file(&opt.templates_path)?;

    eprintln!("\n{} {}", style("Done!").green(), summary);

    Ok(())
}

pub mod catalog;
pub mod enrich;
pub mod image_ref;
pub mod lookup;
pub mod resolver;
