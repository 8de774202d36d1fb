use anyhow::bail;
use clap::Parser;

use catalog_enricher::{enrich_main, Opt};

// cargo run --bin enricher-app -- --templates-path templates.json

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let opt = Opt::parse();

    if !opt.templates_path.exists() {
        bail!(
            "Path for templates passed in does not exist: {:#?}",
            opt.templates_path
        );
    }

    enrich_main(opt).await
}
