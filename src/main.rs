use anyhow::{bail, Result};
use sku_pages::{catalog, config::Config, enrich, generator, merge, premium, qc, render, report, server};
use tracing::info;

const USAGE: &str = "Usage: sku-pages <command>

Commands:
  generate      build per-SKU content from the catalog (en + all languages)
  enrich        fetch and compose fact-augmented en content from the web
  merge         fold enriched content into the content store
  qc            filter sources and fix water descriptions
  premium       pad under-length descriptions/ingredients/history
  render        write one HTML page per SKU and language
  all           generate, merge, qc, premium, render in order
  serve         run the edit service
  export-links  write the public page URL list as CSV
  check-images  report SKUs without an image in the assets directory";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sku_pages=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let command = std::env::args().nth(1).unwrap_or_default();
    match command.as_str() {
        "generate" => {
            generator::run_generate(&config)?;
        }
        "enrich" => {
            let rows = catalog::read_catalog(&config.catalog_file)?;
            enrich::run_enrichment(&config, &rows).await?;
        }
        "merge" => {
            merge::run_merge(&config)?;
        }
        "qc" => {
            qc::run_qc(&config)?;
        }
        "premium" => {
            premium::run_premium(&config)?;
        }
        "render" => {
            render::run_render(&config)?;
        }
        "all" => {
            info!("Running full pipeline");
            generator::run_generate(&config)?;
            if config.enriched_json.is_file() {
                merge::run_merge(&config)?;
            } else {
                info!("No enriched document found, skipping merge");
            }
            qc::run_qc(&config)?;
            premium::run_premium(&config)?;
            render::run_render(&config)?;
        }
        "serve" => {
            server::run_server(config).await?;
        }
        "export-links" => {
            report::export_links(&config)?;
        }
        "check-images" => {
            let audit = report::check_missing_images(&config)?;
            if audit.missing.is_empty() {
                info!("All {} rendered SKUs have images", audit.rendered);
            } else {
                for sku in &audit.missing {
                    println!("{}", sku);
                }
                info!("{} SKUs without images", audit.missing.len());
            }
        }
        "" => {
            eprintln!("{}", USAGE);
            bail!("Missing command");
        }
        other => {
            eprintln!("{}", USAGE);
            bail!("Unknown command: {}", other);
        }
    }

    Ok(())
}
