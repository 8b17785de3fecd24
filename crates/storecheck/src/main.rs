use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use storecheck_core::Browser;
use storecheck_core::config::{ConfigLoader, StorecheckConfig};
use storecheck_core::storefront::StoreCheck;
use storecheck_core::suite::{Case, Runner, format_report};
use storecheck_h::HeadlessBrowser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "storecheck", version, about = "Storefront end-to-end checks")]
struct Args {
    /// Config file (defaults: ./storecheck.yaml, ~/.storecheck/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the store base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Only run cases whose "suite > name" contains this text
    #[arg(long)]
    filter: Option<String>,

    /// Launch browser in visible mode (not headless)
    #[arg(long)]
    visible: bool,

    /// List the cases and exit
    #[arg(long)]
    list: bool,
}

async fn load_config(args: &Args) -> anyhow::Result<StorecheckConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = ConfigLoader::load_from(path)
                .await
                .with_context(|| format!("loading {}", path.display()))?;
            ConfigLoader::apply_env(&mut config, |key| std::env::var(key).ok());
            config
        }
        None => ConfigLoader::load_default().await?,
    };
    if let Some(url) = &args.base_url {
        config.store.base_url = url.clone();
    }
    if args.visible {
        config.browser.visible = true;
    }
    ConfigLoader::validate(&config)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let runner = match &args.filter {
        Some(filter) => Runner::new().with_filter(filter.clone()),
        None => Runner::new(),
    };

    if args.list {
        for case in StoreCheck::ALL.iter().filter(|c| runner.selects(*c)) {
            println!("{}", case.title());
        }
        return Ok(());
    }

    let config = load_config(&args).await?;
    tracing::info!("Checking {}", config.store.base_url);

    let mut browser = HeadlessBrowser::from_config(&config.browser);
    if let Err(e) = browser.launch().await {
        eprintln!("Failed to launch browser: {}", e);
        return Err(e.into());
    }

    let report = runner.run(&mut browser, &config, &StoreCheck::ALL).await;
    println!("{}", format_report(&report));

    if let Err(e) = browser.close().await {
        tracing::warn!("Error closing browser: {}", e);
    }

    std::process::exit(report.exit_code());
}
