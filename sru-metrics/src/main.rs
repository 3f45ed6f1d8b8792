use anyhow::{Context, Result};
use clap::Parser;

use sru_metrics::collect::SruCollector;
use sru_metrics::config::{CollectorConfig, CONFIG_PATH};
use sru_metrics::module::launchpad::LaunchpadClient;
use sru_metrics::module::publisher::PushGateway;
use sru_metrics::module::sru_report::HttpReportFetcher;

#[derive(Parser)]
#[command(
    name = "sru-metrics",
    version,
    about = "Sample the SRU review queue and push its health metrics"
)]
struct Args {
    /// Print the collected values without pushing them to the gateway.
    #[arg(long)]
    dryrun: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration (defaults when config.toml is absent)
    let config = CollectorConfig::load_or_default(CONFIG_PATH)?;

    let _logging_guard = sru_metrics::logging::init_logging(
        config.log_dir.as_deref(),
        "sru-metrics",
        &config.log_level,
    );

    tracing::info!("SRU metrics collector starting...");

    let launchpad = LaunchpadClient::anonymous(&config)
        .context("Failed to set up Launchpad client")?;
    let fetcher = HttpReportFetcher::new().context("Failed to set up report fetcher")?;
    let gateway = PushGateway::new(&config.gateway_url)
        .context("Failed to set up push gateway client")?;

    let collector = SruCollector::new(&launchpad, &launchpad, &fetcher, &gateway);

    let mut stdout = std::io::stdout();
    let outcome = collector
        .run(args.dryrun, &mut stdout)
        .await
        .context("SRU metrics collection failed")?;

    tracing::info!("Collection finished: {:?}", outcome);
    Ok(())
}
