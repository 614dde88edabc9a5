//! adstat - Weekly advertising spend report into a shared spreadsheet

use adstat::{
    adstat_sheets::{GoogleSheets, MemorySpreadsheet, ReportSink, SpreadsheetBackend},
    cli::{CampaignsArgs, Cli, Command, RunArgs, parse_as_of},
    config::{CONFIG_ENV_VAR, Config},
    error::{AdstatError, Result},
    output::get_formatter,
    runner::Runner,
    timezone::TimezoneConfig,
    window::ReportingWindow,
};
use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load the configuration from `--config`/`ADSTAT_CONFIG` or the default location
fn load_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path().ok_or_else(|| {
            AdstatError::Configuration(format!(
                "No config directory found; pass --config or set {CONFIG_ENV_VAR}"
            ))
        })?,
    };
    Config::from_file(path)
}

/// "Now" for the run: the current instant, or `--as-of` read in `tz`
fn resolve_now(tz_config: &TimezoneConfig, as_of: Option<&str>) -> Result<DateTime<Tz>> {
    let Some(as_of) = as_of else {
        return Ok(tz_config.now());
    };

    let naive = parse_as_of(as_of)?;
    tz_config
        .tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| {
            AdstatError::InvalidDate(format!(
                "'{as_of}' does not exist in {}",
                tz_config.display_name()
            ))
        })
}

async fn run_report<B: SpreadsheetBackend>(
    config: &Config,
    args: &RunArgs,
    window: &ReportingWindow,
    backend: B,
) -> Result<()> {
    let mut sink = ReportSink::new(backend);
    let summary = Runner::new(config)
        .with_policy(args.failure_policy())
        .with_progress(args.show_progress())
        .run(window, &mut sink)
        .await?;

    println!("{}", get_formatter(args.json).format_run(&summary));
    Ok(())
}

async fn run_command(cli: &Cli, config: &Config, args: &RunArgs) -> Result<()> {
    let tz_config = TimezoneConfig::from_name(
        cli.timezone.as_deref().or(config.timezone.as_deref()),
        cli.utc,
    )?;
    info!("Using timezone: {}", tz_config.display_name());

    let now = resolve_now(&tz_config, args.as_of.as_deref())?;
    let window = ReportingWindow::compute(&now);
    debug!("Reporting window: {:?}", window);

    if args.dry_run {
        info!("Dry run: rows are kept in memory");
        return run_report(config, args, &window, MemorySpreadsheet::new()).await;
    }

    let sheets = GoogleSheets::connect(
        config.require_credentials_path()?,
        config.require_spreadsheet_key()?,
    )
    .await?;
    run_report(config, args, &window, sheets).await
}

async fn campaigns_command(config: &Config, args: &CampaignsArgs) -> Result<()> {
    let listings = Runner::new(config).list_campaigns().await?;
    println!("{}", get_formatter(args.json).format_campaigns(&listings));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("adstat=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if !is_terminal::is_terminal(std::io::stdout()) {
        colored::control::set_override(false);
    }

    let config = load_config(&cli)?;
    info!(
        "Loaded {} accounts with {} campaigns",
        config.accounts.len(),
        config.campaign_count()
    );

    match &cli.command {
        None => run_command(&cli, &config, &RunArgs::default()).await,
        Some(Command::Run(args)) => run_command(&cli, &config, args).await,
        Some(Command::Campaigns(args)) => campaigns_command(&config, args).await,
    }
}
