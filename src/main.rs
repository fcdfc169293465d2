use cabinscraper::core::retry::RetryConfig;
use cabinscraper::{
    DataView, DateQuery, OutputFormat, ScrapeSession, ScraperConfig, ScraperResult, Site,
};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "cabinscraper")]
#[command(about = "Bed and registration counts for Taiwanese trail shelters")]
struct Cli {
    /// jiaming (嘉明湖山屋) or kuaigu (檜谷山莊)
    site: Site,

    /// YYYY-MM-DD for one day or YYYY-MM for the whole month; `/` works too
    date: String,

    /// records (alias: dict, json) or table (alias: pandas)
    #[arg(long, short, default_value = "table")]
    format: OutputFormat,

    /// Request timeout in seconds; 0 disables it
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Retries for 408/429/5xx responses
    #[arg(long, default_value_t = 3)]
    retries: usize,

    /// Print request statistics after the result
    #[arg(long)]
    stats: bool,

    /// Repeat for more log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ScraperResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::builder()
        .filter_level(level)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    // Fail on a malformed date before the token request goes out.
    let (year, month) = cli.date.parse::<DateQuery>()?.year_month();

    let timeout = (cli.timeout > 0).then(|| Duration::from_secs(cli.timeout));
    let config = ScraperConfig::default()
        .with_timeout(timeout)
        .with_retry(RetryConfig {
            max_retries: cli.retries,
            ..RetryConfig::default()
        });

    let session = ScrapeSession::connect_with_config(cli.site.config()?, year, month, &config).await?;

    match session.get_data(&cli.date, cli.format).await? {
        DataView::Table(table) => println!("{}", table),
        records => println!("{}", serde_json::to_string_pretty(&records)?),
    }

    if cli.stats {
        session.stats().print_summary();
    }

    Ok(())
}
