use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use rates_client::config::{ConfigError, RatesConfig, normalize_host_url};
use rates_client::context::Context;
use rates_client::net::{FetchError, FetchOutcome, ProfileFetcher};
use rates_client::prefs::{Crop, FarmingTool, FileStorage, PreferenceStore, RatesData};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("unknown crop `{0}`")]
    UnknownCrop(String),
    #[error("expected CROP=true|false, got `{0}`")]
    InvalidExport(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no profile data ({reason})")]
    NoProfiles { reason: &'static str },
}

#[derive(Parser, Debug)]
#[command(name = "rates-client", about = "Farming rates preferences and profile refresh")]
struct Cli {
    /// JSON file standing in for browser localStorage.
    #[arg(long, env = "RATES_STORE_PATH", default_value = "rates-storage.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Prefs(PrefsCommand),
    Profiles(ProfilesCommand),
}

#[derive(Args, Debug)]
struct PrefsCommand {
    #[command(subcommand)]
    command: PrefsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PrefsSubcommand {
    Show,
    Reset,
    Set {
        #[arg(long)]
        settings: Option<bool>,
        #[arg(long)]
        community_center: Option<i64>,
        #[arg(long)]
        strength: Option<i64>,
        #[arg(long)]
        pet: Option<String>,
        #[arg(long)]
        clear_pet: bool,
        /// Tool selection as raw JSON.
        #[arg(long)]
        tool: Option<String>,
        /// `CROP=true|false`, using item ids such as `WHEAT` or `INK_SACK:3`.
        #[arg(long = "export")]
        exports: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct ProfilesCommand {
    uuid: String,

    /// Epoch milliseconds of the previous refresh.
    #[arg(long, default_value_t = 0)]
    last_fetched: i64,

    /// Pacing delay in milliseconds; defaults to `PROFILE_FETCH_DELAY_MS`.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Overrides `PUBLIC_HOST_URL`.
    #[arg(long)]
    host_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Prefs(prefs) => run_prefs(&cli.store, prefs),
        Command::Profiles(profiles) => run_profiles(profiles).await,
    }
}

fn run_prefs(path: &Path, prefs: PrefsCommand) -> Result<(), CliError> {
    let storage = FileStorage::new(path);
    tracing::debug!(path = %storage.path().display(), "using preference file");
    let store = PreferenceStore::new(storage);
    let cx = Context::new();
    let rates = store.get(&cx);

    match prefs.command {
        PrefsSubcommand::Show => {}
        PrefsSubcommand::Reset => {
            store.reset(&cx);
            eprintln!("preferences reset");
        }
        PrefsSubcommand::Set { settings, community_center, strength, pet, clear_pet, tool, exports } => {
            let tool: Option<FarmingTool> = tool.map(|raw| serde_json::from_str(&raw)).transpose()?;
            let exports = exports
                .iter()
                .map(String::as_str)
                .map(parse_export)
                .collect::<Result<Vec<_>, _>>()?;

            rates.update(|mut data| {
                if let Some(settings) = settings {
                    data.settings = settings;
                }
                if let Some(cc) = community_center {
                    data.community_center = cc;
                }
                if let Some(strength) = strength {
                    data.strength = strength;
                }
                if clear_pet {
                    data.selected_pet = None;
                } else if let Some(pet) = pet {
                    data.selected_pet = Some(pet);
                }
                if let Some(tool) = tool {
                    data.tool = Some(tool);
                }
                for (crop, exported) in exports {
                    data.exported.set(crop, exported);
                }
                data
            });
        }
    }

    print_rates(&rates.get())
}

fn parse_export(raw: &str) -> Result<(Crop, bool), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidExport(raw.to_string()))?;
    let crop = Crop::from_key(key).ok_or_else(|| CliError::UnknownCrop(key.to_string()))?;
    let exported = value
        .parse::<bool>()
        .map_err(|_| CliError::InvalidExport(raw.to_string()))?;
    Ok((crop, exported))
}

fn print_rates(data: &RatesData) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

async fn run_profiles(cmd: ProfilesCommand) -> Result<(), CliError> {
    let mut config = RatesConfig::from_env()?;
    if let Some(host) = cmd.host_url.as_deref() {
        config.host_url = normalize_host_url(host)?;
    }
    let delay = cmd.delay_ms.map_or(config.fetch_delay, Duration::from_millis);

    let fetcher = ProfileFetcher::from_config(&config)?;
    tracing::info!(uuid = %cmd.uuid, host = %config.host_url, "refreshing profiles");

    match fetcher.fetch_outcome(&cmd.uuid, cmd.last_fetched, delay).await {
        FetchOutcome::Ok(profiles) => {
            println!("{}", serde_json::to_string_pretty(&profiles)?);
            Ok(())
        }
        other => {
            tracing::warn!(reason = other.reason(), detail = ?other, "profile refresh produced no data");
            Err(CliError::NoProfiles { reason: other.reason() })
        }
    }
}
