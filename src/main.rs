use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tollgate_explorer::config::Config;
use tollgate_explorer::{
    render, search, validate_publisher_key, FilterSpec, NostrRelayClient, ProductType,
    RelayConfig, ReleaseStore, StoreConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Json,
}

#[derive(Parser)]
#[command(
    name = "tollgate-explorer",
    about = "Browse TollGate release announcements published on Nostr"
)]
struct Cli {
    /// Publisher public key (64 hex characters). Defaults to the configured publisher.
    #[arg(long, value_name = "HEX")]
    publisher: Option<String>,

    /// Only show these release channels (repeatable).
    #[arg(long = "channel", value_name = "CHANNEL")]
    channels: Vec<String>,

    /// Show every channel instead of the configured selection.
    #[arg(long, conflicts_with = "channels")]
    all_channels: bool,

    /// Only show these product families (repeatable).
    #[arg(long = "product", value_name = "PRODUCT")]
    products: Vec<ProductType>,

    /// Only show these architectures (repeatable).
    #[arg(long = "arch", value_name = "ARCH")]
    architectures: Vec<String>,

    /// Only show releases whose device id or supported devices contain this (repeatable).
    #[arg(long = "device", value_name = "DEVICE")]
    devices: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Show a single release in detail, including its raw event.
    #[arg(long, value_name = "ID")]
    release: Option<String>,

    /// Read configuration from this file instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write debug logs to /tmp/tollgate-explorer-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn filter_spec(&self, config: &Config) -> FilterSpec {
        let mut spec = config.filters.to_filter_spec();
        if self.all_channels {
            spec.channels.clear();
        } else if !self.channels.is_empty() {
            spec.channels = self.channels.iter().cloned().collect();
        }
        if !self.products.is_empty() {
            spec.products = self.products.iter().copied().collect();
        }
        spec.architectures.extend(self.architectures.iter().cloned());
        spec.devices.extend(self.devices.iter().cloned());
        spec
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/tollgate-explorer-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("tollgate-explorer debug log started");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let publisher = cli
        .publisher
        .as_deref()
        .map(validate_publisher_key)
        .transpose()?
        .map(str::to_string);

    let client = Arc::new(NostrRelayClient::connect(RelayConfig::from(&config.relays)).await?);
    let mut store = ReleaseStore::new(client.clone(), StoreConfig::from(&config));
    match publisher {
        Some(key) => store.set_publisher_key(key),
        None => store.refetch(),
    }
    store.settle_current().await;
    client.disconnect().await;

    if let Some(error) = store.error() {
        eprintln!("{error}");
    }

    if let Some(id) = &cli.release {
        let release = store.find(id)?;
        print!("{}", render::detail(release)?);
        return Ok(());
    }

    let spec = cli.filter_spec(&config);
    let visible = search::apply(store.releases(), &spec);
    match cli.format {
        Format::Plain => print!("{}", render::listing(&visible, store.releases().len(), &spec)),
        Format::Json => println!("{}", render::listing_json(&visible)?),
    }

    Ok(())
}
