mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use nms_client::HttpClient;
use nms_config::{AppConfig, LoggingConfig};
use nms_core::store::NetworkKind;
use nms_core::{Notifier, TracingNotifier};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "nms-cli")]
#[command(about = "Network configuration CLI for the Magma orchestrator", long_about = None)]
struct Cli {
    /// Path to configuration directory
    #[arg(short, long, default_value = "config", global = true)]
    config_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// LTE and federated LTE networks
    Network {
        #[command(subcommand)]
        action: NetworkAction,
    },

    /// Federation gateway networks
    FegNetwork {
        #[command(subcommand)]
        action: FegNetworkAction,
    },

    /// Access point names
    Apn {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Policy rules
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },

    /// Policy QoS profiles
    QosProfile {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Rating groups
    RatingGroup {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Policy base names
    BaseName {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Gateway pools
    Pool {
        #[command(subcommand)]
        action: PoolAction,
    },

    /// Gateways
    Gateway {
        #[command(subcommand)]
        action: GatewayAction,
    },

    /// Upgrade tiers
    Tier {
        #[command(subcommand)]
        action: EntityAction,
    },

    /// Data plans of a network's EPC
    DataPlan {
        #[command(subcommand)]
        action: DataPlanAction,
    },

    /// Validate configuration and print the effective values
    Validate,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Lte,
    FegLte,
}

impl From<KindArg> for NetworkKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Lte => NetworkKind::Lte,
            KindArg::FegLte => NetworkKind::FegLte,
        }
    }
}

#[derive(Subcommand)]
pub enum NetworkAction {
    /// Print a network
    Show {
        network_id: String,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },

    /// Apply a YAML network update. Canonical state is printed when the
    /// update targets NETWORK_ID itself.
    Update {
        network_id: String,
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },
}

#[derive(Subcommand)]
pub enum FegNetworkAction {
    Show {
        network_id: String,
    },
    Update {
        network_id: String,
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum EntityAction {
    /// List the collection
    List { network_id: String },

    /// Create or replace an entity from a YAML file
    Set {
        network_id: String,
        #[arg(short, long)]
        file: PathBuf,
    },

    Delete { network_id: String, key: String },
}

#[derive(Subcommand)]
pub enum PolicyAction {
    List {
        network_id: String,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },
    Set {
        network_id: String,
        #[arg(short, long)]
        file: PathBuf,
        /// Apply the rule to every subscriber of the network
        #[arg(long)]
        network_wide: bool,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },
    Delete {
        network_id: String,
        rule_id: String,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },
}

#[derive(Subcommand)]
pub enum PoolAction {
    List {
        network_id: String,
    },

    /// Write a pool and its gateway records from a YAML file
    Update {
        #[arg(short, long)]
        file: PathBuf,
    },

    Delete {
        network_id: String,
        pool_id: String,
    },
}

#[derive(Subcommand)]
pub enum GatewayAction {
    /// Healthy/unhealthy status of every gateway
    Health { network_id: String },

    #[command(flatten)]
    Manage(EntityAction),
}

#[derive(Subcommand)]
pub enum DataPlanAction {
    List {
        network_id: String,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },

    /// Create or update a plan. An empty value means unlimited, an omitted
    /// one keeps the current limit.
    Set {
        network_id: String,
        name: String,
        /// Download limit in Mbps
        #[arg(long)]
        download: Option<String>,
        /// Upload limit in Mbps
        #[arg(long)]
        upload: Option<String>,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },

    Delete {
        network_id: String,
        name: String,
        #[arg(short, long, value_enum, default_value = "lte")]
        kind: KindArg,
    },
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let level = match logging.level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let app_config = AppConfig::load(&cli.config_dir)?;
    init_tracing(&app_config.logging)?;

    if let Commands::Validate = cli.command {
        info!("Validating configuration in: {}", cli.config_dir);
        HttpClient::from_config(&app_config.api)?;
        println!("✓ Configuration is valid\n");
        print!("{}", serde_yaml::to_string(&app_config)?);
        return Ok(());
    }

    let api = Arc::new(HttpClient::from_config(&app_config.api)?);
    info!("Using orchestrator at {}", api.base_url());

    let result = match cli.command {
        Commands::Network { action } => commands::network(api, action).await,
        Commands::FegNetwork { action } => commands::feg_network(api, action).await,
        Commands::Apn { action } => commands::entity::<nms_core::api::Apns>(api, action).await,
        Commands::Policy { action } => commands::policy(api, action).await,
        Commands::QosProfile { action } => {
            commands::entity::<nms_core::api::QosProfiles>(api, action).await
        }
        Commands::RatingGroup { action } => {
            commands::entity::<nms_core::api::RatingGroups>(api, action).await
        }
        Commands::BaseName { action } => {
            commands::entity::<nms_core::api::BaseNames>(api, action).await
        }
        Commands::Pool { action } => commands::pool(api, action).await,
        Commands::Gateway { action } => commands::gateway(api, action).await,
        Commands::Tier { action } => commands::entity::<nms_core::api::Tiers>(api, action).await,
        Commands::DataPlan { action } => commands::data_plan(api, action).await,
        Commands::Validate => Ok(()),
    };

    if let Err(e) = &result {
        match e.downcast_ref::<nms_core::Error>() {
            Some(err) => TracingNotifier.notify_error("Request failed", err).await?,
            None => error!("{:#}", e),
        }
    }

    result
}
