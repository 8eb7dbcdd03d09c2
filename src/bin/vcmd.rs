// Copyright (c) 2025 - Cowboy AI, Inc.
//! vcmd - vSphere capacity manager data
//!
//! Generates failure domains, capacity data and IBM Cloud subnets for the
//! capacity manager.
//!
//! Run with: cargo run --bin vcmd -- generate --ipv6-prefix fd65:a1a8:60ad --inventory inventory.json
//!
//! Live IBM Cloud lookups need `--features softlayer` and `--live-cloud`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use vsphere_capacity_data::credentials::{load_cloud_credentials, load_vcenter_credentials};
use vsphere_capacity_data::inventory::{
    CloudInventoryProvider, HostResolver, InventorySnapshot, StaticResolver, SystemResolver,
};
use vsphere_capacity_data::{write_artifact, CorrelationOrchestrator, GenerateConfig};

#[derive(Parser)]
#[command(name = "vcmd")]
#[command(version)]
#[command(about = "Manages data integration between vSphere and IBM Cloud", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Failure Domains, Capacity data and IBM Cloud subnets
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// vCenter JSON auth file
    #[arg(short = 'v', long = "vcenter", env = "VCMD_VCENTER_AUTH", default_value = "vcenter.json")]
    vcenter: PathBuf,

    /// IBM Cloud JSON auth file
    #[arg(short = 'i', long = "ibmcloud", env = "VCMD_IBMCLOUD_AUTH", default_value = "ibmcloud.json")]
    ibmcloud: PathBuf,

    /// Output file
    #[arg(short = 'o', long, env = "VCMD_OUTPUT", default_value = "output.json")]
    output: PathBuf,

    /// Leading IPv6 groups, e.g. fd65:a1a8:60ad
    #[arg(long, env = "VCMD_IPV6_PREFIX")]
    ipv6_prefix: String,

    /// Only port groups whose name contains this string
    #[arg(long, env = "VCMD_PORT_GROUP_FILTER", default_value = "")]
    port_group_filter: String,

    /// Inventory snapshot to correlate
    #[arg(long, env = "VCMD_INVENTORY")]
    inventory: PathBuf,

    /// Query IBM Cloud live instead of the snapshot's accounts
    #[cfg(feature = "softlayer")]
    #[arg(long)]
    live_cloud: bool,
}

impl GenerateArgs {
    fn config(&self) -> GenerateConfig {
        GenerateConfig {
            vcenter_credentials: self.vcenter.clone(),
            cloud_credentials: self.ibmcloud.clone(),
            output: self.output.clone(),
            ipv6_prefix: self.ipv6_prefix.clone(),
            port_group_filter: self.port_group_filter.clone(),
            inventory: Some(self.inventory.clone()),
        }
    }
}

async fn generate<C>(
    config: &GenerateConfig,
    snapshot: InventorySnapshot,
    cloud: C,
) -> Result<()>
where
    C: CloudInventoryProvider,
{
    let vcenters = load_vcenter_credentials(&config.vcenter_credentials)
        .context("Failed to load vCenter credentials")?;
    let accounts = load_cloud_credentials(&config.cloud_credentials)
        .context("Failed to load IBM Cloud credentials")?;
    info!(
        "Loaded credentials for {} vCenters and {} accounts",
        vcenters.len(),
        accounts.len()
    );

    let resolver: Box<dyn HostResolver> = if snapshot.hosts.is_empty() {
        Box::new(SystemResolver)
    } else {
        info!("Using snapshot host table instead of DNS");
        Box::new(StaticResolver::new(snapshot.hosts.clone()))
    };

    let mut orchestrator =
        CorrelationOrchestrator::new(snapshot, cloud, resolver, config.settings());
    let env = orchestrator
        .run(&vcenters, &accounts)
        .await
        .context("Correlation failed")?;

    write_artifact(&env, &config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let config = args.config();
            let inventory = args.inventory.clone();
            let snapshot = InventorySnapshot::load(&inventory)
                .with_context(|| format!("Failed to load inventory {}", inventory.display()))?;

            #[cfg(feature = "softlayer")]
            if args.live_cloud {
                use vsphere_capacity_data::inventory::{SoftLayerClient, SoftLayerConfig};

                let cloud = SoftLayerClient::new(SoftLayerConfig::default())
                    .context("Failed to create SoftLayer client")?;
                return generate(&config, snapshot, cloud).await;
            }

            generate(&config, snapshot.clone(), snapshot).await
        }
    }
}
