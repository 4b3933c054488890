//! Kubeseed Node - Startup seed resolution binary
//!
//! Resolves the seed addresses for a starting cluster node and prints
//! them comma-separated on stdout for the node's launch script. Exits
//! non-zero when the fallback seed list cannot be resolved.

use clap::Parser;
use kubeseed_core::SeedParams;
use kubeseed_discovery::{DnsResolver, KubernetesDiscovery, SeedResolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kubeseed-node")]
#[command(about = "Resolve cluster seed addresses from the Kubernetes API")]
struct Args {
    /// Service name to query (overrides CASSANDRA_SERVICE)
    #[arg(long)]
    service: Option<String>,

    /// Namespace scope (overrides POD_NAMESPACE)
    #[arg(long)]
    namespace: Option<String>,

    /// Comma-separated fallback seeds (overrides CASSANDRA_SEEDS)
    #[arg(long)]
    seeds: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut params = SeedParams::from_env();
    if let Some(service) = args.service {
        params.service = service;
    }
    if let Some(namespace) = args.namespace {
        params.namespace = namespace;
    }
    if let Some(seeds) = args.seeds {
        params.fallback_seeds = seeds;
    }

    tracing::info!(
        service = %params.service,
        namespace = %params.namespace,
        "Resolving cluster seeds"
    );

    let resolver = SeedResolver::new(KubernetesDiscovery::in_cluster(), DnsResolver);
    match resolver.resolve(params).await {
        Ok(seeds) => {
            tracing::info!(count = seeds.len(), "Resolved cluster seeds");
            let list = seeds
                .iter()
                .map(|seed| seed.to_string())
                .collect::<Vec<_>>()
                .join(",");
            println!("{}", list);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Seed resolution failed");
            std::process::exit(1);
        }
    }
}
