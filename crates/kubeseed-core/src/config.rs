//! Configuration types for kubeseed

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logical service name to query
pub const SERVICE_ENV: &str = "CASSANDRA_SERVICE";

/// Namespace scope for the query
pub const NAMESPACE_ENV: &str = "POD_NAMESPACE";

/// Comma-separated fallback address list
pub const SEEDS_ENV: &str = "CASSANDRA_SEEDS";

/// Self address, used as the fallback spec when no seeds are configured
pub const SELF_ADDR_ENV: &str = "POD_IP";

/// API server location injected by the kubelet
pub const API_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";
pub const API_PORT_ENV: &str = "KUBERNETES_SERVICE_PORT";

const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Parameters for a single seed resolution.
///
/// Collected once at the call site and passed by value; the resolver
/// itself never reads the process environment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeedParams {
    /// Logical service name to query
    pub service: String,

    /// Namespace scope for the query
    pub namespace: String,

    /// Comma-separated fallback address list
    pub fallback_seeds: String,
}

impl SeedParams {
    /// Collect parameters from the process environment.
    ///
    /// `CASSANDRA_SERVICE` defaults to `cassandra` and `POD_NAMESPACE`
    /// to `default`. An empty `CASSANDRA_SEEDS` is substituted with
    /// `POD_IP`, so an otherwise unconfigured pod falls back to seeding
    /// itself.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Collect parameters through an injectable variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let service = lookup(SERVICE_ENV).unwrap_or_else(|| "cassandra".to_string());
        let namespace = lookup(NAMESPACE_ENV).unwrap_or_else(|| "default".to_string());

        let mut fallback_seeds = lookup(SEEDS_ENV).unwrap_or_default();
        if fallback_seeds.is_empty() {
            fallback_seeds = lookup(SELF_ADDR_ENV).unwrap_or_default();
        }

        tracing::debug!(
            service = %service,
            namespace = %namespace,
            fallback_seeds = %fallback_seeds,
            "collected seed parameters"
        );

        Self {
            service,
            namespace,
            fallback_seeds,
        }
    }
}

impl Default for SeedParams {
    fn default() -> Self {
        Self {
            service: "cassandra".to_string(),
            namespace: "default".to_string(),
            fallback_seeds: String::new(),
        }
    }
}

/// Where the in-cluster control plane lives and how to authenticate to it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiServerConfig {
    /// API server host
    pub host: String,

    /// API server port
    pub port: String,

    /// Service-account bearer token path
    pub token_path: PathBuf,

    /// Cluster CA certificate path
    pub ca_path: PathBuf,
}

impl ApiServerConfig {
    /// In-cluster defaults, with host and port taken from the variables
    /// the kubelet injects into every pod
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config through an injectable variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup(API_HOST_ENV).unwrap_or_else(|| "kubernetes.default.svc".to_string()),
            port: lookup(API_PORT_ENV).unwrap_or_else(|| "443".to_string()),
            ..Self::default()
        }
    }

    /// Base URL for API requests
    pub fn base_url(&self) -> String {
        format!("https://{}:{}", self.host, self.port)
    }
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            host: "kubernetes.default.svc".to_string(),
            port: "443".to_string(),
            token_path: PathBuf::from(SERVICE_ACCOUNT_DIR).join("token"),
            ca_path: PathBuf::from(SERVICE_ACCOUNT_DIR).join("ca.crt"),
        }
    }
}
