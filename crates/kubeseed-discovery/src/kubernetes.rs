//! Control-plane endpoint discovery

use kubeseed_core::{ApiServerConfig, EndpointSet, Result, SeedError, Subset};
use serde::Deserialize;
use std::time::Duration;

/// How the resolver asks the control plane for a service's endpoints
pub trait EndpointDiscovery: Send + Sync {
    /// Fetch the endpoint subsets registered for a service
    fn endpoints(
        &self,
        namespace: &str,
        service: &str,
    ) -> impl std::future::Future<Output = Result<EndpointSet>> + Send;
}

/// Endpoint discovery against the in-cluster Kubernetes API
pub struct KubernetesDiscovery {
    config: ApiServerConfig,
}

impl KubernetesDiscovery {
    pub fn new(config: ApiServerConfig) -> Self {
        Self { config }
    }

    /// Discovery against the API server the pod environment points at
    pub fn in_cluster() -> Self {
        Self::new(ApiServerConfig::from_env())
    }

    /// Build an authenticated client from the service-account mount.
    ///
    /// Credentials are read per query so a missing mount surfaces as a
    /// recoverable query error rather than a construction failure.
    fn client(&self) -> Result<(reqwest::Client, String)> {
        let token = std::fs::read_to_string(&self.config.token_path).map_err(|e| {
            SeedError::Credentials(format!("{}: {}", self.config.token_path.display(), e))
        })?;
        let ca = std::fs::read(&self.config.ca_path).map_err(|e| {
            SeedError::Credentials(format!("{}: {}", self.config.ca_path.display(), e))
        })?;
        let ca = reqwest::Certificate::from_pem(&ca)
            .map_err(|e| SeedError::Credentials(format!("invalid cluster CA: {}", e)))?;

        let client = reqwest::Client::builder()
            .add_root_certificate(ca)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SeedError::Transport(e.to_string()))?;

        Ok((client, token.trim().to_string()))
    }
}

impl EndpointDiscovery for KubernetesDiscovery {
    async fn endpoints(&self, namespace: &str, service: &str) -> Result<EndpointSet> {
        let (client, token) = self.client()?;
        let url = format!(
            "{}/api/v1/namespaces/{}/endpoints/{}",
            self.config.base_url(),
            namespace,
            service
        );

        tracing::debug!(url = %url, "querying endpoints");

        let response = client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SeedError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(SeedError::Api { status, message });
        }

        let endpoints: Endpoints = response
            .json()
            .await
            .map_err(|e| SeedError::MalformedResponse(e.to_string()))?;

        endpoints.try_into()
    }
}

/// Fixed endpoint set (for embedding and tests)
pub struct StaticEndpoints {
    set: EndpointSet,
}

impl StaticEndpoints {
    pub fn new(set: EndpointSet) -> Self {
        Self { set }
    }
}

impl EndpointDiscovery for StaticEndpoints {
    async fn endpoints(&self, _namespace: &str, _service: &str) -> Result<EndpointSet> {
        Ok(self.set.clone())
    }
}

// The slice of the v1.Endpoints wire object this crate consumes. Absent
// fields and empty arrays are distinct: a service with no ready pods has
// no `subsets` field at all.

#[derive(Debug, Deserialize)]
struct Endpoints {
    subsets: Option<Vec<WireSubset>>,
}

#[derive(Debug, Deserialize)]
struct WireSubset {
    addresses: Option<Vec<WireAddress>>,
}

#[derive(Debug, Deserialize)]
struct WireAddress {
    ip: String,
}

impl TryFrom<Endpoints> for EndpointSet {
    type Error = SeedError;

    fn try_from(raw: Endpoints) -> Result<EndpointSet> {
        let subsets = raw.subsets.ok_or_else(|| {
            SeedError::MalformedResponse("endpoints response has no subsets".to_string())
        })?;

        let mut out = Vec::with_capacity(subsets.len());
        for subset in subsets {
            let addresses = subset.addresses.ok_or_else(|| {
                SeedError::MalformedResponse("endpoint subset has no addresses".to_string())
            })?;
            out.push(Subset::new(
                addresses.into_iter().map(|a| a.ip).collect(),
            ));
        }

        Ok(EndpointSet::new(out))
    }
}
