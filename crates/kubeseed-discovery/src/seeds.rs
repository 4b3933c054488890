//! Seed resolution for a starting cluster node

use crate::kubernetes::EndpointDiscovery;
use crate::resolve::NameResolver;
use kubeseed_core::{EndpointSet, Result, Seed, SeedError, SeedParams};

/// Resolves the seed addresses a starting node should contact.
///
/// Asks the control plane for the live endpoints of the configured
/// service; on any query failure, degrades to the static fallback list.
/// Generic over the control-plane and name-resolution seams.
pub struct SeedResolver<D, R> {
    discovery: D,
    resolver: R,
}

impl<D, R> SeedResolver<D, R>
where
    D: EndpointDiscovery,
    R: NameResolver,
{
    pub fn new(discovery: D, resolver: R) -> Self {
        Self {
            discovery,
            resolver,
        }
    }

    /// Resolve the seed list for one startup.
    ///
    /// A discovered address that fails resolution is dropped; a fallback
    /// token that fails resolution is a fatal misconfiguration and aborts
    /// with no partial list. An endpoint set with no addresses is an
    /// empty result, not an error.
    pub async fn resolve(&self, params: SeedParams) -> Result<Vec<Seed>> {
        match self
            .discovery
            .endpoints(&params.namespace, &params.service)
            .await
        {
            Ok(set) => Ok(self.resolve_discovered(set).await),
            Err(err) => {
                tracing::error!(
                    service = %params.service,
                    namespace = %params.namespace,
                    error = %err,
                    "endpoints lookup failed, falling back to configured seeds"
                );
                self.resolve_fallback(&params.fallback_seeds).await
            }
        }
    }

    /// Flatten a discovered endpoint set in subset-then-address order,
    /// dropping addresses that fail resolution
    async fn resolve_discovered(&self, set: EndpointSet) -> Vec<Seed> {
        let mut seeds = Vec::with_capacity(set.address_count());
        let mut dropped = 0usize;

        for address in set.iter_addresses() {
            match self.resolver.resolve(address).await {
                Ok(ip) => seeds.push(Seed::new(ip)),
                Err(err) => {
                    dropped += 1;
                    tracing::warn!(
                        address = %address,
                        error = %err,
                        "skipping unresolvable endpoint address"
                    );
                }
            }
        }

        if dropped > 0 {
            tracing::warn!(
                dropped,
                resolved = seeds.len(),
                "endpoint addresses dropped during resolution"
            );
        }

        seeds
    }

    /// Resolve the comma-separated fallback spec. Every token must
    /// resolve; the first failure aborts.
    async fn resolve_fallback(&self, spec: &str) -> Result<Vec<Seed>> {
        let mut seeds = Vec::new();

        for host in spec.split(',') {
            match self.resolver.resolve(host).await {
                Ok(ip) => seeds.push(Seed::new(ip)),
                Err(source) => {
                    tracing::error!(
                        host = %host,
                        error = %source,
                        "cannot resolve configured seed, check CASSANDRA_SEEDS"
                    );
                    return Err(SeedError::UnresolvableSeed {
                        host: host.to_string(),
                        source,
                    });
                }
            }
        }

        Ok(seeds)
    }
}
