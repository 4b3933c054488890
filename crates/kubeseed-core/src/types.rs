//! Core types for kubeseed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// A resolved seed address a starting node may contact
#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seed(pub IpAddr);

impl Seed {
    pub fn new(addr: IpAddr) -> Self {
        Self(addr)
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({})", self.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Endpoint subsets the control plane returned for one service.
///
/// Subsets and the addresses within them keep response order; addresses
/// are raw strings and are not deduplicated.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EndpointSet {
    pub subsets: Vec<Subset>,
}

impl EndpointSet {
    pub fn new(subsets: Vec<Subset>) -> Self {
        Self { subsets }
    }

    /// Total raw addresses across all subsets
    pub fn address_count(&self) -> usize {
        self.subsets.iter().map(|s| s.addresses.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.address_count() == 0
    }

    /// Raw addresses in subset-then-address order
    pub fn iter_addresses(&self) -> impl Iterator<Item = &str> {
        self.subsets
            .iter()
            .flat_map(|subset| subset.addresses.iter().map(String::as_str))
    }
}

/// One grouping of addresses within an endpoints response
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Subset {
    pub addresses: Vec<String>,
}

impl Subset {
    pub fn new(addresses: Vec<String>) -> Self {
        Self { addresses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(addrs: &[&str]) -> Subset {
        Subset::new(addrs.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_seed_display() {
        let seed = Seed::new("10.244.1.7".parse().unwrap());
        assert_eq!(seed.to_string(), "10.244.1.7");
        assert_eq!(format!("{:?}", seed), "Seed(10.244.1.7)");
    }

    #[test]
    fn test_seed_serde() {
        let seed = Seed::new("10.244.1.7".parse().unwrap());
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"10.244.1.7\"");
        assert_eq!(serde_json::from_str::<Seed>(&json).unwrap(), seed);
    }

    #[test]
    fn test_addresses_keep_subset_order() {
        let set = EndpointSet::new(vec![subset(&["10.0.0.1", "10.0.0.2"]), subset(&["10.0.1.1"])]);
        let addrs: Vec<_> = set.iter_addresses().collect();
        assert_eq!(addrs, ["10.0.0.1", "10.0.0.2", "10.0.1.1"]);
        assert_eq!(set.address_count(), 3);
    }

    #[test]
    fn test_empty_subsets_are_empty() {
        assert!(EndpointSet::default().is_empty());
        assert!(EndpointSet::new(vec![subset(&[])]).is_empty());
    }
}
