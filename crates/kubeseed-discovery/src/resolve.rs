//! Forward name resolution

use std::io;
use std::net::IpAddr;

/// Forward resolution of one host or IP token.
///
/// Injectable so embedders and tests can substitute the system resolver.
pub trait NameResolver: Send + Sync {
    /// Resolve a token to a single address (first answer wins)
    fn resolve(&self, host: &str) -> impl std::future::Future<Output = io::Result<IpAddr>> + Send;
}

/// System resolver backed by tokio's host lookup
#[derive(Debug, Default)]
pub struct DnsResolver;

impl NameResolver for DnsResolver {
    async fn resolve(&self, host: &str) -> io::Result<IpAddr> {
        // IP literals short-circuit the lookup
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let mut addrs = tokio::net::lookup_host((host, 0u16)).await?;
        addrs.next().map(|addr| addr.ip()).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses for {:?}", host),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ipv4_literal() {
        let ip = DnsResolver.resolve("10.0.0.1").await.unwrap();
        assert_eq!(ip, "10.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_ipv6_literal() {
        let ip = DnsResolver.resolve("::1").await.unwrap();
        assert_eq!(ip, "::1".parse::<IpAddr>().unwrap());
    }
}
