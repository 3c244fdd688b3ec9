use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::QueryError;

mod system;

pub use system::SystemResolver;

/// The DNS client the caching layer delegates to.
///
/// Implementations must not cache: every call is expected to reach the network.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Queries A records for exactly `hostname`, in the order the server returned them.
    async fn query_address(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, QueryError>;

    /// PTR lookup for `addr`.
    async fn reverse_lookup(&self, addr: IpAddr) -> Result<Vec<String>, QueryError>;
}

#[async_trait]
impl<U: UpstreamResolver + ?Sized> UpstreamResolver for Arc<U> {
    async fn query_address(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, QueryError> {
        (**self).query_address(hostname).await
    }

    async fn reverse_lookup(&self, addr: IpAddr) -> Result<Vec<String>, QueryError> {
        (**self).reverse_lookup(addr).await
    }
}
