use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use crate::addr::ResolvedAddress;
use crate::cache::ResolutionCache;
use crate::error::{QueryError, ResolveError};
use crate::hostname;
use crate::reverse;
use crate::settings::Settings;
use crate::upstream::{SystemResolver, UpstreamResolver};

/// Resolves names upstream on every call and falls back to the last good answer when
/// the fresh query fails.
pub struct CachingResolver<U = SystemResolver> {
    upstream: U,
    cache: Arc<ResolutionCache>,
    query_timeout: Duration,
}

impl CachingResolver<SystemResolver> {
    pub fn from_settings(settings: &Settings) -> Result<Self, ResolveError> {
        let upstream = SystemResolver::new(settings)?;
        log::info!("System resolver is instantiated");
        Ok(Self::new(
            upstream,
            ResolutionCache::new(),
            settings.query_timeout,
        ))
    }
}

impl<U: UpstreamResolver> CachingResolver<U> {
    pub fn new(upstream: U, cache: Arc<ResolutionCache>, query_timeout: Duration) -> Self {
        Self {
            upstream,
            cache,
            query_timeout,
        }
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }

    pub async fn resolve(&self, name: &str) -> Result<Arc<[ResolvedAddress]>, ResolveError> {
        hostname::validate(name)?;

        log::debug!("Resolving {name}");

        match self.query(name).await {
            Ok(Some(ip)) => {
                let resolved: Arc<[ResolvedAddress]> =
                    Arc::new([ResolvedAddress::new(name, ip)]);
                self.cache.put(name, resolved.clone());
                log::info!("Resolved {name} to {ip} and cached it");
                return Ok(resolved);
            }

            Ok(None) => log::debug!("No address records for {name}"),

            Err(QueryError::InvalidName(reason)) => {
                return Err(ResolveError::invalid(name, reason));
            }

            Err(QueryError::Transient(e)) => log::debug!("Fresh lookup of {name} failed: {e:#}"),
        }

        match self.cache.get(name) {
            Some(cached) => {
                log::info!("Serving cached answer for {name}");
                Ok(cached)
            }
            None => Err(ResolveError::unresolvable(name)),
        }
    }

    /// Reverse lookup; answers are not cached.
    pub async fn host_by_addr(&self, addr: &[u8]) -> Result<String, ResolveError> {
        reverse::host_by_addr(&self.upstream, addr, self.query_timeout).await
    }

    /// First A record for `name`, if upstream produced one in time.
    async fn query(&self, name: &str) -> Result<Option<IpAddr>, QueryError> {
        let records = timeout(self.query_timeout, self.upstream.query_address(name))
            .await
            .map_err(|_| {
                QueryError::Transient(anyhow::anyhow!(
                    "Timed out after {:?}",
                    self.query_timeout
                ))
            })??;

        Ok(records.first().copied().map(IpAddr::V4))
    }
}
