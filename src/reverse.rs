use std::net::IpAddr;
use std::time::Duration;

use tokio::time::timeout;

use crate::error::ResolveError;
use crate::upstream::UpstreamResolver;

fn ip_from_bytes(bytes: &[u8]) -> Option<IpAddr> {
    match bytes.len() {
        4 => <[u8; 4]>::try_from(bytes).ok().map(IpAddr::from),
        16 => <[u8; 16]>::try_from(bytes).ok().map(IpAddr::from),
        _ => None,
    }
}

/// Finds the host name for a raw 4 or 16 byte address.
pub async fn host_by_addr<U: UpstreamResolver + ?Sized>(
    upstream: &U,
    bytes: &[u8],
    query_timeout: Duration,
) -> Result<String, ResolveError> {
    let Some(ip) = ip_from_bytes(bytes) else {
        log::debug!("Not an address: {bytes:?}");
        return Err(ResolveError::unresolvable(format!("{bytes:?}")));
    };

    log::debug!("Reverse lookup of {ip}");

    let names = match timeout(query_timeout, upstream.reverse_lookup(ip)).await {
        Ok(Ok(names)) => names,
        Ok(Err(e)) => {
            log::debug!("Reverse lookup of {ip} failed: {e}");
            Vec::new()
        }
        Err(_) => {
            log::debug!("Reverse lookup of {ip} timed out");
            Vec::new()
        }
    };

    names
        .into_iter()
        .map(|name| name.trim_end_matches('.').to_string())
        .find(|name| !name.is_empty())
        .ok_or_else(|| ResolveError::unresolvable(ip.to_string()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::ResolutionCache;
    use crate::resolver::CachingResolver;
    use crate::test::ScriptedUpstream;

    const TIMEOUT: Duration = Duration::from_millis(200);

    #[tokio::test]
    async fn finds_v4_name() {
        let upstream = ScriptedUpstream::default();
        upstream.set_ptr(IpAddr::from([10, 0, 0, 1]), &["host.example.test."]);

        let name = host_by_addr(&upstream, &[10, 0, 0, 1], TIMEOUT)
            .await
            .unwrap();
        assert_eq!(name, "host.example.test");
    }

    #[tokio::test]
    async fn finds_v6_name() {
        let upstream = ScriptedUpstream::default();
        let ip: IpAddr = "2001:db8::1".parse().unwrap();
        upstream.set_ptr(ip, &["v6.example.test"]);

        let bytes = match ip {
            IpAddr::V6(v6) => v6.octets(),
            IpAddr::V4(_) => unreachable!(),
        };
        let name = host_by_addr(&upstream, &bytes, TIMEOUT).await.unwrap();
        assert_eq!(name, "v6.example.test");
    }

    #[tokio::test]
    async fn missing_ptr_is_unresolvable() {
        let upstream = ScriptedUpstream::default();

        match host_by_addr(&upstream, &[10, 0, 0, 9], TIMEOUT).await {
            Err(ResolveError::UnresolvableHost { name }) => assert_eq!(name, "10.0.0.9"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn bad_length_is_unresolvable() {
        let upstream = ScriptedUpstream::default();
        match host_by_addr(&upstream, &[10, 0, 0], TIMEOUT).await {
            Err(ResolveError::UnresolvableHost { name }) => assert_eq!(name, "[10, 0, 0]"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn reverse_results_are_not_cached() {
        let upstream = Arc::new(ScriptedUpstream::default());
        upstream.set_ptr(IpAddr::from([10, 0, 0, 1]), &["host.example.test"]);
        let resolver = CachingResolver::new(upstream.clone(), ResolutionCache::new(), TIMEOUT);

        resolver.host_by_addr(&[10, 0, 0, 1]).await.unwrap();
        assert!(resolver.cache().is_empty());

        upstream.set_offline(true);
        assert!(matches!(
            resolver.host_by_addr(&[10, 0, 0, 1]).await,
            Err(ResolveError::UnresolvableHost { .. })
        ));
    }
}
