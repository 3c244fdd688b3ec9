use std::io;
use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;
use async_trait::async_trait;
use dnsclient::{r#async::DNSClient, UpstreamServer};

use super::UpstreamResolver;
use crate::error::{QueryError, ResolveError};
use crate::settings::Settings;

/// Upstream backed by `dnsclient`, which keeps no cache of its own.
pub struct SystemResolver {
    client: DNSClient,
}

impl SystemResolver {
    pub fn new(settings: &Settings) -> Result<Self, ResolveError> {
        let mut client = if settings.servers.is_empty() {
            log::debug!("Use system resolvers");
            DNSClient::new_with_system_resolvers()
                .context("Reading system resolver configuration")
                .map_err(ResolveError::Configuration)?
        } else {
            log::debug!("Use upstream servers {:?}", settings.servers);
            DNSClient::new(
                settings
                    .servers
                    .iter()
                    .map(|&addr| UpstreamServer { addr })
                    .collect(),
            )
        };

        // dnsclient tries servers one after another, each with its own timeout.
        let per_server = settings.query_timeout / settings.servers.len().max(1) as u32;
        client.set_timeout(per_server);

        Ok(Self { client })
    }
}

/// dnsclient reports unreachable servers and undecodable answers as `InvalidInput` too, so
/// no client error is taken as a bad name. Names are checked before they get here.
fn query_error(e: io::Error) -> QueryError {
    QueryError::Transient(e.into())
}

#[async_trait]
impl UpstreamResolver for SystemResolver {
    async fn query_address(&self, hostname: &str) -> Result<Vec<Ipv4Addr>, QueryError> {
        self.client.query_a(hostname).await.map_err(query_error)
    }

    async fn reverse_lookup(&self, addr: IpAddr) -> Result<Vec<String>, QueryError> {
        self.client.query_ptr(&addr).await.map_err(query_error)
    }
}
