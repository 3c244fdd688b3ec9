use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;

/// An address produced by a lookup, tagged with the hostname the caller asked for.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}/{}", host, ip)]
pub struct ResolvedAddress {
    pub host: Arc<str>,
    pub ip: IpAddr,
}

impl ResolvedAddress {
    pub fn new(host: impl Into<Arc<str>>, ip: impl Into<IpAddr>) -> Self {
        Self {
            host: host.into(),
            ip: ip.into(),
        }
    }
}
