//! Registration glue that lets a host pick a name service by a `<type>,<provider>` flag.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use async_trait::async_trait;

use crate::addr::ResolvedAddress;
use crate::error::ResolveError;
use crate::resolver::CachingResolver;
use crate::settings::Settings;
use crate::upstream::UpstreamResolver;

pub const PROVIDER_ENV: &str = "NAMESERVICE_PROVIDER";
pub const PROVIDER_NAME: &str = "WierdCacheDNS";
pub const PROVIDER_TYPE: &str = "dns";

#[async_trait]
pub trait NameService: Send + Sync {
    async fn lookup_all_host_addr(&self, name: &str)
        -> Result<Arc<[ResolvedAddress]>, ResolveError>;

    async fn host_by_addr(&self, addr: &[u8]) -> Result<String, ResolveError>;
}

#[async_trait]
impl<U: UpstreamResolver> NameService for CachingResolver<U> {
    async fn lookup_all_host_addr(
        &self,
        name: &str,
    ) -> Result<Arc<[ResolvedAddress]>, ResolveError> {
        self.resolve(name).await
    }

    async fn host_by_addr(&self, addr: &[u8]) -> Result<String, ResolveError> {
        CachingResolver::host_by_addr(self, addr).await
    }
}

pub trait NameServiceDescriptor: Send + Sync {
    fn provider_name(&self) -> &str;

    fn kind(&self) -> &str;

    fn create_instance(&self) -> Result<Arc<dyn NameService>, ResolveError>;
}

#[derive(Default, Clone, Debug)]
pub struct WierdCacheDnsDescriptor {
    pub settings: Settings,
}

impl NameServiceDescriptor for WierdCacheDnsDescriptor {
    fn provider_name(&self) -> &str {
        PROVIDER_NAME
    }

    fn kind(&self) -> &str {
        PROVIDER_TYPE
    }

    fn create_instance(&self) -> Result<Arc<dyn NameService>, ResolveError> {
        Ok(Arc::new(CachingResolver::from_settings(&self.settings)?))
    }
}

pub struct ProviderRegistry {
    descriptors: Vec<Box<dyn NameServiceDescriptor>>,
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_settings(Default::default())
    }
}

impl ProviderRegistry {
    pub fn empty() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Registry holding the built-in provider, configured with `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        let mut registry = Self::empty();
        registry.register(WierdCacheDnsDescriptor { settings });
        registry
    }

    pub fn register(&mut self, descriptor: impl NameServiceDescriptor + 'static) {
        self.descriptors.push(Box::new(descriptor));
    }

    pub fn find(&self, kind: &str, provider: &str) -> Option<&dyn NameServiceDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.kind() == kind && d.provider_name() == provider)
            .map(|d| d.as_ref())
    }

    /// Instantiates the provider named by a flag such as `dns,WierdCacheDNS`.
    pub fn activate(&self, flag: &str) -> Result<Arc<dyn NameService>, ResolveError> {
        let (kind, provider) = match flag.split_once(',') {
            Some((kind, provider)) if !kind.trim().is_empty() && !provider.trim().is_empty() => {
                (kind.trim(), provider.trim())
            }
            _ => {
                return Err(ResolveError::Configuration(anyhow!(
                    "Malformed name service flag {flag:?}, expect <type>,<provider>"
                )))
            }
        };

        let descriptor = self.find(kind, provider).ok_or_else(|| {
            ResolveError::Configuration(anyhow!("No name service provider {kind},{provider}"))
        })?;

        log::info!("Activating name service {kind},{provider}");
        descriptor.create_instance()
    }

    /// Activates the provider named by `NAMESERVICE_PROVIDER`.
    pub fn activate_from_env(&self) -> Result<Arc<dyn NameService>, ResolveError> {
        let flag = std::env::var(PROVIDER_ENV)
            .with_context(|| format!("Reading {PROVIDER_ENV}"))
            .map_err(ResolveError::Configuration)?;
        self.activate(&flag)
    }
}
