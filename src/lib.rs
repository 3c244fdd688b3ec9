pub mod addr;
pub mod cache;
pub mod error;
pub mod hostname;
pub mod resolver;
mod reverse;
pub mod service;
pub mod settings;
pub mod upstream;


pub use addr::ResolvedAddress;
pub use cache::ResolutionCache;
pub use error::ResolveError;
pub use resolver::CachingResolver;
pub use service::{NameService, NameServiceDescriptor, ProviderRegistry, WierdCacheDnsDescriptor};
pub use settings::Settings;
