use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use wierd_cache_dns::{NameService, ProviderRegistry, Settings};

#[derive(Parser)]
struct Cli {
    /// Name service flag, in the form <type>,<provider>. Read from NAMESERVICE_PROVIDER when
    /// absent, e.g. NAMESERVICE_PROVIDER=dns,WierdCacheDNS
    #[clap(long)]
    provider: Option<String>,

    /// YAML settings file. Falls back to WIERD_CACHE_DNS_CONFIG, then defaults.
    #[clap(long)]
    config: Option<PathBuf>,

    /// How many times to resolve every name
    #[clap(long, default_value_t = 1)]
    rounds: usize,

    /// Seconds to wait between rounds
    #[clap(long, default_value_t = 5)]
    interval: u64,

    /// Address to look up in reverse
    #[clap(long)]
    reverse: Option<IpAddr>,

    names: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::from_env()?,
    };

    let registry = ProviderRegistry::with_settings(settings);
    let service = match &cli.provider {
        Some(flag) => registry.activate(flag),
        None => registry.activate_from_env(),
    }
    .context("Creating name service")?;

    for round in 0..cli.rounds {
        if round > 0 {
            tokio::time::sleep(Duration::from_secs(cli.interval)).await;
        }

        for name in &cli.names {
            match service.lookup_all_host_addr(name).await {
                Ok(addrs) => {
                    for addr in addrs.iter() {
                        println!("{addr}");
                    }
                }
                Err(e) => log::error!("{e}"),
            }
        }
    }

    if let Some(ip) = cli.reverse {
        let bytes = match ip {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        };

        match service.host_by_addr(&bytes).await {
            Ok(name) => println!("{ip} {name}"),
            Err(e) => log::error!("{e}"),
        }
    }

    Ok(())
}
