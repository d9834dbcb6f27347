mod bgg;
mod config;
mod display;
mod pages;
mod render;
mod reports;

use tokio::net::lookup_host;
use tracing_subscriber::EnvFilter;

use crate::bgg::BggClient;
use crate::config::load_config;
use crate::display::ActiveDisplayTarget;

const CONFIG_PATH: &str = "config.json";

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

async fn log_dns_probe(base_url: &str) {
    let host = match reqwest::Url::parse(base_url) {
        Ok(url) => match url.host_str() {
            Some(host) => host.to_string(),
            None => {
                log::warn!("dns_probe_skipped reason=base_url_has_no_host");
                return;
            }
        },
        Err(error) => {
            log::warn!("dns_probe_skipped reason=bad_base_url error={}", error);
            return;
        }
    };

    match lookup_host((host.as_str(), 443)).await {
        Ok(mut addresses) => {
            if let Some(address) = addresses.next() {
                log::info!("dns_probe_ok host={} address={}", host, address);
            } else {
                log::warn!("dns_probe_degraded host={} reason=no_records", host);
            }
        }
        Err(error) => {
            log::warn!(
                "dns_probe_degraded host={} reason=lookup_failed error={}",
                host,
                error
            );
        }
    };
}

#[tokio::main]
async fn main() {
    init_json_logging();

    let config = match load_config(CONFIG_PATH) {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return;
        }
    };

    log::info!("Desk calendar is starting...");
    log_dns_probe(&config.api.base_url).await;

    let client = match BggClient::new(&config.api) {
        Ok(client) => client,
        Err(error) => {
            log::error!("API client initialization failed: {}", error);
            return;
        }
    };

    let mut target = ActiveDisplayTarget::from_config(&config.display);

    if let Err(error) = pages::run_calendar_pass(&config, &client, &mut target).await {
        log::error!("calendar pass aborted: {}", error);
    }
}
