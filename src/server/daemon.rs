use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::common::cluster::NodeAddress;
use crate::common::config::load_discovery_config;
use crate::discovery::service::DiscoveryService;
use crate::server::loader::load_directory_store;

/// Runs discovery as a standalone process: announce this node, periodically
/// resolve and log the membership view, withdraw the announcement on ctrl-c.
pub async fn daemon_start(config_path: Option<&str>) -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    log::info!("starting cluster discovery daemon...");

    let config = Arc::new(load_discovery_config(config_path)?);
    let store = Arc::new(load_directory_store(&config).await?);

    let cluster_id = config
        .cluster_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let node_host = config
        .node_host
        .clone()
        .ok_or_else(|| anyhow::anyhow!("node host is not configured"))?;
    let node_port = config
        .node_port
        .ok_or_else(|| anyhow::anyhow!("node port is not configured"))?;
    let own_address = NodeAddress::new(&node_host, node_port);

    let mut service = DiscoveryService::new(store, Arc::clone(&config));
    service.init(&cluster_id, own_address.clone()).await;
    log::info!("announced node '{}' at {}", cluster_id, own_address);

    let mut ticker =
        tokio::time::interval(Duration::from_secs(config.resolve_interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let peers = service.resolve().await;
                log::info!(
                    "directory currently announces {} node(s): {}",
                    peers.len(),
                    serde_json::to_string(&peers).unwrap_or_default()
                );
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("shutting down, withdrawing own announcement");
                service.destroy().await;
                return Ok(());
            }
        }
    }
}
