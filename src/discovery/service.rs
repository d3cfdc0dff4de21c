use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::common::cluster::NodeAddress;
use crate::common::config::DiscoveryConfig;
use crate::discovery::publisher::Publisher;
use crate::discovery::resolver::Resolver;
use crate::traits::directory_store::DirectoryStore;

/// Public entry point of the discovery subsystem, combining the write and
/// read side behind the init/resolve/destroy lifecycle that the surrounding
/// cluster-membership code drives. None of the lifecycle methods can fail,
/// directory problems degrade discovery instead of crashing the caller.
pub struct DiscoveryService<S> {
    store: Arc<S>,
    config: Arc<DiscoveryConfig>,
    publisher: Option<Publisher<S>>,
    resolver: Resolver<S>,
}

impl<S: DirectoryStore + Send + Sync + 'static> DiscoveryService<S> {
    pub fn new(store: Arc<S>, config: Arc<DiscoveryConfig>) -> Self {
        let resolver = Resolver::new(
            Arc::clone(&store),
            &config.file_prefix,
            config.file_expiration,
        );
        Self {
            store,
            config,
            publisher: None,
            resolver,
        }
    }

    /// Announces this node and starts the periodic refresh when configured.
    /// A repeated init withdraws the previous announcement first, so its
    /// refresh task cannot keep republishing under the old identity.
    pub async fn init(&mut self, cluster_id: &str, own_address: NodeAddress) {
        if let Some(mut previous) = self.publisher.take() {
            previous.shutdown().await;
        }
        let refresh_interval = (self.config.update_interval > 0)
            .then(|| Duration::from_secs(self.config.update_interval as u64 * 60));
        let mut publisher = Publisher::new(
            Arc::clone(&self.store),
            &self.config.file_prefix,
            cluster_id,
            own_address,
            refresh_interval,
        );
        publisher.start().await;
        self.publisher = Some(publisher);
    }

    /// Returns the addresses of all currently announced cluster members,
    /// including this node's own.
    pub async fn resolve(&self) -> HashSet<NodeAddress> {
        self.resolver.resolve().await
    }

    /// Withdraws this node's announcement. A second call is a no-op.
    pub async fn destroy(&mut self) {
        match self.publisher.take() {
            Some(mut publisher) => publisher.shutdown().await,
            None => log::debug!("discovery service destroyed without an active announcement"),
        }
    }
}
