use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::common::cluster::NodeAddress;
use crate::common::utils::now_millis;
use crate::discovery::codec;
use crate::traits::directory_store::DirectoryStore;

/// Write side of the discovery directory. Owns this node's announcement
/// object: writes it on startup, rewrites it on a timer and removes it on
/// shutdown.
pub struct Publisher<S> {
    store: Arc<S>,
    object_key: String,
    cluster_id: String,
    own_address: NodeAddress,
    refresh_interval: Option<Duration>,
    refresh_task: Option<JoinHandle<()>>,
}

impl<S: DirectoryStore + Send + Sync + 'static> Publisher<S> {
    pub fn new(
        store: Arc<S>,
        file_prefix: &str,
        cluster_id: &str,
        own_address: NodeAddress,
        refresh_interval: Option<Duration>,
    ) -> Self {
        Self {
            store,
            object_key: format!("{file_prefix}{cluster_id}"),
            cluster_id: cluster_id.to_string(),
            own_address,
            refresh_interval,
            refresh_task: None,
        }
    }

    /// Publishes the first announcement immediately, then keeps it fresh
    /// from a background task when a refresh interval is configured.
    pub async fn start(&mut self) {
        publish_announcement(
            self.store.as_ref(),
            &self.object_key,
            &self.cluster_id,
            &self.own_address,
        )
        .await;

        let Some(interval) = self.refresh_interval else {
            return;
        };
        let store = Arc::clone(&self.store);
        let object_key = self.object_key.clone();
        let cluster_id = self.cluster_id.clone();
        let own_address = self.own_address.clone();
        self.refresh_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately and the initial publish
            // already happened
            ticker.tick().await;
            loop {
                ticker.tick().await;
                publish_announcement(store.as_ref(), &object_key, &cluster_id, &own_address).await;
            }
        }));
    }

    /// Stops the refresh task before deleting the own announcement, so a
    /// late tick cannot resurrect the deleted object. Safe to call more than
    /// once.
    pub async fn shutdown(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
        if let Err(e) = self.store.delete(&self.object_key).await {
            log::error!(
                "not able to delete own announcement '{}': {e:?}",
                self.object_key
            );
        }
    }
}

impl<S> Drop for Publisher<S> {
    // a publisher dropped without shutdown must not leave its refresh task
    // republishing forever
    fn drop(&mut self) {
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }
}

/// One publish cycle: encode the announcement with the current wall clock
/// and overwrite the own object. Failures are absorbed, a missed refresh
/// only risks the entry expiring before the next successful cycle.
pub async fn publish_announcement<S: DirectoryStore>(
    store: &S,
    object_key: &str,
    cluster_id: &str,
    own_address: &NodeAddress,
) {
    let payload = codec::encode(cluster_id, own_address, now_millis());
    match store.put(object_key, payload.as_bytes()).await {
        Ok(()) => log::debug!("node announcement '{object_key}' updated"),
        Err(e) => log::warn!("not able to save node announcement '{object_key}': {e:?}"),
    }
}
