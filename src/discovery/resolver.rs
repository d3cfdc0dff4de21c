use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;

use crate::common::cluster::NodeAddress;
use crate::common::utils::now_millis;
use crate::discovery::codec::{self, Decoded};
use crate::traits::directory_store::DirectoryStore;

/// Read side of the discovery directory: lists every object under the
/// prefix, decodes each one and returns the addresses of all live peers.
/// Expired entries found along the way are deleted regardless of which node
/// owns them, so the directory heals itself.
pub struct Resolver<S> {
    store: Arc<S>,
    file_prefix: String,
    expiration_minutes: i64,
}

impl<S: DirectoryStore + Send + Sync> Resolver<S> {
    pub fn new(store: Arc<S>, file_prefix: &str, expiration_minutes: i64) -> Self {
        Self {
            store,
            file_prefix: file_prefix.to_string(),
            expiration_minutes,
        }
    }

    /// Each call is a fresh full resolution with no dependence on previous
    /// calls. The returned set includes this node's own announcement. Never
    /// fails: a listing failure yields an empty set, per-key failures skip
    /// that key.
    pub async fn resolve(&self) -> HashSet<NodeAddress> {
        let mut peers = HashSet::new();

        let keys = match self.list_all_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                log::error!("not able to list the discovery directory: {e:?}");
                return peers;
            }
        };

        for key in keys {
            let body = match self.store.get(&key).await {
                Ok(Some(body)) => body,
                // deleted between list and get, expected under eventual
                // consistency
                Ok(None) => continue,
                Err(e) => {
                    log::debug!("not able to read object '{key}': {e:?}");
                    continue;
                }
            };

            match codec::decode(&body, self.expiration_minutes, now_millis()) {
                Decoded::Valid(announcement) => {
                    peers.insert(announcement.address);
                }
                Decoded::Stale => {
                    log::debug!("object '{key}' expired, deleting it");
                    if let Err(e) = self.store.delete(&key).await {
                        log::debug!("not able to delete expired object '{key}': {e:?}");
                    }
                }
                Decoded::Malformed => {
                    log::debug!("not able to parse contents of object '{key}'");
                }
            }
        }

        peers
    }

    /// Consumes every listing page before returning, so a single resolve
    /// never acts on a partial key set.
    async fn list_all_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self
                .store
                .list_page(&self.file_prefix, continuation.as_deref())
                .await?;
            keys.extend(page.keys);
            match page.next_token {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(keys)
    }
}
