use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;
use bytes::Bytes;

use crate::traits::directory_store::{DirectoryStore, KeyPage};

const DEFAULT_PAGE_SIZE: usize = 1000;

/// In-process directory store. Used as a local/dev backend and to drive the
/// integration tests without an object store. Listing is paginated the same
/// way the S3 backend paginates, with the key of the last returned object as
/// the continuation token.
pub struct MemoryDirectoryStore {
    objects: Mutex<BTreeMap<String, Bytes>>,
    page_size: usize,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            objects: Mutex::new(BTreeMap::new()),
            page_size: page_size.max(1),
        }
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Bytes>>> {
        self.objects
            .lock()
            .map_err(|_| anyhow::anyhow!("directory store mutex poisoned"))
    }
}

impl Default for MemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryStore for MemoryDirectoryStore {
    async fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        self.locked()?
            .insert(key.to_string(), Bytes::copy_from_slice(body));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.locked()?.get(key).cloned())
    }

    async fn list_page(&self, prefix: &str, continuation: Option<&str>) -> Result<KeyPage> {
        let objects = self.locked()?;
        let matching: Vec<&String> = objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .collect();

        let start = match continuation {
            Some(token) => matching
                .iter()
                .position(|key| key.as_str() > token)
                .unwrap_or(matching.len()),
            None => 0,
        };
        let keys: Vec<String> = matching[start..]
            .iter()
            .take(self.page_size)
            .map(|key| key.to_string())
            .collect();
        let next_token = if start + keys.len() < matching.len() {
            keys.last().cloned()
        } else {
            None
        };

        Ok(KeyPage { keys, next_token })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.locked()?.remove(key);
        Ok(())
    }
}
