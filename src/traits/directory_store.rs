use anyhow::Result;
use bytes::Bytes;

/// One page of keys from a directory listing. `next_token` is `Some` while
/// the backing store has more pages for the same prefix.
#[derive(Debug, Clone, Default)]
pub struct KeyPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// Capability the discovery core needs from the shared object store. The
/// bucket/container is fixed when the store is constructed; keys are
/// addressed relative to it.
#[trait_variant::make(DirectoryStore: Send)]
pub trait UnsendDirectoryStore {
    /// Idempotent overwrite of one object.
    async fn put(&self, key: &str, body: &[u8]) -> Result<()>;

    /// Reads one object. `Ok(None)` means the key does not exist at call
    /// time, which is a benign race with a concurrent delete.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Lists one page of keys under `prefix`, continuing from a previous
    /// page's `next_token`.
    async fn list_page(&self, prefix: &str, continuation: Option<&str>) -> Result<KeyPage>;

    async fn delete(&self, key: &str) -> Result<()>;
}
