use anyhow::Result;
use bytes::Bytes;

use crate::storage::memory::memory_directory_store::MemoryDirectoryStore;
use crate::storage::s3::s3_directory_store::S3DirectoryStore;
use crate::traits::directory_store::{DirectoryStore, KeyPage};

pub enum DirectoryStoreImpl {
    S3(S3DirectoryStore),
    Memory(MemoryDirectoryStore),
}

impl DirectoryStore for DirectoryStoreImpl {
    async fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        match self {
            DirectoryStoreImpl::S3(s) => s.put(key, body).await,
            DirectoryStoreImpl::Memory(m) => m.put(key, body).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        match self {
            DirectoryStoreImpl::S3(s) => s.get(key).await,
            DirectoryStoreImpl::Memory(m) => m.get(key).await,
        }
    }

    async fn list_page(&self, prefix: &str, continuation: Option<&str>) -> Result<KeyPage> {
        match self {
            DirectoryStoreImpl::S3(s) => s.list_page(prefix, continuation).await,
            DirectoryStoreImpl::Memory(m) => m.list_page(prefix, continuation).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self {
            DirectoryStoreImpl::S3(s) => s.delete(key).await,
            DirectoryStoreImpl::Memory(m) => m.delete(key).await,
        }
    }
}
