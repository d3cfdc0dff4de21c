use crate::common::config::{DiscoveryConfig, StoreType};
use crate::storage::{
    directory_store_impl::DirectoryStoreImpl,
    memory::memory_directory_store::MemoryDirectoryStore,
    s3::s3_client::S3Client,
    s3::s3_directory_store::S3DirectoryStore,
};
use anyhow::Result;

pub async fn load_directory_store(config: &DiscoveryConfig) -> Result<DirectoryStoreImpl> {
    let directory_store_load = match &config.store_type {
        StoreType::S3 => {
            log::debug!("using S3 directory store");
            let bucket = config
                .s3_bucket_name
                .clone()
                .ok_or_else(|| anyhow::anyhow!("S3 bucket name is not configured"))?;
            let s3_client = S3Client::new(config).await?;
            match s3_client.bucket_exists(&bucket).await {
                Ok(true) => {}
                Ok(false) => {
                    return Err(anyhow::anyhow!("S3 bucket '{bucket}' does not exist"));
                }
                // e.g. missing HeadBucket permission, the bucket may still
                // be usable
                Err(e) => {
                    log::error!("error while checking if S3 bucket '{bucket}' exists: {e:?}")
                }
            }
            DirectoryStoreImpl::S3(S3DirectoryStore::new(s3_client, bucket))
        }
        StoreType::Memory => {
            log::debug!("using in-memory directory store");
            DirectoryStoreImpl::Memory(MemoryDirectoryStore::new())
        }
    };
    Ok(directory_store_load)
}
