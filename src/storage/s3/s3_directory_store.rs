use anyhow::Result;
use bytes::Bytes;

use crate::storage::s3::s3_client::S3Client;
use crate::traits::directory_store::{DirectoryStore, KeyPage};

pub struct S3DirectoryStore {
    s3_client: S3Client,
    bucket: String,
}

impl S3DirectoryStore {
    pub fn new(s3_client: S3Client, bucket: String) -> Self {
        Self { s3_client, bucket }
    }
}

impl DirectoryStore for S3DirectoryStore {
    async fn put(&self, key: &str, body: &[u8]) -> Result<()> {
        self.s3_client.put_object(&self.bucket, key, body).await
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        self.s3_client.get_object(&self.bucket, key).await
    }

    async fn list_page(&self, prefix: &str, continuation: Option<&str>) -> Result<KeyPage> {
        self.s3_client
            .list_objects_page(&self.bucket, prefix, continuation)
            .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.s3_client.delete_object(&self.bucket, key).await
    }
}
