use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::imds::credentials::ImdsCredentialsProvider;
use aws_config::profile::ProfileFileCredentialsProvider;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, SharedCredentialsProvider};
use bytes::Bytes;

use anyhow::Result;

use crate::common::config::{AuthenticationType, DiscoveryConfig};
use crate::traits::directory_store::KeyPage;

pub struct S3Client {
    client: Client,
}

impl S3Client {
    pub async fn new(config: &DiscoveryConfig) -> Result<Self> {
        let region = config
            .s3_bucket_region
            .clone()
            .ok_or_else(|| anyhow::anyhow!("S3 bucket region is not configured"))?;
        log::info!(
            "creating S3 client for region {} with {:?} credentials",
            region,
            config.credentials_type
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version_latest()
            .region(Region::new(region));
        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.endpoint_url(endpoint.clone()).force_path_style(true);
        }
        builder = match config.credentials_type {
            AuthenticationType::Default => {
                let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
                match shared.credentials_provider() {
                    Some(provider) => builder.credentials_provider(provider),
                    None => builder,
                }
            }
            AuthenticationType::EnvironmentVariables => builder.credentials_provider(
                SharedCredentialsProvider::new(EnvironmentVariableCredentialsProvider::new()),
            ),
            AuthenticationType::UserCredentialsFile => builder.credentials_provider(
                SharedCredentialsProvider::new(ProfileFileCredentialsProvider::builder().build()),
            ),
            AuthenticationType::InstanceProfileCredentials => builder.credentials_provider(
                SharedCredentialsProvider::new(ImdsCredentialsProvider::builder().build()),
            ),
            AuthenticationType::AccessKey | AuthenticationType::TemporarySession => {
                let access_key = config
                    .credentials_access_key_id
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("credentials access key id is not configured"))?;
                let secret_key = config
                    .credentials_secret_access_key
                    .clone()
                    .ok_or_else(|| {
                        anyhow::anyhow!("credentials secret access key is not configured")
                    })?;
                let session_token =
                    if config.credentials_type == AuthenticationType::TemporarySession {
                        Some(config.credentials_session_token.clone().ok_or_else(|| {
                            anyhow::anyhow!("credentials session token is not configured")
                        })?)
                    } else {
                        None
                    };
                let credentials =
                    Credentials::new(access_key, secret_key, session_token, None, "static");
                builder.credentials_provider(SharedCredentialsProvider::new(credentials))
            }
        };

        let client = Client::from_conf(builder.build());
        Ok(S3Client { client })
    }

    pub async fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body.to_vec()))
            .send()
            .await?;
        Ok(())
    }

    /// `Ok(None)` when the key no longer exists, so that a delete racing the
    /// read is not reported as an error.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<Option<Bytes>> {
        match self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => {
                let data = output.body.collect().await?.into_bytes();
                Ok(Some(data))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(service_err.into())
                }
            }
        }
    }

    pub async fn list_objects_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation: Option<&str>,
    ) -> Result<KeyPage> {
        let mut request = self.client.list_objects_v2().bucket(bucket).prefix(prefix);
        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }
        let output = request.send().await?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(str::to_string))
            .collect();
        let next_token = if output.is_truncated() == Some(true) {
            output.next_continuation_token().map(str::to_string)
        } else {
            None
        };
        Ok(KeyPage { keys, next_token })
    }

    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }

    /// HeadBucket probe used at startup. Only a definitive NotFound maps to
    /// `Ok(false)`; every other failure is surfaced to the caller.
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(service_err.into())
                }
            }
        }
    }
}
