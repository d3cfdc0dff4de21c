use serde::Deserialize;

use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreType {
    #[default]
    S3,
    Memory,
}

/// How the S3 client obtains its credentials, mirroring the credential
/// strategies supported by the AWS SDK chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthenticationType {
    #[default]
    Default,
    EnvironmentVariables,
    UserCredentialsFile,
    InstanceProfileCredentials,
    AccessKey,
    TemporarySession,
}

#[derive(Debug, Default, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub store_type: StoreType,

    pub s3_bucket_name: Option<String>,
    pub s3_bucket_region: Option<String>,
    pub s3_endpoint: Option<String>,

    /// Key prefix acting as the logical directory inside the bucket.
    #[serde(default)]
    pub file_prefix: String,
    /// Minutes before another node may treat an announcement as expired.
    /// Zero disables expiration.
    #[serde(default)]
    pub file_expiration: i64,
    /// Minutes between refreshes of the own announcement. Zero disables the
    /// refresh task.
    #[serde(default)]
    pub update_interval: i64,

    #[serde(default)]
    pub credentials_type: AuthenticationType,
    pub credentials_access_key_id: Option<String>,
    pub credentials_secret_access_key: Option<String>,
    pub credentials_session_token: Option<String>,

    // daemon-only settings
    pub cluster_id: Option<String>,
    pub node_host: Option<String>,
    pub node_port: Option<u16>,
    #[serde(default = "default_resolve_interval_secs")]
    pub resolve_interval_secs: u64,
}

fn default_resolve_interval_secs() -> u64 {
    30
}

pub fn load_discovery_config(path: Option<&str>) -> Result<DiscoveryConfig> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::with_name(path));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("DISCOVERY").try_parsing(true),
    );

    let mut discovery_config: DiscoveryConfig = builder.build()?.try_deserialize()?;

    if discovery_config.file_expiration < 0 {
        log::error!("value for file expiration must be positive or zero, disabling expiration");
        discovery_config.file_expiration = 0;
    }
    if discovery_config.update_interval < 0 {
        log::error!("value for update interval must be positive or zero, disabling updates");
        discovery_config.update_interval = 0;
    }

    Ok(discovery_config)
}
