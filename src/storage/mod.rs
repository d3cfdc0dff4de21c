pub mod memory {
    pub mod memory_directory_store;
}
pub mod s3 {
    pub mod s3_client;
    pub mod s3_directory_store;
}
pub mod directory_store_impl;
