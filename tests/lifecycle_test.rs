use std::sync::Arc;
use std::time::Duration;

use s3_cluster_discovery::DiscoveryService;
use s3_cluster_discovery::common::cluster::NodeAddress;
use s3_cluster_discovery::common::config::DiscoveryConfig;
use s3_cluster_discovery::discovery::codec::{self, Decoded};
use s3_cluster_discovery::discovery::publisher::Publisher;
use s3_cluster_discovery::storage::memory::memory_directory_store::MemoryDirectoryStore;
use s3_cluster_discovery::traits::directory_store::DirectoryStore;

fn memory_config() -> Arc<DiscoveryConfig> {
    Arc::new(DiscoveryConfig {
        file_prefix: "nodes/".to_string(),
        file_expiration: 5,
        ..DiscoveryConfig::default()
    })
}

#[tokio::test]
async fn init_publishes_the_own_announcement() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut service = DiscoveryService::new(Arc::clone(&store), memory_config());

    service.init("node-1", NodeAddress::new("10.0.0.1", 1883)).await;

    let body = store.get("nodes/node-1").await.unwrap().expect("announcement written");
    match codec::decode(&body, 0, 0) {
        Decoded::Valid(announcement) => {
            assert_eq!(announcement.cluster_id, "node-1");
            assert_eq!(announcement.address, NodeAddress::new("10.0.0.1", 1883));
        }
        other => panic!("own announcement should decode, got {other:?}"),
    }
}

#[tokio::test]
async fn resolve_includes_the_own_announcement() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut service = DiscoveryService::new(store, memory_config());

    let own = NodeAddress::new("10.0.0.1", 1883);
    service.init("node-1", own.clone()).await;

    let peers = service.resolve().await;
    assert!(peers.contains(&own));
}

#[tokio::test]
async fn destroy_removes_the_announcement_and_is_idempotent() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut service = DiscoveryService::new(Arc::clone(&store), memory_config());

    service.init("node-1", NodeAddress::new("10.0.0.1", 1883)).await;
    assert!(store.get("nodes/node-1").await.unwrap().is_some());

    service.destroy().await;
    assert!(store.get("nodes/node-1").await.unwrap().is_none());

    // double destroy only logs
    service.destroy().await;
}

#[tokio::test]
async fn reinit_withdraws_the_previous_announcement() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut service = DiscoveryService::new(Arc::clone(&store), memory_config());

    service.init("node-1", NodeAddress::new("10.0.0.1", 1883)).await;
    service.init("node-2", NodeAddress::new("10.0.0.2", 1883)).await;

    assert!(store.get("nodes/node-1").await.unwrap().is_none());
    assert!(store.get("nodes/node-2").await.unwrap().is_some());
}

#[tokio::test]
async fn dropping_the_publisher_stops_the_refresh_task() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut publisher = Publisher::new(
        Arc::clone(&store),
        "nodes/",
        "node-1",
        NodeAddress::new("10.0.0.1", 1883),
        Some(Duration::from_millis(20)),
    );
    publisher.start().await;
    drop(publisher);

    store.put("nodes/node-1", b"clobbered").await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;

    // no refresh tick overwrote the object after the drop
    let body = store.get("nodes/node-1").await.unwrap().expect("object present");
    assert_eq!(&body[..], b"clobbered");
}

#[tokio::test]
async fn refresh_task_republishes_the_announcement() {
    let store = Arc::new(MemoryDirectoryStore::new());
    let mut publisher = Publisher::new(
        Arc::clone(&store),
        "nodes/",
        "node-1",
        NodeAddress::new("10.0.0.1", 1883),
        Some(Duration::from_millis(20)),
    );
    publisher.start().await;

    // clobber the object, the next refresh tick must restore it
    store.put("nodes/node-1", b"clobbered").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let body = store.get("nodes/node-1").await.unwrap().expect("announcement present");
    assert!(matches!(codec::decode(&body, 0, 0), Decoded::Valid(_)));

    // after shutdown the object stays deleted
    publisher.shutdown().await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(store.get("nodes/node-1").await.unwrap().is_none());
}
