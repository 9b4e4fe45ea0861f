//! Runs the Cassandra backend against a live cluster.
//!
//! Ignored by default. Point `APP__CASSANDRA__KNOWN_NODES` at a cluster
//! (comma separated `host:port`) and run with `cargo test -- --ignored`.
//! Each test works in its own throwaway keyspace and drops it afterwards.

use std::env;

use scylla::SessionBuilder;
use warehouse_inventory_api::{
    config::CassandraConfig,
    models::{InventoryItem, NewWarehouse, Product, Warehouse},
    store::{CassandraStore, InventoryStore},
};

const NODES_VAR: &str = "APP__CASSANDRA__KNOWN_NODES";

/// Settings for a fresh keyspace, or None when no cluster is configured
fn cluster_config(name: &str) -> Option<CassandraConfig> {
    let nodes = match env::var(NODES_VAR) {
        Ok(nodes) if !nodes.trim().is_empty() => nodes,
        _ => {
            eprintln!("{NODES_VAR} is not set; skipping");
            return None;
        }
    };

    Some(CassandraConfig {
        known_nodes: nodes.split(',').map(|n| n.trim().to_string()).collect(),
        keyspace: format!("it_{name}_{}", chrono::Utc::now().timestamp_millis()),
        ..CassandraConfig::default()
    })
}

async fn drop_keyspace(config: &CassandraConfig) {
    let mut builder = SessionBuilder::new();
    for node in &config.known_nodes {
        builder = builder.known_node(node);
    }
    let session = builder.build().await.expect("cleanup session");
    session
        .query_unpaged(format!("DROP KEYSPACE IF EXISTS {}", config.keyspace), &[])
        .await
        .expect("drop keyspace");
}

fn product(id: &str, warehouse_id: &str, category: Option<&str>) -> Product {
    Product {
        id: Some(id.to_string()),
        amount: Some(7),
        description: Some(format!("{id} description")),
        category: category.map(str::to_string),
        warehouse_id: warehouse_id.to_string(),
    }
}

fn sorted(mut items: Vec<InventoryItem>) -> Vec<InventoryItem> {
    items.sort_by(|a, b| a.id.cmp(&b.id));
    items
}

#[tokio::test]
#[ignore = "requires a Cassandra cluster"]
async fn bootstrap_can_run_twice_against_the_same_keyspace() {
    let Some(config) = cluster_config("bootstrap") else {
        return;
    };

    let first = CassandraStore::connect(&config).await.expect("first bootstrap");
    first
        .insert_warehouse(&NewWarehouse {
            id: Some("w1".into()),
            name: Some("North".into()),
            location: Some("Bergen".into()),
        })
        .await
        .unwrap();

    let second = CassandraStore::connect(&config).await.expect("second bootstrap");
    second.ping().await.unwrap();
    assert_eq!(
        second.find_warehouse("w1").await.unwrap(),
        Some(Warehouse::new("w1", Some("North".into()), Some("Bergen".into())))
    );

    drop_keyspace(&config).await;
}

#[tokio::test]
#[ignore = "requires a Cassandra cluster"]
async fn warehouse_rows_round_trip_with_null_columns() {
    let Some(config) = cluster_config("warehouses") else {
        return;
    };
    let store = CassandraStore::connect(&config).await.unwrap();

    store
        .insert_warehouse(&NewWarehouse {
            id: Some("w1".into()),
            name: Some("First".into()),
            location: Some("Oslo".into()),
        })
        .await
        .unwrap();
    // Same key overwrites; the absent location is written as null
    store
        .insert_warehouse(&NewWarehouse {
            id: Some("w1".into()),
            name: Some("Second".into()),
            location: None,
        })
        .await
        .unwrap();

    assert_eq!(
        store.list_warehouses().await.unwrap(),
        vec![Warehouse::new("w1", Some("Second".into()), None)]
    );
    assert!(store.warehouse_exists("w1").await.unwrap());
    assert_eq!(store.find_warehouse("missing").await.unwrap(), None);

    store.delete_warehouse("w1").await.unwrap();
    assert!(!store.warehouse_exists("w1").await.unwrap());
    assert!(store.list_warehouses().await.unwrap().is_empty());

    drop_keyspace(&config).await;
}

#[tokio::test]
#[ignore = "requires a Cassandra cluster"]
async fn products_filter_by_warehouse_and_category() {
    let Some(config) = cluster_config("products") else {
        return;
    };
    let store = CassandraStore::connect(&config).await.unwrap();

    store.insert_product(&product("p", "w1", Some("tools"))).await.unwrap();
    store.insert_product(&product("q", "w1", Some("bolts"))).await.unwrap();
    store.insert_product(&product("r", "w2", Some("tools"))).await.unwrap();
    store
        .insert_product(&Product {
            id: Some("s".into()),
            amount: None,
            description: None,
            category: None,
            warehouse_id: "w1".into(),
        })
        .await
        .unwrap();

    let all: Vec<String> = sorted(store.list_products("w1", None).await.unwrap())
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(all, vec!["p", "q", "s"]);

    let tools = store.list_products("w1", Some("tools")).await.unwrap();
    assert_eq!(
        tools,
        vec![InventoryItem {
            id: "p".into(),
            amount: Some(7),
            description: Some("p description".into()),
            category: Some("tools".into()),
        }]
    );

    let nulls = sorted(store.list_products("w1", None).await.unwrap())
        .pop()
        .expect("row s");
    assert_eq!(
        nulls,
        InventoryItem {
            id: "s".into(),
            amount: None,
            description: None,
            category: None,
        }
    );

    assert!(store.list_products("w3", None).await.unwrap().is_empty());

    drop_keyspace(&config).await;
}

#[tokio::test]
#[ignore = "requires a Cassandra cluster"]
async fn null_and_empty_keys_are_refused_by_the_cluster() {
    let Some(config) = cluster_config("keys") else {
        return;
    };
    let store = CassandraStore::connect(&config).await.unwrap();

    assert!(store.insert_warehouse(&NewWarehouse::default()).await.is_err());
    assert!(store
        .insert_warehouse(&NewWarehouse {
            id: Some(String::new()),
            ..Default::default()
        })
        .await
        .is_err());
    assert!(store.insert_product(&product("", "w1", None)).await.is_err());
    assert!(store.list_warehouses().await.unwrap().is_empty());
    assert!(store.list_products("w1", None).await.unwrap().is_empty());

    drop_keyspace(&config).await;
}
