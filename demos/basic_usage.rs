//! Basic usage example for the Cloud Files client
//!
//! This example demonstrates:
//! - Authenticating with username + API key
//! - Creating a container
//! - Uploading objects with metadata
//! - Listing objects with paging options
//! - Downloading with progress callbacks
//! - Cleaning up
//!
//! Run with:
//!   CLOUDFILES_USER=... CLOUDFILES_KEY=... cargo run --example basic_usage

use cloudfiles::{CloudFilesClient, Config, ListOptions, ObjectMetadata};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let username = std::env::var("CLOUDFILES_USER")?;
    let api_key = std::env::var("CLOUDFILES_KEY")?;

    let mut config = Config::new(username, api_key);
    if let Ok(endpoint) = std::env::var("CLOUDFILES_AUTH_ENDPOINT") {
        config = config.with_auth_endpoint(endpoint);
    }

    let client = CloudFilesClient::new(config)?;
    client.authenticate().await?;
    println!("authenticated");

    // ==================== Container Operations ====================

    println!("creating container 'demo'...");
    match client.create_container("demo").await {
        Ok(()) => println!("  container created"),
        Err(e) if e.is_conflict() => println!("  container already exists"),
        Err(e) => return Err(e.into()),
    }

    let account = client.account_info().await?;
    println!(
        "account holds {} containers, {} bytes",
        account.container_count, account.bytes_used
    );

    // ==================== Object Operations ====================

    println!("uploading 'greeting.txt'...");
    let etag = client
        .put_object_with_metadata(
            "demo",
            "greeting.txt",
            &b"Hello from the demo!"[..],
            Some(ObjectMetadata::new().with_metadata("Source", "basic-usage")),
        )
        .await?;
    println!("  uploaded, etag = {etag}");

    for i in 1..=5 {
        client
            .put_object("demo", &format!("data/file{i}.txt"), format!("file {i}"))
            .await?;
    }
    println!("uploaded 5 files under data/");

    let names = client
        .list_objects("demo", &ListOptions::new().with_prefix("data/").with_limit(3))
        .await?;
    println!("first 3 objects under data/: {names:?}");

    // Download with a progress callback
    let progress = Arc::new(|p: cloudfiles::TransferProgress| {
        if let Some(pct) = p.percentage() {
            println!("  downloaded {:.0}%", pct);
        }
    });
    let data = client
        .get_object_with_progress("demo", "greeting.txt", Some(progress))
        .await?;
    println!("downloaded {} bytes: {}", data.len(), String::from_utf8_lossy(&data));

    // ==================== Cleanup ====================

    let all = client.list_objects("demo", &ListOptions::new()).await?;
    for name in all {
        client.delete_object("demo", &name).await?;
    }
    client.delete_container("demo").await?;
    println!("cleaned up");

    Ok(())
}
