//! Quickstart Example
//!
//! Creates an index, adds a few documents, waits for indexing and searches.
//! Expects a server on http://localhost:7700 (override with MEILI_HOST and
//! MEILI_API_KEY).
//!
//! Run with: cargo run --example quickstart

use meili_rs::*;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Serialize, Deserialize)]
struct Movie {
    id: u32,
    title: String,
    genres: Vec<String>,
}

fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meili_rs=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;
    Ok(())
}

fn config_from_env() -> ClientConfig {
    let host = std::env::var("MEILI_HOST").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let config = ClientConfig::new(host);
    match std::env::var("MEILI_API_KEY") {
        Ok(key) => config.with_api_key(key),
        Err(_) => config,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let client = Client::new(config_from_env())?;

    client.health().get().await?;
    let version = client.version().get().await?;
    println!("Connected to server {}\n", version.pkg_version);

    let created = client
        .indexes()
        .create(&CreateIndexRequest::new("movies").with_primary_key("id"))
        .await;
    match created {
        Ok(index) => println!("Created index {}", index.uid),
        Err(e) => println!("Index not created ({}), reusing it", e),
    }

    let movies = vec![
        Movie {
            id: 1,
            title: "Carol".to_string(),
            genres: vec!["Romance".to_string(), "Drama".to_string()],
        },
        Movie {
            id: 2,
            title: "Wonder Woman".to_string(),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
        },
        Movie {
            id: 3,
            title: "Life of Pi".to_string(),
            genres: vec!["Adventure".to_string(), "Drama".to_string()],
        },
    ];

    let update = client.documents("movies").add_or_replace(&movies).await?;
    println!("Documents enqueued as update {}", update.update_id);

    let status = client
        .default_wait_for_pending_update("movies", &update)
        .await?;
    println!("Update {} finished as {}\n", update.update_id, status);

    let results = client
        .search("movies")
        .search::<Movie>(&SearchRequest::new("drama").with_limit(5))
        .await?;
    println!("Search results for 'drama' ({} hits):", results.nb_hits);
    for (i, movie) in results.hits.iter().enumerate() {
        println!("   {}. {} {:?}", i + 1, movie.title, movie.genres);
    }

    Ok(())
}
