//! Waiting For Updates Example
//!
//! Shows the explicit wait: a caller-owned deadline, a polling interval and
//! cancellation from another task (Ctrl-C here).
//!
//! Run with: cargo run --example wait_for_update

use std::time::Duration;

use meili_rs::*;
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("meili_rs=debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init()?;

    let host = std::env::var("MEILI_HOST").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let client = Client::new(ClientConfig::new(host))?;

    let update = client
        .settings("movies")
        .update_synonyms(&Synonyms::from([(
            "film".to_string(),
            vec!["movie".to_string()],
        )]))
        .await?;
    println!("Synonyms update enqueued as {}", update.update_id);

    let ctx = WaitContext::with_timeout(Duration::from_secs(30));
    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    match client
        .wait_for_pending_update(&ctx, Duration::from_millis(100), "movies", &update)
        .await
    {
        Ok(UpdateStatus::Processed) => println!("Synonyms applied"),
        Ok(status) => println!("Update ended as {}", status),
        Err(e) if e.is_interrupted() => println!("Stopped waiting: {}", e),
        Err(e) => return Err(e.into()),
    }

    let stats = client.stats().get("movies").await?;
    println!(
        "{}",
        json!({ "documents": stats.number_of_documents, "indexing": stats.is_indexing })
    );

    Ok(())
}
