use std::sync::Arc;

use tracing::{info, warn};

use upsalg_catalog::{FeedClient, RotatingUserAgents};
use upsalg_core::config::{AppConfig, LoadOptions};
use upsalg_core::recommend::build_product;
use upsalg_db::repositories::{ProductRepository, SqlProductRepository};
use upsalg_db::{connect_with_settings, migrations};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "sync",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "sync",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
        let agents = Arc::new(RotatingUserAgents::new(config.catalog.user_agents.clone()));
        let client = FeedClient::from_config(&config.catalog, agents)
            .map_err(|error| ("feed_config", error.to_string(), 2u8))?;

        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;

        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let repository = SqlProductRepository::new(pool);
        let mut fetched = 0usize;
        let mut written = 0u64;
        let mut failed_queries = 0usize;

        for query in &config.catalog.queries {
            // One bad query must not abort the run; it is logged and skipped.
            let listings = match client.search(query).await {
                Ok(listings) => listings,
                Err(error) => {
                    warn!(%error, query, "feed query failed, skipping");
                    failed_queries += 1;
                    continue;
                }
            };

            fetched += listings.len();
            let products: Vec<_> = listings
                .into_iter()
                .filter_map(|listing| build_product(listing, config.engine.margin_endings))
                .collect();
            written += repository
                .upsert(&products)
                .await
                .map_err(|error| ("persistence", error.to_string(), 4u8))?;

            info!(query, batch = products.len(), "sync query completed");
        }

        Ok::<(usize, u64, usize), (&'static str, String, u8)>((fetched, written, failed_queries))
    });

    match result {
        Ok((fetched, written, failed_queries)) => CommandResult::success(
            "sync",
            format!(
                "fetched {fetched} listings, wrote {written} products, {failed_queries} failed queries"
            ),
        ),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("sync", error_class, message, exit_code)
        }
    }
}
