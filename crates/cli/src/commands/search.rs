use upsalg_core::config::{AppConfig, LoadOptions};
use upsalg_db::repositories::{ProductRepository, SqlProductRepository};
use upsalg_db::{connect_with_settings, migrations};

use crate::commands::CommandResult;

pub fn run(query: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "search",
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
                "search",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let result = runtime.block_on(async {
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
        let products = repository
            .search(query)
            .await
            .map_err(|error| ("persistence", error.to_string(), 4u8))?;

        serde_json::to_string_pretty(&products)
            .map_err(|error| ("serialization", error.to_string(), 1u8))
    });

    match result {
        Ok(document) => CommandResult::document(document),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("search", error_class, message, exit_code)
        }
    }
}
