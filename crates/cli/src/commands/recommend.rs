use upsalg_core::config::{AppConfig, LoadOptions};
use upsalg_core::recommend::Recommender;
use upsalg_db::repositories::SqlProductRepository;
use upsalg_db::{connect_with_settings, migrations};

use crate::commands::CommandResult;

pub fn run(query: &str) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
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
                "recommend",
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
        let outcome = Recommender::new()
            .search(&repository, query)
            .await
            .map_err(|error| ("engine", error.to_string(), 4u8))?;

        match outcome {
            Some(set) => serde_json::to_string_pretty(&set)
                .map(Some)
                .map_err(|error| ("serialization", error.to_string(), 1u8)),
            None => Ok(None),
        }
    });

    match result {
        Ok(Some(document)) => CommandResult::document(document),
        Ok(None) => CommandResult::success("recommend", format!("no products matched `{query}`")),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("recommend", error_class, message, exit_code)
        }
    }
}
