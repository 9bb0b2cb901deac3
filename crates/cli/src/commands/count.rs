use upsalg_core::config::{AppConfig, LoadOptions};
use upsalg_db::repositories::{ProductRepository, SqlProductRepository};
use upsalg_db::{connect_with_settings, migrations};

use crate::commands::CommandResult;

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "count",
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
                "count",
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
        repository.count().await.map_err(|error| ("persistence", error.to_string(), 4u8))
    });

    match result {
        Ok(count) => CommandResult::document(format!("{{\"count\":{count}}}")),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("count", error_class, message, exit_code)
        }
    }
}
