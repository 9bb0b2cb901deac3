use secrecy::ExposeSecret;
use upsalg_core::config::{AppConfig, LoadOptions, LogFormat};
use upsalg_core::margin::MarginEndings;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines =
        vec!["effective config (source precedence: override > env > file > default):".to_string()];

    lines.push(render_line("database.url", &config.database.url));
    lines.push(render_line(
        "database.max_connections",
        &config.database.max_connections.to_string(),
    ));
    lines.push(render_line("database.timeout_secs", &config.database.timeout_secs.to_string()));

    lines.push(render_line(
        "catalog.base_url",
        config.catalog.base_url.as_deref().unwrap_or("(unset — sync disabled)"),
    ));
    let api_key = config
        .catalog
        .api_key
        .as_ref()
        .map(|key| redact(key.expose_secret()))
        .unwrap_or_else(|| "(unset)".to_string());
    lines.push(render_line("catalog.api_key", &api_key));
    lines.push(render_line("catalog.timeout_secs", &config.catalog.timeout_secs.to_string()));
    lines.push(render_line("catalog.queries", &config.catalog.queries.join(", ")));
    lines.push(render_line(
        "catalog.user_agents",
        &format!("{} entries", config.catalog.user_agents.len()),
    ));

    let endings = match config.engine.margin_endings {
        MarginEndings::Standard => "standard (98)",
        MarginEndings::Extended => "extended (98, 92)",
    };
    lines.push(render_line("engine.margin_endings", endings));

    lines.push(render_line("logging.level", &config.logging.level));
    let format = match config.logging.format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    };
    lines.push(render_line("logging.format", format));

    lines.join("\n")
}

fn render_line(key: &str, value: &str) -> String {
    format!("  {key} = {value}")
}

fn redact(secret: &str) -> String {
    if secret.len() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", &secret[..4])
    }
}
