use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env
/// vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("BOPIS_ENV", "development"))?;
    let log_level = or_default("BOPIS_LOG_LEVEL", "info");

    let oms_base_url = or_default("BOPIS_OMS_BASE_URL", "https://oms.hotwax.io/api");
    let maarg_base_url = or_default("BOPIS_MAARG_BASE_URL", "https://maarg.hotwax.io/rest/s1");
    let admin_graphql_url = or_default(
        "BOPIS_ADMIN_GRAPHQL_URL",
        "https://admin.shopify.com/admin/api/2024-10/graphql.json",
    );

    let product_store_id = or_default("BOPIS_PRODUCT_STORE_ID", "STORE");
    let inventory_group_id = or_default("BOPIS_INVENTORY_GROUP_ID", "FAC_GRP");

    let request_timeout_secs = parse_u64("BOPIS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BOPIS_USER_AGENT", "bopis/0.1 (store-availability)");

    Ok(AppConfig {
        env,
        log_level,
        oms_base_url,
        maarg_base_url,
        admin_graphql_url,
        product_store_id,
        inventory_group_id,
        request_timeout_secs,
        user_agent,
    })
}

fn parse_environment(raw: &str) -> Result<Environment, ConfigError> {
    match raw {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BOPIS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
