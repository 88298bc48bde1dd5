use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a `TRYON_*` value fails to parse. Every variable
/// is optional; absence falls back to the default.
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
/// Returns `ConfigError` if a `TRYON_*` value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`
/// needed.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("TRYON_LOG_LEVEL", "info");
    let sites_path = lookup("TRYON_SITES_PATH").ok().map(PathBuf::from);

    let fetch_timeout_secs = parse_u64("TRYON_FETCH_TIMEOUT_SECS", "30")?;
    let fetch_user_agent = or_default("TRYON_FETCH_USER_AGENT", "tryon/0.1 (product-detection)");

    let detect_initial_delay_ms = parse_u64("TRYON_DETECT_INITIAL_DELAY_MS", "1500")?;
    let detect_retry_delay_ms = parse_u64("TRYON_DETECT_RETRY_DELAY_MS", "4000")?;
    let detect_debounce_ms = parse_u64("TRYON_DETECT_DEBOUNCE_MS", "1200")?;
    let mutation_node_threshold = parse_usize("TRYON_MUTATION_NODE_THRESHOLD", "5")?;

    Ok(AppConfig {
        log_level,
        sites_path,
        fetch_timeout_secs,
        fetch_user_agent,
        detect_initial_delay_ms,
        detect_retry_delay_ms,
        detect_debounce_ms,
        mutation_node_threshold,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_succeeds_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).expect("defaults must suffice");
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.sites_path.is_none());
        assert_eq!(cfg.fetch_timeout_secs, 30);
        assert_eq!(cfg.fetch_user_agent, "tryon/0.1 (product-detection)");
        assert_eq!(cfg.detect_initial_delay_ms, 1500);
        assert_eq!(cfg.detect_retry_delay_ms, 4000);
        assert_eq!(cfg.detect_debounce_ms, 1200);
        assert_eq!(cfg.mutation_node_threshold, 5);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("TRYON_LOG_LEVEL", "debug");
        map.insert("TRYON_SITES_PATH", "/etc/tryon/sites.yaml");
        map.insert("TRYON_FETCH_TIMEOUT_SECS", "10");
        map.insert("TRYON_DETECT_DEBOUNCE_MS", "900");
        map.insert("TRYON_MUTATION_NODE_THRESHOLD", "12");
        let cfg = build_app_config(lookup_from_map(&map)).expect("overrides must parse");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(
            cfg.sites_path.as_deref(),
            Some(std::path::Path::new("/etc/tryon/sites.yaml"))
        );
        assert_eq!(cfg.fetch_timeout_secs, 10);
        assert_eq!(cfg.detect_debounce_ms, 900);
        assert_eq!(cfg.mutation_node_threshold, 12);
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = HashMap::new();
        map.insert("TRYON_FETCH_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRYON_FETCH_TIMEOUT_SECS"),
            "expected InvalidEnvVar(TRYON_FETCH_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_node_threshold() {
        let mut map = HashMap::new();
        map.insert("TRYON_MUTATION_NODE_THRESHOLD", "-3");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRYON_MUTATION_NODE_THRESHOLD"),
            "expected InvalidEnvVar(TRYON_MUTATION_NODE_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_debounce() {
        let mut map = HashMap::new();
        map.insert("TRYON_DETECT_DEBOUNCE_MS", "1.5s");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TRYON_DETECT_DEBOUNCE_MS"),
            "expected InvalidEnvVar(TRYON_DETECT_DEBOUNCE_MS), got: {result:?}"
        );
    }
}
