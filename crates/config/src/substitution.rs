use anyhow::Result;
use regex::{Captures, Regex};
use std::env;
use std::sync::OnceLock;
use tracing::{debug, warn};

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{(\w+)(?::-([^}]*))?\}|\$(\w+)").expect("env var pattern is a valid regex")
    })
}

/// Substitute environment variables in the format `${VAR_NAME}`,
/// `${VAR_NAME:-default}` or `$VAR_NAME`.
///
/// Unset variables without a default keep their placeholder; the
/// validator reports them later.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    let mut missing_vars = Vec::new();

    let result = env_var_pattern().replace_all(content, |caps: &Captures| {
        let var_name = caps
            .get(1)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();

        match env::var(var_name) {
            Ok(value) => {
                debug!("Substituting environment variable: {} = \"{}\"", var_name, value);
                value
            }
            Err(_) => match caps.get(2) {
                Some(default) => {
                    debug!("Environment variable '{}' not set, using inline default", var_name);
                    default.as_str().to_string()
                }
                None => {
                    warn!("Environment variable '{}' not set", var_name);
                    missing_vars.push(var_name.to_string());
                    caps[0].to_string()
                }
            },
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (may fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Get environment variable with a default value
pub fn get_env_or_default(var_name: &str, default: &str) -> String {
    match env::var(var_name) {
        Ok(value) => {
            debug!("Using environment variable: {} = \"{}\"", var_name, value);
            value
        }
        Err(_) => {
            warn!(
                "Environment variable '{}' not set, using default: \"{}\"",
                var_name, default
            );
            default.to_string()
        }
    }
}

/// Check if a string contains unresolved environment variable placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    env_var_pattern().is_match(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_braced_and_bare() {
        env::set_var("FRIDGEX_TEST_PORT", "8123");
        env::set_var("FRIDGEX_TEST_HOST", "127.0.0.1");

        let out = substitute_env_vars("port: ${FRIDGEX_TEST_PORT}\nhost: $FRIDGEX_TEST_HOST").unwrap();
        assert_eq!(out, "port: 8123\nhost: 127.0.0.1");
    }

    #[test]
    fn test_missing_var_keeps_placeholder() {
        env::remove_var("FRIDGEX_TEST_UNSET");

        let out = substitute_env_vars("time_zone: ${FRIDGEX_TEST_UNSET}").unwrap();
        assert_eq!(out, "time_zone: ${FRIDGEX_TEST_UNSET}");
        assert!(has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_inline_default() {
        env::remove_var("FRIDGEX_TEST_TZ");

        let out = substitute_env_vars("time_zone: ${FRIDGEX_TEST_TZ:-UTC}").unwrap();
        assert_eq!(out, "time_zone: UTC");
        assert!(!has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_get_env_or_default() {
        env::remove_var("FRIDGEX_TEST_DEFAULTED");
        assert_eq!(get_env_or_default("FRIDGEX_TEST_DEFAULTED", "json"), "json");
    }
}
