//! Process configuration from environment variables
use pipewatch_core::PipewatchError;
use pipewatch_gen::{DatasetOptions, InventoryMode, DEFAULT_RANDOM_SEGMENTS, MAX_RANDOM_SEGMENTS};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Fixed seed for a reproducible dataset; entropy when absent
    pub seed: Option<u64>,
    pub inventory: InventoryMode,
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed: None,
            inventory: InventoryMode::Curated,
            cors_enabled: true,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, PipewatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset and blank values fall back to
    /// defaults; values that fail to parse are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipewatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(host) = get("PIPEWATCH_HOST") {
            config.host = host;
        }
        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|_| PipewatchError::Config(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(seed) = get("PIPEWATCH_SEED") {
            config.seed = Some(seed.parse().map_err(|_| {
                PipewatchError::Config(format!("PIPEWATCH_SEED must be an unsigned integer, got '{}'", seed))
            })?);
        }
        if let Some(mode) = get("PIPEWATCH_INVENTORY") {
            config.inventory = mode.parse()?;
        }
        if let InventoryMode::Random { .. } = config.inventory {
            let count = match get("PIPEWATCH_SEGMENTS") {
                Some(raw) => raw
                    .parse::<usize>()
                    .ok()
                    .filter(|n| (1..=MAX_RANDOM_SEGMENTS).contains(n))
                    .ok_or_else(|| {
                        PipewatchError::Config(format!(
                            "PIPEWATCH_SEGMENTS must be between 1 and {}, got '{}'",
                            MAX_RANDOM_SEGMENTS, raw
                        ))
                    })?,
                None => DEFAULT_RANDOM_SEGMENTS,
            };
            config.inventory = InventoryMode::Random { count };
        }
        if let Some(cors) = get("PIPEWATCH_CORS") {
            config.cors_enabled = parse_bool(&cors)
                .ok_or_else(|| PipewatchError::Config(format!("PIPEWATCH_CORS must be true or false, got '{}'", cors)))?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions {
            inventory: self.inventory,
            ..Default::default()
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, PipewatchError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.seed, None);
        assert_eq!(config.inventory, InventoryMode::Curated);
        assert!(config.cors_enabled);
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("PIPEWATCH_HOST", "127.0.0.1"),
            ("PIPEWATCH_SEED", "42"),
            ("PIPEWATCH_INVENTORY", "random"),
            ("PIPEWATCH_SEGMENTS", "35"),
            ("PIPEWATCH_CORS", "off"),
        ])
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.inventory, InventoryMode::Random { count: 35 });
        assert!(!config.cors_enabled);
    }

    #[test]
    fn test_segments_at_limit() {
        let config = config(&[("PIPEWATCH_INVENTORY", "random"), ("PIPEWATCH_SEGMENTS", "100")]).unwrap();
        assert_eq!(config.inventory, InventoryMode::Random { count: MAX_RANDOM_SEGMENTS });
    }

    #[test]
    fn test_random_defaults_to_twenty() {
        let config = config(&[("PIPEWATCH_INVENTORY", "random")]).unwrap();
        assert_eq!(config.inventory, InventoryMode::Random { count: 20 });
    }

    #[test]
    fn test_segments_ignored_for_curated() {
        let config = config(&[("PIPEWATCH_SEGMENTS", "0")]).unwrap();
        assert_eq!(config.inventory, InventoryMode::Curated);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(config(&[("PORT", "http")]), Err(PipewatchError::Config(_))));
        assert!(matches!(config(&[("PORT", "70000")]), Err(PipewatchError::Config(_))));
        assert!(matches!(config(&[("PIPEWATCH_SEED", "-1")]), Err(PipewatchError::Config(_))));
        assert!(matches!(
            config(&[("PIPEWATCH_INVENTORY", "random"), ("PIPEWATCH_SEGMENTS", "0")]),
            Err(PipewatchError::Config(_))
        ));
        assert!(matches!(
            config(&[("PIPEWATCH_INVENTORY", "random"), ("PIPEWATCH_SEGMENTS", "101")]),
            Err(PipewatchError::Config(_))
        ));
        assert!(matches!(
            config(&[("PIPEWATCH_INVENTORY", "random"), ("PIPEWATCH_SEGMENTS", "18446744073709551615")]),
            Err(PipewatchError::Config(_))
        ));
        assert!(matches!(
            config(&[("PIPEWATCH_INVENTORY", "legacy")]),
            Err(PipewatchError::InvalidInventory(_))
        ));
        assert!(config(&[("PIPEWATCH_CORS", "maybe")]).is_err());
    }
}
