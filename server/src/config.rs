use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub port: u16,
    pub site_base_url_path: String,
    #[serde(default)]
    pub fs_root_dir: std::path::PathBuf,
}

/// What the landing page aggregates.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StatsConfig {
    #[serde(default = "default_table_names")]
    pub table_names: Vec<String>,
    #[serde(default = "default_top_limit")]
    pub top_limit: u64,
}

fn default_table_names() -> Vec<String> {
    ["team", "morpion", "game"].map(String::from).to_vec()
}

fn default_top_limit() -> u64 {
    3
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            table_names: default_table_names(),
            top_limit: default_top_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server_config: ServerConfig,
    #[serde(default)]
    pub stats_config: StatsConfig,
    pub db_path: String,
}

pub fn validate(cfg: &Config) -> Result<(), String> {
    let stats = &cfg.stats_config;
    if stats.top_limit == 0 {
        return Err("stats_config.top_limit must be positive".to_owned());
    }
    if stats.table_names.is_empty() {
        return Err("stats_config.table_names must not be empty".to_owned());
    }
    for name in stats.table_names.iter() {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("Invalid table name in stats_config: {name:?}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const MINIMAL: &str = r#"
db_path = "sqlite:///tmp/morpion.sqlite?mode=rwc"

[server_config]
port = 8080
site_base_url_path = "/"
"#;

    #[test]
    fn test_defaults() {
        let cfg: Config = toml::from_str(MINIMAL).expect("Failed to parse config");
        assert_eq!(cfg.server_config.port, 8080);
        assert_eq!(cfg.stats_config, StatsConfig::default());
        assert_eq!(cfg.stats_config.table_names, vec!["team", "morpion", "game"]);
        assert_eq!(cfg.stats_config.top_limit, 3);
        assert_eq!(validate(&cfg), Ok(()));
    }

    #[test]
    fn test_stats_config() {
        let text = format!("{MINIMAL}\n[stats_config]\ntable_names = [\"game\", \"logs_entry\"]\ntop_limit = 5\n");
        let cfg: Config = toml::from_str(&text).expect("Failed to parse config");
        assert_eq!(cfg.stats_config.table_names, vec!["game", "logs_entry"]);
        assert_eq!(cfg.stats_config.top_limit, 5);
        assert_eq!(validate(&cfg), Ok(()));
    }

    #[test]
    fn test_validate() {
        let mut cfg: Config = toml::from_str(MINIMAL).expect("Failed to parse config");
        cfg.stats_config.top_limit = 0;
        assert!(validate(&cfg).is_err());
        cfg.stats_config.top_limit = 3;
        cfg.stats_config.table_names = vec![];
        assert!(validate(&cfg).is_err());
        for bad in ["", "team; drop", "team\"", "équipe"] {
            cfg.stats_config.table_names = vec!["team".to_owned(), bad.to_owned()];
            assert!(validate(&cfg).is_err(), "{bad:?}");
        }
    }
}
