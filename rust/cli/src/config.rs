use handreel_replay::Speed;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HANDREEL_CONFIG";
pub const SPEED_ENV: &str = "HANDREEL_SPEED";
pub const REALTIME_ENV: &str = "HANDREEL_REALTIME";
pub const MAX_HANDS_ENV: &str = "HANDREEL_MAX_HANDS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default replay speed multiplier.
    pub speed: f64,
    /// Whether `replay` waits between steps by default.
    pub realtime: bool,
    /// Upper bound on hands handled by one `encode` or `sample` run.
    pub max_hands: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub speed: ValueSource,
    pub realtime: ValueSource,
    pub max_hands: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            speed: ValueSource::Default,
            realtime: ValueSource::Default,
            max_hands: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: Speed::Normal.multiplier(),
            realtime: false,
            max_hands: 1_000,
        }
    }
}

impl Config {
    /// Validated speed; `load_with_sources` guarantees this succeeds.
    pub fn replay_speed(&self) -> Speed {
        Speed::try_from(self.speed).unwrap_or_default()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves defaults, then the TOML file named by `HANDREEL_CONFIG`, then
/// environment overrides. Later layers win.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.speed {
            cfg.speed = v;
            sources.speed = ValueSource::File;
        }
        if let Some(v) = f.realtime {
            cfg.realtime = v;
            sources.realtime = ValueSource::File;
        }
        if let Some(v) = f.max_hands {
            cfg.max_hands = v;
            sources.max_hands = ValueSource::File;
        }
    }

    if let Ok(speed) = std::env::var(SPEED_ENV)
        && !speed.is_empty()
    {
        cfg.speed = speed
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid speed: {speed}")))?;
        sources.speed = ValueSource::Env;
    }
    if let Ok(realtime) = std::env::var(REALTIME_ENV)
        && !realtime.is_empty()
    {
        cfg.realtime = parse_bool(&realtime)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid realtime: {realtime}")))?;
        sources.realtime = ValueSource::Env;
    }
    if let Ok(max) = std::env::var(MAX_HANDS_ENV)
        && !max.is_empty()
    {
        cfg.max_hands = max
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid max_hands: {max}")))?;
        sources.max_hands = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    speed: Option<f64>,
    #[serde(default)]
    realtime: Option<bool>,
    #[serde(default)]
    max_hands: Option<usize>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Err(e) = Speed::try_from(cfg.speed) {
        return Err(ConfigError::Invalid(format!("Invalid configuration: {e}")));
    }
    if cfg.max_hands == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_hands must be >0".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
