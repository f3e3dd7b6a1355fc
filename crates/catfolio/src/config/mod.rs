use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::games::scam_cat::{PromptCatalog, ScamCatRules};
use crate::games::spending_sorter::SpendingSorterRules;
use crate::games::{RulesError, SessionPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub settings: SettingsConfig,
    pub games: GameConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let settings_path = env::var("CATFOLIO_SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("catfolio-settings.json"));

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            settings: SettingsConfig {
                path: settings_path,
            },
            games: GameConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the player's volume preference lives.
#[derive(Debug, Clone)]
pub struct SettingsConfig {
    pub path: PathBuf,
}

/// Randomness and rule overrides for the minigames.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Fixed seed for reproducible sessions; entropy when unset.
    pub seed: Option<u64>,
    pub spending_sorter: SpendingSorterRules,
    pub scam_cat: ScamCatRules,
    /// Idle expiry and size cap for the in-memory session registries.
    pub sessions: SessionPolicy,
}

impl GameConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut spending_sorter = SpendingSorterRules::default();
        if let Some(batch_size) = parse_var("CATFOLIO_SORTER_BATCH")? {
            spending_sorter.batch_size = batch_size;
        }
        if let Some(tolerance) = parse_var("CATFOLIO_SORTER_TOLERANCE")? {
            spending_sorter.tolerance = tolerance;
        }
        if let Some(penalty) = parse_var("CATFOLIO_SORTER_PENALTY")? {
            spending_sorter.misplacement_penalty = penalty;
        }

        let mut scam_cat = ScamCatRules::default();
        if let Some(seconds) = parse_var("CATFOLIO_QUIZ_SECONDS")? {
            scam_cat.seconds_per_prompt = seconds;
        }
        if let Some(lives) = parse_var("CATFOLIO_QUIZ_LIVES")? {
            scam_cat.lives = lives;
        }
        if let Some(hand_size) = parse_var("CATFOLIO_QUIZ_HAND")? {
            scam_cat.hand_size = hand_size;
        }

        let mut sessions = SessionPolicy::default();
        if let Some(seconds) = parse_var::<u32>("CATFOLIO_SESSION_TTL_SECS")? {
            sessions.idle_ttl = chrono::Duration::seconds(i64::from(seconds));
        }
        if let Some(max_sessions) = parse_var("CATFOLIO_MAX_SESSIONS")? {
            sessions.max_sessions = max_sessions;
        }

        spending_sorter.validate().map_err(ConfigError::Rules)?;
        sessions.validate().map_err(ConfigError::Rules)?;
        scam_cat
            .validate(PromptCatalog::standard().len())
            .map_err(ConfigError::Rules)?;

        Ok(Self {
            seed: parse_var("CATFOLIO_SEED")?,
            spending_sorter,
            scam_cat,
            sessions,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidValue { name: &'static str, value: String },
    Rules(RulesError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidValue { name, value } => {
                write!(f, "{name} has an unusable value '{value}'")
            }
            ConfigError::Rules(err) => write!(f, "invalid game rules: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidValue { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Rules(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    const VARS: [&str; 14] = [
        "APP_ENV",
        "APP_HOST",
        "APP_PORT",
        "APP_LOG_LEVEL",
        "CATFOLIO_SETTINGS_PATH",
        "CATFOLIO_SEED",
        "CATFOLIO_SORTER_BATCH",
        "CATFOLIO_SORTER_TOLERANCE",
        "CATFOLIO_SORTER_PENALTY",
        "CATFOLIO_QUIZ_SECONDS",
        "CATFOLIO_QUIZ_LIVES",
        "CATFOLIO_QUIZ_HAND",
        "CATFOLIO_SESSION_TTL_SECS",
        "CATFOLIO_MAX_SESSIONS",
    ];

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.settings.path, PathBuf::from("catfolio-settings.json"));
        assert_eq!(config.games.seed, None);
        assert_eq!(config.games.spending_sorter, SpendingSorterRules::default());
        assert_eq!(config.games.scam_cat, ScamCatRules::default());
        assert_eq!(config.games.sessions, SessionPolicy::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn game_overrides_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CATFOLIO_SEED", "42");
        env::set_var("CATFOLIO_SORTER_TOLERANCE", "10.5");
        env::set_var("CATFOLIO_QUIZ_SECONDS", "20");
        env::set_var("CATFOLIO_QUIZ_HAND", "7");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.games.seed, Some(42));
        assert_eq!(config.games.spending_sorter.tolerance, 10.5);
        assert_eq!(config.games.scam_cat.seconds_per_prompt, 20);
        assert_eq!(config.games.scam_cat.hand_size, 7);
        assert_eq!(config.games.scam_cat.lives, 3);
    }

    #[test]
    fn session_limits_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CATFOLIO_SESSION_TTL_SECS", "90");
        env::set_var("CATFOLIO_MAX_SESSIONS", "16");
        let config = AppConfig::load().expect("config loads");

        assert_eq!(config.games.sessions.idle_ttl, chrono::Duration::seconds(90));
        assert_eq!(config.games.sessions.max_sessions, 16);

        env::set_var("CATFOLIO_MAX_SESSIONS", "0");
        let err = AppConfig::load().unwrap_err();
        reset_env();
        assert!(matches!(
            err,
            ConfigError::Rules(RulesError::Zero {
                field: "max_sessions"
            })
        ));
    }

    #[test]
    fn rejects_unparseable_and_invalid_rules() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("CATFOLIO_QUIZ_LIVES", "lots");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "CATFOLIO_QUIZ_LIVES",
                ..
            }
        ));

        reset_env();
        env::set_var("CATFOLIO_QUIZ_HAND", "16");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Rules(RulesError::HandTooLarge { hand: 16, .. })
        ));
        reset_env();
    }
}
