//! Runtime configuration read from the environment.
//!
//! | Variable            | Meaning                                      |
//! |---------------------|----------------------------------------------|
//! | `READ_ALOUD_ENGINE` | `espeak`, `say`, `none` or `auto` (default)  |
//! | `READ_ALOUD_WIDTH`  | viewport width in pixels for the carousel    |
//!
//! Without a width, the terminal's `COLUMNS` is converted at
//! [`PIXELS_PER_COLUMN`].

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::errors::ReadAloudError;

/// Environment variable selecting the speech engine.
pub const ENGINE_ENV: &str = "READ_ALOUD_ENGINE";
/// Environment variable overriding the viewport width.
pub const WIDTH_ENV: &str = "READ_ALOUD_WIDTH";
/// Approximate pixel width of one terminal column.
pub const PIXELS_PER_COLUMN: u32 = 8;

/// Which speech engine to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineChoice {
    /// Pick the first engine found on the host.
    #[default]
    Auto,
    ESpeak,
    Say,
    /// Run without speech.
    None,
}

impl FromStr for EngineChoice {
    type Err = ReadAloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "auto" => Ok(Self::Auto),
            "espeak" | "espeak-ng" | "espeakng" => Ok(Self::ESpeak),
            "say" | "macos" => Ok(Self::Say),
            "none" | "off" => Ok(Self::None),
            _ => Err(ReadAloudError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for EngineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::ESpeak => "espeak",
            Self::Say => "say",
            Self::None => "none",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub engine: EngineChoice,
    /// Viewport width in pixels, when known.
    pub width: Option<u32>,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// ## Errors
    ///
    /// Returns an error when `READ_ALOUD_ENGINE` names an unknown engine or
    /// `READ_ALOUD_WIDTH` is not a non-negative integer.
    pub fn from_env() -> Result<Self, ReadAloudError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read the configuration through `lookup` instead of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ReadAloudError> {
        let engine = match lookup(ENGINE_ENV) {
            Some(value) => value.parse()?,
            None => EngineChoice::default(),
        };

        let width = match lookup(WIDTH_ENV) {
            Some(value) => Some(parse_width(&value)?),
            None => lookup("COLUMNS")
                .and_then(|columns| columns.trim().parse::<u32>().ok())
                .map(|columns| columns.saturating_mul(PIXELS_PER_COLUMN)),
        };

        Ok(Self { engine, width })
    }

    pub fn with_engine(mut self, engine: EngineChoice) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }
}

/// Parse a pixel width.
pub fn parse_width(value: &str) -> Result<u32, ReadAloudError> {
    value
        .trim()
        .parse()
        .map_err(|_| ReadAloudError::InvalidWidth(value.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Sets an environment variable for the life of the guard.
    struct ScopedEnv {
        key: String,
        original: Option<String>,
    }

    impl ScopedEnv {
        fn new(key: &str, value: &str) -> Self {
            let original = env::var(key).ok();
            unsafe { env::set_var(key, value) };
            Self {
                key: key.to_string(),
                original,
            }
        }

        fn unset(key: &str) -> Self {
            let original = env::var(key).ok();
            unsafe { env::remove_var(key) };
            Self {
                key: key.to_string(),
                original,
            }
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            match &self.original {
                Some(val) => unsafe { env::set_var(&self.key, val) },
                None => unsafe { env::remove_var(&self.key) },
            }
        }
    }

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_engine_choice_parsing() {
        assert_eq!("espeak".parse::<EngineChoice>().unwrap(), EngineChoice::ESpeak);
        assert_eq!("eSpeak-NG".parse::<EngineChoice>().unwrap(), EngineChoice::ESpeak);
        assert_eq!("SAY".parse::<EngineChoice>().unwrap(), EngineChoice::Say);
        assert_eq!("none".parse::<EngineChoice>().unwrap(), EngineChoice::None);
        assert_eq!(" auto ".parse::<EngineChoice>().unwrap(), EngineChoice::Auto);
        assert!(matches!(
            "festival".parse::<EngineChoice>(),
            Err(ReadAloudError::UnknownEngine(name)) if name == "festival"
        ));
    }

    #[test]
    fn test_engine_choice_display_round_trips() {
        for choice in [
            EngineChoice::Auto,
            EngineChoice::ESpeak,
            EngineChoice::Say,
            EngineChoice::None,
        ] {
            assert_eq!(choice.to_string().parse::<EngineChoice>().unwrap(), choice);
        }
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_width_override_wins_over_columns() {
        let config =
            Config::from_lookup(lookup(&[(WIDTH_ENV, "1024"), ("COLUMNS", "80")])).unwrap();
        assert_eq!(config.width, Some(1024));
    }

    #[test]
    fn test_columns_fallback() {
        let config = Config::from_lookup(lookup(&[("COLUMNS", "100")])).unwrap();
        assert_eq!(config.width, Some(800));

        let config = Config::from_lookup(lookup(&[("COLUMNS", "wide")])).unwrap();
        assert_eq!(config.width, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(WIDTH_ENV, "-3")])),
            Err(ReadAloudError::InvalidWidth(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[(ENGINE_ENV, "robot")])),
            Err(ReadAloudError::UnknownEngine(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_engine(EngineChoice::Say)
            .with_width(640);
        assert_eq!(config.engine, EngineChoice::Say);
        assert_eq!(config.width, Some(640));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_reads_process_environment() {
        let _engine = ScopedEnv::new(ENGINE_ENV, "none");
        let _width = ScopedEnv::new(WIDTH_ENV, "1280");
        let config = Config::from_env().unwrap();
        assert_eq!(config.engine, EngineChoice::None);
        assert_eq!(config.width, Some(1280));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_with_unset_engine_is_auto() {
        let _engine = ScopedEnv::unset(ENGINE_ENV);
        let _width = ScopedEnv::unset(WIDTH_ENV);
        let _columns = ScopedEnv::unset("COLUMNS");
        assert_eq!(Config::from_env().unwrap(), Config::default());
    }
}
