// src/config.rs
use crate::lint::{BuildPolicies, BuildPolicy};
use crate::{LintError, Optional};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::str::FromStr;
use toml_edit::{DocumentMut, Item, TableLike};

/// When diagnostics get colour escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// Colour only when writing to a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn from_config_value(value: &str) -> Optional<ColorMode> {
        match value {
            "auto" => Optional::new(ColorMode::Auto),
            "always" => Optional::new(ColorMode::Always),
            "never" => Optional::new(ColorMode::Never),
            _ => Optional::empty(),
        }
    }

    pub fn enabled_for(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Auto => is_terminal,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    pub fn enabled_for_stderr(self) -> bool {
        self.enabled_for(io::stderr().is_terminal())
    }
}

/// Lint settings loaded from a TOML file.
///
/// ```
/// use sovran_optional::{BuildPolicy, ColorMode, LintConfig};
///
/// let config: LintConfig = r#"
///     [policies]
///     allow-restricted-headers = true
///
///     [console]
///     color = "never"
/// "#.parse()?;
///
/// assert!(config.policies.is_enabled(BuildPolicy::AllowRestrictedHeaders));
/// assert!(!config.policies.get(BuildPolicy::EmptyPackage).has_value());
/// assert_eq!(config.color, ColorMode::Never);
/// # Ok::<(), sovran_optional::LintError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintConfig {
    pub policies: BuildPolicies,
    pub color: ColorMode,
}

impl LintConfig {
    /// Reads and parses the configuration at `path`.
    ///
    /// # Errors
    ///
    /// - Returns `LintError::Io` if the file cannot be read
    /// - Returns any error [`from_toml_str`](Self::from_toml_str) returns
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading lint configuration");
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Parses a configuration document. Missing tables keep their defaults.
    ///
    /// # Errors
    ///
    /// - Returns `LintError::Parse` for malformed TOML
    /// - Returns `LintError::UnknownPolicy` for an unrecognised policy key
    /// - Returns `LintError::InvalidValue` when a value has the wrong kind
    pub fn from_toml_str(source: &str) -> Result<Self, LintError> {
        let document: DocumentMut = source.parse()?;
        let mut config = LintConfig::default();

        if let Some(policies) = document.get("policies") {
            for (key, item) in table(policies, "policies")?.iter() {
                let policy = BuildPolicy::from_config_key(key)
                    .into_option()
                    .ok_or_else(|| LintError::UnknownPolicy(key.to_string()))?;
                let enabled = item.as_bool().ok_or_else(|| LintError::InvalidValue {
                    key: format!("policies.{}", key),
                    expected: "a boolean",
                })?;
                config.policies.set(policy, enabled);
            }
        }

        if let Some(console) = document.get("console") {
            for (key, item) in table(console, "console")?.iter() {
                match key {
                    "color" => {
                        config.color = Optional::from(item.as_str())
                            .then(|value| ColorMode::from_config_value(value))
                            .into_option()
                            .ok_or_else(|| LintError::InvalidValue {
                                key: String::from("console.color"),
                                expected: "one of \"auto\", \"always\", \"never\"",
                            })?;
                    }
                    other => tracing::warn!(key = other, "ignoring unknown console setting"),
                }
            }
        }

        Ok(config)
    }
}

fn table<'a>(item: &'a Item, key: &str) -> Result<&'a dyn TableLike, LintError> {
    item.as_table_like().ok_or_else(|| LintError::InvalidValue {
        key: key.to_string(),
        expected: "a table",
    })
}

impl FromStr for LintConfig {
    type Err = LintError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Self::from_toml_str(source)
    }
}
