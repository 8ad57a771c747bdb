use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use config::{Config, File};
use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::cli::CliArgs;
use skyjourney::app_dirs;
use skyjourney::theme;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SEARCH_DELAY_MS: u64 = 1_500;
const DEFAULT_TITLE: &str = "SkyJourney Travel";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    suggest: SuggestSection,
    search: SearchSection,
    ui: UiSection,
}

/// Suggestion endpoint options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SuggestSection {
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
}

/// Simulated search options prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
    delay_ms: Option<u64>,
}

/// UI related configuration values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
    title: Option<String>,
    theme: Option<String>,
}

/// Where a configuration value came from, for error reporting.
#[derive(Debug, Clone)]
enum SettingSource {
    CliFlag(&'static str),
    Environment(&'static str),
    ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
            Self::Environment(var) => write!(f, "environment variable `{var}`"),
            Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
        }
    }
}

/// Per-setting origins for the values that validation can reject.
#[derive(Debug, Default, Clone)]
struct ConfigSources {
    suggest_timeout_ms: Option<SettingSource>,
    search_delay_ms: Option<SettingSource>,
    ui_theme: Option<SettingSource>,
}

impl ConfigSources {
    fn source_for_timeout(&self) -> SettingSource {
        self.suggest_timeout_ms
            .clone()
            .unwrap_or(SettingSource::ConfigKey("suggest.timeout_ms"))
    }

    fn source_for_delay(&self) -> SettingSource {
        self.search_delay_ms
            .clone()
            .unwrap_or(SettingSource::ConfigKey("search.delay_ms"))
    }

    fn source_for_theme(&self) -> SettingSource {
        self.ui_theme
            .clone()
            .unwrap_or(SettingSource::ConfigKey("ui.theme"))
    }
}

/// A configuration value that survived merging but failed validation.
#[derive(Debug, ThisError)]
#[error("invalid value for {key} from {origin}: {reason} (value: {value})")]
struct ConfigError {
    key: &'static str,
    value: String,
    origin: SettingSource,
    reason: &'static str,
}

impl ConfigError {
    fn invalid(
        key: &'static str,
        value: String,
        origin: SettingSource,
        reason: &'static str,
    ) -> Self {
        Self {
            key,
            value,
            origin,
            reason,
        }
    }
}

/// Application-ready configuration derived from CLI flags, config files,
/// environment variables and defaults.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
    pub(crate) endpoint: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) search_delay: Duration,
    pub(crate) title: String,
    pub(crate) theme: Option<String>,
}

impl ResolvedConfig {
    /// Print a human readable summary of the effective configuration.
    pub(crate) fn print_summary(&self) {
        println!("Effective configuration:");
        match &self.endpoint {
            Some(endpoint) => println!("  Suggestion endpoint: {endpoint}"),
            None => println!("  Suggestion endpoint: (none; autocomplete disabled)"),
        }
        println!("  Suggestion timeout: {} ms", self.timeout.as_millis());
        println!("  Search delay: {} ms", self.search_delay.as_millis());
        println!("  Form title: {}", self.title);
        println!(
            "  Theme: {}",
            self.theme.as_deref().unwrap_or("(use the default)")
        );
    }
}

/// Load configuration by combining CLI arguments, config files and
/// environment variables.
pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
    let builder = build_config(cli)?;
    let mut raw: RawConfig = builder
        .try_deserialize()
        .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
    raw.apply_cli_overrides(cli);
    raw.resolve(cli)
}

fn build_config(cli: &CliArgs) -> Result<Config> {
    let mut builder = Config::builder();

    if !cli.no_config {
        for path in default_config_files() {
            builder = builder.add_source(File::from(path).required(false));
        }
    }

    for path in &cli.config {
        builder = builder.add_source(File::from(path.clone()).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix("skyjourney")
            .separator("__")
            .try_parsing(true),
    );

    builder.build().map_err(|err| match err {
        config::ConfigError::Frozen => anyhow!("configuration builder is frozen"),
        other => other.into(),
    })
}

fn default_config_files() -> Vec<PathBuf> {
    let mut files = Vec::new();

    if let Ok(dir) = app_dirs::get_config_dir() {
        files.push(dir.join("config.toml"));
    }

    if let Ok(current_dir) = env::current_dir() {
        files.push(current_dir.join(".skyjourney.toml"));
        files.push(current_dir.join("skyjourney.toml"));
    }

    files
}

impl RawConfig {
    /// Apply CLI overrides on top of the raw configuration values.
    fn apply_cli_overrides(&mut self, cli: &CliArgs) {
        if let Some(endpoint) = cli.endpoint.clone() {
            self.suggest.endpoint = Some(endpoint);
        }
        if let Some(value) = cli.timeout_ms {
            self.suggest.timeout_ms = Some(value);
        }
        if let Some(value) = cli.search_delay_ms {
            self.search.delay_ms = Some(value);
        }
        if let Some(title) = cli.title.clone() {
            self.ui.title = Some(title);
        }
        if let Some(theme) = cli.theme.clone() {
            self.ui.theme = Some(theme);
        }
    }

    /// Convert the raw configuration into a [`ResolvedConfig`], validating
    /// and filling defaults where required.
    fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
        let sources = ConfigSources {
            suggest_timeout_ms: detect_source(
                cli.timeout_ms.is_some(),
                self.suggest.timeout_ms.is_some(),
                "SKYJOURNEY__SUGGEST__TIMEOUT_MS",
                "--timeout-ms",
                "suggest.timeout_ms",
            ),
            search_delay_ms: detect_source(
                cli.search_delay_ms.is_some(),
                self.search.delay_ms.is_some(),
                "SKYJOURNEY__SEARCH__DELAY_MS",
                "--search-delay-ms",
                "search.delay_ms",
            ),
            ui_theme: detect_source(
                cli.theme.is_some(),
                self.ui.theme.is_some(),
                "SKYJOURNEY__UI__THEME",
                "--theme",
                "ui.theme",
            ),
        };

        validate(&self, &sources).map_err(Error::new)?;

        let endpoint = self.suggest.endpoint.and_then(sanitize_endpoint);
        let timeout = Duration::from_millis(self.suggest.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS));
        let search_delay =
            Duration::from_millis(self.search.delay_ms.unwrap_or(DEFAULT_SEARCH_DELAY_MS));
        let title = self
            .ui
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let theme = self.ui.theme;

        Ok(ResolvedConfig {
            endpoint,
            timeout,
            search_delay,
            title,
            theme,
        })
    }
}

fn validate(raw: &RawConfig, sources: &ConfigSources) -> Result<(), ConfigError> {
    if let Some(timeout_ms) = raw.suggest.timeout_ms
        && timeout_ms == 0
    {
        return Err(ConfigError::invalid(
            "suggest.timeout_ms",
            timeout_ms.to_string(),
            sources.source_for_timeout(),
            "must be greater than zero",
        ));
    }

    if let Some(delay_ms) = raw.search.delay_ms
        && delay_ms == 0
    {
        return Err(ConfigError::invalid(
            "search.delay_ms",
            delay_ms.to_string(),
            sources.source_for_delay(),
            "must be greater than zero",
        ));
    }

    if let Some(name) = raw.ui.theme.as_deref()
        && theme::by_name(name).is_none()
    {
        return Err(ConfigError::invalid(
            "ui.theme",
            name.to_string(),
            sources.source_for_theme(),
            "not a known theme name",
        ));
    }

    Ok(())
}

fn detect_source(
    cli_present: bool,
    value_present: bool,
    env_var: &'static str,
    cli_flag: &'static str,
    key: &'static str,
) -> Option<SettingSource> {
    if !value_present {
        return None;
    }

    if cli_present {
        return Some(SettingSource::CliFlag(cli_flag));
    }

    if env::var_os(env_var).is_some() {
        return Some(SettingSource::Environment(env_var));
    }

    Some(SettingSource::ConfigKey(key))
}

/// Treat an empty or whitespace-only endpoint the same as an absent one.
fn sanitize_endpoint(endpoint: String) -> Option<String> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::cli::OutputFormat;

    use super::*;

    fn bare_cli() -> CliArgs {
        CliArgs {
            config: Vec::new(),
            no_config: true,
            endpoint: None,
            timeout_ms: None,
            search_delay_ms: None,
            title: None,
            theme: None,
            print_config: false,
            list_themes: false,
            output: OutputFormat::Plain,
        }
    }

    #[test]
    fn resolve_fills_defaults() {
        let resolved = RawConfig::default().resolve(&bare_cli()).expect("resolve");
        assert!(resolved.endpoint.is_none());
        assert_eq!(resolved.timeout, Duration::from_millis(10_000));
        assert_eq!(resolved.search_delay, Duration::from_millis(1_500));
        assert_eq!(resolved.title, "SkyJourney Travel");
        assert!(resolved.theme.is_none());
    }

    #[test]
    fn cli_overrides_replace_file_values() {
        let mut raw = RawConfig::default();
        raw.suggest.endpoint = Some("https://file.example/suggest".into());
        raw.suggest.timeout_ms = Some(5_000);

        let mut cli = bare_cli();
        cli.endpoint = Some("https://cli.example/suggest".into());
        cli.timeout_ms = Some(250);
        raw.apply_cli_overrides(&cli);

        let resolved = raw.resolve(&cli).expect("resolve");
        assert_eq!(resolved.endpoint.as_deref(), Some("https://cli.example/suggest"));
        assert_eq!(resolved.timeout, Duration::from_millis(250));
    }

    #[test]
    fn config_layers_resolve_cli_over_env_over_file_over_default() {
        // No other test sets SKYJOURNEY__ variables or calls load().
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("skyjourney.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(
            file,
            "[suggest]\nendpoint = \"https://file.example/suggest\"\ntimeout_ms = 2000\n\n[ui]\ntitle = \"File Title\""
        )
        .expect("write");

        let mut cli = bare_cli();
        cli.config = vec![path];

        let resolved = load(&cli).expect("file layer");
        assert_eq!(resolved.endpoint.as_deref(), Some("https://file.example/suggest"));
        assert_eq!(resolved.title, "File Title");
        assert_eq!(resolved.timeout, Duration::from_millis(2_000));
        assert_eq!(resolved.search_delay, Duration::from_millis(1_500));

        unsafe { env::set_var("SKYJOURNEY__SUGGEST__TIMEOUT_MS", "3000") };
        let resolved = load(&cli).expect("env layer");
        assert_eq!(resolved.timeout, Duration::from_millis(3_000));
        assert_eq!(resolved.title, "File Title");

        cli.timeout_ms = Some(4_000);
        let resolved = load(&cli).expect("cli layer");
        assert_eq!(resolved.timeout, Duration::from_millis(4_000));

        cli.timeout_ms = None;
        unsafe { env::set_var("SKYJOURNEY__SUGGEST__TIMEOUT_MS", "0") };
        let err = load(&cli).expect_err("must reject");
        let message = err.to_string();
        assert!(message.contains("suggest.timeout_ms"));
        assert!(message.contains("environment variable `SKYJOURNEY__SUGGEST__TIMEOUT_MS`"));
        assert!(message.contains("must be greater than zero"));

        unsafe { env::remove_var("SKYJOURNEY__SUGGEST__TIMEOUT_MS") };
    }

    #[test]
    fn validation_rejects_zero_timeout_and_names_the_flag() {
        let mut raw = RawConfig::default();
        let mut cli = bare_cli();
        cli.timeout_ms = Some(0);
        raw.apply_cli_overrides(&cli);

        let err = raw.resolve(&cli).expect_err("must reject");
        let message = err.to_string();
        assert!(message.contains("suggest.timeout_ms"));
        assert!(message.contains("value: 0"));
        assert!(message.contains("CLI flag"));
        assert!(message.contains("--timeout-ms"));
    }

    #[test]
    fn validation_rejects_zero_delay_from_a_file() {
        let mut raw = RawConfig::default();
        raw.search.delay_ms = Some(0);

        let err = raw.resolve(&bare_cli()).expect_err("must reject");
        let message = err.to_string();
        assert!(message.contains("search.delay_ms"));
        assert!(message.contains("configuration key"));
    }

    #[test]
    fn validation_rejects_unknown_themes() {
        let mut raw = RawConfig::default();
        raw.ui.theme = Some("neon".into());

        let err = raw.resolve(&bare_cli()).expect_err("must reject");
        let message = err.to_string();
        assert!(message.contains("ui.theme"));
        assert!(message.contains("value: neon"));
    }

    #[test]
    fn known_themes_pass_validation() {
        let mut raw = RawConfig::default();
        raw.ui.theme = Some("daylight".into());

        let resolved = raw.resolve(&bare_cli()).expect("resolve");
        assert_eq!(resolved.theme.as_deref(), Some("daylight"));
    }

    #[test]
    fn blank_endpoint_is_treated_as_unset() {
        let mut raw = RawConfig::default();
        raw.suggest.endpoint = Some("   ".into());

        let resolved = raw.resolve(&bare_cli()).expect("resolve");
        assert!(resolved.endpoint.is_none());
    }

    #[test]
    fn blank_title_falls_back_to_the_default() {
        let mut raw = RawConfig::default();
        raw.ui.title = Some("  ".into());

        let resolved = raw.resolve(&bare_cli()).expect("resolve");
        assert_eq!(resolved.title, "SkyJourney Travel");
    }
}
