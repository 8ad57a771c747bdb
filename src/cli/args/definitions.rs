use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `skyjourney` binary.
#[derive(Parser, Debug)]
#[command(
    name = "skyjourney",
    version,
    long_version = long_version(),
    about = "Terminal flight-search form with airport autocomplete",
    color = ColorChoice::Auto,
    styles = cli_styles()
)]
pub(crate) struct CliArgs {
    #[arg(
        short,
        long = "config",
        value_name = "FILE",
        env = "SKYJOURNEY_CONFIG",
        action = ArgAction::Append,
        help = "Additional configuration file to merge (default: none)"
    )]
    pub(crate) config: Vec<PathBuf>,
    #[arg(
        short = 'n',
        long = "no-config",
        help = "Skip loading default configuration files (default: disabled)"
    )]
    pub(crate) no_config: bool,
    #[arg(
        short = 'e',
        long,
        value_name = "URL",
        help = "Airport suggestion endpoint queried while typing (default: none; autocomplete disabled)"
    )]
    pub(crate) endpoint: Option<String>,
    #[arg(
        long = "timeout-ms",
        value_name = "MS",
        help = "Timeout for suggestion requests in milliseconds (default: 10000)"
    )]
    pub(crate) timeout_ms: Option<u64>,
    #[arg(
        long = "search-delay-ms",
        value_name = "MS",
        help = "Simulated flight-search duration in milliseconds (default: 1500)"
    )]
    pub(crate) search_delay_ms: Option<u64>,
    #[arg(
        short = 't',
        long,
        value_name = "TITLE",
        help = "Override the form title (default: SkyJourney Travel)"
    )]
    pub(crate) title: Option<String>,
    #[arg(
        long,
        value_name = "THEME",
        help = "Select a theme by name (default: slate)"
    )]
    pub(crate) theme: Option<String>,
    #[arg(
        short = 'p',
        long = "print-config",
        help = "Print the resolved configuration before running (default: disabled)"
    )]
    pub(crate) print_config: bool,
    #[arg(
        short = 'l',
        long = "list-themes",
        help = "List supported themes and exit (default: disabled)"
    )]
    pub(crate) list_themes: bool,
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t = OutputFormat::Plain,
        help = "Choose how to print the submitted search"
    )]
    pub(crate) output: OutputFormat,
}
