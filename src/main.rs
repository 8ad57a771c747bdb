mod cli;
mod settings;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use skyjourney::suggest::HttpSuggestSource;
use skyjourney::ui::{self, FormOptions};
use skyjourney::{logging, theme};

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for name in theme::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    if let Err(error) = logging::init() {
        eprintln!("warning: file logging disabled: {error:#}");
    }

    run_form(cli.output, resolved)
}

/// Run the booking form and print the outcome in the chosen format.
fn run_form(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
    let source = match &settings.endpoint {
        Some(endpoint) => Some(HttpSuggestSource::new(endpoint.as_str(), settings.timeout)?),
        None => None,
    };

    // Themes were validated during settings resolution, so the lookup only
    // misses when no theme was configured.
    let theme = settings
        .theme
        .as_deref()
        .and_then(theme::by_name)
        .unwrap_or(theme::SLATE);

    let options = FormOptions {
        title: settings.title,
        theme,
        search_delay: settings.search_delay,
    };

    let outcome = ui::run(options, source)?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
