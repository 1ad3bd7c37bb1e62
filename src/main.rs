use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use labpage::data::{check_documents, DataSource, DocumentStatus, Fetcher};
use labpage::environment::SiteConfig;
use labpage::logging::configure_logging;
use labpage::page::{bootstrap, BootstrapOptions, Document};
use labpage::theme::{self, FileThemeStore, SystemPreference, ThemePreferenceStore};
use labpage::{web, DOCUMENTS};

#[derive(Parser)]
#[clap(name = "labpage", about = "Render and serve a lab homepage from JSON documents")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page once and write it to disk
    Render {
        /// HTML template containing the section containers
        #[clap(short, long)]
        template: Option<PathBuf>,

        /// Data directory or http(s) base URL
        #[clap(short, long)]
        data: Option<String>,

        /// Where to write the rendered page
        #[clap(short, long)]
        out: Option<PathBuf>,

        /// Preference file for the persisted theme
        #[clap(long)]
        theme_store: Option<PathBuf>,

        /// System color scheme to assume (light or dark)
        #[clap(long)]
        prefers_color_scheme: Option<String>,
    },

    /// Serve the page with live publication filters and theme toggle
    Serve {
        #[clap(short, long)]
        template: Option<PathBuf>,

        #[clap(short, long)]
        data: Option<String>,

        #[clap(short, long)]
        port: Option<u16>,
    },

    /// Fetch and validate every data document
    Check {
        #[clap(short, long)]
        data: Option<String>,
    },

    /// Show or toggle the persisted theme preference
    Theme {
        #[clap(subcommand)]
        action: ThemeAction,

        #[clap(long, global = true)]
        theme_store: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the theme a render would start with
    Show,
    /// Flip the persisted theme
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = SiteConfig::from_env();

    match cli.command {
        Commands::Render {
            template,
            data,
            out,
            theme_store,
            prefers_color_scheme,
        } => {
            config.template = template.unwrap_or(config.template);
            config.data = data.unwrap_or(config.data);
            config.output = out.unwrap_or(config.output);
            config.theme_store = theme_store.unwrap_or(config.theme_store);
            configure_logging(&config.log_dir);

            let system = prefers_color_scheme
                .as_deref()
                .map(SystemPreference::parse)
                .unwrap_or_default();
            render(&config, system).await
        }
        Commands::Serve {
            template,
            data,
            port,
        } => {
            config.template = template.unwrap_or(config.template);
            config.data = data.unwrap_or(config.data);
            config.port = port.unwrap_or(config.port);
            configure_logging(&config.log_dir);

            web::serve(&config).await
        }
        Commands::Check { data } => {
            config.data = data.unwrap_or(config.data);
            configure_logging(&config.log_dir);

            check(&config).await
        }
        Commands::Theme {
            action,
            theme_store,
        } => {
            config.theme_store = theme_store.unwrap_or(config.theme_store);
            configure_logging(&config.log_dir);

            let mut store = FileThemeStore::new(&config.theme_store);
            match action {
                ThemeAction::Show => {
                    let current = theme::resolve_initial(&store, SystemPreference::NoPreference);
                    let origin = if store.get().is_some() {
                        "persisted"
                    } else {
                        "default"
                    };
                    println!("{} ({})", current.to_string().bright_green(), origin.dimmed());
                }
                ThemeAction::Toggle => {
                    let current = store.get();
                    let next = theme::toggle(current, &mut store)?;
                    println!(
                        "{} {}",
                        "Theme set to".bright_blue(),
                        next.to_string().bright_green()
                    );
                }
            }
            Ok(())
        }
    }
}

async fn render(config: &SiteConfig, system: SystemPreference) -> Result<()> {
    let template = tokio::fs::read_to_string(&config.template)
        .await
        .with_context(|| format!("Failed to read template {}", config.template.display()))?;
    let fetcher = Fetcher::new(DataSource::parse(&config.data)?)?;
    let store = FileThemeStore::new(&config.theme_store);
    let theme = theme::resolve_initial(&store, system);

    let mut document = Document::new(template);
    let options = BootstrapOptions { theme, live: false };
    let report = bootstrap(&mut document, &fetcher, &options).await;

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&config.output, document.into_html())
        .await
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!("Wrote {}", config.output.display());
    println!(
        "{} {} ({} rendered, {} failed, {} skipped)",
        "Wrote".bright_green(),
        config.output.display(),
        report.rendered.len(),
        report.failed.len(),
        report.skipped.len()
    );
    for (section, err) in &report.failed {
        println!("  {:?}: {}", section, err.bright_red());
    }
    Ok(())
}

async fn check(config: &SiteConfig) -> Result<()> {
    let fetcher = Fetcher::new(DataSource::parse(&config.data)?)?;
    let reports = check_documents(&fetcher, &DOCUMENTS).await;

    println!("\n{}", "═".repeat(80).bright_blue());
    println!(
        "{}  {}",
        "DATA DIAGNOSTICS".bright_blue(),
        fetcher.source().to_string().bright_yellow()
    );
    println!("{}", "═".repeat(80).bright_blue());

    let mut failures = 0;
    for report in &reports {
        let status = format!("{:?}", report.status);
        let colored_status = match report.status {
            DocumentStatus::Ok => status.bright_green(),
            DocumentStatus::Unreachable | DocumentStatus::HttpError => status.bright_red(),
            _ => status.bright_yellow(),
        };
        if report.status != DocumentStatus::Ok {
            failures += 1;
        }

        println!("\n{}: {}", report.file.bright_magenta(), colored_status);
        println!("{}: {}", "Location".bright_blue(), report.location);
        if let Some(shape) = report.shape {
            println!("{}: {}", "Shape".bright_blue(), shape);
        }
        if let Some(entries) = report.entries {
            println!("{}: {}", "Entries".bright_blue(), entries);
        }
        for (i, error) in report.errors.iter().enumerate() {
            println!("{}. {}", i + 1, error.bright_red());
        }
    }

    println!("\n{}", "─".repeat(80).dimmed());
    if failures > 0 {
        println!(
            "{}",
            format!("{} of {} documents failed", failures, reports.len()).bright_red()
        );
        std::process::exit(1);
    }
    println!("{}", "All documents OK".bright_green());
    Ok(())
}
