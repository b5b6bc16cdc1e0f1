//! Taskhive server entry point.
//!
//! This excerpt covers the configuration lifecycle: `check` resolves the
//! full configuration and reports what the server would run with, `setup`
//! writes a fresh document with generated cookie secrets. The HTTP and
//! storage layers attach to the resulting [`ConfigContext`].

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskhive::{AppConfig, ConfigContext, ConfigError, SecretPolicy};

#[derive(Parser)]
#[command(name = "taskhive")]
#[command(about = "Task automation server", long_about = None)]
struct Cli {
    /// Path to the JSON configuration file (defaults to ./config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the configuration and report what the server would run with
    Check,
    /// Write a new configuration document with fresh cookie secrets
    Setup {
        /// Where to write the document; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhive=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Setup { output }) => run_setup(output),
        Some(Commands::Check) | None => run_check(cli.config),
    }
}

/// Resolve the full configuration, logging what the server would start with.
fn run_check(config_path: Option<PathBuf>) -> ExitCode {
    let context =
        match ConfigContext::initialize(config_path.as_deref(), SecretPolicy::default()) {
            Ok(context) => context,
            Err(err) => {
                eprintln!("cannot load configuration: {}", err);
                if matches!(err, ConfigError::Io { .. } | ConfigError::Decode(_)) {
                    eprintln!(
                        "hint: point --config at a JSON file generated by `taskhive setup`"
                    );
                }
                return ExitCode::FAILURE;
            }
        };

    tracing::info!(
        listen = %format!("{}{}", context.config.interface, context.config.port),
        tmp_path = %context.config.tmp_path,
        concurrency_mode = %context.config.concurrency_mode,
        max_parallel_tasks = context.config.max_parallel_tasks,
        "configuration loaded"
    );

    match context.config.active_database() {
        Ok(db) => {
            // Selection always stamps a dialect on the returned descriptor.
            let dialect = db.dialect.map(|d| d.to_string()).unwrap_or_default();
            tracing::info!(dialect = %dialect, host = %db.host, "active database backend");
        }
        Err(err) => {
            tracing::error!(error = %err, "no usable database backend");
            return ExitCode::FAILURE;
        }
    }

    if context.cookie.supports_encryption() {
        tracing::info!("session cookies are signed and encrypted");
    } else {
        tracing::info!("session cookies are signed only");
    }

    if let Some(url) = &context.web_host {
        tracing::info!(web_host = %url, "public host configured");
    }

    ExitCode::SUCCESS
}

/// Emit a default configuration document with fresh cookie secrets.
fn run_setup(output: Option<PathBuf>) -> ExitCode {
    let mut config = AppConfig::default();
    config.generate_cookie_secrets();

    let rendered = match config.to_json() {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("cannot render configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(err) = std::fs::write(&path, &rendered) {
                eprintln!("cannot write {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
            tracing::info!(path = %path.display(), "configuration written");
        }
        None => println!("{}", rendered),
    }
    ExitCode::SUCCESS
}
