//! `nutrilink` - command-line shell over the client error pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nutrilink_api::{ApiClient, NotificationPoller, NotificationService, PollEvent};
use nutrilink_core::{AppConfig, Locale};
use nutrilink_feedback::{ErrorPresenter, FormErrors, RawFailure, Toast, ToastSink};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "nutrilink")]
#[command(version, about = "Classify client failures and follow notifications")]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a raw failure given as JSON
    Classify(ClassifyArgs),
    /// List notifications, or keep polling with --watch
    Notifications(NotificationArgs),
}

#[derive(clap::Args, Debug)]
struct ClassifyArgs {
    /// JSON file with the raw failure; stdin when omitted or `-`
    file: Option<PathBuf>,
    /// Display locale (`en`, `pt-BR`)
    #[arg(long)]
    locale: Option<Locale>,
    /// Also print the combined validation text
    #[arg(long)]
    format_fields: bool,
}

#[derive(clap::Args, Debug)]
struct NotificationArgs {
    /// Poll until interrupted
    #[arg(long)]
    watch: bool,
    /// Bearer token; falls back to `NUTRILINK_TOKEN`
    #[arg(long)]
    token: Option<String>,
}

/// Initialize tracing subscriber for logging
fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config.validate()?;
            config
        }
        None => AppConfig::load_with_env().context("failed to load config")?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            return ExitCode::from(2);
        }
    };
    init_tracing(&config.logging.filter);
    info!("Starting Nutrilink v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Classify(args) => classify_command(&config, &args),
        Commands::Notifications(args) => notifications_command(&config, args).await,
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}

/// Writes toasts to stderr, one line each.
struct StderrToasts;

impl ToastSink for StderrToasts {
    fn show(&mut self, toast: Toast) {
        eprintln!("{}", render_toast(&toast));
    }
}

fn render_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.title, toast.description)
}

fn read_failure(file: Option<&Path>) -> Result<RawFailure> {
    let input = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    parse_failure(&input)
}

fn parse_failure(input: &str) -> Result<RawFailure> {
    let value: serde_json::Value =
        serde_json::from_str(input).context("input is not valid JSON")?;
    Ok(RawFailure::from_json(value))
}

/// Classify `failure` and render what a form would show.
fn render_classification(
    presenter: &ErrorPresenter,
    failure: &RawFailure,
    format_fields: bool,
) -> Result<String> {
    let mut toasts = Vec::new();
    let mut form = FormErrors::new();
    let processed =
        presenter.handle_with_fields(failure, &mut |t: Toast| toasts.push(t), &mut form);

    let mut out = serde_json::to_string_pretty(&processed)?;
    out.push('\n');
    for toast in &toasts {
        out.push_str(&render_toast(toast));
        out.push('\n');
    }
    for (field, message) in form.iter() {
        out.push_str(&format!("  {field}: {message}\n"));
    }
    if format_fields {
        if let Some(errors) = processed.validation_errors() {
            out.push_str(&presenter.format_validation_errors(errors));
            out.push('\n');
        }
    }
    Ok(out)
}

fn classify_command(config: &AppConfig, args: &ClassifyArgs) -> Result<ExitCode> {
    let failure = read_failure(args.file.as_deref())?;
    let presenter = ErrorPresenter::new(args.locale.unwrap_or(config.general.locale));
    let rendered = render_classification(&presenter, &failure, args.format_fields)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

async fn notifications_command(config: &AppConfig, args: NotificationArgs) -> Result<ExitCode> {
    let mut client = ApiClient::new(&config.api)?;
    client.set_token(args.token.or_else(|| std::env::var("NUTRILINK_TOKEN").ok()));

    let service = NotificationService::new(client, config.notifications.page_size);
    let presenter = ErrorPresenter::new(config.general.locale);
    let poller = NotificationPoller::new(
        Arc::new(service),
        Duration::from_secs(config.notifications.poll_interval_secs),
        *presenter.classifier(),
    );

    if !args.watch {
        return match poller.refresh().await {
            Ok(_) => {
                let feed = poller.feed();
                let feed = feed.read().await;
                for item in feed.items() {
                    let marker = if item.read { ' ' } else { '*' };
                    println!("{marker} {}  {}: {}", item.created_at, item.title, item.message);
                }
                println!("{} unread", feed.unread_count());
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                presenter.present(&error, &mut StderrToasts);
                Ok(ExitCode::from(1))
            }
        };
    }

    let cancel = CancellationToken::new();
    let signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal.cancel();
        }
    });

    let mut sink = StderrToasts;
    poller
        .run(cancel, |event| match event {
            PollEvent::Updated { unread } => println!("{unread} unread"),
            PollEvent::Failed(error) => {
                presenter.present(&error, &mut sink);
            }
        })
        .await;

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_classify_args() {
        let cli = Cli::try_parse_from([
            "nutrilink",
            "classify",
            "failure.json",
            "--locale",
            "pt-BR",
            "--format-fields",
        ])
        .expect("parse args");

        match cli.command {
            Commands::Classify(args) => {
                assert_eq!(args.file.as_deref(), Some(Path::new("failure.json")));
                assert_eq!(args.locale, Some(Locale::PtBr));
                assert!(args.format_fields);
            }
            Commands::Notifications(_) => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_locale() {
        let result = Cli::try_parse_from(["nutrilink", "classify", "--locale", "fr"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_notifications_watch() {
        let cli = Cli::try_parse_from(["nutrilink", "--config", "cfg.toml", "notifications", "--watch"])
            .expect("parse args");
        assert_eq!(cli.config.as_deref(), Some(Path::new("cfg.toml")));
        assert!(matches!(
            cli.command,
            Commands::Notifications(NotificationArgs { watch: true, .. })
        ));
    }

    #[test]
    fn test_parse_failure_rejects_invalid_json() {
        assert!(parse_failure("not json").is_err());
    }

    #[test]
    fn test_render_validation_failure() {
        let failure = parse_failure(
            r#"{"hasResponse": true, "status": 400,
                "body": {"message": "Validation failed",
                         "data": {"email": "Invalid format", "slug": "Already taken"}}}"#,
        )
        .expect("parse failure");
        let presenter = ErrorPresenter::new(Locale::En);

        let out = render_classification(&presenter, &failure, true).expect("render");

        assert!(out.contains("\"kind\": \"validation\""));
        assert!(out.contains("[Invalid Data] Please correct the highlighted fields."));
        assert!(out.contains("  email: Invalid format\n"));
        assert!(out.contains("Email: Invalid format\nPage Address: Already taken"));
    }

    #[test]
    fn test_render_network_failure() {
        let failure = parse_failure(r#"{"hasResponse": false}"#).expect("parse failure");
        let presenter = ErrorPresenter::new(Locale::PtBr);

        let out = render_classification(&presenter, &failure, true).expect("render");

        assert!(out.contains("\"kind\": \"network\""));
        assert_eq!(out.lines().filter(|l| l.starts_with('[')).count(), 1);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[notifications]\npoll_interval_secs = 5\n[general]\nlocale = \"pt-BR\"\n",
        )
        .expect("write config");

        let config = load_config(Some(&path)).expect("load config");

        assert_eq!(config.notifications.poll_interval_secs, 5);
    }
}
