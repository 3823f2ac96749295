//! VERITAS Pro: headless CLI.
//!
//! Runs a single verification against the configured service, or renders a
//! saved report document offline.
//!
//! Usage:
//!   veritas check --text "The Eiffel Tower was moved to Rome"
//!   veritas check --image screenshot.png --config veritas.toml
//!   veritas render report.md
//!   veritas render report.md --json

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use veritas_client::{image::load_image, GeminiClient};
use veritas_config::AppConfig;
use veritas_contracts::{
    error::{VeritasError, VeritasResult},
    response::FactCheckResponse,
    state::VerificationState,
};
use veritas_core::{traits::VerificationClient, Action, Command as CoreCommand, Orchestrator};
use veritas_report::{render_report, render_sources, SourceEntry};

// ── CLI definition ────────────────────────────────────────────────────────────

/// VERITAS Pro: real-time news fact-checking.
#[derive(Parser)]
#[command(
    name = "veritas",
    about = "VERITAS Pro real-time news fact-checking",
    long_about = "Verifies the factual claims in a headline, article, or screenshot\n\
                  using a search-grounded language model, and renders the report."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Verify text and/or an image and print the rendered report.
    Check {
        /// Headline, claim, or article text.
        #[arg(long)]
        text: Option<String>,
        /// Screenshot or photo to analyse.
        #[arg(long)]
        image: Option<PathBuf>,
        /// TOML configuration file. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the raw response as JSON instead of the rendered report.
        #[arg(long)]
        json: bool,
    },
    /// Render a saved report document without contacting the service.
    Render {
        /// Path to the report document.
        file: PathBuf,
        /// Print the view tree as JSON.
        #[arg(long)]
        json: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check {
            text,
            image,
            config,
            json,
        } => run_check(text, image, config.as_deref(), json),
        Command::Render { file, json } => run_render(&file, json),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}

// ── check ─────────────────────────────────────────────────────────────────────

fn run_check(
    text: Option<String>,
    image: Option<PathBuf>,
    config: Option<&Path>,
    json: bool,
) -> VeritasResult<()> {
    let config = AppConfig::load(config)?;
    let client = GeminiClient::new(config.client.clone())?;
    info!(model = %config.client.model, "running one-shot check");

    let response = check(&client, &config, text.unwrap_or_default(), image)?;

    if json {
        println!("{}", to_json(&response)?);
    } else {
        print_banner();
        println!("{}", render_report(&response.report_text));
        print!(
            "{}",
            format_sources(&render_sources(&response.sources, &config.ui.favicon_endpoint))
        );
    }
    Ok(())
}

/// Drive the orchestrator through one submission without timers.
fn check(
    client: &dyn VerificationClient,
    config: &AppConfig,
    text: String,
    image: Option<PathBuf>,
) -> VeritasResult<FactCheckResponse> {
    let mut orchestrator = Orchestrator::new(config.step_interval());
    orchestrator.dispatch(Action::EditText(text));

    if let Some(path) = image {
        if let Some(CoreCommand::LoadImage { ticket, path }) =
            orchestrator.dispatch(Action::ImageSelected(path))
        {
            // The reducer only records the failure as a notice; here it is fatal.
            let image = load_image(&path)?;
            orchestrator.dispatch(Action::ImageLoaded { ticket, image });
        }
    }

    match orchestrator.run_blocking(client) {
        VerificationState::Success => orchestrator.result().cloned().ok_or_else(|| {
            VeritasError::StateMachineError {
                reason: "success state without a result".to_string(),
            }
        }),
        VerificationState::Error => Err(VeritasError::Remote {
            message: orchestrator.error().unwrap_or_default().to_string(),
        }),
        _ => Err(VeritasError::StateMachineError {
            reason: "nothing to verify: pass --text and/or --image".to_string(),
        }),
    }
}

// ── render ────────────────────────────────────────────────────────────────────

fn run_render(file: &Path, json: bool) -> VeritasResult<()> {
    let text = std::fs::read_to_string(file).map_err(|e| VeritasError::ReportRead {
        path: file.display().to_string(),
        reason: e.to_string(),
    })?;
    let view = render_report(&text);
    if json {
        println!("{}", to_json(&view)?);
    } else {
        print!("{}", view);
    }
    Ok(())
}

// ── Output helpers ────────────────────────────────────────────────────────────

fn to_json<T: serde::Serialize>(value: &T) -> VeritasResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| VeritasError::Serialization {
        reason: e.to_string(),
    })
}

fn format_sources(sources: &[SourceEntry]) -> String {
    let mut out = format!("Sources ({})\n", sources.len());
    for source in sources {
        out.push_str(&format!("  [{}] {}\n", source.hostname, source.title));
        out.push_str(&format!("      {}\n", source.uri));
        out.push_str(&format!("      icon: {}\n", source.icon_url));
    }
    out
}

fn print_banner() {
    println!();
    println!("VERITAS Pro");
    println!("Real-Time News Fact-Checking");
    println!("============================");
    println!();
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Mutex};

    use chrono::Utc;

    use veritas_contracts::request::VerificationRequest;

    use super::*;

    struct RecordingClient {
        seen: Mutex<Vec<VerificationRequest>>,
        fail: bool,
    }

    impl RecordingClient {
        fn new(fail: bool) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl VerificationClient for RecordingClient {
        fn verify(&self, request: &VerificationRequest) -> VeritasResult<FactCheckResponse> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(VeritasError::Remote {
                    message: String::new(),
                });
            }
            Ok(FactCheckResponse {
                report_text: "# Verification Report".to_string(),
                sources: Vec::new(),
                received_at: Utc::now(),
            })
        }
    }

    #[test]
    fn check_returns_report_for_text() {
        let client = RecordingClient::new(false);
        let response = check(&client, &AppConfig::default(), "claim".to_string(), None).unwrap();
        assert_eq!(response.report_text, "# Verification Report");
        assert_eq!(client.seen.lock().unwrap()[0].text, "claim");
    }

    #[test]
    fn check_attaches_image() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a").unwrap();

        let client = RecordingClient::new(false);
        check(
            &client,
            &AppConfig::default(),
            String::new(),
            Some(file.path().to_path_buf()),
        )
        .unwrap();

        let seen = client.seen.lock().unwrap();
        let image = seen[0].image.as_ref().unwrap();
        assert_eq!(image.media_type, "image/gif");
        assert_eq!(seen[0].text, "");
    }

    #[test]
    fn check_with_missing_image_fails_before_calling_service() {
        let client = RecordingClient::new(false);
        let err = check(
            &client,
            &AppConfig::default(),
            "claim".to_string(),
            Some(PathBuf::from("/no/such/image.png")),
        )
        .unwrap_err();
        assert!(matches!(err, VeritasError::ImageRead { .. }));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn check_without_input_is_rejected() {
        let client = RecordingClient::new(false);
        let err = check(&client, &AppConfig::default(), "   ".to_string(), None).unwrap_err();
        assert!(err.to_string().contains("nothing to verify"));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn check_failure_surfaces_generic_message() {
        let client = RecordingClient::new(true);
        let err = check(&client, &AppConfig::default(), "claim".to_string(), None).unwrap_err();
        assert_eq!(err.user_message(), "An error occurred during verification.");
    }

    #[test]
    fn sources_block_lists_each_entry() {
        let out = format_sources(&[SourceEntry {
            uri: "https://www.reuters.com/x".to_string(),
            hostname: "www.reuters.com".to_string(),
            title: "Reuters".to_string(),
            icon_url: "https://www.google.com/s2/favicons?sz=64&domain=www.reuters.com"
                .to_string(),
        }]);
        assert!(out.starts_with("Sources (1)\n"));
        assert!(out.contains("  [www.reuters.com] Reuters\n"));
        assert!(out.contains("icon: https://www.google.com/s2/favicons?sz=64&domain=www.reuters.com"));
    }

    #[test]
    fn render_reads_saved_report() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Verification Report\nSummary.").unwrap();
        assert!(run_render(file.path(), false).is_ok());
        assert!(matches!(
            run_render(Path::new("/no/such/report.md"), false),
            Err(VeritasError::ReportRead { .. })
        ));
    }
}
