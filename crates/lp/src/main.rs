mod config;
mod logging;
mod report;

use clap::{Parser, Subcommand};
use config::Config;
use lp_core::DashboardError;
use lp_core::types::ProgressFilters;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "lp", version, about = "Learner progress dashboard")]
struct Cli {
    /// TOML config file. Defaults to ./lp.toml when it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Create the schema and load the demo dataset.
    Seed {
        /// Delete existing learners, courses and enrolments first.
        #[arg(long)]
        reset: bool,
    },
    /// Print learner progress to the terminal.
    Report {
        #[arg(long)]
        course_id: Option<String>,
        /// `asc` or `desc`; anything else keeps learner id order.
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        no_color: bool,
    },
    /// Print the OpenAPI document.
    Openapi,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to load templates: {message}")]
    Templates { message: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let (config, warnings) =
        match config::load(cli.config.as_deref(), |key| std::env::var(key).ok()) {
            Ok(loaded) => loaded,
            Err(err) => {
                eprintln!("lp: {err}");
                return ExitCode::FAILURE;
            }
        };
    match logging::init(&config.logging.filter) {
        Ok(Some(warning)) => warn!("{warning}"),
        Ok(None) => {}
        Err(err) => eprintln!("lp: failed to install logger: {err}"),
    }
    for warning in warnings {
        warn!("{warning}");
    }

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: &Config) -> Result<(), CliError> {
    match command {
        Command::Serve => {
            ensure_parent_dir(&config.database.path)?;
            // Fail fast on an unusable database instead of on the first request.
            lp_serve::open_dashboard(&config.database.path)?;
            let state = lp_serve::AppState::new(config.database.path.clone()).map_err(|err| {
                CliError::Templates {
                    message: err.to_string(),
                }
            })?;
            info!(db_path = %config.database.path, "starting server");
            lp_serve::serve(state, config.addr()).await?;
        }
        Command::Seed { reset } => {
            ensure_parent_dir(&config.database.path)?;
            let dashboard = lp_serve::open_dashboard(&config.database.path)?;
            if reset {
                lp_db::seed::reset(&dashboard)?;
            }
            let seeded = lp_db::seed::seed_demo(&dashboard)?;
            println!(
                "seeded {} courses, {} learners, {} enrolments into {}",
                seeded.courses, seeded.learners, seeded.enrolments, config.database.path
            );
        }
        Command::Report {
            course_id,
            sort,
            no_color,
        } => {
            ensure_parent_dir(&config.database.path)?;
            let dashboard = lp_serve::open_dashboard(&config.database.path)?;
            let page = dashboard
                .progress()
                .page(ProgressFilters::new(course_id.as_deref(), sort.as_deref()))?;
            let stdout = io::stdout();
            report::write_report(&mut stdout.lock(), &page, !no_color)?;
        }
        Command::Openapi => {
            println!("{}", lp_serve::openapi::generate_spec()?);
        }
    }
    Ok(())
}

fn ensure_parent_dir(db_path: &str) -> io::Result<()> {
    match Path::new(db_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn report_flags_parse() {
        let cli = Cli::parse_from([
            "lp",
            "--config",
            "custom.toml",
            "report",
            "--course-id",
            "3",
            "--sort",
            "desc",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Command::Report { course_id: Some(ref id), sort: Some(ref sort), no_color: false }
                if id == "3" && sort == "desc"
        ));
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::parse_from(["lp", "seed", "--reset", "--config", "x.toml"]);
        assert!(matches!(cli.command, Command::Seed { reset: true }));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[tokio::test]
    async fn seed_then_report_against_a_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.database.path = dir
            .path()
            .join("nested/progress.db")
            .to_string_lossy()
            .into_owned();

        run(Command::Seed { reset: true }, &config).await.unwrap();
        run(
            Command::Report {
                course_id: None,
                sort: Some("desc".to_string()),
                no_color: true,
            },
            &config,
        )
        .await
        .unwrap();

        let dashboard = lp_serve::open_dashboard(&config.database.path).unwrap();
        assert_eq!(dashboard.learners().list().unwrap().len(), 6);
    }
}
