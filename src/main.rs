use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use diag_express::config::Config;
use diag_express::history::SavedDiagnostic;
use diag_express::output;
use diag_express::progress::{run_animation, run_counter, ProgressSchedule};
use diag_express::questionnaire::Questionnaire;
use diag_express::scoring::{Answers, ScoreResult, ScoringError, VerticalConfig, DEFAULT_MONTHLY_REVENUE};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(Args, Debug)]
struct RunOptions {
    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Skip the loading animation
    #[arg(long)]
    no_animation: bool,

    /// Do not remember this result
    #[arg(long)]
    no_save: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score answers given on the command line
    Score {
        /// Vertical id (e.g. empleabilidad, emprendimiento)
        vertical: String,

        /// Answer as criterion=value, repeatable (e.g. -a linkedin=2)
        #[arg(short, long = "answer", value_parser = parse_answer)]
        answers: Vec<(String, u32)>,

        /// Estimated monthly revenue in euros
        #[arg(long)]
        revenue: Option<f64>,

        #[command(flatten)]
        run: RunOptions,
    },
    /// Answer the questionnaire interactively
    Ask {
        /// Vertical id (e.g. empleabilidad, emprendimiento)
        vertical: String,

        #[command(flatten)]
        run: RunOptions,
    },
    /// Show the last saved result
    Last {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available verticals and their criteria
    Verticals,
}

#[derive(Parser, Debug)]
#[command(name = "diag-express")]
#[command(about = "Express digital diagnostic", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/diag-express/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_answer(s: &str) -> Result<(String, u32), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing criterion name in '{}'", s));
    }
    let value = value
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid value in '{}': {}", s, e))?;
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = diag_express::telemetry::init(cli.verbose) {
        eprintln!("Logging disabled: {}", e);
    }

    let config_path = cli.config.map(PathBuf::from);
    let config = match diag_express::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate every vertical at startup
    if let Err(errors) = diag_express::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let catalog = config.catalog();
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Score {
            vertical,
            answers,
            revenue,
            run,
        } => {
            let vertical_config = lookup(&catalog, &vertical);
            let answers: Answers = answers.into_iter().collect();
            let revenue = revenue.or(config.default_revenue);
            let result = score_or_exit(vertical_config, &answers, revenue);
            present(&config, vertical_config, result, &run, use_colors).await;
        }
        Commands::Ask { vertical, run } => {
            let vertical_config = lookup(&catalog, &vertical);
            let default_revenue = config.default_revenue.unwrap_or(DEFAULT_MONTHLY_REVENUE);
            let stdin = std::io::stdin();
            let submission = match Questionnaire::new(stdin.lock(), std::io::stdout())
                .run(vertical_config, default_revenue)
            {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            println!();
            let result = score_or_exit(
                vertical_config,
                &submission.answers,
                submission.monthly_revenue,
            );
            present(&config, vertical_config, result, &run, use_colors).await;
        }
        Commands::Last { json } => {
            let loaded = diag_express::history::get_last_result_path()
                .and_then(|path| diag_express::history::load_last_result(&path));
            match loaded {
                Ok(Some(saved)) => {
                    if json {
                        print_json(&saved.result);
                    } else {
                        println!(
                            "{}",
                            output::format_saved(&saved, chrono::Utc::now(), use_colors)
                        );
                    }
                }
                Ok(None) => {
                    eprintln!("No diagnostic saved yet. Run `diag-express ask <vertical>` first.");
                }
                Err(e) => {
                    eprintln!("Failed to load last result: {:#}", e);
                    std::process::exit(EXIT_STORAGE);
                }
            }
        }
        Commands::Verticals => {
            println!("{}", output::format_vertical_list(&catalog));
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn lookup<'a>(catalog: &'a diag_express::scoring::Catalog, vertical: &str) -> &'a VerticalConfig {
    match catalog.get(vertical) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}. Available: {}", e, catalog.ids().join(", "));
            std::process::exit(EXIT_INPUT);
        }
    }
}

fn score_or_exit(config: &VerticalConfig, answers: &Answers, revenue: Option<f64>) -> ScoreResult {
    match diag_express::scoring::score(config, answers, revenue) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("No se pudo calcular el diagnóstico: {}", e);
            let code = match e {
                ScoringError::Configuration { .. } => EXIT_CONFIG,
                ScoringError::MissingAnswer { .. }
                | ScoringError::UnknownVertical(_)
                | ScoringError::InvalidRevenue(_) => EXIT_INPUT,
            };
            std::process::exit(code);
        }
    }
}

async fn present(
    config: &Config,
    vertical: &VerticalConfig,
    result: ScoreResult,
    run: &RunOptions,
    use_colors: bool,
) {
    let animate = config.animation_enabled() && !run.no_animation && !run.json;
    if animate {
        // Timing was checked by validate_config
        let timing = config.animation_timing().unwrap_or_default();
        let schedule = ProgressSchedule::new(vertical.loading_messages.clone());
        let width = output::progress_bar_width();
        let mut stderr = std::io::stderr();
        run_animation(&schedule, timing, |frame| {
            let _ = write!(stderr, "\r\x1b[2K{}", output::format_progress(&frame, width));
            let _ = stderr.flush();
        })
        .await;
        let _ = writeln!(stderr);

        run_counter(result.score, timing, |value| {
            let _ = write!(stderr, "\r\x1b[2KPuntuación: {}/10", value);
            let _ = stderr.flush();
        })
        .await;
        let _ = writeln!(stderr);
    }

    if run.json {
        print_json(&result);
    } else {
        println!("{}", output::format_result(&result, use_colors));
    }

    if !run.no_save {
        let saved = SavedDiagnostic::new(result);
        let stored = diag_express::history::get_last_result_path()
            .and_then(|path| diag_express::history::save_last_result(&path, &saved));
        if let Err(e) = stored {
            eprintln!("Failed to save result: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}

fn print_json(result: &ScoreResult) {
    match output::format_json(result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}
