//! GACCIA - Python vs TypeScript competitive code evaluation
//!
//! ## Commands
//!
//! - `evaluate`: judge two implementations on five dimensions and save reports
//! - `snark`: run the snark factory over built-in code scenarios
//! - `show`: print a saved evaluation report

mod scenarios;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gaccia_core::{
    read_evaluation_report, render_artifact_overview, render_detailed_results,
    EvaluationOrchestrator, ExecutionMode, Language, OrchestratorConfig, RivalCommentator,
};
use gaccia_llm::{ModelConfig, OpenAiChatClient, TextGenerator, DEFAULT_MODEL};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gaccia")]
#[command(author = "GACCIA Contributors")]
#[command(version = gaccia_core::VERSION)]
#[command(about = "Competitive code evaluation: Python vs TypeScript", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone, PartialEq)]
struct ModelArgs {
    /// Model identifier sent with every request
    #[arg(long, env = "GACCIA_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Use the Koyeb-hosted endpoint instead of OpenAI
    #[arg(long, env = "GACCIA_USE_KOYEB")]
    koyeb: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge a Python and a TypeScript implementation against each other
    Evaluate {
        /// Python source file
        #[arg(long)]
        python: PathBuf,

        /// TypeScript source file
        #[arg(long)]
        typescript: PathBuf,

        /// Report directory (default: results/evaluation_<timestamp>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        model: ModelArgs,

        /// Issue judge and commentary calls concurrently
        #[arg(long)]
        concurrent: bool,

        /// Totals closer than this are a tie
        #[arg(long, default_value_t = 0.0)]
        tie_tolerance: f64,
    },

    /// Let the commentators roast built-in code scenarios
    Snark {
        /// Number of rounds
        #[arg(short, long, default_value_t = 5)]
        rounds: usize,

        /// Pause between rounds, in seconds
        #[arg(long, default_value_t = 2)]
        delay_secs: u64,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Print a saved evaluation_report.json
    Show {
        /// Path to the report file
        report: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    gaccia_core::telemetry::init_tracing(cli.json, level);

    match cli.command {
        Commands::Evaluate {
            python,
            typescript,
            output,
            model,
            concurrent,
            tie_tolerance,
        } => {
            let python_code = read_sample(&python)?;
            let typescript_code = read_sample(&typescript)?;
            let generator = connect(&model)?;
            let config = OrchestratorConfig {
                model: model.model,
                tie_tolerance,
                mode: if concurrent {
                    ExecutionMode::Concurrent
                } else {
                    ExecutionMode::Sequential
                },
            };
            let output = output.unwrap_or_else(default_output_dir);
            cmd_evaluate(generator, config, &python_code, &typescript_code, &output).await
        }
        Commands::Snark {
            rounds,
            delay_secs,
            model,
        } => {
            let generator = connect(&model)?;
            cmd_snark(generator, &model.model, rounds, Duration::from_secs(delay_secs))
                .await
                .map(|_| ())
        }
        Commands::Show { report } => cmd_show(&report),
    }
}

fn read_sample(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn connect(args: &ModelArgs) -> Result<Arc<dyn TextGenerator>> {
    let config = ModelConfig::from_env(&args.model, args.koyeb)
        .context("Failed to configure the model endpoint")?;
    println!("{}", config.describe());
    let client = OpenAiChatClient::new(&config).context("Failed to build the chat client")?;
    Ok(Arc::new(client))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results").join(format!(
        "evaluation_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}

/// Run one competition, print the breakdown, then surface any report error.
async fn cmd_evaluate(
    generator: Arc<dyn TextGenerator>,
    config: OrchestratorConfig,
    python_code: &str,
    typescript_code: &str,
    output: &Path,
) -> Result<()> {
    let orchestrator = EvaluationOrchestrator::new(generator, config)
        .context("Invalid evaluation configuration")?;

    println!("⚖️  Judging Python vs TypeScript on five dimensions...");
    let run = orchestrator
        .run(python_code, typescript_code, output)
        .await
        .context("Evaluation failed")?;

    println!("{}", render_detailed_results(&run.evaluation));

    let paths = run
        .report
        .with_context(|| format!("Failed to save evaluation report to {}", output.display()))?;
    info!(run_id = %run.run_id, dir = %paths.dir.display(), "evaluation saved");
    println!("📁 Evaluation report saved to {}", paths.dir.display());
    Ok(())
}

/// Snark battle: each round the rival of the scenario's language roasts it,
/// then the scenario's own side fires back.
async fn cmd_snark(
    generator: Arc<dyn TextGenerator>,
    model: &str,
    rounds: usize,
    delay: Duration,
) -> Result<Vec<(Language, String)>> {
    let python = RivalCommentator::new(Language::Python, model, Arc::clone(&generator));
    let typescript = RivalCommentator::new(Language::TypeScript, model, generator);
    let commentator = |home: Language| match home {
        Language::Python => &python,
        Language::TypeScript => &typescript,
    };

    println!("\n🥊 SNARK BATTLE ROYALE! 🥊");
    println!("{}", "=".repeat(60));
    println!("Python 🐍 vs TypeScript 📘");
    println!("{}", "=".repeat(60));

    let mut transcript = Vec::with_capacity(rounds * 2);
    for round in 1..=rounds {
        println!("\n🔥 ROUND {round} 🔥");
        println!("{}", "-".repeat(40));

        let scenario = scenarios::for_round(round);
        let attacker = scenario.language.rival();
        println!("{} {}'s Take:", attacker.badge(), attacker.display_name());
        let take = commentator(attacker)
            .generate(scenario.code, scenario.summary)
            .await
            .context("Snark generation failed")?;
        println!("   💬 {take}");
        transcript.push((attacker, take));

        let defender = scenario.language;
        let retort = scenarios::retort(defender);
        println!("\n{} {}'s Retort:", defender.badge(), defender.display_name());
        let reply = commentator(defender)
            .generate(retort.code, retort.summary)
            .await
            .context("Snark generation failed")?;
        println!("   💬 {reply}");
        transcript.push((defender, reply));

        if round < rounds && !delay.is_zero() {
            println!("\n⏳ Preparing next round...");
            tokio::time::sleep(delay).await;
        }
    }
    Ok(transcript)
}

fn cmd_show(path: &Path) -> Result<()> {
    let artifact = read_evaluation_report(path)
        .with_context(|| format!("Failed to load report {}", path.display()))?;
    println!("{}", render_artifact_overview(&artifact));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaccia_core::reporting::REPORT_JSON;
    use gaccia_llm::fakes::FakeGenerator;

    #[test]
    fn evaluate_flags_parse() {
        let cli = Cli::try_parse_from([
            "gaccia",
            "--verbose",
            "evaluate",
            "--python",
            "a.py",
            "--typescript",
            "a.ts",
            "--model",
            "gpt-4o",
            "--concurrent",
            "--tie-tolerance",
            "0.05",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Evaluate {
                python,
                model,
                concurrent,
                tie_tolerance,
                output,
                ..
            } => {
                assert_eq!(python, PathBuf::from("a.py"));
                assert_eq!(model.model, "gpt-4o");
                assert!(concurrent);
                assert_eq!(tie_tolerance, 0.05);
                assert!(output.is_none());
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn evaluate_requires_both_samples() {
        assert!(Cli::try_parse_from(["gaccia", "evaluate", "--python", "a.py"]).is_err());
    }

    #[test]
    fn snark_defaults() {
        let cli = Cli::try_parse_from(["gaccia", "snark"]).unwrap();
        match cli.command {
            Commands::Snark {
                rounds, delay_secs, ..
            } => {
                assert_eq!(rounds, 5);
                assert_eq!(delay_secs, 2);
            }
            _ => panic!("expected snark"),
        }
    }

    #[test]
    fn default_output_is_timestamped_under_results() {
        let dir = default_output_dir();
        assert!(dir.starts_with("results"));
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("evaluation_"));
    }

    #[tokio::test]
    async fn evaluate_writes_report_that_show_can_read() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("run");
        let fake = Arc::new(FakeGenerator::replying("Score: 8\nReasoning: ok"));

        cmd_evaluate(
            fake,
            OrchestratorConfig::default(),
            "def f(): pass",
            "function f() {}",
            &out,
        )
        .await
        .unwrap();

        cmd_show(&out.join(REPORT_JSON)).unwrap();
    }

    #[tokio::test]
    async fn evaluate_reports_service_failure() {
        let dir = tempfile::tempdir().unwrap();
        let fake = Arc::new(FakeGenerator::failing("offline"));
        let err = cmd_evaluate(
            fake,
            OrchestratorConfig::default(),
            "x",
            "y",
            &dir.path().join("run"),
        )
        .await
        .unwrap_err();
        assert!(format!("{err:#}").contains("Evaluation failed"));
    }

    #[tokio::test]
    async fn snark_battle_alternates_attacker_and_defender() {
        let fake = Arc::new(
            FakeGenerator::replying("...")
                .when("opinionated Python developer", "Semicolons, really?")
                .when("opinionated TypeScript developer", "Whitespace, really?"),
        );
        let transcript = cmd_snark(fake.clone(), "gpt-4.1", 2, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(fake.call_count(), 4);
        assert_eq!(
            transcript,
            vec![
                (Language::Python, "Semicolons, really?".to_string()),
                (Language::TypeScript, "Whitespace, really?".to_string()),
                (Language::TypeScript, "Whitespace, really?".to_string()),
                (Language::Python, "Semicolons, really?".to_string()),
            ]
        );
        assert!(fake.calls()[0].prompt.contains("function fibonacci(n: number)"));
    }

    #[test]
    fn show_missing_report_fails() {
        assert!(cmd_show(Path::new("/no/such/evaluation_report.json")).is_err());
    }
}
