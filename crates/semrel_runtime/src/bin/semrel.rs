//! semrel CLI entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use semrel_diff::DiffOptions;
use semrel_dsl::{
    DimensionalRule, IntentRule, Rule, RuleLevel, compile_pattern, convert, parse_intent,
};
use semrel_foundation::ReleaseType;
use semrel_runtime::{CheckRequest, init_logging, load_model, run_check, save_snapshot};

#[derive(Parser)]
#[command(name = "semrel")]
#[command(author, version)]
#[command(about = "Classify API surface changes as semantic-version bumps")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (overridden by SEMREL_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two versions and classify every change
    Check {
        /// New version (parser JSON or snapshot)
        #[arg(long)]
        new: PathBuf,

        /// Old version; omit when there is no previous release
        #[arg(long)]
        old: Option<PathBuf>,

        /// Policy file (JSON); defaults to the standard policy
        #[arg(long, env = "SEMREL_POLICY")]
        policy: Option<PathBuf>,

        /// Attach member changes to their owners
        #[arg(long)]
        nested: bool,

        /// Disable rename detection
        #[arg(long)]
        no_renames: bool,

        /// Fail if the verdict exceeds this release type
        #[arg(long, value_parser = parse_release)]
        expect: Option<ReleaseType>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show how an intent phrase converts through every rule level
    Intent {
        /// The phrase, e.g. "breaking removal"
        phrase: String,

        /// Release type the rule assigns
        #[arg(long, value_parser = parse_release, default_value = "major")]
        returns: ReleaseType,
    },

    /// Store a model as a binary baseline snapshot
    Snapshot {
        /// Model to store (parser JSON or snapshot)
        input: PathBuf,

        /// Snapshot file to write
        output: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

fn parse_release(s: &str) -> Result<ReleaseType, String> {
    s.parse().map_err(|e: semrel_foundation::Error| e.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the command ran but the release must not proceed.
fn run(command: Commands) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Check {
            new,
            old,
            policy,
            nested,
            no_renames,
            expect,
            format,
        } => {
            let options = DiffOptions::default()
                .with_nested(nested)
                .with_rename_detection(!no_renames);
            let outcome = run_check(&CheckRequest {
                old,
                new,
                policy,
                options,
            })?;
            match format {
                OutputFormat::Text => print!("{}", outcome.render()),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
            }
            Ok(outcome.passes(expect))
        }
        Commands::Intent { phrase, returns } => {
            let intent = IntentRule::new(phrase.as_str(), returns);
            let parsed = parse_intent(&intent);
            let Some(pattern) = parsed.pattern.clone() else {
                eprintln!("unknown intent '{phrase}'");
                if !parsed.suggestions.is_empty() {
                    eprintln!("did you mean: {}", parsed.suggestions.join(", "));
                }
                return Ok(false);
            };
            println!("intent:      {phrase} -> {returns}");
            println!("pattern:     {}", pattern.template);
            for variable in &pattern.variables {
                println!("  {} = {}", variable.name, variable.value);
            }

            let compiled = compile_pattern(&pattern);
            for warning in &compiled.warnings {
                eprintln!("warning: {warning}");
            }
            let dimensional = compiled.into_result()?;
            println!("dimensional: {}", describe(&dimensional));

            let back = convert(&Rule::Dimensional(dimensional), RuleLevel::Intent)?;
            println!("round trip:  {} (confidence {:.2})", back.rule, back.confidence);
            Ok(true)
        }
        Commands::Snapshot { input, output } => {
            let model = load_model(&input)?;
            save_snapshot(&model, &output)?;
            println!("wrote {} ({} nodes)", output.display(), model.len());
            Ok(true)
        }
    }
}

fn describe(rule: &DimensionalRule) -> String {
    fn list<T: std::fmt::Display>(name: &str, values: Option<&Vec<T>>) -> Option<String> {
        let values = values?;
        let joined = values.iter().map(ToString::to_string).collect::<Vec<_>>();
        Some(format!("{name}=[{}]", joined.join(", ")))
    }

    let mut parts: Vec<String> = [
        list("target", rule.target.as_ref()),
        list("action", rule.action.as_ref()),
        list("aspect", rule.aspect.as_ref()),
        list("impact", rule.impact.as_ref()),
        list("tags", rule.tags.as_ref()),
        list("node_kind", rule.node_kind.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect();
    if let Some(nested) = rule.nested {
        parts.push(format!("nested={nested}"));
    }
    format!("{{{}}} -> {}", parts.join(", "), rule.returns)
}
