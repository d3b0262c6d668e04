use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;

use vwconfig::config::Settings;
use vwconfig::logging::init_tracing;
use vwconfig::options::token::split_command_line;
use vwconfig::reduction::{resolve_model_options, ResolvedModel};

/// Resolve a saved model's header options against the current invocation.
#[derive(Parser, Debug)]
#[command(name = "vwconfig", version, about)]
struct Cli {
    /// Option string recorded in the model header
    #[arg(long, value_name = "STRING", allow_hyphen_values = true, conflicts_with = "header_file")]
    header: Option<String>,

    /// File containing the model header option string
    #[arg(long, value_name = "PATH")]
    header_file: Option<PathBuf>,

    /// Keep the header's interaction options instead of re-deriving them
    #[arg(long)]
    keep_interactions: bool,

    /// Settings file (default: ~/.config/vwconfig/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    json: bool,

    /// Current invocation's options
    #[arg(last = true, value_name = "OPTIONS")]
    args: Vec<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) if !path.exists() => bail!("Config file '{}' not found", path.display()),
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load settings")?;

    let header_line = match (&cli.header, &cli.header_file) {
        (Some(line), _) => line.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read header file '{}'", path.display()))?,
        (None, None) => String::new(),
    };
    let header = split_command_line(&header_line).context("Invalid model header")?;

    let policy = settings.merge.policy(!cli.keep_interactions);
    let resolved = resolve_model_options(&cli.args, &header, &policy)
        .context("Invalid model configuration")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        print_summary(&resolved);
    }
    Ok(())
}

fn print_summary(resolved: &ResolvedModel) {
    println!("learner chain: {}", resolved.learner_chain.as_str());
    println!("slates model: {}", if resolved.is_ccb_model { "yes" } else { "no" });

    if !resolved.skipped_header_tokens.is_empty() {
        println!("skipped header tokens: {}", resolved.skipped_header_tokens.join(" "));
    }

    println!("supplied options:");
    for option in resolved.options.iter().filter(|o| o.supplied) {
        if option.values.is_empty() {
            println!("  --{}", option.name);
        } else {
            println!("  --{} {}", option.name, option.values.join(" "));
        }
    }

    if !resolved.unclaimed_tokens.is_empty() {
        println!("unclaimed tokens: {}", resolved.unclaimed_tokens.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn trailing_args_allow_leading_dashes() {
        let cli = Cli::try_parse_from(["vwconfig", "--header", "--quiet", "--", "--epsilon", "-0.1"]).unwrap();
        assert_eq!(cli.header.as_deref(), Some("--quiet"));
        assert_eq!(cli.args, vec!["--epsilon", "-0.1"]);
        assert!(!cli.keep_interactions);
    }

    #[test]
    fn header_and_header_file_conflict() {
        let result = Cli::try_parse_from(["vwconfig", "--header", "x", "--header-file", "y"]);
        assert!(result.is_err());
    }
}
