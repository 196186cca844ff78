//! numeric-check - command-line host for numeric field validation.
//!
//! Commands:
//! - `numeric-check validate <text>`: Print the verdict for the full field text
//! - `numeric-check gate key|paste <input> [--current <text>]`: Print allow/deny
//! - `numeric-check events`: Read JSON-lines field events from stdin, answer on stdout
//!
//! Field constraints come from `--config <file>` overlaid by `--min`, `--max`,
//! `--float[=BOOL]`, `--min-decimals`, `--max-decimals`.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: The text is INVALID, or the intent was denied

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use numeric_input::{
    explain, on_key_intent, on_paste_intent, on_value_changed, Decision, NumericConfig,
};
use tracing_subscriber::EnvFilter;

use numeric_input_cli::config::resolve_config;
use numeric_input_cli::events::run_events;
use numeric_input_cli::{Cli, Commands, IntentKind};

/// Exit code returned when the engine rejects the input.
const REJECTED_EXIT_CODE: i32 = 2;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("numeric_input=debug,numeric_input_cli=debug,numeric_check=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match dispatch_command(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> Result<i32> {
    let config = resolve_config(&cli.field)?;
    match cli.command {
        Commands::Validate { text, explain } => run_validate(&config, &text, explain),
        Commands::Gate {
            kind,
            input,
            current,
        } => run_gate(&config, kind, &input, &current),
        Commands::Events => {
            let stdin = io::stdin();
            let handled = run_events(config, stdin.lock(), io::stdout().lock())?;
            tracing::debug!(handled, "event stream finished");
            Ok(0)
        }
    }
}

fn run_validate(config: &NumericConfig, text: &str, with_explain: bool) -> Result<i32> {
    let verdict = on_value_changed(text, config);
    let mut output = serde_json::to_value(verdict)?;
    if with_explain {
        output["violations"] = serde_json::to_value(explain(text, config))?;
    }
    print_json(&output)?;
    Ok(if verdict.is_valid() {
        0
    } else {
        REJECTED_EXIT_CODE
    })
}

fn run_gate(config: &NumericConfig, kind: IntentKind, input: &str, current: &str) -> Result<i32> {
    let decision = match kind {
        IntentKind::Key => {
            let mut chars = input.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => on_key_intent(key, current, config),
                _ => anyhow::bail!("a key intent takes exactly one character, got {:?}", input),
            }
        }
        IntentKind::Paste => on_paste_intent(input, current, config),
    };
    tracing::debug!(%kind, input, current, ?decision, "intent checked");
    print_json(&serde_json::json!({ "decision": decision }))?;
    Ok(match decision {
        Decision::Allow => 0,
        Decision::Deny => REJECTED_EXIT_CODE,
    })
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(value.to_string().as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_validate() {
        let cli = Cli::parse_from(["numeric-check", "validate", "4", "--min", "5"]);
        assert!(!cli.debug);
        assert_eq!(cli.field.min, Some(5.0));
        assert!(matches!(
            cli.command,
            Commands::Validate { ref text, explain: false } if text == "4"
        ));
    }

    #[test]
    fn test_cli_parsing_negative_values() {
        let cli = Cli::parse_from(["numeric-check", "--min", "-10", "validate", "-5"]);
        assert_eq!(cli.field.min, Some(-10.0));
        assert!(matches!(cli.command, Commands::Validate { ref text, .. } if text == "-5"));
    }

    #[test]
    fn test_cli_parsing_gate() {
        let cli = Cli::parse_from([
            "numeric-check",
            "gate",
            "key",
            ".",
            "--current",
            "10",
            "--float",
            "--max-decimals",
            "4",
        ]);
        assert_eq!(cli.field.accept_float, Some(true));
        assert_eq!(cli.field.max_decimals, Some(4));
        assert!(matches!(
            cli.command,
            Commands::Gate { kind: IntentKind::Key, ref input, ref current }
                if input == "." && current == "10"
        ));
    }

    #[test]
    fn test_cli_parsing_float_off() {
        let cli = Cli::parse_from(["numeric-check", "--float=false", "validate", "1.5"]);
        assert_eq!(cli.field.accept_float, Some(false));
        let cli = Cli::parse_from(["numeric-check", "validate", "1.5"]);
        assert_eq!(cli.field.accept_float, None);
    }

    #[test]
    fn test_cli_parsing_events_debug() {
        let cli = Cli::parse_from(["numeric-check", "--debug", "events"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::Events));
    }

    #[test]
    fn test_validate_exit_codes() {
        let config = NumericConfig::new().with_min(5.0);
        assert_eq!(run_validate(&config, "8", false).unwrap(), 0);
        assert_eq!(run_validate(&config, "4", true).unwrap(), REJECTED_EXIT_CODE);
        assert_eq!(run_validate(&config, "", false).unwrap(), 0);
    }

    #[test]
    fn test_gate_exit_codes() {
        let config = NumericConfig::new().with_min(0.0);
        assert_eq!(run_gate(&config, IntentKind::Key, "1", "").unwrap(), 0);
        assert_eq!(
            run_gate(&config, IntentKind::Key, "-", "").unwrap(),
            REJECTED_EXIT_CODE
        );
        assert_eq!(run_gate(&config, IntentKind::Paste, "12", "3").unwrap(), 0);
        assert!(run_gate(&config, IntentKind::Key, "12", "").is_err());
    }
}
