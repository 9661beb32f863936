//! WTFScript CLI and REPL
//!
//! Usage:
//!   wtf run [--config cfg.json] <file.wtf>   - Execute a WTFScript file
//!   wtf repl [--config cfg.json]             - Start interactive REPL

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use wtfscript::{logger, Config, Interpreter, Value, VERSION};

#[derive(Parser, Debug)]
#[command(name = "wtf", version, about = "WTFScript: typed scripting where missing values are made up")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a WTFScript file
    Run {
        /// JSON file overriding the default generation ranges
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,

        file: PathBuf,
    },

    /// Start interactive REPL
    Repl {
        /// JSON file overriding the default generation ranges
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, file } => {
            let config = load_config(config.as_deref())?;
            if !run_file(&file, config)? {
                process::exit(1);
            }
        }
        Command::Repl { config } => {
            let config = load_config(config.as_deref())?;
            run_repl(config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("cannot load config '{}'", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Returns false when the program had errors
fn run_file(path: &Path, config: Option<Config>) -> Result<bool> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read file '{}'", path.display()))?;

    let mut interp = Interpreter::new(config);
    Ok(interp.execute(&source).is_some())
}

fn run_repl(config: Option<Config>) -> Result<()> {
    println!("{} {} - {}",
        "WTFScript".cyan().bold(),
        VERSION.cyan(),
        "values optional".dimmed()
    );
    println!("Type {} to exit, {} for help\n",
        "exit".yellow(),
        "help".yellow()
    );

    let mut rl = DefaultEditor::new().context("failed to start the REPL")?;

    // One interpreter for the whole session so variables persist
    let mut interp = Interpreter::new(config.clone());

    loop {
        match rl.readline(&format!("{} ", "wtf>".green().bold())) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Handle special commands
                match line {
                    "exit" | "quit" => {
                        logger::success("Goodbye!");
                        break;
                    }
                    "help" => {
                        print_repl_help();
                        continue;
                    }
                    "clear" => {
                        interp = Interpreter::new(config.clone());
                        logger::info("State cleared.".dimmed());
                        continue;
                    }
                    "vars" => {
                        print_variables(&interp);
                        continue;
                    }
                    _ => {}
                }

                match interp.execute(line) {
                    None | Some(Value::Nil) => {}
                    Some(value) => println!("{} {}", "=>".dimmed(), value.to_string().cyan()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                logger::warn("Interrupted. Type exit to quit.");
            }
            Err(ReadlineError::Eof) => {
                logger::success("Goodbye!");
                break;
            }
            Err(err) => {
                logger::error(format!("readline failed: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_variables(interp: &Interpreter) {
    let vars = interp.variables();
    if vars.is_empty() {
        logger::info("No variables declared.".dimmed());
        return;
    }
    for (name, var) in vars {
        println!("  {} {} = {}", var.var_type.to_string().yellow(), name, var.value);
    }
}

fn print_repl_help() {
    println!("{}", "REPL Commands:".yellow());
    println!("  exit, quit   Exit the REPL");
    println!("  clear        Forget all variables");
    println!("  vars         List declared variables");
    println!("  help         Show this help\n");
    println!("{}", "Language Examples:".yellow());
    println!("  int x = 5;");
    println!("  int(1, 6) die;");
    println!("  unofloat p;");
    println!("  ifrand(p) {{ print(\"lucky\"); }} else {{ print(\"not today\"); }}");
    println!("  print(typeof(die), die);");
}
