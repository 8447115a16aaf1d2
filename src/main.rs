use anyhow::{Context, Result};
use clap::{CommandFactory, FromArgMatches, Parser};
use colored::Colorize;
use rifleman::config;
use rifleman::logging::init_logging;
use rifleman::output::{render_json, render_list};
use rifleman::RifleMan;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rifleman")]
#[command(about = "Dispatch files to lint and format commands by rule", long_about = None)]
#[command(version)]
struct Cli {
    /// List actions for files
    #[arg(short = 'l')]
    list: bool,

    /// List actions for files as JSON
    #[arg(short = 'j')]
    json: bool,

    /// Read rules from this file instead of the default format.conf
    #[arg(short = 'c', value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Name of a rule file in the configuration directory
    #[arg(short = 'a', value_name = "ACTION")]
    action: Option<String>,

    /// Ask before running each command
    #[arg(short, long)]
    prompt: bool,

    /// Log diagnostics at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Files to classify
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let conf_dir = config::config_dir()?;
    for path in config::bootstrap(&conf_dir)? {
        eprintln!("{} {}", "Created".green(), path.display());
    }

    let actions = config::available_actions(&conf_dir);
    let matches = Cli::command()
        .mut_arg("action", |arg| {
            arg.help(format!(
                "Name of a rule file in the configuration directory ({})",
                actions.join("|")
            ))
        })
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose);
    config::apply_env_defaults();

    let conf_path =
        config::resolve_config(&conf_dir, cli.config.as_deref(), cli.action.as_deref())?;
    let rifleman = RifleMan::load(&conf_path)
        .with_context(|| format!("Failed to load rules from {}", conf_path.display()))?;

    let actions = rifleman.collect_actions(&cli.files);

    if cli.json {
        println!("{}", render_json(&actions)?);
    } else if cli.list {
        println!("{}", render_list(&actions));
    } else {
        let confirm: Option<&dyn Fn(&str) -> bool> =
            if cli.prompt { Some(&confirm_command) } else { None };
        rifleman
            .execute_all(&actions, confirm)
            .context("Failed to run command")?;
    }

    Ok(())
}

/// Ask on stderr whether to run `command`; anything but y/yes declines.
fn confirm_command(command: &str) -> bool {
    eprint!("{} {} {} ", "Run".yellow(), command, "[y/N]".dimmed());
    let _ = io::stderr().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
