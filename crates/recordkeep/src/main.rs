//! `rkeep` - CLI for recordkeep
//!
//! Runs a demo with its sample data or replays JSON form submissions into it,
//! printing each list as it is re-rendered.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;

use recordkeep::cli::{Cli, Command, ConfigCommand, DemoCommand, ReplayCommand};
use recordkeep::config::OutputFormat;
use recordkeep::{init_logging, Config, Demo, NullRenderer, Renderer, Workspace, WriterRenderer};

fn main() {
    if let Err(error) = run() {
        eprintln!("rkeep error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;

    match cli.command {
        Command::Demo(demo_cmd) => handle_demo(&config, &demo_cmd),
        Command::Replay(replay_cmd) => handle_replay(&config, &replay_cmd),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

/// JSON output wants a clean stdout, so list renderings are discarded.
fn open_workspace(config: &Config, demo: Demo, json: bool) -> Workspace<Box<dyn Renderer>> {
    let renderer: Box<dyn Renderer> = if json {
        Box::new(NullRenderer)
    } else {
        Box::new(WriterRenderer::new(io::stdout(), config.output.list_marker.clone()))
    };
    Workspace::new(demo, renderer)
}

fn wants_json(config: &Config, flag: bool) -> bool {
    flag || config.output.format == OutputFormat::Json
}

fn print_snapshot(workspace: &Workspace<Box<dyn Renderer>>) -> anyhow::Result<()> {
    let snapshot = workspace.snapshot()?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn handle_demo(config: &Config, cmd: &DemoCommand) -> anyhow::Result<()> {
    let demo = Demo::from(cmd.demo);
    let json = wants_json(config, cmd.json);
    let mut workspace = open_workspace(config, demo, json);

    if config.session.load_sample_data {
        workspace.seed().context("loading sample data")?;
    } else {
        debug!("Sample data disabled; {} starts empty", demo);
    }

    if json {
        print_snapshot(&workspace)
    } else {
        workspace.display();
        Ok(())
    }
}

fn handle_replay(config: &Config, cmd: &ReplayCommand) -> anyhow::Result<()> {
    let demo = Demo::from(cmd.demo);
    let json = wants_json(config, cmd.json);
    let stop_on_error = cmd.stop_on_error || config.session.stop_on_error;
    let mut workspace = open_workspace(config, demo, json);

    if config.session.load_sample_data && !cmd.no_seed {
        workspace.seed().context("loading sample data")?;
    }

    let report = if cmd.reads_stdin() {
        workspace.replay(io::stdin().lock(), stop_on_error)?
    } else {
        let file = File::open(&cmd.input)
            .with_context(|| format!("opening {}", cmd.input.display()))?;
        workspace.replay(BufReader::new(file), stop_on_error)?
    };

    for rejected in &report.rejected {
        eprintln!("alert (line {}): {}", rejected.line, rejected.error);
    }

    if json {
        print_snapshot(&workspace)?;
    } else {
        workspace.display();
    }

    if report.stopped_early {
        bail!(
            "stopped after {} applied form(s) at line {}",
            report.applied,
            report.rejected.last().map_or(0, |r| r.line)
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Output]");
                println!("  Format:             {:?}", config.output.format);
                println!("  List marker:        {:?}", config.output.list_marker);
                println!();
                println!("[Session]");
                println!("  Load sample data:   {}", config.session.load_sample_data);
                println!("  Stop on error:      {}", config.session.stop_on_error);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => bail!("configuration error: {e}"),
            }
        }
    }
    Ok(())
}
