//! promptline demo CLI
//!
//! Exercises the toolkit against a real terminal: a full sequencer
//! walkthrough, one-off prompts, and the spinner.

use std::fs::File;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::json;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use promptline::error::PromptError;
use promptline::sequencer::{DrawOptions, Sequencer};
use promptline::spinner::Spinner;
use promptline::style::{palette, Effect, Styles};
use promptline::term::{install_interrupt_hook, install_panic_hook};
use promptline::types::{options, OptionValue, SelectConfig};

#[derive(Parser)]
#[command(name = "promptline")]
#[command(about = "Interactive terminal prompt toolkit demo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full sequencer walkthrough
    Demo {
        /// Clear the screen before drawing
        #[arg(long)]
        clean: bool,
    },

    /// One-off selection prompt over the given options
    Select {
        /// Options to choose from
        #[arg(required = true)]
        options: Vec<String>,
    },

    /// One-off text-input prompt
    Input {
        /// Question to display before reading
        #[arg(long)]
        question: Option<String>,
    },

    /// Run the spinner for a while
    Spinner {
        /// How long to spin, in milliseconds
        #[arg(long, default_value_t = 2000)]
        millis: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();
    install_panic_hook();
    install_interrupt_hook();

    let result = match cli.command {
        Commands::Demo { clean } => cmd_demo(clean),
        Commands::Select { options } => cmd_select(options),
        Commands::Input { question } => cmd_input(question),
        Commands::Spinner { millis } => cmd_spinner(millis),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_aborted() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// File logger so the log never interleaves with prompt output.
fn init_logging() {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("promptline.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_demo(clean: bool) -> Result<(), PromptError> {
    let banner = Styles {
        color: Some(palette::GREEN),
        bgcolor: None,
        effect: vec![Effect::Bold],
    };

    let mut seq = Sequencer::new();
    seq.new_line("promptline demo", Some(&banner));
    seq.new_line("===============================================================", None);
    seq.new_line("Pick a color:", None);
    seq.new_select_line(options(["red", "green", "blue"]), |choice, _| {
        json!({ "color": choice })
    });
    seq.new_input_line(Some("Your name: ".into()), |name, _| {
        json!({ "name": name })
    });
    // Summary step: reads state written by the two prompts above.
    seq.new_step(|state| {
        let name = state["name"].as_str().unwrap_or("stranger");
        let color = state["color"].as_str().unwrap_or("no color");
        println!("Bye {name}, enjoy {color}!");
        Ok(json!({}))
    });

    seq.draw(DrawOptions { clean, close_stream: true })?;
    Ok(())
}

fn cmd_select(opts: Vec<String>) -> Result<(), PromptError> {
    let opts: Vec<OptionValue> = options(opts);
    let config = SelectConfig {
        no_tty_fallback_text: Some("Pick a number: ".into()),
        ..SelectConfig::default()
    };
    let choice = promptline::select(&opts, &config)?;
    println!("Selected: {choice}");
    Ok(())
}

fn cmd_input(question: Option<String>) -> Result<(), PromptError> {
    let answer = promptline::input(question.as_deref(), None)?;
    println!("Entered: {answer}");
    Ok(())
}

fn cmd_spinner(millis: u64) -> Result<(), PromptError> {
    let mut spinner = Spinner::new()
        .with_prefix("Working")
        .with_style(Styles::fg(palette::YELLOW));
    spinner.start()?;
    thread::sleep(Duration::from_millis(millis));
    spinner.stop(Some("Done."))?;
    Ok(())
}
