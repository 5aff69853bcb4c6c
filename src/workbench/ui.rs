//! Session UI components.

use super::command::SLASH_COMMANDS;
use super::mode::Mode;
use super::state::Workbench;
use crate::config::ResolvedConfig;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header() {
    println!(
        "{} {} - Interactive Code Workbench",
        Style::header("codecraft"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

/// Prints the mode banner shown after every mode switch.
pub fn print_mode(workbench: &Workbench) {
    let mode = workbench.mode();
    println!(
        "{} {}  {}",
        Style::success("▸"),
        Style::value(mode.title()),
        Style::secondary(mode.description())
    );
    println!("  {}", Style::hint(input_hint(mode)));
    println!();
}

const fn input_hint(mode: Mode) -> &'static str {
    match mode {
        Mode::Generate => "Type a prompt to generate code",
        Mode::Diff => "Use /load or /edit for the old version, /load2 or /edit2 for the new one",
        Mode::Analyze | Mode::Convert | Mode::Flowchart | Mode::Runner => {
            "Type or paste code line by line, or use /load or /edit, then /run"
        }
    }
}

pub fn print_config(config: &ResolvedConfig, workbench: &Workbench) {
    println!("{}", Style::header("Configuration"));
    println!(
        "  {}   {}",
        Style::label("provider"),
        Style::value(&config.provider_name)
    );
    println!(
        "  {}      {}",
        Style::label("model"),
        Style::value(&config.model)
    );
    println!(
        "  {}       {}",
        Style::label("mode"),
        Style::value(workbench.mode().title())
    );
    println!(
        "  {}   {}",
        Style::label("language"),
        Style::language(workbench.language())
    );
    println!(
        "  {}         {}",
        Style::label("to"),
        Style::language(workbench.target_language())
    );
    println!(
        "  {}   {}",
        Style::label("endpoint"),
        Style::secondary(&config.endpoint)
    );
    println!();
}

/// Prints the inputs the current mode uses.
pub fn print_inputs(workbench: &Workbench) {
    let mode = workbench.mode();
    if mode == Mode::Generate {
        print_block("Prompt", workbench.prompt());
    } else if mode == Mode::Diff {
        print_block("Original", workbench.input_code());
        print_block("Modified", workbench.secondary_code());
    } else {
        print_block("Input", workbench.input_code());
    }
}

fn print_block(title: &str, text: &str) {
    println!("{}", Style::header(title));
    if text.is_empty() {
        println!("  {}", Style::hint("(empty)"));
    } else {
        println!("{text}");
    }
    println!();
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let width = SLASH_COMMANDS
        .iter()
        .map(|(cmd, _)| cmd.len())
        .max()
        .unwrap_or(0);
    for (cmd, desc) in SLASH_COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{cmd:<width$}")),
            Style::secondary(desc)
        );
    }
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_alert(message: &str) {
    eprintln!("{} {message}", Style::warning("⚠"));
    eprintln!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
