use clap::Parser;

use codecraft_cli::assistant::print_languages;
use codecraft_cli::cli::commands::modes::{GlobalOptions, ModeInput, ModeOptions, run_mode};
use codecraft_cli::cli::commands::session::{SessionOptions, run_session};
use codecraft_cli::cli::commands::{configure, providers};
use codecraft_cli::cli::{Args, Command, exit_code};
use codecraft_cli::output::{self, OutputConfig};
use codecraft_cli::ui::Style;
use codecraft_cli::workbench::Mode;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig {
        quiet: args.quiet,
        verbose: args.verbose,
        no_color: args.no_color || std::env::var("NO_COLOR").is_ok(),
    });

    if let Err(err) = run(args).await {
        let message = format!("{err:#}");
        if message.starts_with("Error:") {
            eprintln!("{message}");
        } else {
            eprintln!("{} {message}", Style::error("Error:"));
        }
        std::process::exit(exit_code(&err));
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let global = GlobalOptions {
        provider: args.provider,
        model: args.model,
        json: args.json,
    };

    let mode_options = match args.command {
        Some(Command::Languages) => {
            print_languages();
            return Ok(());
        }
        Some(Command::Providers { provider }) => {
            return providers::print_providers(provider.as_deref());
        }
        Some(Command::Configure { show }) => return configure::run_configure(show),
        Some(Command::Session { language, to }) => {
            let options = SessionOptions {
                language: language.lang,
                to,
            };
            return run_session(&global, options).await;
        }
        None => {
            let options = SessionOptions {
                language: None,
                to: None,
            };
            return run_session(&global, options).await;
        }
        Some(Command::Generate {
            prompt,
            language,
            write,
        }) => ModeOptions {
            mode: Mode::Generate,
            input: ModeInput::Prompt(prompt.join(" ")),
            language: language.lang,
            to: None,
            write,
        },
        Some(Command::Analyze { file, language }) => ModeOptions {
            mode: Mode::Analyze,
            input: ModeInput::code(file.as_deref())?,
            language: language.lang,
            to: None,
            write: None,
        },
        Some(Command::Convert {
            file,
            from,
            to,
            write,
        }) => ModeOptions {
            mode: Mode::Convert,
            input: ModeInput::code(file.as_deref())?,
            language: from,
            to,
            write,
        },
        Some(Command::Diff { old, new }) => ModeOptions {
            mode: Mode::Diff,
            input: ModeInput::versions(&old, &new)?,
            language: None,
            to: None,
            write: None,
        },
        Some(Command::Flowchart { file, output }) => ModeOptions {
            mode: Mode::Flowchart,
            input: ModeInput::code(file.as_deref())?,
            language: None,
            to: None,
            write: output,
        },
        Some(Command::Run { file, language }) => ModeOptions {
            mode: Mode::Runner,
            input: ModeInput::code(file.as_deref())?,
            language: language.lang,
            to: None,
            write: None,
        },
    };

    run_mode(&global, mode_options).await
}
