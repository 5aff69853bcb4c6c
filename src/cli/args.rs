use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "codecraft")]
#[command(about = "AI-powered code workbench: generate, analyze, convert, diff, visualize and simulate code")]
#[command(version)]
pub struct Args {
    /// Provider name (e.g., gemini, ollama)
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress status output and the spinner
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show diagnostic output (requests, swallowed failures)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Source language option shared by the single-input modes.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct LanguageArg {
    /// Source language (e.g., Python, rust, cpp)
    #[arg(short = 'l', long = "lang")]
    pub lang: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate code from a natural-language prompt
    Generate {
        /// What the code should do
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,

        #[command(flatten)]
        language: LanguageArg,

        /// Write the generated code to a file
        #[arg(short = 'w', long, value_name = "PATH")]
        write: Option<String>,
    },
    /// Explain code, estimate complexity, list security issues and rate quality
    Analyze {
        /// Source file (reads from stdin if not provided)
        file: Option<String>,

        #[command(flatten)]
        language: LanguageArg,
    },
    /// Convert code to another language
    Convert {
        /// Source file (reads from stdin if not provided)
        file: Option<String>,

        /// Source language
        #[arg(short = 'f', long = "from")]
        from: Option<String>,

        /// Target language
        #[arg(short = 't', long = "to")]
        to: Option<String>,

        /// Write the converted code to a file
        #[arg(short = 'w', long, value_name = "PATH")]
        write: Option<String>,
    },
    /// Compare two versions of code
    Diff {
        /// Original version
        old: String,

        /// Modified version
        new: String,
    },
    /// Draw the code's control flow as an SVG flowchart
    Flowchart {
        /// Source file (reads from stdin if not provided)
        file: Option<String>,

        /// Write the SVG to a file instead of stdout
        #[arg(short = 'o', long, value_name = "PATH")]
        output: Option<String>,
    },
    /// Simulate running the code and print its console output
    Run {
        /// Source file (reads from stdin if not provided)
        file: Option<String>,

        #[command(flatten)]
        language: LanguageArg,
    },
    /// Interactive workbench session (default when no command is given)
    Session {
        #[command(flatten)]
        language: LanguageArg,

        /// Target language for convert mode
        #[arg(short = 't', long = "to")]
        to: Option<String>,
    },
    /// Configure codecraft settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// List supported languages
    Languages,
    /// List available providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
}
