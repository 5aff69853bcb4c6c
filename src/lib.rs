//! # codecraft - AI Code Workbench
//!
//! `codecraft` is a command-line workbench that sends code to an
//! OpenAI-compatible model endpoint and presents the results. It has six
//! modes: generate code from a prompt, analyze code quality, convert between
//! languages, compare two versions, draw an SVG flowchart, and simulate
//! running the code.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! codecraft
//!
//! # Generate code
//! codecraft generate "binary search over a sorted list" --lang rust
//!
//! # Analyze a file, or code from stdin
//! codecraft analyze ./main.py
//! cat main.py | codecraft analyze --json
//!
//! # Convert Python to TypeScript
//! codecraft convert ./main.py --to ts --write main.ts
//!
//! # Compare two versions
//! codecraft diff old.js new.js
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/codecraft/config.toml`. Without a
//! config file, the built-in `gemini` provider is used with `GEMINI_API_KEY`.
//!
//! ```toml
//! [codecraft]
//! provider = "ollama"
//! model = "qwen2.5-coder:7b"
//! language = "Python"
//! to = "JavaScript"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434/v1"
//! models = ["qwen2.5-coder:7b"]
//! ```

/// Prompt templates, schemas and the model client behind every mode.
pub mod assistant;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// File system utilities.
pub mod fs;

/// Input reading from files and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors, score bars).
pub mod ui;

/// Mode selection, action lifecycle and the interactive session.
pub mod workbench;
