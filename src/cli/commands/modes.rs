//! One-shot mode commands (`generate`, `analyze`, `convert`, `diff`,
//! `flowchart`, `run`).

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::sync::Arc;

use crate::assistant::{CodeAssistant, OpenAiBackend};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::input::InputReader;
use crate::ui::Spinner;
use crate::workbench::{Mode, ResultSlot, Settlement, Workbench, dispatch, render_slot, to_json};

/// Flags shared by every command that talks to a model.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub json: bool,
}

/// What one mode command feeds into the workbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeInput {
    Prompt(String),
    Code(String),
    Versions { old: String, new: String },
}

impl ModeInput {
    /// Reads the code for a single-input mode from a file or stdin.
    pub fn code(file: Option<&str>) -> Result<Self> {
        InputReader::read_non_empty(file, "input code").map(Self::Code)
    }

    /// Reads both versions for diff mode.
    pub fn versions(old: &str, new: &str) -> Result<Self> {
        Ok(Self::Versions {
            old: InputReader::read_non_empty(Some(old), "original code")?,
            new: InputReader::read_non_empty(Some(new), "modified code")?,
        })
    }
}

/// Options for one run of a mode command.
#[derive(Debug, Clone)]
pub struct ModeOptions {
    pub mode: Mode,
    pub input: ModeInput,
    /// Overrides the configured source language.
    pub language: Option<String>,
    /// Overrides the configured conversion target.
    pub to: Option<String>,
    /// Where to write the copyable result (code or SVG).
    pub write: Option<String>,
}

/// Resolves configuration and builds the assistant for it.
pub fn connect(
    global: &GlobalOptions,
    language: Option<String>,
    to: Option<String>,
) -> Result<(ResolvedConfig, CodeAssistant)> {
    let file_config = ConfigManager::new()?.load_or_default()?;
    let options = ResolveOptions {
        provider: global.provider.clone(),
        model: global.model.clone(),
        language,
        to,
    };
    let config = resolve_config(&options, &file_config)?;

    crate::debug!(
        "provider={} model={} endpoint={}",
        config.provider_name,
        config.model,
        config.endpoint
    );

    let backend = OpenAiBackend::new(
        config.endpoint.clone(),
        config.model.clone(),
        config.api_key.clone(),
    );
    let assistant = CodeAssistant::new(Arc::new(backend));
    Ok((config, assistant))
}

/// Loads the inputs into a fresh workbench switched to `mode`.
pub fn prepare_workbench(config: &ResolvedConfig, mode: Mode, input: ModeInput) -> Workbench {
    let mut workbench = Workbench::new(config.language, config.target_language);
    workbench.select_mode(mode);

    match input {
        ModeInput::Prompt(prompt) => workbench.set_prompt(prompt),
        ModeInput::Code(code) => workbench.set_input_code(code),
        ModeInput::Versions { old, new } => {
            workbench.set_input_code(old);
            workbench.set_secondary_code(new);
        }
    }

    workbench
}

pub async fn run_mode(global: &GlobalOptions, options: ModeOptions) -> Result<()> {
    let (config, assistant) = connect(global, options.language, options.to)?;
    let mut workbench = prepare_workbench(&config, options.mode, options.input);

    execute(&assistant, &mut workbench).await?;
    emit(workbench.slot(), global.json, options.write.as_deref())
}

/// Runs the workbench's action with a spinner and turns alerts into errors.
pub async fn execute(assistant: &CodeAssistant, workbench: &mut Workbench) -> Result<()> {
    let mode = workbench.mode();
    let Some(pending) = workbench.begin_action()? else {
        bail!("Error: Nothing to {}", mode.action_label().to_lowercase());
    };

    let spinner = Spinner::new(mode.progress_message());
    let outcome = dispatch(assistant, pending.request()).await;
    spinner.stop();
    crate::output::flush_stderr();

    match workbench.settle(pending, outcome) {
        Settlement::Applied | Settlement::Discarded => {}
        Settlement::Alert { message, error } => {
            return Err(anyhow::Error::new(error).context(message));
        }
    }

    if mode == Mode::Flowchart && workbench.slot().is_empty() {
        bail!("No flowchart was generated. Run with --verbose for details.");
    }

    Ok(())
}

/// Prints or writes the result.
///
/// With `write`, the copyable part (code or SVG) goes to the file and the
/// rest of the view is still printed. A flowchart without `write` prints
/// raw SVG so it can be redirected.
pub fn emit(slot: &ResultSlot, json: bool, write: Option<&str>) -> Result<()> {
    if let Some(path) = write {
        let text = slot
            .copyable()
            .context("This result has nothing to write to a file")?;
        crate::fs::atomic_write(Path::new(path), text)?;
        crate::status!("Saved to {path}");
    }

    if json {
        let value = to_json(slot);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    match slot {
        ResultSlot::Flowchart(_) if write.is_some() => {}
        ResultSlot::Flowchart(svg) => println!("{svg}"),
        _ => print!("{}", render_slot(slot)),
    }

    Ok(())
}
