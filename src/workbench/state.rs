//! UI state and the action lifecycle.
//!
//! An action goes through [`Workbench::begin_action`], one assistant call,
//! and [`Workbench::settle`] (or [`Workbench::abandon`]). The
//! [`PendingAction`] token is consumed on settlement, so the loading flag is
//! cleared exactly once per action. Every mode switch or input edit bumps a
//! generation counter; a response for an older generation is discarded.

use anyhow::Result;

use super::mode::Mode;
use crate::assistant::{
    AssistantError, CodeAnalysis, CodeAssistant, DEFAULT_LANGUAGE, DEFAULT_TARGET_LANGUAGE,
    DiffReport, GeneratedCode, resolve_language,
};

/// Generic message shown when a structured request fails.
pub const ALERT_MESSAGE: &str = "An error occurred. Please check your API key and connection.";

/// The result currently on display. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultSlot {
    #[default]
    Empty,
    Generated(GeneratedCode),
    Analysis(CodeAnalysis),
    Diff(DiffReport),
    Flowchart(String),
    Runner(String),
}

impl ResultSlot {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text offered for copy/save: generated code, SVG markup or console output.
    pub fn copyable(&self) -> Option<&str> {
        match self {
            Self::Generated(result) => Some(&result.code),
            Self::Flowchart(svg) => Some(svg),
            Self::Runner(output) => Some(output),
            Self::Empty | Self::Analysis(_) | Self::Diff(_) => None,
        }
    }
}

/// Snapshot of the inputs one action needs, taken when the action begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Generate {
        prompt: String,
        language: &'static str,
    },
    Analyze {
        code: String,
        language: &'static str,
    },
    Convert {
        code: String,
        from: &'static str,
        to: &'static str,
    },
    Diff {
        old_code: String,
        new_code: String,
    },
    Flowchart {
        code: String,
    },
    Runner {
        code: String,
        language: &'static str,
    },
}

impl ActionRequest {
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Generate { .. } => Mode::Generate,
            Self::Analyze { .. } => Mode::Analyze,
            Self::Convert { .. } => Mode::Convert,
            Self::Diff { .. } => Mode::Diff,
            Self::Flowchart { .. } => Mode::Flowchart,
            Self::Runner { .. } => Mode::Runner,
        }
    }
}

/// Calls the one assistant operation matching the request's mode.
///
/// Flowchart and runner never fail; their fallbacks arrive as `Ok`.
pub async fn dispatch(
    assistant: &CodeAssistant,
    request: &ActionRequest,
) -> Result<ResultSlot, AssistantError> {
    Ok(match request {
        ActionRequest::Generate { prompt, language } => {
            ResultSlot::Generated(assistant.generate(prompt, language).await?)
        }
        ActionRequest::Analyze { code, language } => {
            ResultSlot::Analysis(assistant.analyze(code, language).await?)
        }
        ActionRequest::Convert { code, from, to } => {
            ResultSlot::Generated(assistant.convert(code, from, to).await?)
        }
        ActionRequest::Diff { old_code, new_code } => {
            ResultSlot::Diff(assistant.compare_versions(old_code, new_code).await?)
        }
        ActionRequest::Flowchart { code } => {
            ResultSlot::Flowchart(assistant.generate_flowchart_svg(code).await)
        }
        ActionRequest::Runner { code, language } => {
            ResultSlot::Runner(assistant.simulate_runner(code, language).await)
        }
    })
}

/// An action in flight. Must be handed back to the workbench exactly once.
#[derive(Debug)]
#[must_use = "a pending action must be settled or abandoned"]
pub struct PendingAction {
    generation: u64,
    request: ActionRequest,
}

impl PendingAction {
    pub const fn request(&self) -> &ActionRequest {
        &self.request
    }
}

/// What settling an action did to the view.
#[derive(Debug)]
pub enum Settlement {
    /// The result replaced the slot.
    Applied,
    /// The mode or inputs changed while the request was in flight; result dropped.
    Discarded,
    /// The request failed; the slot is unchanged.
    Alert {
        message: &'static str,
        error: AssistantError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WorkbenchError {
    #[error("A request is already in flight")]
    Busy,
}

/// The presentation controller: inputs, selection, result slot, loading flag.
#[derive(Debug)]
pub struct Workbench {
    mode: Mode,
    prompt: String,
    input_code: String,
    secondary_code: String,
    language: &'static str,
    target_language: &'static str,
    slot: ResultSlot,
    loading: bool,
    generation: u64,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_TARGET_LANGUAGE)
    }
}

impl Workbench {
    pub fn new(language: &'static str, target_language: &'static str) -> Self {
        Self {
            mode: Mode::default(),
            prompt: String::new(),
            input_code: String::new(),
            secondary_code: String::new(),
            language,
            target_language,
            slot: ResultSlot::Empty,
            loading: false,
            generation: 0,
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn input_code(&self) -> &str {
        &self.input_code
    }

    pub fn secondary_code(&self) -> &str {
        &self.secondary_code
    }

    pub const fn language(&self) -> &'static str {
        self.language
    }

    pub const fn target_language(&self) -> &'static str {
        self.target_language
    }

    pub const fn slot(&self) -> &ResultSlot {
        &self.slot
    }

    /// Whether the action control is disabled.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Switches mode, clearing every result. Entering Generate also clears
    /// the primary input, which the generated code will replace.
    pub fn select_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.slot = ResultSlot::Empty;
        if mode == Mode::Generate {
            self.input_code.clear();
        }
        self.supersede();
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
        self.supersede();
    }

    pub fn set_input_code(&mut self, code: impl Into<String>) {
        self.input_code = code.into();
        self.supersede();
    }

    /// Appends one line to the primary input.
    pub fn append_input_line(&mut self, line: &str) {
        if !self.input_code.is_empty() && !self.input_code.ends_with('\n') {
            self.input_code.push('\n');
        }
        self.input_code.push_str(line);
        self.supersede();
    }

    pub fn set_secondary_code(&mut self, code: impl Into<String>) {
        self.secondary_code = code.into();
        self.supersede();
    }

    /// Clears prompt and both inputs.
    pub fn clear_inputs(&mut self) {
        self.prompt.clear();
        self.input_code.clear();
        self.secondary_code.clear();
        self.supersede();
    }

    pub fn set_language(&mut self, name: &str) -> Result<&'static str> {
        self.language = resolve_language(name)?;
        self.supersede();
        Ok(self.language)
    }

    pub fn set_target_language(&mut self, name: &str) -> Result<&'static str> {
        self.target_language = resolve_language(name)?;
        self.supersede();
        Ok(self.target_language)
    }

    /// Starts an action for the current mode.
    ///
    /// Returns `Ok(None)` without changing state when required inputs are
    /// missing: Generate needs a prompt, Diff needs both versions, every other
    /// mode needs the primary input.
    pub fn begin_action(&mut self) -> Result<Option<PendingAction>, WorkbenchError> {
        if self.loading {
            return Err(WorkbenchError::Busy);
        }

        let Some(request) = self.snapshot_request() else {
            return Ok(None);
        };

        self.loading = true;
        Ok(Some(PendingAction {
            generation: self.generation,
            request,
        }))
    }

    /// Settles an action with the assistant's outcome and re-enables the
    /// action control.
    pub fn settle(
        &mut self,
        pending: PendingAction,
        outcome: Result<ResultSlot, AssistantError>,
    ) -> Settlement {
        self.loading = false;

        if pending.generation != self.generation {
            crate::debug!(
                "discarding stale {} response (generation {} < {})",
                pending.request.mode(),
                pending.generation,
                self.generation
            );
            return Settlement::Discarded;
        }

        match outcome {
            Ok(slot) => {
                self.apply(slot);
                Settlement::Applied
            }
            Err(error) => {
                crate::debug!("{} request failed: {error}", pending.request.mode());
                Settlement::Alert {
                    message: ALERT_MESSAGE,
                    error,
                }
            }
        }
    }

    /// Settles a cancelled action without touching the result slot.
    pub fn abandon(&mut self, pending: PendingAction) {
        crate::debug!("abandoned {} request", pending.request.mode());
        self.loading = false;
    }

    /// Begins, dispatches and settles one action.
    ///
    /// Returns `Ok(None)` when the action was a no-op because inputs are missing.
    pub async fn run_action(
        &mut self,
        assistant: &CodeAssistant,
    ) -> Result<Option<Settlement>, WorkbenchError> {
        let Some(pending) = self.begin_action()? else {
            return Ok(None);
        };
        let outcome = dispatch(assistant, pending.request()).await;
        Ok(Some(self.settle(pending, outcome)))
    }

    fn snapshot_request(&self) -> Option<ActionRequest> {
        let code = || (!self.input_code.trim().is_empty()).then(|| self.input_code.clone());

        match self.mode {
            Mode::Generate => (!self.prompt.trim().is_empty()).then(|| ActionRequest::Generate {
                prompt: self.prompt.clone(),
                language: self.language,
            }),
            Mode::Analyze => code().map(|code| ActionRequest::Analyze {
                code,
                language: self.language,
            }),
            Mode::Convert => code().map(|code| ActionRequest::Convert {
                code,
                from: self.language,
                to: self.target_language,
            }),
            Mode::Diff => {
                let old_code = code()?;
                (!self.secondary_code.trim().is_empty()).then(|| ActionRequest::Diff {
                    old_code,
                    new_code: self.secondary_code.clone(),
                })
            }
            Mode::Flowchart => code().map(|code| ActionRequest::Flowchart { code }),
            Mode::Runner => code().map(|code| ActionRequest::Runner {
                code,
                language: self.language,
            }),
        }
    }

    fn apply(&mut self, slot: ResultSlot) {
        self.slot = match slot {
            ResultSlot::Generated(result) => {
                // Generated code becomes the input for a follow-up analysis.
                if self.mode == Mode::Generate {
                    self.input_code.clone_from(&result.code);
                }
                ResultSlot::Generated(result)
            }
            ResultSlot::Flowchart(svg) if svg.trim().is_empty() => ResultSlot::Empty,
            other => other,
        };
    }

    fn supersede(&mut self) {
        self.generation += 1;
    }
}
