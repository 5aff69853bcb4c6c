use anyhow::Result;
use cli_clipboard::{ClipboardContext, ClipboardProvider};
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use inquire::{Editor, InquireError, Select, Text};
use std::path::Path;

use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::mode::Mode;
use super::render::render_slot;
use super::state::{Settlement, Workbench, dispatch};
use super::ui;
use crate::assistant::{CodeAssistant, SUPPORTED_LANGUAGES};
use crate::config::ResolvedConfig;
use crate::input::InputReader;
use crate::ui::{Spinner, is_prompt_cancelled};

/// Which input a `/load` or `/edit` targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Primary,
    Secondary,
}

/// An interactive workbench session.
///
/// Provides a REPL-style interface over a [`Workbench`]: plain text feeds the
/// current mode's input and slash commands switch modes, load files and run
/// actions.
pub struct Session {
    config: ResolvedConfig,
    assistant: CodeAssistant,
    workbench: Workbench,
}

impl Session {
    pub fn new(config: ResolvedConfig, assistant: CodeAssistant) -> Self {
        let workbench = Workbench::new(config.language, config.target_language);
        Self {
            config,
            assistant,
            workbench,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header();
        ui::print_mode(&self.workbench);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new(self.workbench.mode().title())
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("/help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await {
                            break;
                        }
                    }
                    Input::Text(text) => self.handle_text(&text).await,
                },
                Err(ref e) if is_prompt_cancelled(e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    async fn handle_text(&mut self, text: &str) {
        if self.workbench.mode() == Mode::Generate {
            self.workbench.set_prompt(text.trim());
            self.run_action().await;
        } else {
            self.workbench.append_input_line(text);
        }
    }

    async fn handle_command(&mut self, cmd: SlashCommand) -> bool {
        match cmd {
            SlashCommand::Mode(name) => self.select_mode(name.as_deref()),
            SlashCommand::Lang(name) => self.set_language(name.as_deref(), false),
            SlashCommand::To(name) => self.set_language(name.as_deref(), true),
            SlashCommand::Load(path) => self.load(path.as_deref(), Slot::Primary),
            SlashCommand::LoadSecondary(path) => self.load(path.as_deref(), Slot::Secondary),
            SlashCommand::Edit => self.edit(Slot::Primary),
            SlashCommand::EditSecondary => self.edit(Slot::Secondary),
            SlashCommand::Run => self.run_action().await,
            SlashCommand::Show => {
                ui::print_inputs(&self.workbench);
                println!("{}", render_slot(self.workbench.slot()));
            }
            SlashCommand::Copy => self.copy(),
            SlashCommand::Save(path) => self.save(path.as_deref()),
            SlashCommand::Clear => {
                self.workbench.clear_inputs();
                ui::print_success("Inputs cleared");
            }
            SlashCommand::Config => ui::print_config(&self.config, &self.workbench),
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Unknown(cmd) => ui::print_error(&format!("Unknown command: /{cmd}")),
        }
        true
    }

    fn select_mode(&mut self, name: Option<&str>) {
        let mode = match name {
            Some(name) => match name.parse::<Mode>() {
                Ok(mode) => mode,
                Err(e) => return ui::print_error(&e.to_string()),
            },
            None => {
                match Select::new("Mode:", Mode::ALL.map(Mode::title).to_vec()).prompt() {
                    Ok(title) => match Mode::ALL.into_iter().find(|m| m.title() == title) {
                        Some(mode) => mode,
                        None => return,
                    },
                    Err(e) => return report_prompt_error(&e),
                }
            }
        };

        self.workbench.select_mode(mode);
        ui::print_mode(&self.workbench);
    }

    fn set_language(&mut self, name: Option<&str>, target: bool) {
        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let label = if target { "Target language:" } else { "Language:" };
                match Select::new(label, SUPPORTED_LANGUAGES.to_vec()).prompt() {
                    Ok(name) => name.to_string(),
                    Err(e) => return report_prompt_error(&e),
                }
            }
        };

        let result = if target {
            self.workbench.set_target_language(&name)
        } else {
            self.workbench.set_language(&name)
        };

        match result {
            Ok(language) if target => {
                ui::print_success(&format!("Target language set to {language}"));
            }
            Ok(language) => ui::print_success(&format!("Language set to {language}")),
            Err(e) => ui::print_error(&e.to_string()),
        }
    }

    fn load(&mut self, path: Option<&str>, slot: Slot) {
        let Some(path) = path else {
            let usage = match slot {
                Slot::Primary => "Usage: /load <path>",
                Slot::Secondary => "Usage: /load2 <path>",
            };
            return ui::print_error(usage);
        };

        match InputReader::read_file(path) {
            Ok(code) => {
                let lines = code.lines().count();
                self.set_code(slot, code);
                ui::print_success(&format!("Loaded {path} ({lines} lines)"));
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    fn edit(&mut self, slot: Slot) {
        let (message, current) = match slot {
            Slot::Primary => ("Input code:", self.workbench.input_code()),
            Slot::Secondary => ("New version:", self.workbench.secondary_code()),
        };

        let edited = Editor::new(message)
            .with_predefined_text(current)
            .with_help_message("Save and close the editor when done.")
            .prompt();

        match edited {
            Ok(code) => {
                self.set_code(slot, code);
                ui::print_success("Input updated");
            }
            Err(e) => report_prompt_error(&e),
        }
    }

    fn set_code(&mut self, slot: Slot, code: String) {
        match slot {
            Slot::Primary => self.workbench.set_input_code(code),
            Slot::Secondary => self.workbench.set_secondary_code(code),
        }
    }

    /// Runs the current mode's action. Ctrl+C abandons the request.
    async fn run_action(&mut self) {
        let mode = self.workbench.mode();
        let pending = match self.workbench.begin_action() {
            Ok(Some(pending)) => pending,
            Ok(None) => return ui::print_error(missing_input_message(mode)),
            Err(e) => return ui::print_error(&e.to_string()),
        };

        let spinner = Spinner::new(mode.progress_message());
        // Tokio keeps its SIGINT handler installed after the first wait, so a
        // later Ctrl+C outside an inquire prompt no longer ends the process.
        let outcome = tokio::select! {
            outcome = dispatch(&self.assistant, pending.request()) => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        };
        spinner.stop();
        crate::output::flush_stderr();

        let Some(outcome) = outcome else {
            self.workbench.abandon(pending);
            crate::status!("Cancelled.");
            return;
        };

        match self.workbench.settle(pending, outcome) {
            Settlement::Applied => println!("{}", render_slot(self.workbench.slot())),
            Settlement::Discarded => {}
            Settlement::Alert { message, error } => {
                crate::debug!("{error}");
                ui::print_alert(message);
            }
        }
    }

    fn copy(&self) {
        let Some(text) = self.workbench.slot().copyable() else {
            return ui::print_error("Nothing to copy");
        };

        match ClipboardContext::new().and_then(|mut ctx| ctx.set_contents(text.to_string())) {
            Ok(()) => ui::print_success("Copied to clipboard"),
            Err(e) => ui::print_error(&format!("Failed to copy to clipboard: {e}")),
        }
    }

    fn save(&self, path: Option<&str>) {
        let Some(path) = path else {
            return ui::print_error("Usage: /save <path>");
        };
        let Some(text) = self.workbench.slot().copyable() else {
            return ui::print_error("Nothing to save");
        };

        match crate::fs::atomic_write(Path::new(path), text) {
            Ok(()) => ui::print_success(&format!("Saved to {path}")),
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }
}

const fn missing_input_message(mode: Mode) -> &'static str {
    match mode {
        Mode::Generate => "Type a prompt first",
        Mode::Diff => "Both the original and the modified code are required",
        Mode::Analyze | Mode::Convert | Mode::Flowchart | Mode::Runner => "Input code is empty",
    }
}

fn report_prompt_error(err: &InquireError) {
    if !is_prompt_cancelled(err) {
        ui::print_error(&err.to_string());
    }
}
