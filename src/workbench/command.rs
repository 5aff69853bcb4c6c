use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
pub const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/mode", "Switch mode (generate, analyze, convert, diff, flowchart, run)"),
    ("/lang", "Set the source language"),
    ("/to", "Set the target language for convert"),
    ("/load", "Load the input code from a file"),
    ("/load2", "Load the new version for diff from a file"),
    ("/edit", "Edit the input code in $EDITOR"),
    ("/edit2", "Edit the new version for diff in $EDITOR"),
    ("/run", "Run the current mode's action"),
    ("/show", "Show inputs and the current result"),
    ("/copy", "Copy the result to the clipboard"),
    ("/save", "Save the result to a file"),
    ("/clear", "Clear prompt and inputs"),
    ("/config", "Show current configuration"),
    ("/help", "Show available commands"),
    ("/quit", "Exit the session"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types. Arguments are kept raw; the session validates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Mode(Option<String>),
    Lang(Option<String>),
    To(Option<String>),
    Load(Option<String>),
    LoadSecondary(Option<String>),
    Edit,
    EditSecondary,
    Run,
    Show,
    Copy,
    Save(Option<String>),
    Clear,
    Config,
    Help,
    Quit,
    Unknown(String),
}

/// Input types
#[derive(Debug)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

/// Classifies one line of REPL input.
///
/// Text keeps its leading whitespace so indented code survives line-by-line
/// entry. A line starting with `//` is a comment, not a command.
pub fn parse_input(input: &str) -> Input {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Input::Empty;
    }

    match trimmed.strip_prefix('/') {
        Some(cmd) if !cmd.starts_with('/') => parse_slash_command(cmd),
        _ => Input::Text(input.trim_end_matches(['\r', '\n']).to_string()),
    }
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, rest)| (name, rest.trim()));
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    let command = match name {
        "mode" | "m" => SlashCommand::Mode(arg),
        "lang" | "language" => SlashCommand::Lang(arg),
        "to" => SlashCommand::To(arg),
        "load" => SlashCommand::Load(arg),
        "load2" => SlashCommand::LoadSecondary(arg),
        "edit" => SlashCommand::Edit,
        "edit2" => SlashCommand::EditSecondary,
        "run" | "go" => SlashCommand::Run,
        "show" => SlashCommand::Show,
        "copy" => SlashCommand::Copy,
        "save" => SlashCommand::Save(arg),
        "clear" => SlashCommand::Clear,
        "config" => SlashCommand::Config,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.split_whitespace().collect::<Vec<_>>().join(" ")),
    };

    Input::Command(command)
}
