//! The code workbench: six modes over one shared set of inputs.
//!
//! [`Workbench`] holds the presentation state and drives each action through
//! the assistant. [`Session`] is the interactive REPL on top of it; the
//! one-shot subcommands drive the same controller without a prompt loop.

/// Slash command parsing and autocomplete.
pub mod command;
mod mode;
mod render;
mod session;
mod state;
mod ui;

pub use mode::Mode;
pub use render::{render_slot, to_json};
pub use session::Session;
pub use state::{
    ALERT_MESSAGE, ActionRequest, PendingAction, ResultSlot, Settlement, Workbench,
    WorkbenchError, dispatch,
};
