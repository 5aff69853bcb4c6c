//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// One-shot mode command handlers.
pub mod modes;

/// Provider listing command handler.
pub mod providers;

/// Interactive session command handler.
pub mod session;
