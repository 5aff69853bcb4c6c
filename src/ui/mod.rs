//! Terminal UI components (spinner, colors, prompt helpers).

use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Check if the inquire error is a user cancellation/interruption.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Wraps a function that uses interactive prompts and handles user cancellation gracefully.
///
/// If the user cancels the prompt (Ctrl+C or Escape), this function prints a newline
/// to clean up the terminal and returns `Ok(())` instead of propagating the error.
pub fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    match f() {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Renders a score out of ten as a fixed-width bar, e.g. `███████░░░`.
///
/// Scores are clamped to `0..=10` and rounded to the nearest cell.
pub fn score_bar(score: f64) -> String {
    let filled = score.clamp(0.0, 10.0).round() as usize;
    format!(
        "{}{}",
        Style::bar("█".repeat(filled)),
        Style::secondary("░".repeat(10 - filled))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_prompt_cancellation_ok() {
        let result = handle_prompt_cancellation(|| Ok(()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_handle_prompt_cancellation_operation_canceled() {
        let result = handle_prompt_cancellation(|| Err(InquireError::OperationCanceled.into()));
        assert!(result.is_ok());
    }

    #[test]
    fn test_handle_prompt_cancellation_other_error() {
        let result = handle_prompt_cancellation(|| Err(anyhow::anyhow!("config write failed")));
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("config write failed"));
    }

    #[test]
    fn test_is_prompt_cancelled() {
        assert!(is_prompt_cancelled(&InquireError::OperationCanceled));
        assert!(is_prompt_cancelled(&InquireError::OperationInterrupted));
        assert!(!is_prompt_cancelled(&InquireError::Custom("test".into())));
    }

    #[test]
    fn test_score_bar_cell_counts() {
        let bar = score_bar(7.0);
        assert_eq!(bar.matches('█').count(), 7);
        assert_eq!(bar.matches('░').count(), 3);
    }

    #[test]
    fn test_score_bar_clamps_out_of_range() {
        assert_eq!(score_bar(42.0).matches('█').count(), 10);
        assert_eq!(score_bar(-3.0).matches('░').count(), 10);
    }
}
