//! Confirmation before mass deletion.

use crate::error::ApiError;

/// Asks the user a yes/no question.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool, ApiError>;
}

/// Interactive terminal prompt. Defaults to "no".
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> Result<bool, ApiError> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| ApiError::PromptError(format!("Failed to get user input: {}", e)))
    }
}

/// Fixed answer, for `--yes` and non-interactive callers.
#[derive(Debug, Clone, Copy)]
pub struct AssumeAnswer(pub bool);

impl Confirmer for AssumeAnswer {
    fn confirm(&self, prompt: &str) -> Result<bool, ApiError> {
        tracing::debug!(answer = self.0, "Auto-answering prompt: {}", prompt);
        Ok(self.0)
    }
}

/// "attachment" or "attachments".
pub fn attachment_noun(count: usize) -> &'static str {
    if count == 1 {
        "attachment"
    } else {
        "attachments"
    }
}

/// Prompt shown before deleting `count` files. Names are never listed.
pub fn deletion_prompt(count: usize) -> String {
    format!(
        "Delete {} unused {} from attachments/? Are you sure? This cannot be undone!",
        count,
        attachment_noun(count)
    )
}
