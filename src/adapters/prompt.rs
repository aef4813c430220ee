use crate::domain::ports::Confirm;
use crate::utils::error::{ChoreError, Result};
use std::io::{BufRead, Write};

/// `y`/`yes` in any case confirms; anything else declines.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> Result<bool> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut answer = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(|e| ChoreError::Prompt {
                message: e.to_string(),
            })?;
        Ok(is_affirmative(&answer))
    }
}
