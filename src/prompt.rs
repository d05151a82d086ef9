/*!
 * Interactive prompts.
 *
 * Batch mode asks the operator to confirm matches, pick files and name outputs.
 * All of that goes through the `Prompter` trait so the pairing and controller
 * logic can run against scripted answers.
 */

use dialoguer::{Confirm, Input};
use crate::errors::{PairingError, SelectionError};

/// Source of operator answers
pub trait Prompter {
    /// Yes/no question; `default` is returned on an empty answer
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PairingError>;

    /// Free-form line of text, possibly empty
    fn input(&mut self, message: &str) -> Result<String, PairingError>;

    /// Informational line shown to the operator
    fn show(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Parse a 1-based selection among `count` items into a 0-based index
pub fn parse_selection(answer: &str, count: usize) -> Result<usize, SelectionError> {
    let selection: usize = answer.trim().parse()
        .map_err(|_| SelectionError::NotANumber(answer.trim().to_string()))?;

    if selection == 0 || selection > count {
        return Err(SelectionError::OutOfRange { selection, max: count });
    }

    Ok(selection - 1)
}

/// Ask until the operator gives a valid 1-based selection
pub fn select_index(prompter: &mut dyn Prompter, message: &str, count: usize) -> Result<usize, PairingError> {
    loop {
        let answer = prompter.input(message)?;
        if answer.trim().is_empty() {
            continue;
        }
        match parse_selection(&answer, count) {
            Ok(index) => return Ok(index),
            Err(e) => prompter.show(&e.to_string()),
        }
    }
}

/// Prompts on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PairingError> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact()
            .map_err(|e| PairingError::Prompt(e.to_string()))
    }

    fn input(&mut self, message: &str) -> Result<String, PairingError> {
        Input::<String>::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PairingError::Prompt(e.to_string()))
    }
}
