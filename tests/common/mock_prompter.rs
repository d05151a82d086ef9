/*!
 * Scripted prompter for testing
 *
 * Replays canned answers instead of reading the terminal, and records every
 * question and informational line so tests can assert on the dialogue.
 */

use std::collections::VecDeque;

use submerger::errors::PairingError;
use submerger::prompt::Prompter;

/// One canned answer
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Input(String),
}

/// Prompter that answers from a script
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Questions asked, in order
    pub asked: Vec<String>,
    /// Informational lines shown, in order
    pub shown: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Number of numbered-selection questions asked
    pub fn selection_prompts(&self) -> usize {
        self.asked.iter().filter(|q| q.starts_with("Select matching file")).count()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool, PairingError> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Confirm(value)) => Ok(value),
            other => Err(PairingError::Prompt(format!("expected confirm answer for '{}', got {:?}", message, other))),
        }
    }

    fn input(&mut self, message: &str) -> Result<String, PairingError> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(Answer::Input(value)) => Ok(value),
            other => Err(PairingError::Prompt(format!("expected input answer for '{}', got {:?}", message, other))),
        }
    }

    fn show(&mut self, message: &str) {
        self.shown.push(message.to_string());
    }
}
