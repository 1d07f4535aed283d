use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{GitxError, Result};
use crate::ui::Operator;

/// Operator that replays canned answers and records every prompt it was shown
#[derive(Default)]
pub struct ScriptedOperator {
    confirmations: RefCell<VecDeque<bool>>,
    answers: RefCell<VecDeque<String>>,
    composed: Option<String>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedOperator {
    pub fn new() -> Self {
        ScriptedOperator::default()
    }

    /// Queue the answer to the next yes/no question
    pub fn confirm_with(self, answer: bool) -> Self {
        self.confirmations.borrow_mut().push_back(answer);
        self
    }

    /// Queue the answer to the next free-text question
    pub fn answer_with(self, answer: impl Into<String>) -> Self {
        self.answers.borrow_mut().push_back(answer.into());
        self
    }

    pub fn compose_with(mut self, text: impl Into<String>) -> Self {
        self.composed = Some(text.into());
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.confirmations
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| GitxError::prompt(format!("no scripted answer for '{}'", prompt)))
    }

    fn ask(&self, prompt: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| GitxError::prompt(format!("no scripted answer for '{}'", prompt)))
    }

    fn compose(&self, template: &str) -> Result<String> {
        self.prompts.borrow_mut().push(template.to_string());
        self.composed
            .clone()
            .ok_or_else(|| GitxError::prompt("no scripted text to compose"))
    }

    fn say(&self, _text: &str) {}
}
