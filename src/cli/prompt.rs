//! Interactive prompt seam
//!
//! Wizards talk to the terminal through [`UserInput`] so command flows
//! can be exercised with scripted answers in tests.

use dialoguer::{Confirm, Input, MultiSelect, Select};
use trellis_core::{TrellisError, TrellisResult};

pub trait UserInput {
    fn prompt_string(&self, prompt: &str, default: Option<&str>, allow_empty: bool)
        -> TrellisResult<String>;
    fn prompt_confirm(&self, prompt: &str, default: bool) -> TrellisResult<bool>;
    fn prompt_select(&self, prompt: &str, items: &[String], default: usize) -> TrellisResult<usize>;
    fn prompt_multiselect(&self, prompt: &str, items: &[String]) -> TrellisResult<Vec<usize>>;
}

/// Real implementation using dialoguer
pub struct DialoguerInput;

fn input_error(e: dialoguer::Error) -> TrellisError {
    TrellisError::Config(format!("Failed to read input: {}", e))
}

impl UserInput for DialoguerInput {
    fn prompt_string(
        &self,
        prompt: &str,
        default: Option<&str>,
        allow_empty: bool,
    ) -> TrellisResult<String> {
        let mut input = Input::new().with_prompt(prompt).allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input.interact_text().map_err(input_error)
    }

    fn prompt_confirm(&self, prompt: &str, default: bool) -> TrellisResult<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(input_error)
    }

    fn prompt_select(&self, prompt: &str, items: &[String], default: usize) -> TrellisResult<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()
            .map_err(input_error)
    }

    fn prompt_multiselect(&self, prompt: &str, items: &[String]) -> TrellisResult<Vec<usize>> {
        MultiSelect::new()
            .with_prompt(prompt)
            .items(items)
            .interact()
            .map_err(input_error)
    }
}

/// Scripted input for tests: pops pre-baked answers in order.
#[cfg(test)]
pub mod scripted {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    pub enum Answer {
        Text(String),
        Confirm(bool),
        Select(usize),
        MultiSelect(Vec<usize>),
    }

    #[derive(Default)]
    pub struct ScriptedInput {
        answers: Mutex<Vec<Answer>>,
    }

    impl ScriptedInput {
        pub fn new(mut answers: Vec<Answer>) -> Self {
            answers.reverse();
            Self {
                answers: Mutex::new(answers),
            }
        }

        fn pop(&self) -> TrellisResult<Answer> {
            self.answers
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| TrellisError::Config("No scripted answer left".to_string()))
        }
    }

    impl UserInput for ScriptedInput {
        fn prompt_string(
            &self,
            _prompt: &str,
            default: Option<&str>,
            _allow_empty: bool,
        ) -> TrellisResult<String> {
            match self.pop()? {
                Answer::Text(s) if s.is_empty() => Ok(default.unwrap_or_default().to_string()),
                Answer::Text(s) => Ok(s),
                other => Err(TrellisError::Config(format!(
                    "Expected text answer, got {:?}",
                    other
                ))),
            }
        }

        fn prompt_confirm(&self, _prompt: &str, _default: bool) -> TrellisResult<bool> {
            match self.pop()? {
                Answer::Confirm(b) => Ok(b),
                other => Err(TrellisError::Config(format!(
                    "Expected confirm answer, got {:?}",
                    other
                ))),
            }
        }

        fn prompt_select(
            &self,
            _prompt: &str,
            _items: &[String],
            _default: usize,
        ) -> TrellisResult<usize> {
            match self.pop()? {
                Answer::Select(i) => Ok(i),
                other => Err(TrellisError::Config(format!(
                    "Expected select answer, got {:?}",
                    other
                ))),
            }
        }

        fn prompt_multiselect(&self, _prompt: &str, _items: &[String]) -> TrellisResult<Vec<usize>> {
            match self.pop()? {
                Answer::MultiSelect(v) => Ok(v),
                other => Err(TrellisError::Config(format!(
                    "Expected multiselect answer, got {:?}",
                    other
                ))),
            }
        }
    }
}
