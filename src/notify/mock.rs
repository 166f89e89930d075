//! Recording notifier for tests.

use std::cell::RefCell;

use super::card::MessageCard;
use super::Notifier;
use crate::error::{EnvCheckError, Result};

/// Captures every card instead of sending it.
///
/// Can be configured to fail, to exercise notification error paths.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<MessageCard>>,
    fail_with: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            sent: RefCell::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    /// Cards sent so far (attempted ones too, for a failing notifier).
    pub fn sent(&self) -> Vec<MessageCard> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, card: &MessageCard) -> Result<()> {
        self.sent.borrow_mut().push(card.clone());
        match &self.fail_with {
            Some(message) => Err(EnvCheckError::Notification {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}
