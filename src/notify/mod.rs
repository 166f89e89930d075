//! Webhook notifications.
//!
//! - [`card`] - the `MessageCard` payload model
//! - [`render`] - turning reports into cards
//! - [`webhook`] - blocking HTTP delivery
//! - [`mock`] - a recording [`Notifier`] for tests

pub mod card;
pub mod mock;
pub mod render;
pub mod webhook;

pub use card::{Fact, MessageCard, Section};
pub use mock::RecordingNotifier;
pub use render::{
    compatibility_card, failure_card, package_version_card, report_table, resource_card,
    ReportStyle,
};
pub use webhook::WebhookClient;

use crate::error::Result;

/// Destination for rendered cards.
pub trait Notifier {
    /// Deliver one card. Not retried on failure.
    fn send(&self, card: &MessageCard) -> Result<()>;
}
