//! Narrative event surface.
//!
//! The simulation produces human-readable messages tagged with a category;
//! an external message log / UI renders them. This core only ever produces
//! the text and category, never any presentation.

/// Category tag consumed by the message UI for styling and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventCategory {
    /// Status effect applied, refreshed, or expired.
    Buff,
    /// The player took damage.
    PlayerDamage,
    /// An NPC died.
    NpcDeath,
}

/// One narrative event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogMessage {
    pub text: String,
    pub category: EventCategory,
}

impl LogMessage {
    pub fn new(text: impl Into<String>, category: EventCategory) -> Self {
        Self {
            text: text.into(),
            category,
        }
    }
}

/// Ordered collection of narrative events awaiting consumption.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    messages: Vec<LogMessage>,
}

impl MessageLog {
    pub fn push(&mut self, message: LogMessage) {
        self.messages.push(message);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogMessage> {
        self.messages.iter()
    }

    pub fn last(&self) -> Option<&LogMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Hands all queued messages to the consumer, leaving the log empty.
    pub fn drain(&mut self) -> Vec<LogMessage> {
        std::mem::take(&mut self.messages)
    }
}
