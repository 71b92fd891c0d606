use std::collections::BTreeSet;

use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, NormalizedNumber, SenderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Delivery priority, sent to the gateway as its ordinal (`"0"` = highest).
pub enum Priority {
    #[default]
    Highest,
    High,
    Medium,
    Low,
    Lowest,
}

impl Priority {
    /// JSON field name used inside `msgdata` (`priority`).
    pub const FIELD: &'static str = "priority";

    /// Wire ordinal of this priority.
    pub fn code(self) -> u8 {
        match self {
            Self::Highest => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::Lowest => 4,
        }
    }

    /// Inverse of [`Priority::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Highest,
            1 => Self::High,
            2 => Self::Medium,
            3 => Self::Low,
            4 => Self::Lowest,
            _ => return None,
        })
    }
}

/// Gateway API method named in the request envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SendSms,
    Balance,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SendSms => "SendSms",
            Self::Balance => "Balance",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    /// Per-call sender id. `None` falls back to the client's default.
    pub sender_id: Option<SenderId>,
    pub priority: Priority,
}

impl SendOptions {
    /// Set the per-call sender id. A blank value leaves the client default in effect.
    pub fn with_sender_id(mut self, sender_id: impl Into<String>) -> Self {
        self.sender_id = SenderId::new(sender_id).ok();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

#[derive(Debug, Clone)]
/// A send request as given by the caller: raw numbers, validated text and options.
///
/// Invariant: at least one raw number. Numbers are normalized by the client at
/// dispatch time.
pub struct SendSms {
    numbers: Vec<String>,
    message: MessageText,
    options: SendOptions,
}

impl SendSms {
    /// Field name reported when the number list is empty.
    pub const NUMBERS_FIELD: &'static str = "numbers";

    pub fn new<I, S>(
        numbers: I,
        message: MessageText,
        options: SendOptions,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let numbers = numbers.into_iter().map(Into::into).collect::<Vec<_>>();
        if numbers.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::NUMBERS_FIELD,
            });
        }
        Ok(Self {
            numbers,
            message,
            options,
        })
    }

    pub fn numbers(&self) -> &[String] {
        &self.numbers
    }

    pub fn message(&self) -> &MessageText {
        &self.message
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `msgdata` entry: a single destination with the shared text, sender and priority.
pub struct OutboundMessage {
    pub number: NormalizedNumber,
    pub message: MessageText,
    pub sender_id: SenderId,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Messages for one `SendSms` call.
///
/// Invariant: never empty.
pub struct SendBatch {
    messages: Vec<OutboundMessage>,
}

impl SendBatch {
    /// Build one message per number, or `None` when there are no numbers.
    pub fn new(
        numbers: BTreeSet<NormalizedNumber>,
        message: &MessageText,
        sender_id: &SenderId,
        priority: Priority,
    ) -> Option<Self> {
        if numbers.is_empty() {
            return None;
        }
        let messages = numbers
            .into_iter()
            .map(|number| OutboundMessage {
                number,
                message: message.clone(),
                sender_id: sender_id.clone(),
                priority,
            })
            .collect();
        Some(Self { messages })
    }

    pub fn messages(&self) -> &[OutboundMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
