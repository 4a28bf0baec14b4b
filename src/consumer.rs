//! Client side of the answer stream.
//!
//! [`AnswerAccumulator`] folds relayed messages into the displayed answer.
//! [`Conversation`] adds a generation counter on top so that events from a
//! superseded question are dropped instead of leaking into the new answer.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::AnswerMessage;

/// What a single message changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Text appended to the answer.
    Fragment(String),
    /// The answer is complete; these pages were used as context.
    References(Vec<String>),
    /// Nothing changed (unparseable, unknown, stale or after the references).
    Ignored,
}

/// Accumulated state of one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerAccumulator {
    answer: String,
    records: Vec<String>,
    loading: bool,
    finished: bool,
}

impl Default for AnswerAccumulator {
    fn default() -> Self {
        Self {
            answer: String::new(),
            records: Vec::new(),
            loading: true,
            finished: false,
        }
    }
}

impl AnswerAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, message: AnswerMessage) -> Update {
        if self.finished {
            return Update::Ignored;
        }
        match message {
            AnswerMessage::References { records } => {
                self.records = records.clone();
                self.finished = true;
                self.loading = false;
                Update::References(records)
            }
            AnswerMessage::Answer { answer, done } => {
                self.answer.push_str(&answer);
                self.loading = !done;
                Update::Fragment(answer)
            }
            AnswerMessage::Other(_) => Update::Ignored,
        }
    }

    /// Apply the raw `data` of an event; payloads that fail to parse are ignored.
    pub fn apply_data(&mut self, data: &str) -> Update {
        match serde_json::from_str::<AnswerMessage>(data) {
            Ok(message) => self.apply(message),
            Err(e) => {
                tracing::debug!("Ignoring unparseable event: {}", e);
                Update::Ignored
            }
        }
    }

    /// The stream closed; whatever arrived is the answer.
    pub fn close(&mut self) {
        self.loading = false;
    }

    /// The answer so far, or `None` before the first fragment.
    pub fn answer(&self) -> Option<&str> {
        (!self.answer.is_empty()).then_some(self.answer.as_str())
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Identifies one question within a [`Conversation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic generation counter for issued questions.
#[derive(Debug, Default)]
pub struct AskGenerations {
    current: AtomicU64,
}

impl AskGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding all earlier tickets.
    pub fn begin(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }
}

/// Displayed answer state across successive questions.
#[derive(Debug, Default)]
pub struct Conversation {
    generations: AskGenerations,
    answer: AnswerAccumulator,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the displayed answer for a new question.
    pub fn start(&mut self) -> Ticket {
        self.answer = AnswerAccumulator::new();
        self.generations.begin()
    }

    /// Apply an event received for `ticket`, dropping it if a newer question started.
    pub fn receive(&mut self, ticket: Ticket, data: &str) -> Update {
        if !self.generations.is_current(ticket) {
            return Update::Ignored;
        }
        self.answer.apply_data(data)
    }

    /// The stream for `ticket` closed.
    pub fn close(&mut self, ticket: Ticket) {
        if self.generations.is_current(ticket) {
            self.answer.close();
        }
    }

    pub fn answer(&self) -> &AnswerAccumulator {
        &self.answer
    }
}
