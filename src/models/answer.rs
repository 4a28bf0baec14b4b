use serde::{Deserialize, Serialize};

/// One message of the provider's answer stream.
///
/// A stream is a run of [`AnswerMessage::Answer`] fragments closed by at most
/// one [`AnswerMessage::References`]. Any other JSON the provider emits is
/// kept as [`AnswerMessage::Other`] and relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerMessage {
    /// Ids of the documentation pages used as context. Always last.
    References { records: Vec<String> },
    /// A fragment of the markdown answer.
    Answer {
        answer: String,
        #[serde(default)]
        done: bool,
    },
    Other(serde_json::Value),
}

impl AnswerMessage {
    pub fn answer(text: impl Into<String>, done: bool) -> Self {
        Self::Answer {
            answer: text.into(),
            done,
        }
    }

    pub fn references<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::References {
            records: records.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this message ends the answer.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::References { .. })
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Self::References { records } => serde_json::json!({ "records": records }),
            Self::Answer { answer, done } => serde_json::json!({ "answer": answer, "done": done }),
            Self::Other(value) => value.clone(),
        }
    }
}

/// A provider message exactly as it arrived, plus its typed view.
///
/// The relay forwards [`ProviderMessage::payload`] untouched; fields the typed
/// view does not know about survive the trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderMessage {
    payload: String,
    message: AnswerMessage,
}

impl ProviderMessage {
    /// Parse one event payload. Payloads spanning several lines are compacted
    /// so they still fit a single `data:` line.
    pub fn parse(data: &str) -> Result<Self, serde_json::Error> {
        let message = serde_json::from_str(data)?;
        let payload = if data.contains('\n') || data.contains('\r') {
            serde_json::from_str::<serde_json::Value>(data)?.to_string()
        } else {
            data.trim().to_string()
        };
        Ok(Self { payload, message })
    }

    /// Compact JSON text of the message.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn message(&self) -> &AnswerMessage {
        &self.message
    }

    pub fn into_message(self) -> AnswerMessage {
        self.message
    }

    pub fn is_terminal(&self) -> bool {
        self.message.is_terminal()
    }
}

impl From<AnswerMessage> for ProviderMessage {
    fn from(message: AnswerMessage) -> Self {
        Self {
            payload: message.to_json().to_string(),
            message,
        }
    }
}
