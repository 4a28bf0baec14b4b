use serde::{Deserialize, Serialize};

use super::Directive;
use crate::catalog::{self, PERSONALITY_GROUP};

/// Body of `POST /api/ask`.
///
/// Two client shapes are accepted: a single exclusive `personality`, or a set
/// of `checkedSettings`. When both are sent the selections are merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    pub question: String,
    pub checked_docs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked_settings: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

impl AskBody {
    /// A body is usable when it has a question and at least one settings field.
    pub fn is_valid(&self) -> bool {
        !self.question.trim().is_empty()
            && (self.checked_settings.is_some() || self.personality.is_some())
    }

    /// Selected directive ids, settings first, without duplicates.
    pub fn selected_directives(&self) -> Vec<String> {
        let settings = self.checked_settings.iter().flatten();
        dedup(settings.chain(self.personality.iter()))
    }

    /// Selected documentation ids without duplicates, in request order.
    pub fn selected_docs(&self) -> Vec<String> {
        dedup(self.checked_docs.iter())
    }

    /// The personality this body selects, through either field.
    pub fn selected_personality(&self) -> Option<&'static Directive> {
        catalog::selected_directives(&self.selected_directives())
            .into_iter()
            .find(|d| d.group == Some(PERSONALITY_GROUP))
    }

    /// Set `personality` to `fallback` unless a personality is already selected.
    pub fn or_personality(mut self, fallback: impl Into<String>) -> Self {
        if self.selected_personality().is_none() {
            self.personality = Some(fallback.into());
        }
        self
    }
}

fn dedup<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

/// Prompt configuration sent to the provider alongside the question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderOptions {
    pub rules: Vec<String>,
    pub search_type: SearchType,
    pub search: SearchOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub fuzziness: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
}

/// Restricts search results to pages whose `website` is one of the given ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub website: AnyOf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnyOf {
    #[serde(rename = "$any")]
    pub any: Vec<String>,
}
