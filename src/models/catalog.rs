use serde::Serialize;

/// A group of documentation sources shown together in the UI.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentationCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub docs: &'static [DocumentationSource],
}

/// A documentation site indexed by the provider.
///
/// The `id` is stored in the `website` column of every indexed page, which is
/// what the search filter matches against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationSource {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_question: Option<&'static str>,
}

/// A toggleable setting that injects a rule into the provider prompt.
#[derive(Debug, Clone, Serialize)]
pub struct Directive {
    pub id: &'static str,
    pub display: &'static str,
    /// Instruction text appended verbatim to the rule list.
    pub rule: &'static str,
    /// Closing remark shown after an answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epilog: Option<&'static str>,
    /// Directives sharing a group are mutually exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<&'static str>,
    /// Older setting ids that select this directive.
    #[serde(skip_serializing_if = "no_aliases")]
    pub aliases: &'static [&'static str],
}

fn no_aliases(aliases: &&'static [&'static str]) -> bool {
    aliases.is_empty()
}

impl Directive {
    /// Whether `id` names this directive, directly or through an alias.
    pub fn matches(&self, id: &str) -> bool {
        self.id == id || self.aliases.iter().any(|alias| *alias == id)
    }
}

/// A provider database and the table holding the documentation pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(skip)]
    pub url: &'static str,
    #[serde(skip)]
    pub lookup_table: &'static str,
}
