//! Turns the user's selections into the provider's prompt configuration.

use crate::catalog;
use crate::models::{AnyOf, AskBody, ProviderOptions, SearchFilter, SearchOptions, SearchType};

/// Keyword search tolerance for approximate matches.
pub const FUZZINESS: u8 = 1;

const BASE_RULES: [&str; 2] = [
    "You are a chat bot that answers questions for developers by searching existing documentation.",
    "Aim to answer in 2 or 3 paragraphs, formatted as markdown.",
];

/// Build provider options for the selected documentation sources and directives.
///
/// Rules are ordered: the fixed base rules, then the stack rule (if any
/// selected source is known), then matched directive rules in catalog order.
/// The search filter lists exactly the selected source ids and is omitted
/// when nothing is selected.
pub fn assemble<D, S>(docs: &[D], directives: &[S]) -> ProviderOptions
where
    D: AsRef<str>,
    S: AsRef<str>,
{
    let mut rules: Vec<String> = BASE_RULES.iter().map(|r| r.to_string()).collect();

    let stack = catalog::stack_names(docs);
    if !stack.is_empty() {
        rules.push(format!(
            "You are helping a developer that is using the following stack: {}",
            stack.join(", ")
        ));
    }

    rules.extend(
        catalog::selected_directives(directives)
            .into_iter()
            .map(|d| d.rule.to_string()),
    );

    let filter = (!docs.is_empty()).then(|| SearchFilter {
        website: AnyOf {
            any: docs.iter().map(|d| d.as_ref().to_string()).collect(),
        },
    });

    ProviderOptions {
        rules,
        search_type: SearchType::Keyword,
        search: SearchOptions {
            fuzziness: FUZZINESS,
            filter,
        },
    }
}

impl From<&AskBody> for ProviderOptions {
    fn from(body: &AskBody) -> Self {
        assemble(
            body.selected_docs().as_slice(),
            body.selected_directives().as_slice(),
        )
    }
}
