//! Static catalogs: documentation sources, answer directives and databases.
//!
//! All tables are `'static` and read-only. Lookups are by id; anything that
//! produces a list walks the tables in declaration order.

mod data;

use crate::models::{Database, Directive, DocumentationCategory, DocumentationSource};

pub use data::PERSONALITY_GROUP;

pub fn categories() -> &'static [DocumentationCategory] {
    data::CATEGORIES
}

pub fn directives() -> &'static [Directive] {
    data::DIRECTIVES
}

pub fn databases() -> &'static [Database] {
    data::DATABASES
}

/// All documentation sources, flattened in category order.
pub fn sources() -> impl Iterator<Item = &'static DocumentationSource> {
    categories().iter().flat_map(|c| c.docs.iter())
}

pub fn find_directive(id: &str) -> Option<&'static Directive> {
    directives().iter().find(|d| d.matches(id))
}

pub fn find_database(id: &str) -> Option<&'static Database> {
    databases().iter().find(|d| d.id == id)
}

pub fn default_database() -> &'static Database {
    &data::DATABASES[0]
}

/// Display names of the selected sources, in catalog order.
pub fn stack_names<S: AsRef<str>>(selected: &[S]) -> Vec<&'static str> {
    sources()
        .filter(|s| selected.iter().any(|id| id.as_ref() == s.id))
        .map(|s| s.name)
        .collect()
}

/// Matched directives for the selection, in catalog order. Unknown ids are dropped,
/// and a directive picked by both its id and an alias appears once.
pub fn selected_directives<S: AsRef<str>>(selected: &[S]) -> Vec<&'static Directive> {
    directives()
        .iter()
        .filter(|d| selected.iter().any(|id| d.matches(id.as_ref())))
        .collect()
}

/// Whether the selection includes a directive of `group`.
pub fn selects_group<S: AsRef<str>>(selected: &[S], group: &str) -> bool {
    selected_directives(selected)
        .iter()
        .any(|d| d.group == Some(group))
}

/// Pairs of selected directives that share an exclusive group.
pub fn conflicting_directives<S: AsRef<str>>(
    selected: &[S],
) -> Vec<(&'static Directive, &'static Directive)> {
    let chosen = selected_directives(selected);
    let mut conflicts = Vec::new();
    for (i, a) in chosen.iter().enumerate() {
        for b in &chosen[i + 1..] {
            if a.group.is_some() && a.group == b.group {
                conflicts.push((*a, *b));
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn source_ids_are_unique() {
        let ids: Vec<_> = sources().map(|s| s.id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn directive_ids_are_unique() {
        let ids: Vec<_> = directives().iter().map(|d| d.id).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len());
    }

    #[test]
    fn stack_names_follow_catalog_order() {
        let names = stack_names(&["prisma-docs", "reactjs-docs", "nextjs-docs"]);
        assert_eq!(names, vec!["Next.js", "React", "Prisma"]);
    }

    #[test]
    fn stack_names_ignore_unknown_ids() {
        assert!(stack_names(&["cobol-docs"]).is_empty());
    }

    #[test]
    fn personalities_conflict_with_each_other() {
        let conflicts = conflicting_directives(&["yoda", "pirate"]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].0.id, "pirate");
        assert_eq!(conflicts[0].1.id, "yoda");
    }

    #[test]
    fn independent_directives_do_not_conflict() {
        assert!(conflicting_directives(&["eli5", "glados"]).is_empty());
    }

    #[test]
    fn aliases_do_not_clash_with_ids() {
        for directive in directives() {
            for alias in directive.aliases {
                assert!(find_directive(alias).map(|d| d.id) == Some(directive.id));
            }
        }
    }

    #[test]
    fn id_and_alias_select_one_directive() {
        let chosen = selected_directives(&["pirate", "pirate-personality"]);
        assert_eq!(chosen.len(), 1);
        assert!(conflicting_directives(&["pirate", "pirate-personality"]).is_empty());
    }

    #[test]
    fn detects_a_selected_personality() {
        assert!(selects_group(&["eli5", "rap-song"], PERSONALITY_GROUP));
        assert!(!selects_group(&["eli5"], PERSONALITY_GROUP));
    }

    #[test]
    fn default_database_is_first_entry() {
        assert_eq!(default_database().id, "askyourstack");
        assert_eq!(find_database("askyourstack").map(|d| d.lookup_table), Some("content"));
        assert!(find_database("nope").is_none());
    }
}
