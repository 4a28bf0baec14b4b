use serde::{Deserialize, Serialize};

use super::{Database, Directive, DocumentationCategory};

/// A documentation page returned by `POST /api/docs-get`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    pub website: String,
}

/// Body of `POST /api/docs-get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocsGetBody {
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// A database entry in the catalog response, with its indexed page count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSummary {
    #[serde(flatten)]
    pub database: Database,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_count: Option<u64>,
}

/// Everything a UI needs to render the selection form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub databases: Vec<DatabaseSummary>,
    pub doc_sections: &'static [DocumentationCategory],
    pub directives: &'static [Directive],
}
