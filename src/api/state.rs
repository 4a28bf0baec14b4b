use std::collections::HashMap;
use std::sync::Arc;

use crate::catalog;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::Database;
use crate::provider::{AskProvider, XataClient};

/// Shared, read-only handler state: one provider per catalog database.
#[derive(Clone, Default)]
pub struct AppState {
    providers: Arc<HashMap<&'static str, Arc<dyn AskProvider>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect every catalog database to the hosted provider.
    pub fn from_config(config: &AppConfig) -> Self {
        catalog::databases().iter().fold(Self::new(), |state, database| {
            let client = XataClient::new(
                database.url,
                config.branch.clone(),
                Some(config.api_key.clone()),
            );
            state.with_provider(database.id, Arc::new(client))
        })
    }

    /// Register the provider serving `database_id`.
    pub fn with_provider(mut self, database_id: &'static str, provider: Arc<dyn AskProvider>) -> Self {
        Arc::make_mut(&mut self.providers).insert(database_id, provider);
        self
    }

    pub fn provider(&self, database_id: &str) -> Option<Arc<dyn AskProvider>> {
        self.providers.get(database_id).cloned()
    }

    /// Resolve a requested database id, falling back to the default database.
    pub fn resolve(
        &self,
        database_id: Option<&str>,
    ) -> Result<(&'static Database, Arc<dyn AskProvider>), ApiError> {
        let database = match database_id {
            Some(id) => catalog::find_database(id).ok_or(ApiError::InvalidDatabase)?,
            None => catalog::default_database(),
        };
        let provider = self.provider(database.id).ok_or(ApiError::InvalidDatabase)?;
        Ok((database, provider))
    }
}
