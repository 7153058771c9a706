//! Shared application state for all routes.

use crate::pagination::Paginator;
use crate::service::TriviaService;
use crate::store::TriviaStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TriviaStore>,
    /// Page size comes from configuration, fixed for the process lifetime.
    pub paginator: Paginator,
}

impl AppState {
    pub fn new(store: Arc<dyn TriviaStore>, paginator: Paginator) -> Self {
        AppState { store, paginator }
    }

    pub fn service(&self) -> TriviaService<'_> {
        TriviaService::new(self.store.as_ref(), self.paginator)
    }
}
