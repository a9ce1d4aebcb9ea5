use std::sync::Arc;
use nb_core::ContactStorage;
use nb_scrapers::ResearchManager;

pub struct AppState {
    pub manager: Arc<ResearchManager>,
}

impl AppState {
    pub fn new(manager: Arc<ResearchManager>) -> Self {
        Self { manager }
    }

    pub fn storage(&self) -> &Arc<dyn ContactStorage> {
        self.manager.storage()
    }
}
