use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::services::SearchService;
use crate::vision::VisionProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub vision: VisionProvider,
    pub search: SearchService,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>, vision: VisionProvider) -> Self {
        let config = Arc::new(config);
        let search = SearchService::new(db.clone());

        Self {
            config,
            db,
            vision,
            search,
        }
    }
}
