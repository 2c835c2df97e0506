use crate::config::AppConfig;
use crate::services::catalogue::CatalogueService;

#[derive(Clone)]
pub struct AppState {
    pub catalogue: CatalogueService,
    pub config: AppConfig,
}
