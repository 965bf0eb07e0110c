use std::sync::Arc;

use crate::feed::IncidentFeed;
use crate::incident::DashboardResponse;
use crate::view::Latest;

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<dyn IncidentFeed>,
    /// Cached landing-view bundle, guarded so a superseded refresh can never
    /// overwrite a newer one.
    pub dashboard: Arc<Latest<DashboardResponse>>,
    pub per_page: u64,
}

impl AppState {
    pub fn new(feed: Arc<dyn IncidentFeed>, per_page: u64) -> Self {
        Self {
            feed,
            dashboard: Arc::new(Latest::new()),
            per_page,
        }
    }
}
