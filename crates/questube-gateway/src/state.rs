use crate::service::RedirectService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    service: Arc<RedirectService>,
}

impl AppState {
    pub fn new(service: RedirectService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &RedirectService {
        &self.service
    }
}
