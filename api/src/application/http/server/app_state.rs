use std::sync::Arc;

use devcamper_core::application::DevcamperService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: DevcamperService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: DevcamperService) -> Self {
        Self { args, service }
    }
}
