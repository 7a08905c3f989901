use crate::features::srs::SrsService;

#[derive(Clone)]
pub struct AppState {
    pub service: SrsService,
}

impl AppState {
    pub fn new(service: SrsService) -> Self {
        Self { service }
    }
}
