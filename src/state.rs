use crate::models::{AppData, Targets};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub targets: Targets,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, targets: Targets, data: AppData) -> Self {
        Self {
            data_path,
            targets,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
