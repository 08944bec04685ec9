pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod summary;
pub mod ui;

pub use app::router;
pub use chart::project;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use summary::summarize;
