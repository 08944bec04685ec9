use crate::errors::AppError;
use crate::models::AppData;
use std::path::Path;
use tokio::fs;
use tracing::{debug, error, info};

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<AppData>(&bytes) {
            Ok(data) => {
                info!("loaded {} entries from {}", data.entries.len(), path.display());
                data
            }
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    debug!("saved {} entries", data.entries.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Entry;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("nutrient_tracker_{}_{}.json", std::process::id(), name));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.entries.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.entries.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_entries_load_back() {
        let path = temp_path("persist");
        let data = AppData {
            entries: vec![Entry {
                id: "abc".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 5, 6).unwrap(),
                po4: Some(0.04),
                no3: None,
                notes: "after water change".to_string(),
            }],
        };

        persist_data(&path, &data).await.unwrap();
        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\"2025-05-06\""));

        let loaded = load_data(&path).await;
        assert_eq!(loaded.entries, data.entries);
        let _ = fs::remove_file(&path).await;
    }
}
