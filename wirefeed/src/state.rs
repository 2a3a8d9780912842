use crate::types::{AggregatorError, Article, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Writes the ranked timeline to its JSON artifact.
///
/// The artifact is the only state that survives a run. It is replaced with a
/// temp-file-then-rename so readers see either the previous file or the new
/// one, never a partial write.
pub struct ArtifactWriter {
    path: PathBuf,
}

impl ArtifactWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `articles` as a pretty-printed JSON array. An empty slice
    /// still produces `[]` on disk.
    pub async fn write(&self, articles: &[Article]) -> Result<()> {
        let json = serde_json::to_vec_pretty(articles)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).await?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AggregatorError::General(format!(
                    "Output path has no file name: {}",
                    self.path.display()
                ))
            })?;
        let tmp_path = dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

        debug!("Writing {} bytes to {}", json.len(), tmp_path.display());
        if let Err(e) = Self::write_and_sync(&tmp_path, &json).await {
            let _ = fs::remove_file(&tmp_path).await;
            error!("Failed to write {}: {}", tmp_path.display(), e);
            return Err(e);
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            error!("Failed to replace {}: {}", self.path.display(), e);
            return Err(e.into());
        }

        info!("Wrote {} articles to {}", articles.len(), self.path.display());
        Ok(())
    }

    async fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }

    /// Read a previously written artifact back.
    pub async fn read(&self) -> Result<Vec<Article>> {
        let bytes = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(timestamp: f64) -> Article {
        Article {
            source: "NPR".to_string(),
            title: "Headline".to_string(),
            link: "https://example.com".to_string(),
            summary: "Short".to_string(),
            timestamp,
            date: "Nov 14, 22:13".to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_timeline_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("news.json"));

        writer.write(&[]).await.unwrap();

        let raw = std::fs::read_to_string(writer.path()).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[tokio::test]
    async fn test_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("news.json"));

        writer.write(&[article(1.0), article(2.0)]).await.unwrap();
        writer.write(&[article(3.0)]).await.unwrap();

        let read_back = writer.read().await.unwrap();
        assert_eq!(read_back, vec![article(3.0)]);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_exact_field_set() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("nested").join("news.json"));

        writer.write(&[article(1_700_000_000.0)]).await.unwrap();

        let raw = std::fs::read_to_string(writer.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value[0].as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["date", "link", "source", "summary", "timestamp", "title"]);
        assert_eq!(object["timestamp"].as_f64(), Some(1_700_000_000.0));
    }

    #[tokio::test]
    async fn test_unwritable_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should go cannot be replaced by rename
        let target = dir.path().join("news.json");
        std::fs::create_dir_all(target.join("occupied")).unwrap();

        let writer = ArtifactWriter::new(&target);
        assert!(writer.write(&[article(1.0)]).await.is_err());
    }
}
