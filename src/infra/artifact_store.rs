// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Writes and reads the model artifact: a JSON array of layer
// specs. No weights, no input shape, only the layer stack.
//
// File naming convention:
//   models/
//     <name>.json           ← artifact (layer list)
//     <name>.metrics.csv    ← per-epoch metrics log
//
// Writes are all-or-nothing. The JSON goes to a temp file in
// the target's own directory and is renamed over the target
// once fully flushed, so readers only ever see a complete file
// and a failed write leaves nothing behind.
//
// Reference: tempfile crate documentation
//            Rust Book §9 (Error Handling)

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::architecture::LayerSpec;
use crate::domain::error::{PipelineError, Result};

/// Resolves artifact paths inside a models directory.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<dir>/<name>.json`
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// `<dir>/<name>.metrics.csv`
    pub fn metrics_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.metrics.csv"))
    }
}

/// Persist `layers` as the artifact at `path`.
pub fn save_layers(path: &Path, layers: &[LayerSpec]) -> Result<()> {
    let json = serde_json::to_vec_pretty(layers)
        .map_err(|e| persistence(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

    write_atomic(path, &json).map_err(|e| persistence(path, e))?;
    tracing::debug!("Wrote {} layers to '{}'", layers.len(), path.display());
    Ok(())
}

/// Read an artifact back into its layer list.
pub async fn load_layers(path: &Path) -> Result<Vec<LayerSpec>> {
    let json = tokio::fs::read_to_string(path).await.map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PipelineError::ArtifactNotFound(path.to_path_buf())
        } else {
            PipelineError::ArtifactRead { path: path.to_path_buf(), source }
        }
    })?;

    let layers: Vec<LayerSpec> = serde_json::from_str(&json).map_err(|e| {
        PipelineError::ArtifactParse { path: path.to_path_buf(), reason: e.to_string() }
    })?;

    if layers.is_empty() {
        return Err(PipelineError::ArtifactParse {
            path:   path.to_path_buf(),
            reason: "layer list is empty".to_string(),
        });
    }
    Ok(layers)
}

/// Write `bytes` to `path` through a sibling temp file and a rename.
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn persistence(path: &Path, source: io::Error) -> PipelineError {
    PipelineError::Persistence { path: path.to_path_buf(), source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::architecture::Activation;
    use std::fs;

    fn layers() -> Vec<LayerSpec> {
        vec![
            LayerSpec::MaxPooling2d { pool_size: [2, 2] },
            LayerSpec::Flatten,
            LayerSpec::Dense { units: 1, activation: Activation::Sigmoid },
        ]
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = ArtifactStore::new(dir.path().join("models")).artifact_path("cats");

        save_layers(&path, &layers()).unwrap();
        assert_eq!(load_layers(&path).await.unwrap(), layers());

        // Only the artifact itself remains; the temp file was renamed away
        let names: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("cats.json")]);
    }

    #[tokio::test]
    async fn test_artifact_is_a_json_array() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        save_layers(&path, &layers()).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw.as_array().map(Vec::len), Some(3));
        assert_eq!(raw[2]["type"], "Dense");
    }

    #[tokio::test]
    async fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_layers(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactNotFound(_)));
    }

    #[tokio::test]
    async fn test_corrupt_and_empty_artifacts() {
        let dir = tempfile::tempdir().unwrap();

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "[{\"type\": \"Conv2D\"").unwrap();
        assert!(matches!(
            load_layers(&corrupt).await,
            Err(PipelineError::ArtifactParse { .. })
        ));

        let unknown = dir.path().join("unknown.json");
        fs::write(&unknown, r#"[{"type": "Dropout", "rate": 0.5}]"#).unwrap();
        assert!(matches!(
            load_layers(&unknown).await,
            Err(PipelineError::ArtifactParse { .. })
        ));

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "[]").unwrap();
        assert!(matches!(
            load_layers(&empty).await,
            Err(PipelineError::ArtifactParse { .. })
        ));
    }

    #[test]
    fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let path = blocker.join("model.json");

        let err = save_layers(&path, &layers()).unwrap_err();
        assert!(matches!(err, PipelineError::Persistence { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_overwrite_replaces_whole_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        write_atomic(&path, b"a much longer first version").unwrap();
        write_atomic(&path, b"short").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short");
    }
}
