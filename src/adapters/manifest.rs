//! Integrity manifest for model artifact directories.
//!
//! `manifest.json` binds each artifact file name to its SHA-256 digest.
//! When a manifest is present, every artifact loaded from that directory
//! must be listed and must hash to the recorded digest.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::ports::ModelError;

/// File name of the manifest inside a model directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Only supported manifest version.
pub const MANIFEST_VERSION: u32 = 1;

/// Artifact digests for one directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub files: BTreeMap<String, String>,
}

pub fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn artifact_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

impl Manifest {
    /// Read the manifest from `dir`, if one exists.
    ///
    /// # Errors
    /// Returns `ModelError::Integrity` if the manifest exists but cannot be parsed
    /// or has an unsupported version.
    pub fn read(dir: &Path) -> Result<Option<Self>, ModelError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read(&path)?;
        let manifest: Manifest = serde_json::from_slice(&content)
            .map_err(|e| ModelError::Integrity(format!("Invalid {MANIFEST_FILE} format: {e}")))?;

        if manifest.version != MANIFEST_VERSION {
            return Err(ModelError::Integrity(format!(
                "Unsupported manifest version: {}",
                manifest.version
            )));
        }

        Ok(Some(manifest))
    }

    /// Build a manifest covering every `*.json` artifact in `dir`.
    ///
    /// # Errors
    /// Returns `ModelError::Io` if the directory or a file cannot be read.
    pub fn build(dir: &Path) -> Result<Self, ModelError> {
        let mut files = BTreeMap::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !path.is_file() || name == MANIFEST_FILE || !name.ends_with(".json") {
                continue;
            }
            let bytes = fs::read(&path)?;
            files.insert(name.to_string(), sha256_hex_bytes(&bytes));
        }

        Ok(Self {
            version: MANIFEST_VERSION,
            files,
        })
    }

    /// Write the manifest into `dir`, returning its path.
    ///
    /// # Errors
    /// Returns `ModelError::Io` if writing fails.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, ModelError> {
        let path = dir.join(MANIFEST_FILE);
        let mut bytes = serde_json::to_vec_pretty(self)
            .map_err(|e| ModelError::Format(format!("Failed to serialize manifest: {e}")))?;
        bytes.push(b'\n');
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Check that `bytes` match the digest recorded for `file_name`.
    ///
    /// # Errors
    /// Returns `ModelError::Integrity` if the file is unlisted or the digest differs.
    pub fn verify(&self, file_name: &str, bytes: &[u8]) -> Result<(), ModelError> {
        let expected = self.files.get(file_name).ok_or_else(|| {
            ModelError::Integrity(format!("{file_name} is not listed in {MANIFEST_FILE}"))
        })?;

        let actual = sha256_hex_bytes(bytes);
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(ModelError::Integrity(format!(
                "{file_name} digest mismatch (expected {expected}, got {actual})"
            )));
        }
        Ok(())
    }
}

/// Verify an artifact's bytes against the manifest next to it.
///
/// Without a manifest the artifact is accepted with a warning, unless
/// `require_manifest` is set.
///
/// # Errors
/// Returns `ModelError::Integrity` on a missing required manifest or a failed check.
pub fn verify_artifact(path: &Path, bytes: &[u8], require_manifest: bool) -> Result<(), ModelError> {
    let dir = artifact_dir(path);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ModelError::Integrity(format!("Invalid artifact path {path:?}")))?;

    match Manifest::read(dir)? {
        Some(manifest) => {
            manifest.verify(file_name, bytes)?;
            tracing::debug!("Verified {} against {:?}", file_name, dir.join(MANIFEST_FILE));
            Ok(())
        }
        None if require_manifest => Err(ModelError::Integrity(format!(
            "{MANIFEST_FILE} required but not found in {dir:?}"
        ))),
        None => {
            tracing::warn!(
                "No {} in {:?}; loading {} without integrity check",
                MANIFEST_FILE,
                dir,
                file_name
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex_bytes(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_build_write_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.json"), b"{}").expect("write");
        fs::write(dir.path().join("notes.txt"), b"ignored").expect("write");

        let manifest = Manifest::build(dir.path()).expect("Should build");
        assert_eq!(manifest.files.len(), 1);
        assert!(manifest.files.contains_key("a.json"));

        manifest.write(dir.path()).expect("Should write");
        let read = Manifest::read(dir.path())
            .expect("Should read")
            .expect("Manifest present");
        assert_eq!(read, manifest);

        // Rebuilding must not include the manifest itself.
        let rebuilt = Manifest::build(dir.path()).expect("Should rebuild");
        assert_eq!(rebuilt.files.len(), 1);
    }

    #[test]
    fn test_verify_artifact_detects_tampering() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");
        fs::write(&path, b"original").expect("write");
        Manifest::build(dir.path())
            .expect("build")
            .write(dir.path())
            .expect("write manifest");

        assert!(verify_artifact(&path, b"original", true).is_ok());
        let err = verify_artifact(&path, b"tampered", false).unwrap_err();
        assert!(matches!(err, ModelError::Integrity(_)));
    }

    #[test]
    fn test_unlisted_artifact_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        Manifest {
            version: MANIFEST_VERSION,
            files: BTreeMap::new(),
        }
        .write(dir.path())
        .expect("write manifest");

        let path = dir.path().join("other.json");
        assert!(verify_artifact(&path, b"{}", false).is_err());
    }

    #[test]
    fn test_missing_manifest_policy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.json");

        assert!(verify_artifact(&path, b"{}", false).is_ok());
        assert!(verify_artifact(&path, b"{}", true).is_err());
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(
            dir.path().join(MANIFEST_FILE),
            br#"{"version": 2, "files": {}}"#,
        )
        .expect("write");

        assert!(Manifest::read(dir.path()).is_err());
    }
}
