use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tessera_types::{Document, DocumentId};
use tessera_versions::{InMemoryDocumentRegistry, VersionStoreConfig};

use crate::error::{ServerError, ServerResult};

/// Runtime configuration shared by the server and the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TesseraConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding `content/` and `ledger/`.
    pub storage_root: PathBuf,
    /// Largest snapshot accepted, in bytes.
    pub max_content_size: Option<u64>,
    /// Documents versions may be created for.
    pub documents: Vec<DocumentConfig>,
}

impl Default for TesseraConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            storage_root: PathBuf::from(".tessera"),
            max_content_size: Some(10 * 1024 * 1024),
            documents: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub id: DocumentId,
    pub title: String,
}

impl TesseraConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> ServerResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ServerError::Config(format!("{}: {e}", path.display()))),
        }
    }

    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Static document registry built from `[[documents]]`.
    pub fn registry(&self) -> InMemoryDocumentRegistry {
        InMemoryDocumentRegistry::with_documents(
            self.documents
                .iter()
                .map(|d| Document::new(d.id, d.title.clone())),
        )
    }

    pub fn version_store_config(&self) -> VersionStoreConfig {
        VersionStoreConfig {
            max_content_size: self.max_content_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_versions::DocumentLookup;

    #[test]
    fn default_config() {
        let c = TesseraConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.storage_root, PathBuf::from(".tessera"));
        assert_eq!(c.max_content_size, Some(10 * 1024 * 1024));
        assert!(c.documents.is_empty());
    }

    #[test]
    fn parse_full_file() {
        let doc = DocumentId::new();
        let text = format!(
            r#"
bind_addr = "0.0.0.0:9000"
storage_root = "/var/lib/tessera"
max_content_size = 2048

[[documents]]
id = "{doc}"
title = "Final thesis"
"#
        );
        let c = TesseraConfig::from_toml_str(&text).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert_eq!(c.storage_root, PathBuf::from("/var/lib/tessera"));
        assert_eq!(c.version_store_config().max_content_size, Some(2048));
        assert_eq!(c.documents[0].id, doc);
        assert!(c.registry().exists(&doc).unwrap());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let c = TesseraConfig::from_toml_str("storage_root = \"data\"").unwrap();
        assert_eq!(c.storage_root, PathBuf::from("data"));
        assert_eq!(c.bind_addr.port(), 8080);
    }

    #[test]
    fn invalid_file_is_config_error() {
        let err = TesseraConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let c = TesseraConfig::load(&dir.path().join("tessera.toml")).unwrap();
        assert_eq!(c.bind_addr.port(), 8080);
    }
}
