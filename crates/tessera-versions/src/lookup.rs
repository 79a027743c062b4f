use std::collections::HashMap;
use std::sync::RwLock;

use tessera_types::{Document, DocumentId};

/// Failure of the injected document lookup itself (not "missing document").
#[derive(Debug, thiserror::Error)]
#[error("document lookup failed: {0}")]
pub struct LookupError(pub String);

/// Resolves document ids owned by the surrounding system.
///
/// The version store only needs to know whether a document exists; the
/// concrete source (database, remote service, static config) is injected.
pub trait DocumentLookup: Send + Sync {
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, LookupError>;

    fn exists(&self, id: &DocumentId) -> Result<bool, LookupError> {
        Ok(self.get(id)?.is_some())
    }
}

/// In-memory document registry for tests and static configurations.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRegistry {
    documents: RwLock<HashMap<DocumentId, Document>>,
}

impl InMemoryDocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding the given documents.
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let registry = Self::new();
        for doc in documents {
            registry.register(doc);
        }
        registry
    }

    /// Add or replace a document.
    pub fn register(&self, document: Document) {
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(document.id, document);
    }

    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentLookup for InMemoryDocumentRegistry {
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, LookupError> {
        let documents = self
            .documents
            .read()
            .map_err(|e| LookupError(format!("lock poisoned: {e}")))?;
        Ok(documents.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let registry = InMemoryDocumentRegistry::new();
        let doc = Document::new(DocumentId::new(), "Thesis");
        registry.register(doc.clone());
        assert!(registry.exists(&doc.id).unwrap());
        assert_eq!(registry.get(&doc.id).unwrap(), Some(doc));
    }

    #[test]
    fn unknown_document_does_not_exist() {
        let registry = InMemoryDocumentRegistry::new();
        assert!(!registry.exists(&DocumentId::new()).unwrap());
    }

    #[test]
    fn with_documents_registers_all() {
        let registry = InMemoryDocumentRegistry::with_documents([
            Document::new(DocumentId::new(), "A"),
            Document::new(DocumentId::new(), "B"),
        ]);
        assert_eq!(registry.len(), 2);
    }
}
