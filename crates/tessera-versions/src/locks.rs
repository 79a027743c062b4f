use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tessera_types::DocumentId;

/// One mutex per document, handed out on demand.
///
/// Holding a document's mutex serializes version-number assignment for that
/// document only; other documents proceed in parallel.
#[derive(Debug, Default)]
pub(crate) struct DocumentLocks {
    table: Mutex<HashMap<DocumentId, Arc<Mutex<()>>>>,
}

impl DocumentLocks {
    pub(crate) fn lock_for(&self, id: &DocumentId) -> Arc<Mutex<()>> {
        // The table only maps ids to mutexes, so a poisoned guard is still usable.
        let mut table = self.table.lock().unwrap_or_else(|p| p.into_inner());
        Arc::clone(table.entry(*id).or_default())
    }
}
