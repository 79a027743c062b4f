use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};
use tessera_types::{DocumentId, Version, VersionId};
use tracing::{debug, error, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::index::VersionIndex;
use crate::traits::{LedgerReader, LedgerWriter};

/// Header size: 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 8;

/// Largest payload a valid entry can carry.
const MAX_RECORD_SIZE: usize = 1 << 20;

/// One entry in the ledger log.
///
/// On-disk format:
/// ```text
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized LogRecord)]
/// ```
#[derive(Debug, Serialize, Deserialize)]
enum LogRecord {
    Version(Version),
}

/// Flush/sync strategy for appends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SyncMode {
    /// `fsync` after every append.
    #[default]
    EveryAppend,
    /// Rely on OS page-cache buffering.
    OsDefault,
}

struct LogWriter {
    file: File,
    /// End of the last complete entry.
    offset: u64,
}

/// Append-only, file-backed version ledger.
///
/// The log is replayed into an in-memory index on open, so reads never touch
/// the disk. A torn tail (a crash mid-append) is logged and cut off; entries
/// whose CRC does not match are skipped. A damaged header followed by intact
/// entries fails the open with [`LedgerError::Corrupt`] and leaves the file
/// as it is.
pub struct FileLedger {
    path: PathBuf,
    sync_mode: SyncMode,
    writer: Mutex<LogWriter>,
    index: RwLock<VersionIndex>,
}

impl FileLedger {
    /// Open (or create) the ledger log at `path`.
    pub fn open(path: &Path) -> LedgerResult<Self> {
        Self::open_with(path, SyncMode::default())
    }

    /// Open with an explicit sync mode.
    pub fn open_with(path: &Path, sync_mode: SyncMode) -> LedgerResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;

        let buf = fs::read(path)?;
        let (records, valid_end) = decode_log(&buf)?;
        if valid_end < buf.len() as u64 {
            warn!(
                path = %path.display(),
                valid_end,
                file_len = buf.len(),
                "discarding torn ledger tail"
            );
            file.set_len(valid_end)?;
            file.sync_all()?;
        }

        let mut index = VersionIndex::default();
        for version in records {
            match index.check(&version) {
                Ok(()) => index.insert(version),
                Err(e) => warn!(error = %e, "skipping conflicting ledger record"),
            }
        }
        debug!(path = %path.display(), versions = index.len(), "ledger replayed");

        Ok(Self {
            path: path.to_path_buf(),
            sync_mode,
            writer: Mutex::new(LogWriter {
                file,
                offset: valid_end,
            }),
            index: RwLock::new(index),
        })
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of versions across all documents.
    pub fn len(&self) -> usize {
        self.index.read().map(|idx| idx.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_frame(&self, w: &mut LogWriter, frame: &[u8]) -> std::io::Result<()> {
        w.file.seek(SeekFrom::Start(w.offset))?;
        w.file.write_all(frame)?;
        match self.sync_mode {
            SyncMode::EveryAppend => w.file.sync_data()?,
            SyncMode::OsDefault => w.file.flush()?,
        }
        Ok(())
    }
}

impl LedgerWriter for FileLedger {
    fn append(&self, version: &Version) -> LedgerResult<()> {
        let mut index = self.index.write().map_err(|_| LedgerError::LockPoisoned)?;
        index.check(version)?;

        let payload = bincode::serialize(&LogRecord::Version(version.clone()))
            .map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let mut frame = Vec::with_capacity(HEADER_SIZE + payload.len());
        frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        frame.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        frame.extend_from_slice(&payload);

        let mut w = self.writer.lock().map_err(|_| LedgerError::LockPoisoned)?;
        if let Err(e) = self.write_frame(&mut w, &frame) {
            // Cut off whatever part of the frame reached the file.
            if let Err(trunc) = w.file.set_len(w.offset) {
                warn!(error = %trunc, offset = w.offset, "failed to roll back partial ledger entry");
            }
            return Err(e.into());
        }
        let entry_offset = w.offset;
        w.offset += frame.len() as u64;
        drop(w);

        index.insert(version.clone());
        debug!(
            offset = entry_offset,
            version = %version.id,
            number = %version.version_number,
            "ledger append"
        );
        Ok(())
    }
}

impl LedgerReader for FileLedger {
    fn get(&self, id: &VersionId) -> LedgerResult<Option<Version>> {
        let index = self.index.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.get(id))
    }

    fn count(&self, document_id: &DocumentId) -> LedgerResult<u64> {
        let index = self.index.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.count(document_id))
    }

    fn list(&self, document_id: &DocumentId) -> LedgerResult<Vec<Version>> {
        let index = self.index.read().map_err(|_| LedgerError::LockPoisoned)?;
        Ok(index.list(document_id))
    }
}

impl std::fmt::Debug for FileLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileLedger")
            .field("path", &self.path)
            .field("version_count", &self.len())
            .finish()
    }
}

/// Decode every intact entry. Returns the records and the offset just past
/// the last complete frame.
///
/// Bytes after an unreadable header are only treated as a torn tail when no
/// intact frame starts anywhere in them.
fn decode_log(buf: &[u8]) -> LedgerResult<(Vec<Version>, u64)> {
    let mut records = Vec::new();
    let mut offset = 0usize;

    while offset + HEADER_SIZE <= buf.len() {
        let length = u32::from_le_bytes([
            buf[offset],
            buf[offset + 1],
            buf[offset + 2],
            buf[offset + 3],
        ]) as usize;
        let expected_crc = u32::from_le_bytes([
            buf[offset + 4],
            buf[offset + 5],
            buf[offset + 6],
            buf[offset + 7],
        ]);

        let end = offset + HEADER_SIZE + length;
        if length == 0 || length > MAX_RECORD_SIZE || end > buf.len() {
            if let Some(next) = find_intact_frame(buf, offset + 1) {
                error!(
                    offset,
                    length,
                    next_intact = next,
                    "invalid ledger entry length before intact entries; refusing to truncate"
                );
                return Err(LedgerError::Corrupt {
                    offset: offset as u64,
                });
            }
            warn!(offset, length, file_len = buf.len(), "invalid ledger entry length; stopping replay");
            break;
        }

        let payload = &buf[offset + HEADER_SIZE..end];
        let actual_crc = crc32fast::hash(payload);
        if actual_crc != expected_crc {
            warn!(offset, expected = expected_crc, actual = actual_crc, "CRC mismatch; skipping ledger entry");
            offset = end;
            continue;
        }

        match bincode::deserialize::<LogRecord>(payload) {
            Ok(LogRecord::Version(version)) => records.push(version),
            Err(e) => warn!(offset, error = %e, "failed to decode ledger entry; skipping"),
        }
        offset = end;
    }

    Ok((records, offset as u64))
}

/// First offset at or after `from` holding a frame whose CRC checks out.
fn find_intact_frame(buf: &[u8], from: usize) -> Option<usize> {
    (from..buf.len().saturating_sub(HEADER_SIZE)).find(|&start| {
        let header = &buf[start..start + HEADER_SIZE];
        let length = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
        let crc = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        let end = start + HEADER_SIZE + length;
        length != 0
            && length <= MAX_RECORD_SIZE
            && end <= buf.len()
            && crc32fast::hash(&buf[start + HEADER_SIZE..end]) == crc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, make_version};
    use tempfile::TempDir;

    fn ledger_path(dir: &TempDir) -> PathBuf {
        dir.path().join("ledger").join("versions.log")
    }

    #[test]
    fn open_creates_file_and_parents() {
        let dir = TempDir::new().unwrap();
        let ledger = FileLedger::open(&ledger_path(&dir)).unwrap();
        assert!(ledger.path().is_file());
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let ledger = FileLedger::open(&ledger_path(&dir)).unwrap();
        let doc = DocumentId::new();
        let v = make_version(doc, 1, at(0));
        ledger.append(&v).unwrap();
        assert_eq!(ledger.get(&v.id).unwrap(), Some(v));
        assert_eq!(ledger.count(&doc).unwrap(), 1);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        let versions: Vec<Version> = (1..=3).map(|n| make_version(doc, n, at(n as i64))).collect();
        {
            let ledger = FileLedger::open(&path).unwrap();
            for v in &versions {
                ledger.append(v).unwrap();
            }
        }
        let ledger = FileLedger::open(&path).unwrap();
        assert_eq!(ledger.len(), 3);
        let listed = ledger.list(&doc).unwrap();
        assert_eq!(listed[0], versions[2]);
        assert_eq!(listed[2], versions[0]);
    }

    #[test]
    fn duplicate_number_is_not_written() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        let ledger = FileLedger::open(&path).unwrap();
        ledger.append(&make_version(doc, 1, at(0))).unwrap();
        let len_before = fs::metadata(&path).unwrap().len();

        let err = ledger.append(&make_version(doc, 1, at(1))).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateVersionNumber { .. }));
        assert_eq!(fs::metadata(&path).unwrap().len(), len_before);
    }

    #[test]
    fn torn_tail_is_discarded_and_appends_continue() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.append(&make_version(doc, 1, at(0))).unwrap();
        }
        let intact_len = fs::metadata(&path).unwrap().len();

        // Simulate a crash halfway through writing a second entry.
        {
            let mut f = OpenOptions::new().append(true).open(&path).unwrap();
            f.write_all(&200u32.to_le_bytes()).unwrap();
            f.write_all(&[0xAA; 20]).unwrap();
        }

        let ledger = FileLedger::open(&path).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(fs::metadata(&path).unwrap().len(), intact_len);

        ledger.append(&make_version(doc, 2, at(1))).unwrap();
        drop(ledger);
        let reopened = FileLedger::open(&path).unwrap();
        assert_eq!(reopened.count(&doc).unwrap(), 2);
    }

    #[test]
    fn corrupt_entry_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        {
            let ledger = FileLedger::open(&path).unwrap();
            ledger.append(&make_version(doc, 1, at(0))).unwrap();
            ledger.append(&make_version(doc, 2, at(1))).unwrap();
        }

        // Flip a payload byte of the first entry.
        let mut bytes = fs::read(&path).unwrap();
        bytes[HEADER_SIZE + 3] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        let ledger = FileLedger::open(&path).unwrap();
        let listed = ledger.list(&doc).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].version_number.major(), 2);
    }

    #[test]
    fn damaged_length_before_intact_entries_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        {
            let ledger = FileLedger::open(&path).unwrap();
            for n in 1..=3 {
                ledger.append(&make_version(doc, n, at(n as i64))).unwrap();
            }
        }
        let len_before = fs::metadata(&path).unwrap().len();

        let mut bytes = fs::read(&path).unwrap();
        bytes[3] = 0x7F;
        fs::write(&path, &bytes).unwrap();

        let err = FileLedger::open(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupt { offset: 0 }));
        assert_eq!(fs::metadata(&path).unwrap().len(), len_before);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn damaged_length_in_middle_reports_its_offset() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        {
            let ledger = FileLedger::open(&path).unwrap();
            for n in 1..=3 {
                ledger.append(&make_version(doc, n, at(n as i64))).unwrap();
            }
        }

        let mut bytes = fs::read(&path).unwrap();
        let first_len = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
        let second = HEADER_SIZE + first_len;
        bytes[second..second + 4].copy_from_slice(&0u32.to_le_bytes());
        fs::write(&path, &bytes).unwrap();

        let err = FileLedger::open(&path).unwrap_err();
        assert!(matches!(err, LedgerError::Corrupt { offset } if offset == second as u64));
    }

    #[test]
    fn decode_empty_log() {
        let (records, end) = decode_log(&[]).unwrap();
        assert!(records.is_empty());
        assert_eq!(end, 0);
    }

    #[test]
    fn os_default_sync_mode_persists_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = ledger_path(&dir);
        let doc = DocumentId::new();
        {
            let ledger = FileLedger::open_with(&path, SyncMode::OsDefault).unwrap();
            ledger.append(&make_version(doc, 1, at(0))).unwrap();
        }
        assert_eq!(FileLedger::open(&path).unwrap().count(&doc).unwrap(), 1);
    }
}
