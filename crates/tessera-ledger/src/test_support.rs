use chrono::{DateTime, TimeZone, Utc};
use tessera_types::{AuthorId, ContentHash, DocumentId, Version, VersionId, VersionNumber};

pub(crate) fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub(crate) fn make_version(document_id: DocumentId, major: u64, created_at: DateTime<Utc>) -> Version {
    let number = VersionNumber::new(major).unwrap();
    Version {
        id: VersionId::new(),
        document_id,
        version_number: number,
        content_hash: ContentHash::from_digest([major as u8; 32]),
        file_name: Version::file_name_for(&document_id, &number),
        storage_path: Version::storage_path_for(&document_id, &number),
        size: 10 * major,
        author_id: AuthorId::new("student"),
        commit_message: format!("revision {major}"),
        tag: None,
        created_at,
    }
}
