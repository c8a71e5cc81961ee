//! Ownership guard applied to every read and write of an owned record.

use super::errors::{DomainError, DomainResult, RecordKind};
use super::identity::Identity;

/// Implemented by every entity that belongs to a single user
pub trait Owned {
    fn owner_id(&self) -> &str;
}

/// Return the record only if it exists and belongs to the caller.
///
/// A missing record and a record owned by someone else produce the same
/// `NotFound` error so callers cannot probe for other users' ids.
pub fn ensure_owned<T: Owned>(record: Option<T>, identity: &Identity, kind: RecordKind) -> DomainResult<T> {
    match record {
        Some(record) if record.owner_id() == identity.user_id() => Ok(record),
        _ => Err(DomainError::NotFound(kind)),
    }
}
