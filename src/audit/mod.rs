//! Audit trail for the civil registry
//!
//! Every saved registration and every deletion is appended to `audit.log` as
//! one JSON object per line (JSONL). Entries carry the full entity so the
//! log doubles as a history of removed records.
//!
//! - `AuditEntry`: one operation on one entity, with its JSON snapshot.
//! - `AuditLogger`: appends entries and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
