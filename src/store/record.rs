use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::RecordResult;

/// Fixed-shape attribute set held by a [`RecordStore`](super::RecordStore).
///
/// Implementors describe one entity kind: how a validated patch is applied,
/// which field (if any) must stay unique, and which values are derived on
/// read. Derived values are computed from the stored fields every time a
/// record is viewed and are never written back.
pub trait Entity: fmt::Debug + Clone + Serialize + Send + Sync + 'static {
    /// Validated partial update. Fields that are `None` stay untouched.
    type Patch: fmt::Debug + Send;

    /// Read-time values attached next to the stored fields.
    type Derived: fmt::Debug + Clone + Serialize + Send + Sync;

    /// Human noun used in error messages ("student", "task", ...).
    const LABEL: &'static str;

    /// Name that must be unique (trimmed, case-insensitive) across live records.
    fn unique_name(&self) -> Option<&str> {
        None
    }

    /// Cross-field check on the complete field set, run before insert and
    /// again after a patch has been applied.
    fn validate(&self) -> RecordResult<()> {
        Ok(())
    }

    fn apply(&mut self, patch: Self::Patch);

    fn derive(&self) -> Self::Derived;
}

#[derive(Debug, Clone, Serialize)]
pub struct Record<E: Entity> {
    pub id: u64,
    #[serde(flatten)]
    pub fields: E,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<E: Entity> Record<E> {
    pub fn view(&self) -> RecordView<E> {
        RecordView {
            record: self.clone(),
            derived: self.fields.derive(),
        }
    }
}

/// A record together with its derived values, as returned by every read.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "E: Entity"))]
pub struct RecordView<E: Entity> {
    #[serde(flatten)]
    pub record: Record<E>,
    #[serde(flatten)]
    pub derived: E::Derived,
}

impl<E: Entity> RecordView<E> {
    pub fn id(&self) -> u64 {
        self.record.id
    }

    pub fn fields(&self) -> &E {
        &self.record.fields
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
