//! User-facing comparison notifications.
//!
//! The sink is fire-and-forget: the comparison set never waits on it and never
//! learns whether a notice was shown.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a comparison `add`, and the kind of notice it raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Added,
    Duplicate,
    Full,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Added => "added",
            NoticeKind::Duplicate => "duplicate",
            NoticeKind::Full => "full",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonNotice {
    pub kind: NoticeKind,
    pub product_name: String,
    pub occurred_at: DateTime<Utc>,
}

impl ComparisonNotice {
    pub fn new(kind: NoticeKind, product_name: impl Into<String>) -> Self {
        Self {
            kind,
            product_name: product_name.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn message(&self) -> String {
        match self.kind {
            NoticeKind::Added => format!("{} added to comparison", self.product_name),
            NoticeKind::Duplicate => {
                format!("{} is already in your comparison list", self.product_name)
            }
            NoticeKind::Full => format!(
                "Comparison list is full; remove a product before adding {}",
                self.product_name
            ),
        }
    }
}

/// Receiver of comparison notices.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: ComparisonNotice);
}

impl<F> NotificationSink for F
where
    F: Fn(ComparisonNotice) + Send + Sync,
{
    fn notify(&self, notice: ComparisonNotice) {
        self(notice)
    }
}

/// Logs every notice at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: ComparisonNotice) {
        tracing::info!(kind = notice.kind.as_str(), product = %notice.product_name, "{}", notice.message());
    }
}

/// Keeps every notice; for tests/dev.
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<ComparisonNotice>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<ComparisonNotice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<NoticeKind> {
        self.notices().into_iter().map(|n| n.kind).collect()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: ComparisonNotice) {
        // A poisoned lock only loses the recording, never the caller's operation.
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
