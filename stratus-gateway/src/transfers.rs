//! Completed transfer records
//!
//! A completed transfer is any finished upload or download (successful,
//! failed, or cancelled) retained for user review. Records are kept
//! newest-first and bounded; the store evicts the oldest entry once the
//! bound is reached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for a record with no associated remote node
pub const INVALID_HANDLE: i64 = -1;

/// Maximum number of completed transfers retained
pub const MAX_COMPLETED_TRANSFERS: usize = 100;

/// Direction of a finished transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Upload,
    Download,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Download => "download",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "upload" => Some(Self::Upload),
            "download" => Some(Self::Download),
            _ => None,
        }
    }
}

/// A finished transfer retained in the completed list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTransfer {
    /// Row id assigned by the store; unique per record
    pub id: i64,

    /// Name of the transferred file
    #[serde(rename = "fileName")]
    pub file_name: String,

    /// Upload or download
    pub direction: TransferDirection,

    /// Transferred size in bytes
    pub size: u64,

    /// Remote node handle, or [`INVALID_HANDLE`] when none applies
    /// (e.g. a failed upload that never produced a node)
    #[serde(rename = "nodeHandle")]
    pub node_handle: i64,

    /// Local or remote path involved in the transfer
    pub path: String,

    /// Result description; empty string for a clean completion
    pub error: String,

    /// Completion time
    pub timestamp: DateTime<Utc>,
}

impl CompletedTransfer {
    /// Whether this record carries a usable node handle
    pub fn has_valid_handle(&self) -> bool {
        self.node_handle != INVALID_HANDLE
    }

    /// Identity rule between two completed-transfer records
    ///
    /// Two records describe the same transfer iff their ids match, OR
    /// both carry valid node handles that match, OR error, file name
    /// and size all match. The precedence is exactly this order; no
    /// further semantics are implied.
    pub fn is_same_transfer(&self, other: &CompletedTransfer) -> bool {
        self.id == other.id
            || (self.has_valid_handle()
                && other.has_valid_handle()
                && self.node_handle == other.node_handle)
            || (self.error == other.error
                && self.file_name == other.file_name
                && self.size == other.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> CompletedTransfer {
        CompletedTransfer {
            id,
            file_name: name.to_string(),
            direction: TransferDirection::Download,
            size: 1024,
            node_handle: INVALID_HANDLE,
            path: format!("/downloads/{}", name),
            error: String::new(),
            timestamp: DateTime::<Utc>::from_timestamp(1_700_000_000 + id, 0).unwrap(),
        }
    }

    #[test]
    fn test_same_transfer_by_id() {
        let a = record(7, "a.txt");
        let mut b = record(7, "b.txt");
        b.size = 99;
        b.error = "failed".to_string();
        assert!(a.is_same_transfer(&b));
    }

    #[test]
    fn test_same_transfer_by_handle() {
        let mut a = record(1, "a.txt");
        let mut b = record(2, "b.txt");
        a.node_handle = 42;
        b.node_handle = 42;
        b.size = 99;
        assert!(a.is_same_transfer(&b));
    }

    #[test]
    fn test_invalid_handles_never_match() {
        let mut a = record(1, "a.txt");
        let mut b = record(2, "b.txt");
        a.node_handle = INVALID_HANDLE;
        b.node_handle = INVALID_HANDLE;
        b.size = 99;
        assert!(!a.is_same_transfer(&b));
    }

    #[test]
    fn test_same_transfer_by_triple() {
        let a = record(1, "report.pdf");
        let b = record(2, "report.pdf");
        assert!(a.is_same_transfer(&b));

        let mut c = record(3, "report.pdf");
        c.size = 2048;
        assert!(!a.is_same_transfer(&c));

        let mut d = record(4, "report.pdf");
        d.error = "cancelled".to_string();
        assert!(!a.is_same_transfer(&d));
    }

    #[test]
    fn test_direction_roundtrip() {
        assert_eq!(TransferDirection::from_str("upload"), Some(TransferDirection::Upload));
        assert_eq!(TransferDirection::from_str("sideways"), None);
        assert_eq!(TransferDirection::Download.as_str(), "download");
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(record(5, "a.txt")).unwrap();
        assert_eq!(json["fileName"], "a.txt");
        assert_eq!(json["nodeHandle"], INVALID_HANDLE);
        assert_eq!(json["direction"], "download");
    }
}
