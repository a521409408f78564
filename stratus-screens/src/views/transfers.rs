//! Completed-transfers screen projection

use crate::transfers::CompletedTransfersController;
use chrono::{DateTime, Utc};
use stratus_gateway::{CompletedTransfer, TransferDirection};

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow {
    pub file_name: String,
    pub direction: TransferDirection,
    /// Human-readable size, e.g. `"2.5 MB"`
    pub size_label: String,
    /// Result description; empty for a clean completion
    pub error: String,
    pub completed_at: DateTime<Utc>,
}

/// Everything the completed-transfers screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransfersScreen {
    pub rows: Vec<TransferRow>,
    /// The empty-state artwork replaces the list when nothing remains
    pub empty_state_visible: bool,
}

impl CompletedTransfersController {
    /// Project the current list for rendering
    pub fn screen(&self) -> TransfersScreen {
        let rows = self.transfers().iter().map(TransferRow::from).collect();
        TransfersScreen {
            rows,
            empty_state_visible: !self.has_any(),
        }
    }
}

impl From<&CompletedTransfer> for TransferRow {
    fn from(transfer: &CompletedTransfer) -> Self {
        Self {
            file_name: transfer.file_name.clone(),
            direction: transfer.direction,
            size_label: format_size(transfer.size),
            error: transfer.error.clone(),
            completed_at: transfer.timestamp,
        }
    }
}

/// Format a byte count the way the transfer list displays it
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(1536 * 1024 * 1024), "1.5 GB");
    }
}
