use serde::{Deserialize, Serialize};

use crate::core::{Dimensions, PercentRange, TimeOffsets, TimeWindow};
use crate::error::{SelectorError, SelectorResult};
use crate::interaction::DragPhase;

use super::label_format::HandleLabel;

pub const SELECTOR_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Per-handle display state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandleSnapshot {
    pub percent: f64,
    pub time_ms: i64,
    pub offset_ms: i64,
    pub phase: DragPhase,
    pub label: HandleLabel,
}

/// Everything a display needs to draw the selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorSnapshot {
    pub range: PercentRange,
    pub window: TimeWindow,
    pub offsets: TimeOffsets,
    pub now_ms: i64,
    pub now_percent: f64,
    pub dimensions: Dimensions,
    pub min_handle: HandleSnapshot,
    pub max_handle: HandleSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SelectorSnapshot,
}

impl SelectorSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SelectorResult<String> {
        let payload = SelectorSnapshotJsonContractV1 {
            schema_version: SELECTOR_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SelectorError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned v1 contract payload.
    pub fn from_json_compat_str(input: &str) -> SelectorResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SelectorSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SelectorSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                SelectorError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != SELECTOR_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SelectorError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
