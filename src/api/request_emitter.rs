use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{TimeWindow, millis_to_nanos_string};
use crate::error::{SelectorError, SelectorResult};

/// Outbound channel to the trajectory data source.
///
/// The selector never waits for an acknowledgment; `send` is fire-and-forget.
pub trait Transport {
    /// Whether a connection is currently open.
    fn is_available(&self) -> bool;

    fn send(&mut self, payload: &str) -> SelectorResult<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn send(&mut self, payload: &str) -> SelectorResult<()> {
        (**self).send(payload)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Trajectory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryRequestParam {
    pub map_name: String,
    /// Integer nanoseconds since the unix epoch, as decimal text.
    pub start_time: String,
    /// Integer nanoseconds since the unix epoch, as decimal text.
    pub finish_time: String,
}

/// Range query sent on every commit:
/// `{"request":"trajectory","param":{"map_name":..,"start_time":..,"finish_time":..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrajectoryRequest {
    pub request: RequestKind,
    pub param: TrajectoryRequestParam,
}

impl TrajectoryRequest {
    pub fn from_window(map_name: &str, window: TimeWindow) -> SelectorResult<Self> {
        Ok(Self {
            request: RequestKind::Trajectory,
            param: TrajectoryRequestParam {
                map_name: map_name.to_owned(),
                start_time: millis_to_nanos_string(window.min_time_ms)?,
                finish_time: millis_to_nanos_string(window.max_time_ms)?,
            },
        })
    }

    pub fn to_json(&self) -> SelectorResult<String> {
        serde_json::to_string(self).map_err(|e| {
            SelectorError::InvalidData(format!("failed to serialize trajectory request: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> SelectorResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            SelectorError::InvalidData(format!("failed to parse trajectory request: {e}"))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmitOutcome {
    Sent,
    /// Transport was not connected; the request is discarded, not queued.
    DroppedUnavailable,
    /// Building or sending the request failed; logged and discarded.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmitterStats {
    pub sent: u64,
    pub dropped_unavailable: u64,
    pub failed: u64,
}

/// Turns commits into trajectory requests on a best-effort transport.
#[derive(Debug)]
pub struct RequestEmitter<T: Transport> {
    transport: T,
    map_name: String,
    stats: EmitterStats,
}

impl<T: Transport> RequestEmitter<T> {
    #[must_use]
    pub fn new(transport: T, map_name: impl Into<String>) -> Self {
        Self {
            transport,
            map_name: map_name.into(),
            stats: EmitterStats::default(),
        }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    #[must_use]
    pub fn into_transport(self) -> T {
        self.transport
    }

    #[must_use]
    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    #[must_use]
    pub fn stats(&self) -> EmitterStats {
        self.stats
    }

    /// Sends `window` as a trajectory request. Never fails: every problem is
    /// logged, counted and reported through the outcome.
    pub fn emit(&mut self, window: TimeWindow) -> EmitOutcome {
        if !self.transport.is_available() {
            debug!(
                min_time_ms = window.min_time_ms,
                max_time_ms = window.max_time_ms,
                "transport unavailable; dropping trajectory request"
            );
            self.stats.dropped_unavailable += 1;
            return EmitOutcome::DroppedUnavailable;
        }

        let payload = match TrajectoryRequest::from_window(&self.map_name, window)
            .and_then(|request| request.to_json())
        {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to build trajectory request");
                self.stats.failed += 1;
                return EmitOutcome::Failed;
            }
        };

        match self.transport.send(&payload) {
            Ok(()) => {
                debug!(
                    map_name = %self.map_name,
                    min_time_ms = window.min_time_ms,
                    max_time_ms = window.max_time_ms,
                    "trajectory request sent"
                );
                self.stats.sent += 1;
                EmitOutcome::Sent
            }
            Err(err) => {
                warn!(error = %err, "failed to send trajectory request");
                self.stats.failed += 1;
                EmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_snake_case_kind() {
        let request = TrajectoryRequest::from_window(
            "L1",
            TimeWindow {
                min_time_ms: 1,
                max_time_ms: 2,
            },
        )
        .expect("request");
        assert_eq!(
            request.to_json().expect("json"),
            r#"{"request":"trajectory","param":{"map_name":"L1","start_time":"1000000","finish_time":"2000000"}}"#
        );
    }
}
