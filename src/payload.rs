use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Slot key the drag payload travels under, matching the historical
/// transfer-channel parameter name.
pub const PARAMS_KEY: &str = "params";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("no drag payload in the transfer channel")]
    Missing,
    #[error("malformed drag payload `{0}`")]
    Malformed(String),
}

/// Data attached to a drag for consumption by the drop handler.
///
/// Replaces the historical `"id,x,y"` comma string with a structured
/// record; the comma form survives as the legacy wire encoding via
/// `Display`/`FromStr`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragPayload {
    pub source_id: String,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl fmt::Display for DragPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.source_id, self.offset_x, self.offset_y)
    }
}

impl FromStr for DragPayload {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ',');
        let malformed = || PayloadError::Malformed(s.to_owned());

        let source_id = parts.next().filter(|id| !id.is_empty()).ok_or_else(malformed)?;
        let offset_x = parts
            .next()
            .and_then(|x| x.trim().parse::<f32>().ok())
            .ok_or_else(malformed)?;
        let offset_y = parts
            .next()
            .and_then(|y| y.trim().parse::<f32>().ok())
            .ok_or_else(malformed)?;

        Ok(DragPayload {
            source_id: source_id.to_owned(),
            offset_x,
            offset_y,
        })
    }
}

/// Keyed string-slot channel carried on a drag event between dragstart
/// and drop, mirroring the platform transfer object.
#[derive(Debug, Clone, Default)]
pub struct DataTransfer {
    slots: HashMap<String, String>,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), value.into());
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    pub fn set_payload(&mut self, payload: &DragPayload) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(payload)?;
        self.set_data(PARAMS_KEY, encoded);
        Ok(())
    }

    /// Decodes the payload slot, accepting either the JSON encoding or
    /// the legacy comma-delimited form.
    pub fn payload(&self) -> Result<DragPayload, PayloadError> {
        let raw = self.get_data(PARAMS_KEY).ok_or(PayloadError::Missing)?;
        if let Ok(payload) = serde_json::from_str(raw) {
            return Ok(payload);
        }
        raw.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_encoding_matches_historical_format() {
        let payload = DragPayload {
            source_id: "stroke_rect".into(),
            offset_x: 0.0,
            offset_y: 0.0,
        };
        assert_eq!(payload.to_string(), "stroke_rect,0,0");
    }

    #[test]
    fn parses_legacy_encoding() {
        let payload: DragPayload = "fill_circle,12.5,7".parse().unwrap();
        assert_eq!(payload.source_id, "fill_circle");
        assert_eq!(payload.offset_x, 12.5);
        assert_eq!(payload.offset_y, 7.0);
    }

    #[test]
    fn rejects_truncated_legacy_payload() {
        assert_eq!(
            "stroke_rect,3".parse::<DragPayload>().unwrap_err(),
            PayloadError::Malformed("stroke_rect,3".into())
        );
        assert!(matches!(
            "".parse::<DragPayload>().unwrap_err(),
            PayloadError::Malformed(_)
        ));
    }

    #[test]
    fn transfer_round_trips_json_payload() {
        let payload = DragPayload {
            source_id: "stroke_circle".into(),
            offset_x: 4.0,
            offset_y: 9.0,
        };
        let mut transfer = DataTransfer::new();
        transfer.set_payload(&payload).unwrap();
        assert_eq!(transfer.payload().unwrap(), payload);
    }

    #[test]
    fn transfer_accepts_legacy_slot_contents() {
        let mut transfer = DataTransfer::new();
        transfer.set_data(PARAMS_KEY, "stroke_rect,0,0");
        let payload = transfer.payload().unwrap();
        assert_eq!(payload.source_id, "stroke_rect");
        assert_eq!((payload.offset_x, payload.offset_y), (0.0, 0.0));
    }

    #[test]
    fn empty_transfer_reports_missing_payload() {
        assert_eq!(DataTransfer::new().payload().unwrap_err(), PayloadError::Missing);
    }
}
