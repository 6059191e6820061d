//! Wire types for the scheduling provider API.
//!
//! The provider speaks camelCase JSON. Wire shapes are kept separate from
//! the domain types; conversion validates centre ids and test types and
//! groups slots by their reference-zone local date.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::domain::{AppointmentSlot, CentreId, SlotsByDate, TestType};
use crate::session::KpiIdentifiers;

/// One bookable slot as the provider serialises it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSlot {
    pub start_date_time: DateTime<Utc>,
    pub test_centre_id: String,
    pub test_type: String,
}

/// The provider's response to a slot query.
///
/// `kpi_identifiers` is present only when the request carried the
/// preferred-date signal; it rides along with the first fetch of a
/// booking attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotsResponse {
    #[serde(default)]
    pub slots: Vec<WireSlot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kpi_identifiers: Option<KpiIdentifiers>,
}

/// A converted, domain-typed slot query result.
#[derive(Debug, Clone)]
pub struct SlotsResult {
    pub slots_by_date: SlotsByDate,
    pub kpi: Option<KpiIdentifiers>,
}

/// Error converting a wire response to domain types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid centre id in slot: {0}")]
    InvalidCentre(String),

    #[error("unknown test type in slot: {0}")]
    UnknownTestType(String),
}

/// Convert a wire response, grouping slots by local date in `zone`.
///
/// Provider order within a date is preserved; slots that straddle
/// midnight UTC land on the local date their start falls on.
pub fn convert_response(response: SlotsResponse, zone: Tz) -> Result<SlotsResult, ConversionError> {
    let mut slots_by_date = SlotsByDate::new();

    for wire in response.slots {
        let centre = CentreId::parse(&wire.test_centre_id)
            .map_err(|_| ConversionError::InvalidCentre(wire.test_centre_id.clone()))?;
        let test_type = TestType::parse(&wire.test_type)
            .map_err(|_| ConversionError::UnknownTestType(wire.test_type.clone()))?;

        let local_date = wire.start_date_time.with_timezone(&zone).date_naive();
        slots_by_date.push(
            local_date.into(),
            AppointmentSlot {
                start: wire.start_date_time,
                centre,
                test_type,
            },
        );
    }

    Ok(SlotsResult {
        slots_by_date,
        kpi: response.kpi_identifiers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CalendarDate, REFERENCE_ZONE};
    use chrono::TimeZone;

    fn wire(y: i32, m: u32, d: u32, hour: u32) -> WireSlot {
        WireSlot {
            start_date_time: Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap(),
            test_centre_id: "leeds-1".to_string(),
            test_type: "car".to_string(),
        }
    }

    #[test]
    fn groups_by_local_date() {
        // 23:30 UTC on 14 July is 00:30 local on the 15th under BST
        let response = SlotsResponse {
            slots: vec![wire(2024, 7, 14, 10), wire(2024, 7, 14, 23)],
            kpi_identifiers: None,
        };

        let result = convert_response(response, REFERENCE_ZONE).unwrap();

        let d14 = CalendarDate::from_ymd(2024, 7, 14).unwrap();
        let d15 = CalendarDate::from_ymd(2024, 7, 15).unwrap();
        assert_eq!(result.slots_by_date.for_date(d14).len(), 1);
        assert_eq!(result.slots_by_date.for_date(d15).len(), 1);
    }

    #[test]
    fn preserves_provider_order() {
        let response = SlotsResponse {
            slots: vec![
                wire(2024, 1, 15, 14),
                wire(2024, 1, 15, 9),
                wire(2024, 1, 15, 11),
            ],
            kpi_identifiers: None,
        };

        let result = convert_response(response, REFERENCE_ZONE).unwrap();
        let date = CalendarDate::from_ymd(2024, 1, 15).unwrap();
        let hours: Vec<u32> = result
            .slots_by_date
            .for_date(date)
            .iter()
            .map(|s| {
                use chrono::Timelike;
                s.start.hour()
            })
            .collect();
        assert_eq!(hours, vec![14, 9, 11]);
    }

    #[test]
    fn bad_centre_or_test_type_is_an_error() {
        let mut slot = wire(2024, 1, 15, 9);
        slot.test_centre_id = "not valid!".to_string();
        let response = SlotsResponse {
            slots: vec![slot],
            kpi_identifiers: None,
        };
        assert!(matches!(
            convert_response(response, REFERENCE_ZONE),
            Err(ConversionError::InvalidCentre(_))
        ));

        let mut slot = wire(2024, 1, 15, 9);
        slot.test_type = "hovercraft".to_string();
        let response = SlotsResponse {
            slots: vec![slot],
            kpi_identifiers: None,
        };
        assert!(matches!(
            convert_response(response, REFERENCE_ZONE),
            Err(ConversionError::UnknownTestType(_))
        ));
    }

    #[test]
    fn kpi_identifiers_pass_through() {
        let response = SlotsResponse {
            slots: vec![],
            kpi_identifiers: Some(KpiIdentifiers {
                date_available_on_or_after_today: Some("2024-01-16".into()),
                ..Default::default()
            }),
        };

        let result = convert_response(response, REFERENCE_ZONE).unwrap();
        assert!(result.kpi.is_some());
        assert!(result.slots_by_date.is_empty());
    }

    #[test]
    fn deserialises_camel_case() {
        let json = r#"{
            "slots": [
                {
                    "startDateTime": "2024-01-15T09:00:00Z",
                    "testCentreId": "leeds-1",
                    "testType": "car"
                }
            ],
            "kpiIdentifiers": {
                "dateAvailableOnOrAfterToday": "2024-01-16"
            }
        }"#;

        let response: SlotsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.slots.len(), 1);
        assert!(response.kpi_identifiers.is_some());
    }
}
