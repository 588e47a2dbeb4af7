//! Bus tracker API response DTOs.
//!
//! These types map directly to the JSON the tracker API returns. Nearly
//! every field is an `Option` because the API omits or nulls fields freely;
//! deciding which of them are actually required happens during conversion,
//! where a bad element is dropped rather than failing the whole response.
//! A field with the wrong JSON type, on the other hand, fails
//! deserialisation of the whole document.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Response from `getBusTimes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusTimesResponse {
    /// Live data per stop, keyed by stop code. Required.
    pub bus_times: BTreeMap<String, StopTimes>,

    /// Whether a network-wide disruption is in effect.
    pub global_disruption: Option<bool>,
}

/// Live data for one stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTimes {
    pub stop_code: Option<String>,
    pub stop_name: Option<String>,
    pub disrupted: Option<bool>,
    pub services: Option<Vec<ServiceTimes>>,
}

/// One service calling at a stop.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTimes {
    pub service_name: Option<String>,
    /// Older feeds send the name here; some send both.
    pub name_air: Option<String>,
    pub operator: Option<String>,
    pub route: Option<String>,
    pub disrupted: Option<bool>,
    pub diverted: Option<bool>,
    pub buses: Option<Vec<BusTime>>,
}

/// One predicted bus.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusTime {
    pub destination: Option<String>,

    /// Minutes until departure; negative once departed.
    pub minutes: Option<i32>,

    /// Single-character reliability code.
    pub reliability: Option<String>,

    /// Single-character stop type code.
    #[serde(rename = "type")]
    pub stop_type: Option<String>,

    pub terminus: Option<String>,
    pub journey_id: Option<String>,
}

impl ServiceTimes {
    /// `serviceName` if present and non-empty, otherwise `nameAir`.
    pub fn name(&self) -> Option<&str> {
        pick_name(self.service_name.as_deref(), self.name_air.as_deref())
    }
}

/// Response from `getJourneyTimes`.
///
/// Only the first journey is ever read, so the elements are kept as raw
/// JSON: a malformed second journey must not fail the request.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyTimesResponse {
    pub journeys: Vec<serde_json::Value>,
}

/// One vehicle journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyTimes {
    pub journey_id: Option<String>,
    pub service_name: Option<String>,
    pub name_air: Option<String>,
    pub operator: Option<String>,
    pub route: Option<String>,
    pub destination: Option<String>,
    pub terminus: Option<String>,
    pub global_disruption: Option<bool>,
    pub disrupted: Option<bool>,
    pub diverted: Option<bool>,
    pub departures: Option<Vec<DepartureTime>>,
}

impl JourneyTimes {
    /// `serviceName` if present and non-empty, otherwise `nameAir`.
    pub fn name(&self) -> Option<&str> {
        pick_name(self.service_name.as_deref(), self.name_air.as_deref())
    }
}

fn pick_name<'a>(service_name: Option<&'a str>, name_air: Option<&'a str>) -> Option<&'a str> {
    match service_name {
        Some(name) if !name.is_empty() => Some(name),
        _ => name_air,
    }
}

/// One stop along a journey.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureTime {
    pub stop_code: Option<String>,
    pub stop_name: Option<String>,
    pub minutes: Option<i32>,
    pub disrupted: Option<bool>,
    pub reliability: Option<String>,
    #[serde(rename = "type")]
    pub stop_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_bus_times() {
        let json = r#"{
            "busTimes": {
                "36237983": {
                    "stopCode": "36237983",
                    "stopName": "Royal Scot Acad",
                    "disrupted": false,
                    "services": [
                        {
                            "serviceName": "22",
                            "operator": "LB",
                            "route": "Gyle Centre - Ocean Terminal",
                            "buses": [
                                {
                                    "destination": "Ocean Terminal",
                                    "minutes": 3,
                                    "reliability": "H",
                                    "type": "N",
                                    "terminus": "36232896",
                                    "journeyId": "4622"
                                }
                            ]
                        }
                    ]
                }
            },
            "globalDisruption": true
        }"#;

        let response: BusTimesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.global_disruption, Some(true));
        let stop = &response.bus_times["36237983"];
        assert_eq!(stop.stop_name.as_deref(), Some("Royal Scot Acad"));

        let services = stop.services.as_ref().unwrap();
        assert_eq!(services[0].service_name.as_deref(), Some("22"));
        assert_eq!(services[0].disrupted, None);

        let bus = &services[0].buses.as_ref().unwrap()[0];
        assert_eq!(bus.minutes, Some(3));
        assert_eq!(bus.stop_type.as_deref(), Some("N"));
        assert_eq!(bus.journey_id.as_deref(), Some("4622"));
    }

    #[test]
    fn null_and_absent_fields_are_none() {
        let json = r#"{"destination": null, "reliability": "T"}"#;
        let bus: BusTime = serde_json::from_str(json).unwrap();
        assert!(bus.destination.is_none());
        assert!(bus.minutes.is_none());
        assert_eq!(bus.reliability.as_deref(), Some("T"));
    }

    #[test]
    fn name_from_either_key() {
        let service: ServiceTimes = serde_json::from_str(r#"{"nameAir": "N22"}"#).unwrap();
        assert_eq!(service.name(), Some("N22"));

        let service: ServiceTimes =
            serde_json::from_str(r#"{"serviceName": "22", "nameAir": "N22"}"#).unwrap();
        assert_eq!(service.name(), Some("22"));

        let service: ServiceTimes =
            serde_json::from_str(r#"{"serviceName": "", "nameAir": "N22"}"#).unwrap();
        assert_eq!(service.name(), Some("N22"));

        let service: ServiceTimes = serde_json::from_str(r#"{"serviceName": null}"#).unwrap();
        assert_eq!(service.name(), None);
    }

    #[test]
    fn journey_name_from_either_key() {
        let journey: JourneyTimes =
            serde_json::from_str(r#"{"serviceName": "44", "nameAir": "44"}"#).unwrap();
        assert_eq!(journey.name(), Some("44"));

        let journey: JourneyTimes = serde_json::from_str(r#"{"nameAir": "T50"}"#).unwrap();
        assert_eq!(journey.name(), Some("T50"));
    }

    #[test]
    fn bus_times_field_required() {
        assert!(serde_json::from_str::<BusTimesResponse>("{}").is_err());
        assert!(serde_json::from_str::<BusTimesResponse>(r#"{"busTimes": null}"#).is_err());
        assert!(serde_json::from_str::<BusTimesResponse>(r#"{"busTimes": []}"#).is_err());
    }

    #[test]
    fn wrong_leaf_type_fails() {
        let json = r#"{"minutes": "soon"}"#;
        assert!(serde_json::from_str::<BusTime>(json).is_err());
    }

    #[test]
    fn deserialize_journey() {
        let json = r#"{
            "journeyId": "3322",
            "serviceName": "44",
            "terminus": "36232896",
            "departures": [
                {"stopCode": "36237983", "minutes": -1, "reliability": "T", "type": "N"}
            ]
        }"#;

        let journey: JourneyTimes = serde_json::from_str(json).unwrap();
        assert_eq!(journey.journey_id.as_deref(), Some("3322"));
        let departures = journey.departures.unwrap();
        assert_eq!(departures[0].minutes, Some(-1));
        assert!(departures[0].stop_name.is_none());
    }
}
