//! Conversion of `getJourneyTimes` responses to domain types.
//!
//! A response carries a list of journeys, but a request is always for a
//! single journey: only the first element is read. Departures that fail
//! validation are dropped; a journey that fails validation fails the
//! request, since there is nothing else to return.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{Journey, JourneyDeparture, Reliability, StopCode, StopType};

use super::error::{LiveTimesError, Rejection, require};
use super::fault::classify_fault;
use super::types::{DepartureTime, JourneyTimes, JourneyTimesResponse};

/// Parse a `getJourneyTimes` response received at `received_at`.
pub fn parse_journey_times(
    root: &Value,
    received_at: DateTime<Utc>,
) -> Result<Journey, LiveTimesError> {
    if let Some(fault) = classify_fault(root) {
        warn!(error = %fault, "journey times request failed");
        return Err(fault);
    }

    let response = JourneyTimesResponse::deserialize(root).map_err(LiveTimesError::Format)?;

    let first = response.journeys.first().ok_or(LiveTimesError::NoJourneys)?;
    if response.journeys.len() > 1 {
        debug!(
            count = response.journeys.len(),
            "ignoring all but the first journey"
        );
    }

    let journey = JourneyTimes::deserialize(first).map_err(LiveTimesError::Format)?;

    convert_journey(&journey, received_at).map_err(|e| {
        debug!(
            journey = journey.journey_id.as_deref().unwrap_or_default(),
            reason = %e,
            "rejecting journey"
        );
        LiveTimesError::InvalidJourney(e)
    })
}

/// Parse a `getJourneyTimes` response body.
pub fn parse_journey_times_str(
    body: &str,
    received_at: DateTime<Utc>,
) -> Result<Journey, LiveTimesError> {
    let root: Value = serde_json::from_str(body).map_err(LiveTimesError::Syntax)?;
    parse_journey_times(&root, received_at)
}

fn convert_journey(
    journey: &JourneyTimes,
    received_at: DateTime<Utc>,
) -> Result<Journey, Rejection> {
    let journey_id = require(journey.journey_id.as_deref(), "journeyId")?;
    let service_name = require(journey.name(), "serviceName")?;
    let terminus = require(journey.terminus.as_deref(), "terminus")?;
    let departures = journey
        .departures
        .as_deref()
        .ok_or(Rejection::MissingField("departures"))?;

    let departures = departures
        .iter()
        .filter_map(|departure| match convert_departure(departure, received_at) {
            Ok(departure) => Some(departure),
            Err(e) => {
                debug!(journey = journey_id, reason = %e, "dropping departure");
                None
            }
        })
        .collect();

    let journey = Journey::new(journey_id, service_name, terminus, departures)?
        .with_operator(journey.operator.clone())
        .with_route(journey.route.clone())
        .with_destination(journey.destination.clone())
        .with_global_disruption(journey.global_disruption.unwrap_or(false))
        .with_service_disruption(journey.disrupted.unwrap_or(false))
        .with_service_diversion(journey.diverted.unwrap_or(false));

    Ok(journey)
}

fn convert_departure(
    departure: &DepartureTime,
    received_at: DateTime<Utc>,
) -> Result<JourneyDeparture, Rejection> {
    let stop_code = StopCode::parse(require(departure.stop_code.as_deref(), "stopCode")?)?;
    let minutes = departure
        .minutes
        .ok_or(Rejection::MissingField("minutes"))?;
    let reliability = departure
        .reliability
        .as_deref()
        .and_then(Reliability::from_code)
        .ok_or(Rejection::MissingField("reliability"))?;
    let stop_type = departure
        .stop_type
        .as_deref()
        .and_then(StopType::from_code)
        .ok_or(Rejection::MissingField("type"))?;

    let departure = JourneyDeparture::new(stop_code, minutes, reliability, stop_type, received_at)
        .with_stop_name(departure.stop_name.clone())
        .with_bus_stop_disrupted(departure.disrupted.unwrap_or(false));

    Ok(departure)
}
