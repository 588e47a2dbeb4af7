//! Conversion of `getBusTimes` responses to domain types.
//!
//! Validation is bottom-up and forgiving: a bus, service or stop that is
//! missing required data is logged and dropped, and its siblings are kept.
//! A service left without buses, or a stop left without services, is
//! dropped in turn. Only faults reported by the server and documents whose
//! overall shape is wrong fail the whole parse.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    LiveBus, LiveBusService, LiveBusStop, LiveBusTimes, Reliability, StopCode, StopType,
};

use super::error::{LiveTimesError, Rejection, require};
use super::fault::classify_fault;
use super::types::{BusTime, BusTimesResponse, ServiceTimes, StopTimes};

/// Parse a `getBusTimes` response received at `received_at`.
///
/// An empty result (no stop survived validation) is a valid, empty
/// snapshot, not an error. Stops are keyed by their own `stopCode`; if two
/// entries share one, the entry whose key sorts last is kept.
pub fn parse_bus_times(
    root: &Value,
    received_at: DateTime<Utc>,
) -> Result<LiveBusTimes, LiveTimesError> {
    if let Some(fault) = classify_fault(root) {
        warn!(error = %fault, "bus times request failed");
        return Err(fault);
    }

    let response = BusTimesResponse::deserialize(root).map_err(LiveTimesError::Format)?;

    let mut seen = BTreeSet::new();
    let stops = response
        .bus_times
        .iter()
        .filter_map(|(key, stop)| match convert_stop(stop, received_at) {
            Ok(stop) => Some(stop),
            Err(e) => {
                debug!(stop = %key, reason = %e, "dropping stop");
                None
            }
        })
        .inspect(|stop| {
            if !seen.insert(stop.stop_code().clone()) {
                debug!(stop = %stop.stop_code(), "stop code repeated, replacing earlier entry");
            }
        });

    Ok(LiveBusTimes::new(
        stops,
        response.global_disruption.unwrap_or(false),
        received_at,
    ))
}

/// Parse a `getBusTimes` response body.
pub fn parse_bus_times_str(
    body: &str,
    received_at: DateTime<Utc>,
) -> Result<LiveBusTimes, LiveTimesError> {
    let root: Value = serde_json::from_str(body).map_err(LiveTimesError::Syntax)?;
    parse_bus_times(&root, received_at)
}

fn convert_stop(stop: &StopTimes, received_at: DateTime<Utc>) -> Result<LiveBusStop, Rejection> {
    let stop_code = StopCode::parse(require(stop.stop_code.as_deref(), "stopCode")?)?;

    let services = stop
        .services
        .iter()
        .flatten()
        .filter_map(|service| match convert_service(service, received_at) {
            Ok(service) => Some(service),
            Err(e) => {
                debug!(
                    stop = %stop_code,
                    service = service.name().unwrap_or_default(),
                    reason = %e,
                    "dropping service"
                );
                None
            }
        })
        .collect();

    let stop = LiveBusStop::new(stop_code, stop.stop_name.clone(), services)?
        .with_disrupted(stop.disrupted.unwrap_or(false));

    Ok(stop)
}

fn convert_service(
    service: &ServiceTimes,
    received_at: DateTime<Utc>,
) -> Result<LiveBusService, Rejection> {
    let name = require(service.name(), "serviceName")?;

    let buses = match service.buses.as_deref() {
        Some(buses) if !buses.is_empty() => buses,
        _ => return Err(Rejection::MissingField("buses")),
    };

    let buses = buses
        .iter()
        .filter_map(|bus| match convert_bus(bus, received_at) {
            Ok(bus) => Some(bus),
            Err(e) => {
                debug!(service = name, reason = %e, "dropping bus");
                None
            }
        })
        .collect();

    let service = LiveBusService::new(name, buses)?
        .with_operator(service.operator.clone())
        .with_route(service.route.clone())
        .with_disrupted(service.disrupted.unwrap_or(false))
        .with_diverted(service.diverted.unwrap_or(false));

    Ok(service)
}

fn convert_bus(bus: &BusTime, received_at: DateTime<Utc>) -> Result<LiveBus, Rejection> {
    let destination = require(bus.destination.as_deref(), "destination")?;
    let minutes = bus.minutes.ok_or(Rejection::MissingField("minutes"))?;
    let reliability = bus
        .reliability
        .as_deref()
        .and_then(Reliability::from_code)
        .ok_or(Rejection::MissingField("reliability"))?;
    let stop_type = bus
        .stop_type
        .as_deref()
        .and_then(StopType::from_code)
        .ok_or(Rejection::MissingField("type"))?;

    let bus = LiveBus::new(destination, minutes, reliability, stop_type, received_at)?
        .with_terminus(bus.terminus.clone())
        .with_journey_id(bus.journey_id.clone());

    Ok(bus)
}
