//! A single vehicle's journey along its route.

use chrono::{DateTime, Duration, Utc};

use super::codes::{Prediction, Reliability, StopType};
use super::error::DomainError;
use super::service_name::normalise_service_name;
use super::stop_code::StopCode;

/// One stop visited along a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyDeparture {
    stop_code: StopCode,
    stop_name: Option<String>,
    departure_time: DateTime<Utc>,
    departure_minutes: i32,
    is_bus_stop_disrupted: bool,
    reliability: Reliability,
    stop_type: StopType,
}

impl JourneyDeparture {
    /// Create a departure `departure_minutes` after `received_at`.
    pub fn new(
        stop_code: StopCode,
        departure_minutes: i32,
        reliability: Reliability,
        stop_type: StopType,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            stop_code,
            stop_name: None,
            departure_time: received_at + Duration::minutes(i64::from(departure_minutes)),
            departure_minutes,
            is_bus_stop_disrupted: false,
            reliability,
            stop_type,
        }
    }

    pub fn with_stop_name(mut self, stop_name: Option<String>) -> Self {
        self.stop_name = stop_name;
        self
    }

    pub fn with_bus_stop_disrupted(mut self, is_disrupted: bool) -> Self {
        self.is_bus_stop_disrupted = is_disrupted;
        self
    }

    pub fn stop_code(&self) -> &StopCode {
        &self.stop_code
    }

    /// Stop name, if reported. May be empty.
    pub fn stop_name(&self) -> Option<&str> {
        self.stop_name.as_deref()
    }

    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    pub fn is_bus_stop_disrupted(&self) -> bool {
        self.is_bus_stop_disrupted
    }
}

impl Prediction for JourneyDeparture {
    fn departure_minutes(&self) -> i32 {
        self.departure_minutes
    }

    fn reliability(&self) -> Reliability {
        self.reliability
    }

    fn stop_type(&self) -> StopType {
        self.stop_type
    }
}

/// The full sequence of stops for one vehicle journey.
///
/// Unlike a [`LiveBusService`](super::LiveBusService), a journey may have no
/// departures at all: the vehicle can have finished its trip while the
/// journey is still known to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    journey_id: String,
    service_name: String,
    operator: Option<String>,
    route: Option<String>,
    destination: Option<String>,
    terminus: String,
    has_global_disruption: bool,
    has_service_disruption: bool,
    has_service_diversion: bool,
    departures: Vec<JourneyDeparture>,
}

impl Journey {
    /// Create a journey, sorting departures in the order they are visited.
    ///
    /// Fails if the journey id, service name or terminus is empty.
    pub fn new(
        journey_id: impl Into<String>,
        service_name: &str,
        terminus: impl Into<String>,
        mut departures: Vec<JourneyDeparture>,
    ) -> Result<Self, DomainError> {
        let journey_id = journey_id.into();
        if journey_id.is_empty() {
            return Err(DomainError::EmptyField("journey id"));
        }

        if service_name.is_empty() {
            return Err(DomainError::EmptyField("service name"));
        }

        let terminus = terminus.into();
        if terminus.is_empty() {
            return Err(DomainError::EmptyField("terminus"));
        }

        departures.sort_by_key(|d| d.departure_minutes);

        Ok(Self {
            journey_id,
            service_name: normalise_service_name(service_name).to_string(),
            operator: None,
            route: None,
            destination: None,
            terminus,
            has_global_disruption: false,
            has_service_disruption: false,
            has_service_diversion: false,
            departures,
        })
    }

    pub fn with_operator(mut self, operator: Option<String>) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_route(mut self, route: Option<String>) -> Self {
        self.route = route;
        self
    }

    pub fn with_destination(mut self, destination: Option<String>) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_global_disruption(mut self, disrupted: bool) -> Self {
        self.has_global_disruption = disrupted;
        self
    }

    pub fn with_service_disruption(mut self, disrupted: bool) -> Self {
        self.has_service_disruption = disrupted;
        self
    }

    pub fn with_service_diversion(mut self, diverted: bool) -> Self {
        self.has_service_diversion = diverted;
        self
    }

    pub fn journey_id(&self) -> &str {
        &self.journey_id
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Stop code of the journey's terminus.
    pub fn terminus(&self) -> &str {
        &self.terminus
    }

    pub fn has_global_disruption(&self) -> bool {
        self.has_global_disruption
    }

    pub fn has_service_disruption(&self) -> bool {
        self.has_service_disruption
    }

    pub fn has_service_diversion(&self) -> bool {
        self.has_service_diversion
    }

    /// Departures in the order the vehicle reaches them. May be empty.
    pub fn departures(&self) -> &[JourneyDeparture] {
        &self.departures
    }

    /// The departure from the given stop, if the journey calls there.
    pub fn departure_at(&self, stop_code: &StopCode) -> Option<&JourneyDeparture> {
        self.departures.iter().find(|d| &d.stop_code == stop_code)
    }
}
