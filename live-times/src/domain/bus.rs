//! Live bus times at stops.
//!
//! The hierarchy mirrors how a departure board reads: a [`LiveBusTimes`]
//! snapshot holds one [`LiveBusStop`] per requested stop, each stop lists
//! the [`LiveBusService`]s calling there, and each service lists its next
//! [`LiveBus`]es. Constructors enforce ordering and non-emptiness, so a value
//! that exists is always displayable.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::codes::{Prediction, Reliability, StopType};
use super::error::DomainError;
use super::service_name::{compare_service_names, normalise_service_name};
use super::stop_code::StopCode;

/// One predicted bus visit to a stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBus {
    destination: String,
    departure_time: DateTime<Utc>,
    departure_minutes: i32,
    terminus: Option<String>,
    journey_id: Option<String>,
    reliability: Reliability,
    stop_type: StopType,
}

impl LiveBus {
    /// Create a bus departing `departure_minutes` after `received_at`.
    pub fn new(
        destination: impl Into<String>,
        departure_minutes: i32,
        reliability: Reliability,
        stop_type: StopType,
        received_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let destination = destination.into();
        if destination.is_empty() {
            return Err(DomainError::EmptyField("destination"));
        }

        Ok(Self {
            destination,
            departure_time: received_at + Duration::minutes(i64::from(departure_minutes)),
            departure_minutes,
            terminus: None,
            journey_id: None,
            reliability,
            stop_type,
        })
    }

    /// Set the stop code of the terminus this bus is heading for.
    pub fn with_terminus(mut self, terminus: Option<String>) -> Self {
        self.terminus = terminus;
        self
    }

    /// Set the identifier of the vehicle journey this visit belongs to.
    pub fn with_journey_id(mut self, journey_id: Option<String>) -> Self {
        self.journey_id = journey_id;
        self
    }

    /// Display destination (e.g., "Clermiston").
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Predicted departure time.
    pub fn departure_time(&self) -> DateTime<Utc> {
        self.departure_time
    }

    /// Terminus stop code, if the API reported one. May be empty.
    pub fn terminus(&self) -> Option<&str> {
        self.terminus.as_deref()
    }

    /// Journey identifier, if the API reported one. May be empty.
    pub fn journey_id(&self) -> Option<&str> {
        self.journey_id.as_deref()
    }
}

impl Prediction for LiveBus {
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

/// The buses of one service calling at one stop.
///
/// Always holds at least one bus, sorted soonest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBusService {
    name: String,
    operator: Option<String>,
    route: Option<String>,
    is_disrupted: bool,
    is_diverted: bool,
    buses: Vec<LiveBus>,
}

impl LiveBusService {
    /// Create a service from its buses.
    ///
    /// The name is normalised (the tram line's aliases become "TRAM") and the
    /// buses are sorted by departure minutes. Fails if the name is empty or
    /// there are no buses.
    pub fn new(name: &str, mut buses: Vec<LiveBus>) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::EmptyField("service name"));
        }

        let name = normalise_service_name(name).to_string();

        if buses.is_empty() {
            return Err(DomainError::ServiceWithoutBuses(name));
        }

        buses.sort_by_key(|bus| bus.departure_minutes);

        Ok(Self {
            name,
            operator: None,
            route: None,
            is_disrupted: false,
            is_diverted: false,
            buses,
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

    pub fn with_disrupted(mut self, is_disrupted: bool) -> Self {
        self.is_disrupted = is_disrupted;
        self
    }

    pub fn with_diverted(mut self, is_diverted: bool) -> Self {
        self.is_diverted = is_diverted;
        self
    }

    /// Normalised service name (e.g., "44A", "N22", "TRAM").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operator name, if reported. May be empty.
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// Route description, if reported. May be empty.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn is_disrupted(&self) -> bool {
        self.is_disrupted
    }

    pub fn is_diverted(&self) -> bool {
        self.is_diverted
    }

    /// Buses in ascending order of departure minutes. Never empty.
    pub fn buses(&self) -> &[LiveBus] {
        &self.buses
    }

    /// The soonest bus.
    pub fn next_bus(&self) -> &LiveBus {
        // Non-empty by construction.
        &self.buses[0]
    }
}

/// Live data for one physical stop.
///
/// Always holds at least one service, in route-number order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBusStop {
    stop_code: StopCode,
    stop_name: Option<String>,
    is_disrupted: bool,
    services: Vec<LiveBusService>,
}

impl LiveBusStop {
    /// Create a stop from its services, sorting them by service name.
    pub fn new(
        stop_code: StopCode,
        stop_name: Option<String>,
        mut services: Vec<LiveBusService>,
    ) -> Result<Self, DomainError> {
        if services.is_empty() {
            return Err(DomainError::StopWithoutServices(
                stop_code.as_str().to_string(),
            ));
        }

        services.sort_by(|a, b| compare_service_names(a.name(), b.name()));

        Ok(Self {
            stop_code,
            stop_name,
            is_disrupted: false,
            services,
        })
    }

    pub fn with_disrupted(mut self, is_disrupted: bool) -> Self {
        self.is_disrupted = is_disrupted;
        self
    }

    pub fn stop_code(&self) -> &StopCode {
        &self.stop_code
    }

    /// Stop name as reported. `None` when the API omitted it; an empty
    /// string when the API sent one.
    pub fn stop_name(&self) -> Option<&str> {
        self.stop_name.as_deref()
    }

    pub fn is_disrupted(&self) -> bool {
        self.is_disrupted
    }

    /// Services in route-number order. Never empty.
    pub fn services(&self) -> &[LiveBusService] {
        &self.services
    }

    /// Look up a service by its (normalised) name.
    pub fn service(&self, name: &str) -> Option<&LiveBusService> {
        let name = normalise_service_name(name);
        self.services.iter().find(|s| s.name() == name)
    }
}

/// A snapshot of live times for a set of stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveBusTimes {
    stops: BTreeMap<StopCode, LiveBusStop>,
    has_global_disruption: bool,
    received_at: DateTime<Utc>,
}

impl LiveBusTimes {
    /// Build a snapshot keyed by each stop's own code.
    ///
    /// If two stops share a code the later one wins.
    pub fn new(
        stops: impl IntoIterator<Item = LiveBusStop>,
        has_global_disruption: bool,
        received_at: DateTime<Utc>,
    ) -> Self {
        let stops = stops
            .into_iter()
            .map(|stop| (stop.stop_code.clone(), stop))
            .collect();

        Self {
            stops,
            has_global_disruption,
            received_at,
        }
    }

    /// Live data for one stop, if it is in the snapshot.
    pub fn get(&self, stop_code: &StopCode) -> Option<&LiveBusStop> {
        self.stops.get(stop_code)
    }

    pub fn contains(&self, stop_code: &StopCode) -> bool {
        self.stops.contains_key(stop_code)
    }

    /// Stop codes in the snapshot, in ascending order.
    pub fn stop_codes(&self) -> impl Iterator<Item = &StopCode> {
        self.stops.keys()
    }

    /// Stops in the snapshot, ordered by stop code.
    pub fn stops(&self) -> impl Iterator<Item = &LiveBusStop> {
        self.stops.values()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Whether the API flagged a network-wide disruption.
    pub fn has_global_disruption(&self) -> bool {
        self.has_global_disruption
    }

    /// When the response these times were parsed from was received.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}
