//! Live bus tracker client.
//!
//! Turns responses from the tracker API into domain snapshots.
//!
//! Key characteristics of the tracker:
//! - Failures come back as ordinary JSON carrying a `faultcode`, so every
//!   response is checked for a fault before its data is read
//! - Times are relative: `minutes` counts from when the response arrived
//! - Individual stops, services, buses or departures with missing data are
//!   dropped (and logged at `debug`) without failing the response

mod bus_times;
mod client;
mod error;
mod fault;
mod fixture;
mod journey_times;
mod types;

pub use bus_times::{parse_bus_times, parse_bus_times_str};
pub use client::{ClientConfig, FetchError, TrackerClient};
pub use error::{LiveTimesError, Rejection};
pub use fault::classify_fault;
pub use fixture::FixtureClient;
pub use journey_times::{parse_journey_times, parse_journey_times_str};
pub use types::{
    BusTime, BusTimesResponse, DepartureTime, JourneyTimes, JourneyTimesResponse, ServiceTimes,
    StopTimes,
};
