//! Domain types for live bus times.
//!
//! This module contains the validated values the rest of the crate hands
//! out. All types enforce their invariants at construction time, so code
//! that receives these types can trust their validity: services always have
//! buses, stops always have services, and both are kept in display order.

mod bus;
mod codes;
mod error;
mod journey;
mod service_name;
mod stop_code;

pub use bus::{LiveBus, LiveBusService, LiveBusStop, LiveBusTimes};
pub use codes::{Prediction, Reliability, StopType};
pub use error::DomainError;
pub use journey::{Journey, JourneyDeparture};
pub use service_name::{TRAM_SERVICE_NAME, compare_service_names, normalise_service_name};
pub use stop_code::{InvalidStopCode, StopCode};
