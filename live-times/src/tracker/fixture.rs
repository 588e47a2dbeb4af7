//! Fixture client for running without API access.
//!
//! Serves recorded responses from a directory laid out as
//!
//! ```text
//! <dir>/bus-times/<stopCode>.json
//! <dir>/journey-times/<journeyId>.json
//! ```
//!
//! Files go through the same parsers as live responses, so a recorded fault
//! envelope is reported exactly as the server's would be.

use std::io;
use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Journey, LiveBusTimes, StopCode};

use super::bus_times::parse_bus_times_str;
use super::error::LiveTimesError;
use super::journey_times::parse_journey_times_str;

const BUS_TIMES_DIR: &str = "bus-times";
const JOURNEY_TIMES_DIR: &str = "journey-times";

/// Client that reads recorded responses from disk.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    dir: PathBuf,
    /// Pinned receive time; `None` means use the clock.
    received_at: Option<DateTime<Utc>>,
}

impl FixtureClient {
    /// Create a client serving files under `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, LiveTimesError> {
        let dir = dir.as_ref();
        if !std::fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("fixture path {} is not a directory", dir.display()),
            )
            .into());
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            received_at: None,
        })
    }

    /// Treat every response as received at `received_at`.
    pub fn at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = Some(received_at);
        self
    }

    /// Get live times for the given stops, one file per stop.
    ///
    /// A global disruption flagged in any file applies to the result.
    pub fn get_bus_times(&self, stops: &[StopCode]) -> Result<LiveBusTimes, LiveTimesError> {
        let received_at = self.now();
        let mut collected = Vec::new();
        let mut has_global_disruption = false;

        for stop in stops {
            let path = self.fixture_path(BUS_TIMES_DIR, stop.as_str())?;
            debug!(path = %path.display(), "reading bus times fixture");

            let body = std::fs::read_to_string(&path)?;
            let times = parse_bus_times_str(&body, received_at)?;
            has_global_disruption |= times.has_global_disruption();
            collected.extend(times.stops().cloned());
        }

        Ok(LiveBusTimes::new(
            collected,
            has_global_disruption,
            received_at,
        ))
    }

    /// Get a recorded journey by id.
    pub fn get_journey_times(&self, journey_id: &str) -> Result<Journey, LiveTimesError> {
        let path = self.fixture_path(JOURNEY_TIMES_DIR, journey_id)?;
        debug!(path = %path.display(), "reading journey times fixture");

        let body = std::fs::read_to_string(&path)?;
        parse_journey_times_str(&body, self.now())
    }

    /// Path of `<dir>/<subdir>/<name>.json`. `name` must be a single plain
    /// file name so lookups stay inside the fixture directory.
    fn fixture_path(&self, subdir: &str, name: &str) -> Result<PathBuf, LiveTimesError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => {
                Ok(self.dir.join(subdir).join(format!("{name}.json")))
            }
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{name:?} is not a valid fixture name"),
            )
            .into()),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.received_at.unwrap_or_else(Utc::now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixtures_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/fixtures")
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn stop(code: &str) -> StopCode {
        StopCode::parse(code).unwrap()
    }

    #[test]
    fn serves_recorded_bus_times() {
        let client = FixtureClient::new(fixtures_dir()).unwrap().at(noon());
        let times = client.get_bus_times(&[stop("36237983")]).unwrap();

        assert_eq!(times.received_at(), noon());
        let royal_scot = times.get(&stop("36237983")).unwrap();
        assert_eq!(royal_scot.stop_name(), Some("Royal Scot Acad"));
        assert_eq!(royal_scot.services().len(), 10);
    }

    #[test]
    fn serves_recorded_journey() {
        let client = FixtureClient::new(fixtures_dir()).unwrap().at(noon());
        let journey = client.get_journey_times("3322").unwrap();

        assert_eq!(journey.journey_id(), "3322");
        assert_eq!(journey.departures().len(), 34);
    }

    #[test]
    fn missing_file_is_io_error() {
        let client = FixtureClient::new(fixtures_dir()).unwrap();

        match client.get_bus_times(&[stop("99999999")]) {
            Err(LiveTimesError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            other => panic!("expected I/O error, got {other:?}"),
        }
        assert!(matches!(
            client.get_journey_times("0"),
            Err(LiveTimesError::Io(_))
        ));
    }

    #[test]
    fn names_outside_fixture_dir_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let fixtures = dir.path().join("fixtures");
        std::fs::create_dir_all(fixtures.join(JOURNEY_TIMES_DIR)).unwrap();
        std::fs::write(dir.path().join("secret.json"), r#"{"journeys": []}"#).unwrap();

        let client = FixtureClient::new(&fixtures).unwrap();
        for id in ["../../secret", "..", ".", "", "a/b", "a\\b", "/etc/passwd"] {
            match client.get_journey_times(id) {
                Err(LiveTimesError::Io(e)) => {
                    assert_eq!(e.kind(), io::ErrorKind::InvalidInput, "id {id:?}")
                }
                other => panic!("expected invalid input for {id:?}, got {other:?}"),
            }
        }

        assert!(matches!(
            client.get_bus_times(&[stop("../x")]),
            Err(LiveTimesError::Io(e)) if e.kind() == io::ErrorKind::InvalidInput
        ));
    }

    #[test]
    fn missing_directory_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FixtureClient::new(dir.path().join("nope")).is_err());
    }

    #[test]
    fn merges_stops_from_several_files() {
        let dir = tempfile::tempdir().unwrap();
        let bus_times = dir.path().join(BUS_TIMES_DIR);
        std::fs::create_dir(&bus_times).unwrap();

        for (code, global) in [("1001", false), ("1002", true)] {
            let body = serde_json::json!({
                "busTimes": {
                    code: {
                        "stopCode": code,
                        "services": [{
                            "serviceName": "5",
                            "buses": [{
                                "destination": "Hunters Tryst",
                                "minutes": 4,
                                "reliability": "T",
                                "type": "N"
                            }]
                        }]
                    }
                },
                "globalDisruption": global
            });
            std::fs::write(bus_times.join(format!("{code}.json")), body.to_string()).unwrap();
        }

        let client = FixtureClient::new(dir.path()).unwrap().at(noon());
        let times = client
            .get_bus_times(&[stop("1001"), stop("1002")])
            .unwrap();

        assert_eq!(times.len(), 2);
        assert!(times.contains(&stop("1001")));
        assert!(times.contains(&stop("1002")));
        assert!(times.has_global_disruption());
    }

    #[test]
    fn recorded_fault_is_classified() {
        let dir = tempfile::tempdir().unwrap();
        let journeys = dir.path().join(JOURNEY_TIMES_DIR);
        std::fs::create_dir(&journeys).unwrap();
        std::fs::write(
            journeys.join("77.json"),
            r#"{"faultcode": "SYSTEM_MAINTENANCE", "faultstring": "Back soon"}"#,
        )
        .unwrap();

        let client = FixtureClient::new(dir.path()).unwrap();
        assert!(matches!(
            client.get_journey_times("77"),
            Err(LiveTimesError::Maintenance)
        ));
    }
}
