//! Reliability and stop-type codes attached to every prediction.
//!
//! The upstream API describes each predicted departure with two
//! single-character codes. They are independent of each other: a bus can be
//! both estimated and running only part of its route.

/// How trustworthy a predicted departure time is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reliability {
    /// Time is estimated from the timetable rather than tracked (`T`).
    Estimated,
    /// The bus is delayed (`B`).
    Delayed,
    /// The bus is on a diversion (`V`).
    Diverted,
    /// Any other code, e.g. `H` for a tracked, on-time bus.
    Other(char),
}

impl Reliability {
    /// Decode a reliability code. Only the first character is significant.
    ///
    /// Returns `None` for an empty code; every non-empty code decodes.
    ///
    /// ```
    /// use live_times::domain::Reliability;
    ///
    /// assert_eq!(Reliability::from_code("T"), Some(Reliability::Estimated));
    /// assert_eq!(Reliability::from_code("H"), Some(Reliability::Other('H')));
    /// assert_eq!(Reliability::from_code(""), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        let reliability = match code.chars().next()? {
            'T' => Reliability::Estimated,
            'B' => Reliability::Delayed,
            'V' => Reliability::Diverted,
            other => Reliability::Other(other),
        };
        Some(reliability)
    }
}

/// The role of the stop in the bus's route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopType {
    /// The stop is the terminus of the route (`D`).
    Terminus,
    /// The bus is only running part of its normal route (`P`).
    PartRoute,
    /// Any other code, e.g. `N` for a normal stop.
    Other(char),
}

impl StopType {
    /// Decode a stop-type code. Only the first character is significant.
    ///
    /// Returns `None` for an empty code; every non-empty code decodes.
    pub fn from_code(code: &str) -> Option<Self> {
        let stop_type = match code.chars().next()? {
            'D' => StopType::Terminus,
            'P' => StopType::PartRoute,
            other => StopType::Other(other),
        };
        Some(stop_type)
    }
}

/// Behaviour shared by everything carrying a live prediction: buses at a
/// stop and departures along a journey.
pub trait Prediction {
    /// Minutes until departure. Negative once the bus has left.
    fn departure_minutes(&self) -> i32;

    fn reliability(&self) -> Reliability;

    fn stop_type(&self) -> StopType;

    fn is_estimated_time(&self) -> bool {
        self.reliability() == Reliability::Estimated
    }

    fn is_delayed(&self) -> bool {
        self.reliability() == Reliability::Delayed
    }

    fn is_diverted(&self) -> bool {
        self.reliability() == Reliability::Diverted
    }

    fn is_terminus(&self) -> bool {
        self.stop_type() == StopType::Terminus
    }

    fn is_part_route(&self) -> bool {
        self.stop_type() == StopType::PartRoute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Reliability, StopType);

    impl Prediction for Fixed {
        fn departure_minutes(&self) -> i32 {
            0
        }

        fn reliability(&self) -> Reliability {
            self.0
        }

        fn stop_type(&self) -> StopType {
            self.1
        }
    }

    #[test]
    fn reliability_codes() {
        assert_eq!(Reliability::from_code("T"), Some(Reliability::Estimated));
        assert_eq!(Reliability::from_code("B"), Some(Reliability::Delayed));
        assert_eq!(Reliability::from_code("V"), Some(Reliability::Diverted));
        assert_eq!(Reliability::from_code("H"), Some(Reliability::Other('H')));
        assert_eq!(Reliability::from_code("t"), Some(Reliability::Other('t')));
        assert_eq!(Reliability::from_code(""), None);
    }

    #[test]
    fn reliability_uses_first_character() {
        assert_eq!(Reliability::from_code("TX"), Some(Reliability::Estimated));
        assert_eq!(Reliability::from_code("HT"), Some(Reliability::Other('H')));
    }

    #[test]
    fn stop_type_codes() {
        assert_eq!(StopType::from_code("D"), Some(StopType::Terminus));
        assert_eq!(StopType::from_code("P"), Some(StopType::PartRoute));
        assert_eq!(StopType::from_code("N"), Some(StopType::Other('N')));
        assert_eq!(StopType::from_code(""), None);
    }

    #[test]
    fn flags_are_mutually_exclusive() {
        let p = Fixed(Reliability::Delayed, StopType::Other('N'));
        assert!(p.is_delayed());
        assert!(!p.is_estimated_time());
        assert!(!p.is_diverted());
        assert!(!p.is_terminus());
        assert!(!p.is_part_route());

        let p = Fixed(Reliability::Other('H'), StopType::Terminus);
        assert!(!p.is_delayed());
        assert!(!p.is_estimated_time());
        assert!(!p.is_diverted());
        assert!(p.is_terminus());
        assert!(!p.is_part_route());
    }

    #[test]
    fn reliability_and_type_are_independent() {
        let p = Fixed(Reliability::Estimated, StopType::PartRoute);
        assert!(p.is_estimated_time());
        assert!(p.is_part_route());
    }
}
