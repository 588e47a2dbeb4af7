//! Service (route) name normalisation and ordering.
//!
//! Service names are things like "1", "44A", "N22" or "TRAM". Sorting them
//! as plain strings gives "1", "22", "4", which is not what anybody reading a
//! departure board expects, so services are sorted in "route number" order:
//! the name is split into runs of digits and runs of everything else, digit
//! runs compare by numeric value, and a digit run sorts before a text run.

use std::cmp::Ordering;

/// The name every tram service is reported under after normalisation.
pub const TRAM_SERVICE_NAME: &str = "TRAM";

/// Names the upstream API inconsistently uses for the tram line.
const TRAM_ALIASES: [&str; 2] = ["50", "T50"];

/// Rewrite a service name as it should be shown to users.
///
/// The tram line is reported as "50" or "T50" depending on the upstream
/// feed; both become [`TRAM_SERVICE_NAME`]. Every other name is returned
/// unchanged.
///
/// ```
/// use live_times::domain::normalise_service_name;
///
/// assert_eq!(normalise_service_name("T50"), "TRAM");
/// assert_eq!(normalise_service_name("50"), "TRAM");
/// assert_eq!(normalise_service_name("500"), "500");
/// ```
pub fn normalise_service_name(name: &str) -> &str {
    if TRAM_ALIASES.contains(&name) {
        TRAM_SERVICE_NAME
    } else {
        name
    }
}

/// A run of either ASCII digits or non-digit characters within a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn compare_chunks(a: Chunk<'_>, b: Chunk<'_>) -> Ordering {
    match (a, b) {
        (Chunk::Digits(a), Chunk::Digits(b)) => compare_digit_runs(a, b),
        (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
        (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
    }
}

/// Compare two runs of ASCII digits by numeric value without parsing them,
/// so arbitrarily long runs cannot overflow.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Iterator splitting a name into digit and non-digit runs.
struct Chunks<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map_or(self.rest.len(), |(i, _)| i);

        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;

        Some(if digits {
            Chunk::Digits(run)
        } else {
            Chunk::Text(run)
        })
    }
}

fn chunks(name: &str) -> Chunks<'_> {
    Chunks { rest: name }
}

/// Compare two service names in route-number order.
///
/// - "4" < "22" < "30" (numeric, not lexicographic)
/// - "44" < "44A" (no suffix before a suffix)
/// - "44A" < "N22" (names starting with a digit before names starting with a letter)
/// - "N22" < "N34" < "TRAM"
///
/// Names that compare equal chunk-by-chunk but differ in spelling (e.g.
/// "04" and "4") fall back to plain string order, so the result is a total
/// order consistent with string equality.
///
/// ```
/// use live_times::domain::compare_service_names;
///
/// let mut names = vec!["N22", "30", "44A", "1", "22", "44", "4"];
/// names.sort_by(|a, b| compare_service_names(a, b));
/// assert_eq!(names, ["1", "4", "22", "30", "44", "44A", "N22"]);
/// ```
pub fn compare_service_names(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_chunks(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}
