//! Live bus times.
//!
//! Reads real-time departure predictions from a bus tracker API and
//! presents them as validated, ordered snapshots: which services call at a
//! stop, when the next buses leave, and where a given bus goes next.

pub mod domain;
pub mod tracker;
