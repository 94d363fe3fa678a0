//! Platform boundary layer
//!
//! Glue between the simulation and the outside world, free of any actual I/O:
//! - Sensor sample decoding and the latest-input slot
//! - The timestamped sample log and its dump page
//! - Route dispatch for ingestion, dump, scoreboard and clear

pub mod ingest;
pub mod input;
pub mod routes;

pub use ingest::{LogEntry, LogMessage, SampleLog};
pub use input::{LatestInput, SensorSample};
pub use routes::{Backend, Handled, Outbound, Reply, Route};
