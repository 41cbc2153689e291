//! `isstrack` - Record the current ISS position into MongoDB
//!
//! A [`Locator`] fetches the position from the open-notify API, and a
//! [`Recorder`] appends it to a MongoDB collection. [`pipeline::run`] wires
//! the two together, one after the other.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod reading;
pub mod recorder;
pub mod sink;

pub use config::Config;
pub use error::{Error, Result};
pub use locator::Locator;
pub use logging::init_logging;
pub use reading::PositionReading;
pub use recorder::Recorder;
pub use sink::{MemorySink, ReadingSink};
