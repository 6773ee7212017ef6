//! Core library for the `wbug` CLI.
//!
//! This crate defines:
//! - An owned XML tree with the path queries the WeatherBug schema needs
//! - Extraction and binding utilities that turn loosely typed XML into records
//! - The domain records (locations, stations, alerts, forecasts)
//! - The WeatherBug API client and configuration handling
//!
//! It is used by `wbug-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod data;
pub mod model;
pub mod service;
pub mod xml;

pub use config::Config;
pub use data::{FromNode, bind, bind_single};
pub use model::{Alert, Forecast, Forecasts, Location, Station};
pub use service::{ServiceError, WeatherBugService};
pub use xml::{Document, Element, XmlError};
