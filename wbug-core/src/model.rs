//! Domain records bound from WeatherBug API responses.
//!
//! Every record exposes exactly one construction path, its [`FromNode`]
//! implementation, and populates its fields only through the extractors in
//! [`crate::data`]. Records are read-only once constructed.
//!
//! [`FromNode`]: crate::data::FromNode

pub mod alert;
pub mod forecast;
pub mod location;
pub mod station;

pub use alert::Alert;
pub use forecast::{Forecast, Forecasts};
pub use location::Location;
pub use station::Station;
