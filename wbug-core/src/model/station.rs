use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;

use crate::data::{self, FromNode};
use crate::xml::Element;

/// A weather station.
///
/// Stations are identified by their station id alone; coordinates, names and
/// distances never participate in equality or hashing.
#[derive(Debug, Clone)]
pub struct Station {
    id: String,
    name: String,
    city: String,
    state: String,
    country: String,
    zip_code: i32,
    city_code: i32,
    distance: Option<Decimal>,
    unit: String,
    latitude: Option<Decimal>,
    longitude: Option<Decimal>,
}

impl Station {
    /// The unique station identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// The 5 digit designation for U.S. cities, `-1` when absent.
    pub fn zip_code(&self) -> i32 {
        self.zip_code
    }

    /// The 5 digit designation for non-U.S. cities, `-1` when absent.
    pub fn city_code(&self) -> i32 {
        self.city_code
    }

    /// Distance from the queried location, when the feed reports one.
    pub fn distance(&self) -> Option<Decimal> {
        self.distance
    }

    /// The unit the distance is expressed in.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn latitude(&self) -> Option<Decimal> {
        self.latitude
    }

    pub fn longitude(&self) -> Option<Decimal> {
        self.longitude
    }
}

impl FromNode for Station {
    /// Binds an `<aws:station>` element.
    fn from_node(station: &Element) -> anyhow::Result<Self> {
        Ok(Self {
            id: data::get_string(station, "@id"),
            name: data::get_string(station, "@name"),
            city: data::get_string(station, "@city"),
            state: data::get_string(station, "@state"),
            country: data::get_string(station, "@country"),
            zip_code: data::get_int(station, "@zipcode", -1),
            city_code: data::get_int(station, "@citycode", -1),
            distance: data::get_decimal(station, "@distance", None),
            unit: data::get_string(station, "@Unit"),
            latitude: data::get_decimal(station, "@latitude", None),
            longitude: data::get_decimal(station, "@longitude", None),
        })
    }
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
