use std::hash::{Hash, Hasher};

use crate::data::{self, FromNode};
use crate::xml::Element;

/// A city inside or outside the U.S.
///
/// Identity is deliberately narrower than value equality: two locations are
/// the same place when they are the same kind of city and share the
/// discriminating code for that kind: ZIP code for U.S. cities, city code
/// for the rest. Names never participate, and a U.S. city is never equal to a
/// non-U.S. city even when the raw codes coincide.
#[derive(Debug, Clone)]
pub struct Location {
    city_name: String,
    state_name: String,
    country_name: String,
    zip_code: i32,
    city_code: i32,
    city_type: i32,
}

impl Location {
    /// City type marking U.S. cities.
    pub const US_CITY_TYPE: i32 = 0;

    /// City type marking cities outside of the U.S.
    pub const NON_US_CITY_TYPE: i32 = 1;

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn country_name(&self) -> &str {
        &self.country_name
    }

    /// The 5 digit designation for U.S. cities, `-1` when absent.
    pub fn zip_code(&self) -> i32 {
        self.zip_code
    }

    /// The 5 digit designation for non-U.S. cities, `-1` when absent.
    pub fn city_code(&self) -> i32 {
        self.city_code
    }

    pub fn city_type(&self) -> i32 {
        self.city_type
    }

    pub fn is_us_city(&self) -> bool {
        self.city_type == Self::US_CITY_TYPE
    }

    /// The code that identifies this location: ZIP code for U.S. cities,
    /// city code otherwise.
    fn discriminating_code(&self) -> i32 {
        if self.is_us_city() { self.zip_code } else { self.city_code }
    }
}

impl FromNode for Location {
    /// Binds an `<aws:location>` element.
    fn from_node(location: &Element) -> anyhow::Result<Self> {
        Ok(Self {
            city_name: data::get_string(location, "@cityname"),
            state_name: data::get_string(location, "@statename"),
            country_name: data::get_string(location, "@countryname"),
            zip_code: data::get_int(location, "@zipcode", -1),
            city_code: data::get_int(location, "@citycode", -1),
            city_type: data::get_int(location, "@citytype", -1),
        })
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.city_type == other.city_type
            && self.discriminating_code() == other.discriminating_code()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.city_type.hash(state);
        self.discriminating_code().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::bind;
    use crate::xml::Document;
    use std::hash::{DefaultHasher, Hash, Hasher};

    fn location(xml: &str) -> Location {
        let doc = Document::parse(xml).expect("test document must parse");
        Location::from_node(doc.root()).expect("location must bind")
    }

    fn hash_of(loc: &Location) -> u64 {
        let mut hasher = DefaultHasher::new();
        loc.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn binds_attributes_with_defaults() {
        let loc = location(
            r#"<aws:location cityname="Boston" statename="MA" countryname="USA"
                 zipcode="02134" citytype="0"/>"#,
        );

        assert_eq!(loc.city_name(), "Boston");
        assert_eq!(loc.state_name(), "MA");
        assert_eq!(loc.country_name(), "USA");
        assert_eq!(loc.zip_code(), 2134);
        assert_eq!(loc.city_code(), -1);
        assert!(loc.is_us_city());
    }

    #[test]
    fn us_cities_compare_by_zip_code_alone() {
        let allston = location(r#"<aws:location cityname="Allston" zipcode="90210" citytype="0"/>"#);
        let brighton =
            location(r#"<aws:location cityname="Brighton" zipcode="90210" citytype="0"/>"#);

        assert_eq!(allston, brighton);
        assert_eq!(hash_of(&allston), hash_of(&brighton));
    }

    #[test]
    fn non_us_cities_compare_by_city_code_alone() {
        let a = location(r#"<aws:location cityname="Kyiv" citycode="33345" citytype="1"/>"#);
        let b = location(r#"<aws:location cityname="Kiev" citycode="33345" citytype="1"/>"#);
        let c = location(r#"<aws:location cityname="Lviv" citycode="40821" citytype="1"/>"#);

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, c);
    }

    #[test]
    fn coinciding_codes_across_city_kinds_stay_unequal() {
        let domestic = location(r#"<aws:location zipcode="90210" citytype="0"/>"#);
        let foreign = location(r#"<aws:location citycode="90210" citytype="1"/>"#);

        assert_ne!(domestic, foreign);
    }

    #[test]
    fn binds_in_document_order_through_the_generic_binder() {
        let doc = Document::parse(
            r#"
            <aws:weather>
              <aws:locations>
                <aws:location cityname="Boston" zipcode="02134" citytype="0"/>
                <aws:location cityname="Austin" zipcode="73301" citytype="0"/>
              </aws:locations>
            </aws:weather>"#,
        )
        .expect("test document must parse");

        let locations: Vec<Location> = bind(doc.root(), "aws:locations/aws:location");
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].city_name(), "Boston");
        assert_eq!(locations[1].city_name(), "Austin");
    }
}
