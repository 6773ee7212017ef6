use anyhow::Context;
use url::Url;

use crate::data::{self, FromNode};
use crate::xml::Element;

/// One daily forecast entry.
#[derive(Debug, Clone)]
pub struct Forecast {
    title: String,
    short_prediction: String,
    prediction: String,
    image: Option<Url>,
    high: i32,
    low: i32,
    units: String,
}

impl Forecast {
    /// The day this entry is for, e.g. `Monday`.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short_prediction(&self) -> &str {
        &self.short_prediction
    }

    pub fn prediction(&self) -> &str {
        &self.prediction
    }

    /// Icon for the predicted conditions.
    pub fn image(&self) -> Option<&Url> {
        self.image.as_ref()
    }

    /// Forecast high, `-1` when the feed omits it.
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Forecast low, `-1` when the feed omits it.
    pub fn low(&self) -> i32 {
        self.low
    }

    /// Temperature units, display-normalized (`°F`).
    pub fn units(&self) -> &str {
        &self.units
    }
}

impl FromNode for Forecast {
    /// Binds an `<aws:forecast>` element.
    fn from_node(forecast: &Element) -> anyhow::Result<Self> {
        Ok(Self {
            title: data::get_string(forecast, "aws:title"),
            short_prediction: data::get_string(forecast, "aws:short-prediction"),
            prediction: data::get_string(forecast, "aws:prediction"),
            image: data::get_url(forecast, "aws:image"),
            high: data::get_int(forecast, "aws:high", -1),
            low: data::get_int(forecast, "aws:low", -1),
            units: data::get_units(forecast, "aws:high/@units"),
        })
    }
}

/// A set of daily forecasts for one place, usually seven entries.
#[derive(Debug, Clone)]
pub struct Forecasts {
    city: String,
    state: String,
    country: String,
    zip_code: i32,
    city_code: i32,
    zone: String,
    site_url: Option<Url>,
    forecasts: Vec<Forecast>,
}

impl Forecasts {
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

    /// The forecast zone.
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Link to the WeatherBug forecast page for this place.
    pub fn site_url(&self) -> Option<&Url> {
        self.site_url.as_ref()
    }

    /// The daily entries, in document order.
    pub fn forecasts(&self) -> &[Forecast] {
        &self.forecasts
    }
}

impl FromNode for Forecasts {
    /// Binds the `<aws:weather>` response element.
    ///
    /// A response without the `aws:forecasts/aws:location` sub-element is
    /// unconstructible; the error surfaces to the binder, which skips the
    /// node.
    fn from_node(weather: &Element) -> anyhow::Result<Self> {
        let location = weather
            .find("aws:forecasts/aws:location")
            .context("forecast response has no aws:forecasts/aws:location element")?;

        Ok(Self {
            city: data::get_string(location, "aws:city"),
            state: data::get_string(location, "aws:state"),
            country: data::get_string(location, "aws:country"),
            zip_code: data::get_int(location, "aws:zip", -1),
            city_code: data::get_int(location, "aws:citycode", -1),
            zone: data::get_string(location, "aws:zone"),
            site_url: data::get_url(weather, "aws:WebURL"),
            forecasts: data::bind(weather, "aws:forecasts/aws:forecast"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{bind, bind_single};
    use crate::xml::Document;

    const FORECAST: &str = r#"
        <aws:weather xmlns:aws="http://www.aws.com/aws">
          <aws:WebURL>http://weather.weatherbug.com/TX/Austin-weather.html</aws:WebURL>
          <aws:forecasts>
            <aws:location>
              <aws:city>Austin</aws:city>
              <aws:state>TX</aws:state>
              <aws:country>USA</aws:country>
              <aws:zip>73301</aws:zip>
              <aws:zone>TX192</aws:zone>
            </aws:location>
            <aws:forecast>
              <aws:title>Monday</aws:title>
              <aws:short-prediction>Partly cloudy</aws:short-prediction>
              <aws:prediction>Partly cloudy with light winds.</aws:prediction>
              <aws:image>http://deskwx.weatherbug.com/images/Forecast/icons/cond007.gif</aws:image>
              <aws:high units="&amp;deg;F">83</aws:high>
              <aws:low units="&amp;deg;F">62</aws:low>
            </aws:forecast>
            <aws:forecast>
              <aws:title>Tuesday</aws:title>
              <aws:short-prediction>Thunderstorms</aws:short-prediction>
              <aws:prediction>Afternoon thunderstorms likely.</aws:prediction>
              <aws:image>not a url</aws:image>
              <aws:high units="&amp;deg;F">79</aws:high>
              <aws:low units="&amp;deg;F">64</aws:low>
            </aws:forecast>
          </aws:forecasts>
        </aws:weather>"#;

    #[test]
    fn binds_the_location_header_and_daily_entries() {
        let doc = Document::parse(FORECAST).expect("test document must parse");
        let forecasts: Forecasts =
            bind_single(doc.root(), "/aws:weather").expect("forecasts must bind");

        assert_eq!(forecasts.city(), "Austin");
        assert_eq!(forecasts.state(), "TX");
        assert_eq!(forecasts.zip_code(), 73301);
        assert_eq!(forecasts.city_code(), -1);
        assert_eq!(forecasts.zone(), "TX192");
        assert_eq!(
            forecasts.site_url().map(Url::as_str),
            Some("http://weather.weatherbug.com/TX/Austin-weather.html")
        );

        let days = forecasts.forecasts();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].title(), "Monday");
        assert_eq!(days[0].high(), 83);
        assert_eq!(days[0].low(), 62);
        assert_eq!(days[0].units(), "\u{00B0}F");
        assert!(days[0].image().is_some());

        // A broken icon URL is absence, not an error.
        assert_eq!(days[1].image(), None);
        assert_eq!(days[1].high(), 79);
    }

    #[test]
    fn a_response_without_a_location_header_is_skipped_by_the_binder() {
        let doc = Document::parse(
            r#"
            <aws:weather>
              <aws:forecasts>
                <aws:forecast><aws:title>Monday</aws:title></aws:forecast>
              </aws:forecasts>
            </aws:weather>"#,
        )
        .expect("test document must parse");

        let bound: Vec<Forecasts> = bind(doc.root(), "/aws:weather");
        assert!(bound.is_empty());

        let single: Option<Forecasts> = bind_single(doc.root(), "/aws:weather");
        assert!(single.is_none());
    }
}
