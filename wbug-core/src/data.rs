//! Extraction and binding utilities for WeatherBug API responses.
//!
//! The feed is loosely typed: fields go missing, numbers arrive empty, units
//! carry HTML escapes. Every extractor here is total: it returns a real
//! value, a caller-supplied default, or an explicit `None`, and never an
//! error. The binder applies the same policy per node: an element that fails
//! to construct its record is skipped, never aborting the batch.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use url::Url;

use crate::xml::Element;

/// Timezone abbreviation assumed when a timestamp carries none.
const DEFAULT_TIME_ZONE: &str = "CST";

/// A record constructible from a single XML element.
///
/// Implementations populate their fields exclusively through the extractors
/// in this module ([`get_string`], [`get_int`], [`get_timestamp`], nested
/// [`bind`] calls and friends) rather than walking the tree directly.
pub trait FromNode: Sized {
    fn from_node(node: &Element) -> anyhow::Result<Self>;
}

/// Extracts a string value, empty when the path resolves to nothing.
pub fn get_string(elem: &Element, path: &str) -> String {
    elem.value_of(path)
}

/// Extracts a units string, normalized for display: the `&deg;` HTML escape
/// becomes the unicode degree sign, and the feed's bare `km` wind unit is
/// rewritten to `km/h`.
pub fn get_units(elem: &Element, path: &str) -> String {
    let units = fix_degrees(&elem.value_of(path));
    if units == "km" { "km/h".to_string() } else { units }
}

/// Replaces every `&deg;` HTML escape with `\u{00B0}`.
pub fn fix_degrees(s: &str) -> String {
    s.replace("&deg;", "\u{00B0}")
}

/// Extracts an integer value, falling back to `default` when the text is
/// missing, empty or not a number.
pub fn get_int(elem: &Element, path: &str, default: i32) -> i32 {
    elem.value_of(path).parse().unwrap_or(default)
}

/// Extracts a decimal value, falling back to `default` when the text is
/// missing or unparseable. Passing `None` as the default makes absence a
/// first-class result.
pub fn get_decimal(elem: &Element, path: &str, default: Option<Decimal>) -> Option<Decimal> {
    elem.value_of(path).parse().ok().or(default)
}

/// Extracts a URL. Malformed or missing input yields `None`; callers treat
/// absence as valid.
pub fn get_url(elem: &Element, path: &str) -> Option<Url> {
    Url::parse(&elem.value_of(path)).ok()
}

/// Composes an absolute instant from the decomposed timestamp element at
/// `path` (`aws:year/@number`, `aws:month/@number`, `aws:day/@number`,
/// `aws:hour/@hour-24`, `aws:minute/@number`, `aws:second/@number`, and
/// `aws:time-zone/@abbrv`).
///
/// There is no failure path. A missing sub-node or missing components fall
/// back to `-1` (year, month, day, hour) or `0` (minute, second), and
/// out-of-range values roll over through ordinary calendar arithmetic rather
/// than being rejected: month offsets shift the year, day `0` is the last day
/// of the previous month, hour `-1` is 23:00 the day before. Milliseconds are
/// always zero. The timezone abbreviation defaults to CST and resolves
/// through [`zone_offset_secs`]'s fixed table.
pub fn get_timestamp(elem: &Element, path: &str) -> DateTime<Utc> {
    let fallback;
    let stamp = match elem.find(path) {
        Some(found) => found,
        None => {
            fallback = Element::default();
            &fallback
        }
    };

    let zone = match get_string(stamp, "aws:time-zone/@abbrv") {
        abbrv if abbrv.is_empty() => DEFAULT_TIME_ZONE.to_string(),
        abbrv => abbrv,
    };

    let year = get_int(stamp, "aws:year/@number", -1);
    // Document months are 1-based; the rollover arithmetic below is 0-based.
    let month0 = get_int(stamp, "aws:month/@number", -1) - 1;
    let day = get_int(stamp, "aws:day/@number", -1);
    let hour = get_int(stamp, "aws:hour/@hour-24", -1);
    let minute = get_int(stamp, "aws:minute/@number", 0);
    let second = get_int(stamp, "aws:second/@number", 0);

    let year = year.saturating_add(month0.div_euclid(12));
    let month = month0.rem_euclid(12) as u32 + 1;

    // Years beyond chrono's representable range collapse to the epoch date.
    let base = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();

    let offsets = [
        Duration::days(i64::from(day) - 1),
        Duration::hours(i64::from(hour)),
        Duration::minutes(i64::from(minute)),
        Duration::seconds(i64::from(second)),
        // Wall time to UTC.
        Duration::seconds(-i64::from(zone_offset_secs(&zone))),
    ];
    let instant = offsets
        .into_iter()
        .fold(base.and_time(NaiveTime::MIN), |acc, offset| {
            acc.checked_add_signed(offset).unwrap_or(acc)
        });

    Utc.from_utc_datetime(&instant)
}

/// Seconds east of UTC for a timezone abbreviation.
///
/// The feed only ever labels timestamps with North American zones. This is a
/// fixed table rather than a platform zone database, so an abbreviation
/// always means the same offset regardless of host configuration or date;
/// unknown abbreviations resolve to UTC.
pub fn zone_offset_secs(abbrv: &str) -> i32 {
    const HOUR: i32 = 3600;
    match abbrv {
        "GMT" | "UT" | "UTC" => 0,
        "AST" => -4 * HOUR,
        "ADT" => -3 * HOUR,
        "EST" => -5 * HOUR,
        "EDT" => -4 * HOUR,
        "CST" => -6 * HOUR,
        "CDT" => -5 * HOUR,
        "MST" => -7 * HOUR,
        "MDT" => -6 * HOUR,
        "PST" => -8 * HOUR,
        "PDT" => -7 * HOUR,
        "AKST" => -9 * HOUR,
        "AKDT" => -8 * HOUR,
        "HST" => -10 * HOUR,
        _ => 0,
    }
}

/// Constructs one `T` per element matched by `path` under `root`, in document
/// order.
///
/// An element whose construction fails is skipped and the error discarded;
/// one malformed node never aborts the rest of the batch. The returned list
/// is therefore at most as long as the match count. Skips are reported on the
/// `debug` log level for anyone who needs to tell "nothing matched" apart
/// from "everything failed".
pub fn bind<T: FromNode>(root: &Element, path: &str) -> Vec<T> {
    let mut records = Vec::new();
    for node in root.find_all(path) {
        match T::from_node(node) {
            Ok(record) => records.push(record),
            Err(error) => {
                tracing::debug!(path, error = %error, "skipping element that failed to bind");
            }
        }
    }
    records
}

/// Like [`bind`], but returns only the first constructed record, or `None`
/// when nothing matched (or nothing survived construction).
pub fn bind_single<T: FromNode>(root: &Element, path: &str) -> Option<T> {
    bind(root, path).into_iter().next()
}

/// Formats a composed instant with a strftime pattern.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp.format(pattern).to_string()
}

/// Formats a number with a fixed count of decimal places, US conventions.
pub fn format_number(value: f64, precision: usize) -> String {
    format!("{value:.precision$}")
}
