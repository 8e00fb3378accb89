//! Great-circle distance and the distance display format.

use crate::subject::Location;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

pub const MILES_PER_KM: f64 = 0.621371;

/// Haversine distance between two points, in miles.
pub fn haversine_miles(a: Location, b: Location) -> f64 {
  let d_lat = (b.lat - a.lat).to_radians();
  let d_lon = (b.lon - a.lon).to_radians();

  let h = (d_lat / 2.0).sin().powi(2)
    + a.lat.to_radians().cos()
      * b.lat.to_radians().cos()
      * (d_lon / 2.0).sin().powi(2);
  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

  EARTH_RADIUS_KM * c * MILES_PER_KM
}

/// Whole hundredths of `value`, rounded towards positive infinity.
///
/// Works on the shortest decimal text that reads back as `value`, so `1.01`
/// is exactly 101 cents while any nonzero digit past the second decimal
/// rounds up, whatever the magnitude. `None` for NaN, infinities and values
/// too large to count in `i128` cents.
fn ceil_cents(value: f64) -> Option<i128> {
  if !value.is_finite() || value.abs() >= 1e36 {
    return None;
  }
  let text = value.abs().to_string();
  let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
  let whole: i128 = whole.parse().ok()?;

  let mut digits = frac.bytes().map(|b| i128::from(b - b'0'));
  let tenths = digits.next().unwrap_or(0);
  let hundredths = digits.next().unwrap_or(0);
  let cents = whole * 100 + tenths * 10 + hundredths;

  // Dropping digits moves a negative value up already.
  if value.is_sign_negative() {
    Some(-cents)
  } else if digits.any(|d| d != 0) {
    Some(cents + 1)
  } else {
    Some(cents)
  }
}

/// Round towards positive infinity at the second decimal place.
///
/// Values that are already whole hundredths in decimal (e.g. `1.01`) are
/// left alone rather than bumped a cent.
pub fn ceil_hundredths(value: f64) -> f64 {
  ceil_cents(value).map_or(value, |cents| cents as f64 / 100.0)
}

/// Distance text for display: ceiling at two decimals, trailing zeros
/// dropped (`1.004 → "1.01"`, `1.5 → "1.5"`, `3.0 → "3"`).
pub fn format_miles(miles: f64) -> String {
  let Some(cents) = ceil_cents(miles) else {
    return miles.to_string();
  };
  let sign = if cents < 0 { "-" } else { "" };
  let cents = cents.unsigned_abs();
  let (whole, frac) = (cents / 100, cents % 100);
  match frac {
    0 => format!("{sign}{whole}"),
    f if f % 10 == 0 => format!("{sign}{whole}.{}", f / 10),
    f => format!("{sign}{whole}.{f:02}"),
  }
}
