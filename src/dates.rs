use chrono::{NaiveDate, NaiveDateTime};

/// Parse an API timestamp. Accepts ISO-8601 date-times with an optional
/// trailing `Z` (stripped, the instant is kept as-is) and bare dates, which
/// resolve to midnight. Anything else, including absence, is `None`.
pub fn parse_timestamp(raw: Option<&str>) -> Option<NaiveDateTime> {
  let s = raw?.trim();
  if s.is_empty() {
    return None;
  }
  let s = s.strip_suffix('Z').unwrap_or(s);
  if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(dt);
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

/// Inclusive window check on the calendar day. The bounds are `YYYY-MM-DD`
/// strings, so the comparison is lexical and matches chronological order.
/// An absent date is never in range.
pub fn date_in_range(date: Option<NaiveDateTime>, start: &str, end: &str) -> bool {
  match date {
    None => false,
    Some(dt) => {
      let day = dt.format("%Y-%m-%d").to_string();
      start <= day.as_str() && day.as_str() <= end
    }
  }
}

pub fn month_bucket(dt: NaiveDateTime) -> String {
  dt.format("%Y-%m").to_string()
}

pub fn day_bucket(dt: NaiveDateTime) -> String {
  dt.format("%Y-%m-%d").to_string()
}
