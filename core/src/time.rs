//! Time related utils.

use chrono::Utc;

use crate::{Error, Result};

/// DateTime is the alias for chrono::DateTime<Utc>.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into http date: `Sun, 06 Nov 1994 08:49:37 GMT`
///
/// ## Note
///
/// HTTP date is slightly different from RFC2822.
///
/// - Timezone is fixed to GMT.
/// - Day must be 2 digit.
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse http date like `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc2822(s).map_err(|e| {
        Error::unexpected(format!("parse '{s}' into http date failed")).with_source(e)
    })?;
    Ok(t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2012, 3, 17, 18, 49, 58).unwrap()
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(test_time()), "Sat, 17 Mar 2012 18:49:58 GMT");
    }

    #[test]
    fn test_format_http_date_pads_day() {
        let t = Utc.with_ymd_and_hms(2014, 7, 8, 1, 2, 3).unwrap();
        assert_eq!(format_http_date(t), "Tue, 08 Jul 2014 01:02:03 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let t = parse_http_date("Sat, 17 Mar 2012 18:49:58 GMT").unwrap();
        assert_eq!(t, test_time());
    }
}
