//! Resolving "today" in the user's time zone.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The current UTC offset of a canonical time zone, e.g. "Pacific/Auckland".
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in a canonical time zone.
///
/// # Errors
///
/// Returns [Error::InvalidTimezoneError] if `canonical_timezone` is not a
/// known time zone.
pub fn today_in(canonical_timezone: &str) -> Result<Date, Error> {
    let offset = get_local_offset(canonical_timezone)
        .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

    Ok(OffsetDateTime::now_utc().to_offset(offset).date())
}

#[cfg(test)]
mod tests {
    use time::{OffsetDateTime, UtcOffset};

    use crate::{
        Error,
        timezone::{get_local_offset, today_in},
    };

    #[test]
    fn utc_has_zero_offset() {
        assert_eq!(get_local_offset("Etc/UTC"), Some(UtcOffset::UTC));
    }

    #[test]
    fn unknown_timezone_has_no_offset() {
        assert_eq!(get_local_offset("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn today_in_utc_matches_clock() {
        let before = OffsetDateTime::now_utc().date();
        let today = today_in("Etc/UTC").expect("Could not get today's date");
        let after = OffsetDateTime::now_utc().date();

        assert!(before <= today && today <= after);
    }

    #[test]
    fn today_in_fails_on_unknown_timezone() {
        assert_eq!(
            today_in("Not/A_Zone"),
            Err(Error::InvalidTimezoneError("Not/A_Zone".to_owned()))
        );
    }
}
