use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::get_local_offset;

    #[test]
    fn known_timezone_resolves_to_an_offset() {
        // Algeria does not observe daylight saving, so the offset is fixed.
        assert_eq!(
            get_local_offset("Africa/Algiers"),
            Some(UtcOffset::from_hms(1, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_timezone_resolves_to_none() {
        assert_eq!(get_local_offset("Not/AZone"), None);
    }
}
