use time::{macros::format_description, Date, OffsetDateTime};

/// Parses a `YYYY-MM-DD` date key.
pub fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(value, &format)
}

pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
