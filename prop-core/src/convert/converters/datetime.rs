use chrono::{DateTime, FixedOffset, Month, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

use crate::convert::{
    ConversionContext, ConversionResult, Converter, DateTimeKind, RawKind, TargetType,
};
use crate::error::ConversionError;
use crate::value::{DateTimeValue, PropValue};

/// Converts values to the chrono date/time types.
///
/// With no format pattern in effect, values are parsed in the types'
/// ISO-8601/RFC 3339 default notations. A
/// [`ConversionOptions::datetime_format`](crate::convert::ConversionOptions)
/// pattern overrides the notation for the point-in-time kinds; weekday
/// and month names always use chrono's name parsing.
pub struct DateTimeConverter;

impl Converter for DateTimeConverter {
    fn can_convert(&self, target: &TargetType) -> bool {
        matches!(target, TargetType::Raw(RawKind::DateTime(_)))
    }

    fn convert(&self, ctx: &ConversionContext<'_>) -> Result<ConversionResult, ConversionError> {
        let TargetType::Raw(RawKind::DateTime(kind)) = ctx.target() else {
            return Ok(ConversionResult::skip());
        };

        let value = ctx.value();
        let format = ctx.options().datetime_format.as_deref();

        let converted = match kind {
            DateTimeKind::DateTime => DateTimeValue::DateTime(parse_date_time(value, format)?),
            DateTimeKind::DateTimeOffset => {
                DateTimeValue::DateTimeOffset(parse_date_time_offset(value, format)?)
            }
            DateTimeKind::DateTimeUtc => {
                DateTimeValue::DateTimeUtc(parse_date_time_utc(value, format)?)
            }
            DateTimeKind::Date => DateTimeValue::Date(parse_date(value, format)?),
            DateTimeKind::Time => DateTimeValue::Time(parse_time(value, format)?),
            DateTimeKind::Weekday => DateTimeValue::Weekday(
                value
                    .parse::<Weekday>()
                    .map_err(|_| ConversionError::invalid("Weekday", value))?,
            ),
            DateTimeKind::Month => DateTimeValue::Month(
                value
                    .parse::<Month>()
                    .map_err(|_| ConversionError::invalid("Month", value))?,
            ),
        };

        Ok(ConversionResult::of(PropValue::DateTime(converted)))
    }
}

fn parse_date_time(value: &str, format: Option<&str>) -> Result<NaiveDateTime, ConversionError> {
    match format {
        Some(fmt) => NaiveDateTime::parse_from_str(value, fmt),
        None => value.parse(),
    }
    .map_err(|e| ConversionError::invalid_with("NaiveDateTime", value, e))
}

fn parse_date_time_offset(
    value: &str,
    format: Option<&str>,
) -> Result<DateTime<FixedOffset>, ConversionError> {
    match format {
        Some(fmt) => DateTime::parse_from_str(value, fmt),
        None => DateTime::parse_from_rfc3339(value),
    }
    .map_err(|e| ConversionError::invalid_with("DateTime<FixedOffset>", value, e))
}

fn parse_date_time_utc(value: &str, format: Option<&str>) -> Result<DateTime<Utc>, ConversionError> {
    match format {
        // Format patterns without an offset are read as UTC wall-clock time.
        Some(fmt) => NaiveDateTime::parse_from_str(value, fmt)
            .map(|naive| naive.and_utc())
            .map_err(|e| ConversionError::invalid_with("DateTime<Utc>", value, e)),
        None => value
            .parse::<DateTime<Utc>>()
            .map_err(|e| ConversionError::invalid_with("DateTime<Utc>", value, e)),
    }
}

fn parse_date(value: &str, format: Option<&str>) -> Result<NaiveDate, ConversionError> {
    match format {
        Some(fmt) => NaiveDate::parse_from_str(value, fmt),
        None => value.parse(),
    }
    .map_err(|e| ConversionError::invalid_with("NaiveDate", value, e))
}

fn parse_time(value: &str, format: Option<&str>) -> Result<NaiveTime, ConversionError> {
    match format {
        Some(fmt) => NaiveTime::parse_from_str(value, fmt),
        None => value.parse(),
    }
    .map_err(|e| ConversionError::invalid_with("NaiveTime", value, e))
}
