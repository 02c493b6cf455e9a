use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::core::types::Time;
use crate::error::{ChartError, ChartResult};

const SECONDS_PER_DAY: i64 = 86_400;

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Maps a UTC timestamp to a day-index time key (days since the Unix epoch).
#[must_use]
pub fn datetime_to_day_time(time: DateTime<Utc>) -> Time {
    time.timestamp().div_euclid(SECONDS_PER_DAY)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::{datetime_to_day_time, decimal_to_f64};

    #[test]
    fn day_time_floors_towards_negative_infinity() {
        let epoch = Utc.with_ymd_and_hms(1970, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(datetime_to_day_time(epoch), 0);

        let before_epoch = Utc.with_ymd_and_hms(1969, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(datetime_to_day_time(before_epoch), -1);
    }

    #[test]
    fn decimal_converts_to_f64() {
        let value = decimal_to_f64(Decimal::new(1250, 2), "cell").expect("convert");
        assert!((value - 12.5).abs() <= 1e-12);
    }
}
