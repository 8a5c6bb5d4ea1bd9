//! One-shot classification of a response batch.
//!
//! Backends disagree on how a sample is keyed in time (`datetime` vs
//! `{year, month}`) and on which values it carries (`GHI`/`DHI`/`DNI` vs a
//! generic `irradiance`). [`BatchShape::classify`] inspects the batch once;
//! everything downstream dispatches on the resulting variants instead of
//! probing fields again.

use crate::granularity::Granularity;
use crate::sample::{Component, RawSample};
use chrono::{DateTime, Utc};
use sip_utils::dates::truncate_to_month;

/// Where a sample's x position comes from.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TimeKey {
    /// Monthly batches keyed by explicit `{year, month}`.
    YearMonth,
    /// An absolute `datetime`/`timestamp` string.
    Absolute,
}

/// Which values a batch carries.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ValueShape {
    /// At least one sample has a non-null component; holds the present
    /// components in emission order.
    Components(Vec<Component>),
    /// No component anywhere: fall back to the `irradiance` field.
    Generic,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BatchShape {
    pub time: TimeKey,
    pub values: ValueShape,
    pub granularity: Granularity,
}

impl BatchShape {
    pub fn classify(samples: &[RawSample], granularity: Granularity) -> Self {
        let time = if granularity == Granularity::Monthly
            && samples.iter().any(RawSample::has_year_month)
        {
            TimeKey::YearMonth
        } else {
            TimeKey::Absolute
        };

        let present: Vec<Component> = Component::ALL
            .iter()
            .copied()
            .filter(|c| samples.iter().any(|s| s.component(*c).is_some()))
            .collect();
        let values = if present.is_empty() {
            ValueShape::Generic
        } else {
            ValueShape::Components(present)
        };

        BatchShape {
            time,
            values,
            granularity,
        }
    }

    /// The x position of a sample under this shape, or `None` when the
    /// sample cannot be placed in time.
    pub fn resolve_time(&self, sample: &RawSample) -> Option<DateTime<Utc>> {
        match self.time {
            TimeKey::YearMonth => sample.month_start(),
            TimeKey::Absolute => {
                let ts = sample.timestamp()?;
                if self.granularity == Granularity::Monthly {
                    Some(truncate_to_month(&ts))
                } else {
                    Some(ts)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generic_batch() {
        let samples = vec![
            RawSample::generic("2020-01-01T00:00:00", Some(1.0)),
            RawSample::generic("2020-01-01T01:00:00", None),
        ];
        let shape = BatchShape::classify(&samples, Granularity::Hourly);
        assert_eq!(shape.time, TimeKey::Absolute);
        assert_eq!(shape.values, ValueShape::Generic);
    }

    #[test]
    fn test_components_win_over_generic() {
        let samples = vec![
            RawSample::generic("2020-01-01T00:00:00", Some(1.0)),
            RawSample {
                datetime: Some("2020-01-01T01:00:00".into()),
                dni: Some(300.0),
                ..Default::default()
            },
            RawSample {
                datetime: Some("2020-01-01T02:00:00".into()),
                ghi: Some(100.0),
                ..Default::default()
            },
        ];
        let shape = BatchShape::classify(&samples, Granularity::Hourly);
        assert_eq!(
            shape.values,
            ValueShape::Components(vec![Component::Ghi, Component::Dni])
        );
    }

    #[test]
    fn test_year_month_only_for_monthly() {
        let samples = vec![RawSample::monthly(2021, 7, Some(5.0))];
        assert_eq!(
            BatchShape::classify(&samples, Granularity::Monthly).time,
            TimeKey::YearMonth
        );
        assert_eq!(
            BatchShape::classify(&samples, Granularity::Daily).time,
            TimeKey::Absolute
        );
    }

    #[test]
    fn test_resolve_time_truncates_monthly_absolute() {
        let samples = vec![RawSample::generic("2021-07-19T10:00:00Z", Some(5.0))];
        let shape = BatchShape::classify(&samples, Granularity::Monthly);
        assert_eq!(
            shape.resolve_time(&samples[0]).unwrap(),
            Utc.with_ymd_and_hms(2021, 7, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_resolve_time_year_month() {
        let samples = vec![
            RawSample::monthly(2021, 12, Some(5.0)),
            RawSample::monthly(2021, 13, Some(5.0)),
        ];
        let shape = BatchShape::classify(&samples, Granularity::Monthly);
        assert_eq!(
            shape.resolve_time(&samples[0]).unwrap(),
            Utc.with_ymd_and_hms(2021, 12, 1, 0, 0, 0).unwrap()
        );
        assert!(shape.resolve_time(&samples[1]).is_none());
    }
}
