//! Match dates are stored as RFC 3339 strings with millisecond precision and a
//! `Z` suffix, e.g. `2024-05-01T18:30:00.000Z`.

use chrono::{DateTime, SubsecRound, Utc};

/// Current time truncated to what the wire format can hold.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "iso_millis")]
        date: DateTime<Utc>,
    }

    #[test]
    fn test_dates_use_millisecond_precision() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap();
        let json = serde_json::to_string(&Stamped { date }).unwrap();
        assert_eq!(json, r#"{"date":"2024-05-01T18:30:00.000Z"}"#);
    }

    #[test]
    fn test_offset_dates_are_normalised_to_utc() {
        let stamped: Stamped =
            serde_json::from_str(r#"{"date":"2024-05-01T20:30:00.000+02:00"}"#).unwrap();
        assert_eq!(stamped.date.hour(), 18);
    }

    #[test]
    fn test_now_survives_a_round_trip() {
        let stamped = Stamped { date: now() };
        let json = serde_json::to_string(&stamped).unwrap();
        assert_eq!(serde_json::from_str::<Stamped>(&json).unwrap(), stamped);
    }
}
