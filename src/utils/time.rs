//! BSON 시각과 chrono 시각 사이의 변환
//!
//! 엔티티는 `mongodb::bson::DateTime`으로 저장하고, 응답 DTO는
//! `chrono::DateTime<Utc>`(RFC 3339)로 직렬화합니다.

use chrono::{DateTime as ChronoDateTime, Utc};
use mongodb::bson::DateTime;

pub fn to_chrono(value: DateTime) -> ChronoDateTime<Utc> {
    ChronoDateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

pub fn to_chrono_opt(value: Option<DateTime>) -> Option<ChronoDateTime<Utc>> {
    value.map(to_chrono)
}

pub fn plus_minutes(value: DateTime, minutes: i64) -> DateTime {
    DateTime::from_millis(value.timestamp_millis() + minutes * 60_000)
}

pub fn plus_hours(value: DateTime, hours: i64) -> DateTime {
    plus_minutes(value, hours * 60)
}

/// `until`까지 남은 초. 이미 지났으면 0
pub fn seconds_until(now: DateTime, until: DateTime) -> i64 {
    ((until.timestamp_millis() - now.timestamp_millis()) / 1000).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let base = DateTime::from_millis(1_700_000_000_000);

        assert_eq!(plus_minutes(base, 2).timestamp_millis(), 1_700_000_120_000);
        assert_eq!(plus_hours(base, 6).timestamp_millis(), 1_700_021_600_000);
    }

    #[test]
    fn test_seconds_until_never_negative() {
        let now = DateTime::from_millis(10_000);

        assert_eq!(seconds_until(now, DateTime::from_millis(70_000)), 60);
        assert_eq!(seconds_until(now, DateTime::from_millis(1_000)), 0);
    }

    #[test]
    fn test_to_chrono_keeps_millis() {
        let value = DateTime::from_millis(1_700_000_000_123);
        assert_eq!(to_chrono(value).timestamp_millis(), 1_700_000_000_123);
    }
}
