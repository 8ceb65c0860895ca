use chrono::{DateTime, FixedOffset, Local, Utc};

/// Format of the `Timestamp` column in both claim sheets.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Produces claim timestamps, either on the process clock or at a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClaimClock {
    offset: Option<FixedOffset>,
}

impl ClaimClock {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// Parses offsets written like `+05:30` or `-08:00`.
    pub fn parse_offset(value: &str) -> Result<FixedOffset, String> {
        value
            .trim()
            .parse::<FixedOffset>()
            .map_err(|e| format!("invalid UTC offset '{}': {}", value, e))
    }

    pub fn now(&self) -> String {
        match self.offset {
            Some(_) => self.format(Utc::now()),
            None => Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn format(&self, instant: DateTime<Utc>) -> String {
        match self.offset {
            Some(offset) => instant
                .with_timezone(&offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            None => instant
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_offset_formatting() {
        let offset = ClaimClock::parse_offset("+05:30").unwrap();
        let clock = ClaimClock::with_offset(offset);
        let instant = Utc.with_ymd_and_hms(2026, 2, 14, 18, 45, 9).unwrap();

        assert_eq!(clock.format(instant), "2026-02-15 00:15:09");
    }

    #[test]
    fn test_invalid_offset_is_rejected() {
        assert!(ClaimClock::parse_offset("IST").is_err());
    }

    #[test]
    fn test_now_matches_format() {
        let stamp = ClaimClock::local().now();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok());
    }
}
