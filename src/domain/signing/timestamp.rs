//! Timestamp layouts bound into canonical strings.
//!
//! The core API uses a `Z`-suffixed UTC layout; the SNAP endpoints (token
//! issuance and transactional calls) use an RFC 3339 offset layout. Both are
//! second precision. The two are not byte-equal for the same instant.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use super::errors::SignatureError;
use super::scheme::SigningScheme;

/// `Request-Timestamp` layout for the core API, e.g. `2024-01-01T00:00:00Z`.
pub const CORE_API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// `X-TIMESTAMP` layout for SNAP endpoints, e.g. `2024-01-01T00:00:00+00:00`.
pub const SNAP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

const CORE_API_LAYOUT_HINT: &str = "YYYY-MM-DDTHH:MM:SSZ";

/// Formats `instant` in the layout required by `scheme`.
pub fn format_timestamp(scheme: SigningScheme, instant: DateTime<Utc>) -> String {
    match scheme {
        SigningScheme::CoreApiHmac => instant.format(CORE_API_TIMESTAMP_FORMAT).to_string(),
        SigningScheme::TokenIssuanceRsa | SigningScheme::TransactionalHmac512 => {
            instant.format(SNAP_TIMESTAMP_FORMAT).to_string()
        }
    }
}

/// Parses a core API `Request-Timestamp` header value.
///
/// # Errors
///
/// Returns `SignatureError::MalformedTimestamp` if `value` does not match
/// [`CORE_API_TIMESTAMP_FORMAT`] exactly.
pub fn parse_core_api_timestamp(value: &str) -> Result<DateTime<Utc>, SignatureError> {
    let malformed = || SignatureError::MalformedTimestamp {
        field: "Request-Timestamp",
        value: value.to_string(),
        expected: CORE_API_LAYOUT_HINT,
    };

    let parsed = NaiveDateTime::parse_from_str(value, CORE_API_TIMESTAMP_FORMAT)
        .map(|naive| Utc.from_utc_datetime(&naive))
        .map_err(|_| malformed())?;

    // chrono accepts unpadded fields; only the canonical rendering is valid
    if format_timestamp(SigningScheme::CoreApiHmac, parsed) != value {
        return Err(malformed());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn core_api_layout_uses_literal_z() {
        assert_eq!(
            format_timestamp(SigningScheme::CoreApiHmac, instant()),
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn snap_layout_uses_offset_suffix() {
        assert_eq!(
            format_timestamp(SigningScheme::TokenIssuanceRsa, instant()),
            "2024-01-01T00:00:00+00:00"
        );
        assert_eq!(
            format_timestamp(SigningScheme::TransactionalHmac512, instant()),
            "2024-01-01T00:00:00+00:00"
        );
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let with_millis = instant() + chrono::Duration::milliseconds(750);
        assert_eq!(
            format_timestamp(SigningScheme::CoreApiHmac, with_millis),
            "2024-01-01T00:00:00Z"
        );
    }

    #[test]
    fn parse_round_trips_core_layout() {
        let parsed = parse_core_api_timestamp("2020-10-21T03:38:28Z").unwrap();
        assert_eq!(
            format_timestamp(SigningScheme::CoreApiHmac, parsed),
            "2020-10-21T03:38:28Z"
        );
    }

    #[test]
    fn parse_rejects_offset_layout() {
        let result = parse_core_api_timestamp("2020-10-21T03:38:28+00:00");
        assert!(matches!(
            result,
            Err(SignatureError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn parse_rejects_fractional_seconds() {
        let result = parse_core_api_timestamp("2020-10-21T03:38:28.123Z");
        assert!(matches!(
            result,
            Err(SignatureError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn parse_rejects_unpadded_fields() {
        for value in ["2024-3-1T8:15:0Z", "2024-03-01T8:15:00Z", "2024-03-01T08:15:0Z"] {
            assert!(
                matches!(
                    parse_core_api_timestamp(value),
                    Err(SignatureError::MalformedTimestamp { .. })
                ),
                "{value} was accepted"
            );
        }
    }

    #[test]
    fn parse_rejects_garbage() {
        let result = parse_core_api_timestamp("not a timestamp");
        assert!(matches!(
            result,
            Err(SignatureError::MalformedTimestamp { field: "Request-Timestamp", .. })
        ));
    }
}
