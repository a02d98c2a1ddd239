//! Feed timestamp encoding
//!
//! Feed consumers expect RFC 2822 style dates with a numeric zone,
//! e.g. `Tue, 05 Mar 2024 14:03:27 +0100`.

use chrono::{DateTime, FixedOffset, Local};

use crate::error::{RegistryError, Result};

/// Format of every date written to the feed.
pub const FEED_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// A feed timestamp, keeping the zone it was written in.
pub type FeedDate = DateTime<FixedOffset>;

/// Current local time as a feed timestamp.
pub fn now() -> FeedDate {
    Local::now().fixed_offset()
}

/// Render a timestamp in [`FEED_DATE_FORMAT`].
pub fn format_feed_date(date: &FeedDate) -> String {
    date.format(FEED_DATE_FORMAT).to_string()
}

/// Parse a feed timestamp.
///
/// [`FEED_DATE_FORMAT`] is tried first; generic RFC 2822 is the fallback so
/// that zone names such as `GMT` written by other tools still read.
pub fn parse_feed_date(text: &str) -> Result<FeedDate> {
    let text = text.trim();
    DateTime::parse_from_str(text, FEED_DATE_FORMAT)
        .or_else(|err| DateTime::parse_from_rfc2822(text).map_err(|_| err))
        .map_err(|source| RegistryError::InvalidDate {
            value: text.to_string(),
            source,
        })
}
