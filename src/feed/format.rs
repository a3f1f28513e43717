//! # Display Formatting
//!
//! Pure helpers that turn raw platform values into the strings shown on a
//! card. Nothing here allocates more than the output string or touches I/O.

use chrono::{DateTime, Utc};

/// Converts an ISO-8601-like duration (`PT1M30S`) into total seconds.
///
/// Matches the first `PT` in the input followed by optional hour, minute and
/// second components, in that order. Anything after the match is ignored.
/// Input without a `PT` marker is treated as malformed and yields 0, which
/// also covers the `P0D` the platform reports for live streams.
pub fn parse_duration(raw: &str) -> u32 {
    let Some(start) = raw.find("PT") else {
        return 0;
    };

    let mut rest = &raw[start + 2..];
    let mut total: u32 = 0;
    for (unit, scale) in [('H', 3600), ('M', 60), ('S', 1)] {
        if let Some((value, tail)) = take_component(rest, unit) {
            total = total.saturating_add(value.saturating_mul(scale));
            rest = tail;
        }
    }
    total
}

/// Reads `<digits><unit>` from the front of `input`.
fn take_component(input: &str, unit: char) -> Option<(u32, &str)> {
    let digits = input.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let tail = input[digits..].strip_prefix(unit)?;
    let value = input[..digits].parse().ok()?;
    Some((value, tail))
}

/// Compact view count: `500`, `1.5K`, `2.3M`.
pub fn format_view_count(count: u64) -> String {
    // Counts that would round up to "1000.0K" roll over to millions
    if count >= 999_950 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Clock-style duration badge: `0:45`, `1:05`, `1:00:00`.
pub fn format_duration(secs: u32) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Search snippets come back HTML-escaped (`Tom &amp; Jerry`).
pub fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        // Last, so "&amp;lt;" decodes to "&lt;" and not "<"
        .replace("&amp;", "&")
}

/// Relative age for the player overlay ("3d ago").
pub fn format_age(published: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();
    if hours < 1 {
        format!("{minutes}m ago")
    } else if days < 1 {
        format!("{hours}h ago")
    } else if days < 30 {
        format!("{days}d ago")
    } else if days < 365 {
        format!("{}mo ago", days / 30)
    } else {
        format!("{}y ago", days / 365)
    }
}
