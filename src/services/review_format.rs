//! Text shown in the review panel: comment ages, the rating summary line and
//! the user's own rating label.

use chrono::{TimeZone, Utc};

use crate::types::review::Rating;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Age of a comment relative to `now_ms`, e.g. "5 minutes ago".
///
/// Anything a week or older is shown as a `YYYY-MM-DD` date.
pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minutes = diff.div_euclid(MINUTE_MS);
    let hours = diff.div_euclid(HOUR_MS);
    let days = diff.div_euclid(DAY_MS);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} ago", plural(minutes, "minute"))
    } else if hours < 24 {
        format!("{} ago", plural(hours, "hour"))
    } else if days < 7 {
        format!("{} ago", plural(days, "day"))
    } else {
        Utc.timestamp_millis_opt(timestamp_ms)
            .single()
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// "4.5 (2 ratings)", or `None` while nobody has rated the page.
pub fn rating_summary(rating: &Rating) -> Option<String> {
    if rating.count == 0 {
        return None;
    }
    let label = if rating.count == 1 { "rating" } else { "ratings" };
    Some(format!("{:.1} ({} {})", rating.mean_stars, rating.count, label))
}

/// "You rated 3 stars", or `None` if the user has not rated the page.
pub fn user_rating_label(user_rating: Option<u8>) -> Option<String> {
    user_rating.map(|stars| {
        if stars == 1 {
            "You rated 1 star".to_string()
        } else {
            format!("You rated {} stars", stars)
        }
    })
}

/// Uppercased first character of the author name, used for the avatar bubble.
pub fn author_initial(author: &str) -> String {
    author
        .trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}
