//! Human readable "due" labels for scheduled reviews.
use chrono::{DateTime, Utc};

/// Formats how far away `next_review` is from `now`.
///
/// Whole days are counted from the elapsed duration, so a review 36 hours out
/// is "Due tomorrow". Weeks and months are integer divisions by 7 and 30.
pub fn format_next_review(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let next_review = match next_review {
        Some(next) if next > now => next,
        _ => return "Due now".to_string(),
    };

    let days = (next_review - now).num_days();
    if days == 0 {
        "Due today".to_string()
    } else if days == 1 {
        "Due tomorrow".to_string()
    } else if days < 7 {
        format!("Due in {} days", days)
    } else if days < 30 {
        let weeks = days / 7;
        format!("Due in {} week{}", weeks, plural_suffix(weeks))
    } else {
        let months = days / 30;
        format!("Due in {} month{}", months, plural_suffix(months))
    }
}

fn plural_suffix(count: i64) -> &'static str {
    if count == 1 { "" } else { "s" }
}
