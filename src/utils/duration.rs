use chrono::TimeDelta;

/// Format a session duration as `<h>h<m>m`, or `<m>m` under an hour.
/// Missing, zero and negative durations render as `0m`.
pub(crate) fn format_session_time(total_duration_ms: Option<i64>) -> String {
    let ms = match total_duration_ms {
        Some(ms) if ms > 0 => ms,
        _ => return "0m".to_string(),
    };
    let elapsed = TimeDelta::milliseconds(ms);
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;
    if hours > 0 {
        format!("{hours}h{minutes}m")
    } else {
        format!("{minutes}m")
    }
}
