pub mod diff;
pub mod scan;

/// Today's date in UTC as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}
