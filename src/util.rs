use std::time::{SystemTime, UNIX_EPOCH};

// Milliseconds since the unix epoch, 0 if the clock is before it
pub fn get_unix() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|unix| unix.as_millis() as i64)
    .unwrap_or_default()
}
