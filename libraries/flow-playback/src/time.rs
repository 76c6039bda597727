//! Elapsed / remaining time formatting

/// Seconds at which labels switch from `mm:ss` to `hh:mm:ss`
pub const HOUR_FORMAT_THRESHOLD_SECS: u64 = 3600;

/// Render seconds as `mm:ss`, or `hh:mm:ss` from one hour upward
pub fn format_seconds(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if seconds >= HOUR_FORMAT_THRESHOLD_SECS {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// `duration - elapsed`, never below zero
pub fn remaining_secs(duration_secs: u64, elapsed_secs: u64) -> u64 {
    duration_secs.saturating_sub(elapsed_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(59), "00:59");
        assert_eq!(format_seconds(258), "04:18");
        assert_eq!(format_seconds(3599), "59:59");
    }

    #[test]
    fn hour_boundary_switches_format() {
        assert_eq!(format_seconds(3600), "01:00:00");
        assert_eq!(format_seconds(3661), "01:01:01");
        assert_eq!(format_seconds(36_000), "10:00:00");
    }

    #[test]
    fn remaining_clamps_at_zero() {
        assert_eq!(remaining_secs(200, 50), 150);
        assert_eq!(remaining_secs(200, 250), 0);
    }
}
