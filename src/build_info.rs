//! Version stamp embedded by the build script.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `battles <date> (<commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!("battles {} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_is_short_hash_or_unknown() {
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_date_is_iso_day_or_unknown() {
        assert!(BUILD_DATE == "unknown" || BUILD_DATE.len() == 10);
    }

    #[test]
    fn test_version_line_mentions_both() {
        let line = version_line();
        assert!(line.starts_with("battles "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.contains(BUILD_DATE));
    }
}
