use serde::Serialize;
use std::fmt;

/// Severity attached to every [`Record`](crate::record::Record).
///
/// Serialized in upper case (`"INFO"`, `"WARN"`, `"ERROR"`, `"CRITICAL"`),
/// which is the form the ingest dataset is queried by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Info,
    Warn,
    Error,
    Critical,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_upper_case() {
        let levels = [Level::Info, Level::Warn, Level::Error, Level::Critical];
        let json = serde_json::to_string(&levels).unwrap();
        assert_eq!(json, r#"["INFO","WARN","ERROR","CRITICAL"]"#);
    }

    #[test]
    fn display_matches_wire_form() {
        for level in [Level::Info, Level::Warn, Level::Error, Level::Critical] {
            assert_eq!(
                level.to_string(),
                serde_json::to_value(level).unwrap().as_str().unwrap()
            );
        }
    }
}
