//! Widget selection from integration app names

use serde::{Deserialize, Serialize};

/// Which renderer an integration item should use
///
/// Chosen by substring match on the integration's app name. Anything
/// unrecognized (including a malformed payload) falls back to the generic
/// key/value widget rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// Specialized weather rendering
    Weather,
    /// Specialized news ticker rendering
    News,
    /// Raw key/value dump of whatever the payload holds
    Generic,
}

impl WidgetKind {
    /// Select a widget by app name, case-insensitively
    pub fn from_app_name(app: &str) -> Self {
        let app = app.to_ascii_lowercase();
        if app.contains("weather") {
            WidgetKind::Weather
        } else if app.contains("news") {
            WidgetKind::News
        } else {
            WidgetKind::Generic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match_is_case_insensitive() {
        assert_eq!(WidgetKind::from_app_name("Weather Pro"), WidgetKind::Weather);
        assert_eq!(WidgetKind::from_app_name("ACME NEWS Feed"), WidgetKind::News);
        assert_eq!(WidgetKind::from_app_name("Stocks"), WidgetKind::Generic);
        assert_eq!(WidgetKind::from_app_name(""), WidgetKind::Generic);
    }
}
