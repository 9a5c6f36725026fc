use std::{fmt, str::FromStr};

use serde::Deserialize;

/// How difftastic lays out its output
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    SideBySide,
    #[default]
    SideBySideShowBoth,
    Inline,
    Json,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::SideBySide,
        DisplayMode::SideBySideShowBoth,
        DisplayMode::Inline,
        DisplayMode::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::SideBySide => "side-by-side",
            DisplayMode::SideBySideShowBoth => "side-by-side-show-both",
            DisplayMode::Inline => "inline",
            DisplayMode::Json => "json",
        }
    }

    /// `side-by-side|side-by-side-show-both|inline|json`, for help and error messages
    pub fn choices() -> String {
        Self::ALL.map(|mode| mode.as_str()).join("|")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("display must be one of: {}", DisplayMode::choices())]
pub struct UnknownDisplayMode;

impl FromStr for DisplayMode {
    type Err = UnknownDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or(UnknownDisplayMode)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::DisplayMode;

    #[test]
    fn parses_what_it_prints() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.to_string().parse::<DisplayMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_mode_lists_the_choices() {
        let err = "fancy".parse::<DisplayMode>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "display must be one of: side-by-side|side-by-side-show-both|inline|json"
        );
    }

    #[test]
    fn config_spelling_matches_command_line() {
        let mode: DisplayMode = serde_yaml::from_str("side-by-side").unwrap();
        assert_eq!(mode, DisplayMode::SideBySide);
    }

    #[test]
    fn defaults_to_showing_both_sides() {
        assert_eq!(DisplayMode::default(), DisplayMode::SideBySideShowBoth);
    }
}
