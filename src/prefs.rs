//! Visitor preferences: colour theme and sound effects.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph on the toggle button: the theme a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "☾",
            Self::Dark => "☀",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SoundPreference {
    pub enabled: bool,
}

impl SoundPreference {
    /// Gain of the click played when sound is switched on.
    pub const CONFIRM_GAIN: f32 = 0.1;

    /// Restores a stored value; anything unrecognised means off.
    pub fn from_stored(value: Option<&str>) -> Self {
        Self {
            enabled: matches!(value, Some("on")),
        }
    }

    pub fn as_str(self) -> &'static str {
        if self.enabled {
            "on"
        } else {
            "off"
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            enabled: !self.enabled,
        }
    }

    pub fn toggle_label(self) -> &'static str {
        if self.enabled {
            "Mute sound effects"
        } else {
            "Enable sound effects"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_defaults_dark_and_toggles_back() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Light.as_str(), "light");
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(theme.toggled().toggled(), theme);
        }
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
        assert_eq!(Theme::Dark.icon(), "☀");
    }

    #[test]
    fn sound_is_off_unless_stored_on() {
        assert!(!SoundPreference::default().enabled);
        assert!(SoundPreference::from_stored(Some("on")).enabled);
        assert!(!SoundPreference::from_stored(Some("true")).enabled);
        assert!(!SoundPreference::from_stored(None).enabled);
        let on = SoundPreference::default().toggled();
        assert_eq!(on.as_str(), "on");
        assert_eq!(SoundPreference::from_stored(Some(on.as_str())), on);
    }
}
