/// Badge color category for a detected mood. Names follow the backend
/// dashboard's palette so both surfaces agree on what "success" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Success,
    Info,
    Danger,
    Warning,
    Secondary,
    /// Fallback for moods the mapping does not know.
    Primary,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Secondary => "secondary",
            Self::Primary => "primary",
        }
    }
}

impl std::fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn badge_color(mood: &str) -> BadgeColor {
    match mood.to_lowercase().as_str() {
        "happy" => BadgeColor::Success,
        "sad" => BadgeColor::Info,
        "angry" => BadgeColor::Danger,
        "surprised" => BadgeColor::Warning,
        "neutral" => BadgeColor::Secondary,
        _ => BadgeColor::Primary,
    }
}

/// "happy" -> "Happy", for the badge text.
pub fn display_label(mood: &str) -> String {
    let mut chars = mood.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_moods_map_to_fixed_colors() {
        assert_eq!(badge_color("happy"), BadgeColor::Success);
        assert_eq!(badge_color("sad"), BadgeColor::Info);
        assert_eq!(badge_color("angry"), BadgeColor::Danger);
        assert_eq!(badge_color("surprised"), BadgeColor::Warning);
        assert_eq!(badge_color("neutral"), BadgeColor::Secondary);
    }

    #[test]
    fn test_mapping_is_case_insensitive() {
        assert_eq!(badge_color("Happy"), BadgeColor::Success);
        assert_eq!(badge_color("ANGRY"), BadgeColor::Danger);
    }

    #[test]
    fn test_unknown_mood_falls_back_to_primary() {
        assert_eq!(badge_color("mysterious"), BadgeColor::Primary);
        assert_eq!(badge_color(""), BadgeColor::Primary);
    }

    #[test]
    fn test_display_label_capitalizes() {
        assert_eq!(display_label("happy"), "Happy");
        assert_eq!(display_label("s"), "S");
        assert_eq!(display_label(""), "");
    }
}
