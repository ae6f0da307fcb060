/// Decorative icon shown next to a forecast condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sun,
    PartlyCloudy,
    Cloud,
    Fog,
    Rain,
    Snow,
    Thunder,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "☀️",
            Icon::PartlyCloudy => "⛅",
            Icon::Cloud => "☁️",
            Icon::Fog => "🌫️",
            Icon::Rain => "🌧️",
            Icon::Snow => "❄️",
            Icon::Thunder => "⛈️",
        }
    }

    /// Look up the icon for a condition phrase. Matching is exact apart from
    /// letter case.
    pub fn for_condition(condition: &str) -> Option<Icon> {
        ICONS
            .iter()
            .find(|(phrase, _)| phrase.eq_ignore_ascii_case(condition))
            .map(|(_, icon)| *icon)
    }
}

const ICONS: &[(&str, Icon)] = &[
    ("sunny", Icon::Sun),
    ("clear", Icon::Sun),
    ("partly cloudy", Icon::PartlyCloudy),
    ("cloudy", Icon::Cloud),
    ("mist", Icon::Fog),
    ("fog", Icon::Fog),
    ("patchy rain possible", Icon::Rain),
    ("light rain", Icon::Rain),
    ("moderate rain", Icon::Rain),
    ("heavy rain", Icon::Rain),
    ("light snow", Icon::Snow),
    ("moderate snow", Icon::Snow),
    ("heavy snow", Icon::Snow),
    ("thundery outbreaks possible", Icon::Thunder),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunny_matches_in_any_case() {
        for text in ["Sunny", "sunny", "SUNNY", "sUnNy"] {
            assert_eq!(Icon::for_condition(text), Some(Icon::Sun), "{text:?}");
        }
    }

    #[test]
    fn unknown_phrases_have_no_icon() {
        assert_eq!(Icon::for_condition("Overcast"), None);
        assert_eq!(Icon::for_condition("Partly cloudy with sun"), None);
        assert_eq!(Icon::for_condition(""), None);
        assert_eq!(Icon::for_condition(" Sunny "), None);
    }

    #[test]
    fn multi_word_phrases_match_exactly() {
        assert_eq!(Icon::for_condition("Patchy rain possible"), Some(Icon::Rain));
        assert_eq!(Icon::for_condition("Partly cloudy"), Some(Icon::PartlyCloudy));
    }
}
