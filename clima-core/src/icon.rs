//! Keyword-based icon selection for provider condition texts.
//!
//! The provider answers in Portuguese (`lang=pt_br`), so the keywords are
//! Portuguese too.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    NightClear,
}

impl IconId {
    pub fn glyph(&self) -> &'static str {
        match self {
            IconId::Sunny => "☀️",
            IconId::Cloudy => "☁️",
            IconId::Rainy => "🌧️",
            IconId::Stormy => "⛈️",
            IconId::NightClear => "🌙",
        }
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Night is 18:00 up to (not including) 06:00, local clock.
pub fn is_night(local_hour: u32) -> bool {
    local_hour >= 18 || local_hour < 6
}

/// Pick an icon for `condition`. First match wins; anything unrecognised,
/// including the empty string, falls back to [`IconId::Cloudy`].
pub fn resolve_icon(condition: &str, local_hour: u32) -> IconId {
    let text = condition.to_lowercase();
    let has = |needle: &str| text.contains(needle);

    let clear = has("céu limpo") || has("limpo") || has("sol");

    if clear && is_night(local_hour) {
        IconId::NightClear
    } else if has("sol") || has("limpo") {
        IconId::Sunny
    } else if has("nublado") {
        IconId::Cloudy
    } else if has("chuva") {
        IconId::Rainy
    } else if has("tempestade") {
        IconId::Stormy
    } else {
        IconId::Cloudy
    }
}
