use serde::{Deserialize, Serialize};

/// Local icon for a provider condition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconId {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Cloudy,
    Default,
}

impl IconId {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconId::Thunderstorm => "thunderstorm",
            IconId::Drizzle => "drizzle",
            IconId::Rain => "rain",
            IconId::Snow => "snow",
            IconId::Atmosphere => "atmosphere",
            IconId::Clear => "clear",
            IconId::Cloudy => "cloudy",
            IconId::Default => "default",
        }
    }

    /// Asset file shipped with the web widget for this icon.
    pub fn file_name(&self) -> &'static str {
        match self {
            IconId::Thunderstorm => "thunderstorm.png",
            IconId::Drizzle => "drizzle.png",
            IconId::Rain => "rain.png",
            IconId::Snow => "snowy.png",
            IconId::Atmosphere => "atmosphere.png",
            IconId::Clear => "sunny.png",
            IconId::Cloudy => "cloud.png",
            IconId::Default => "default.png",
        }
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps an OpenWeatherMap condition id to an icon. Ranges are inclusive and
/// anything outside them falls back to [`IconId::Default`].
pub fn map_condition_to_icon(condition_id: u16) -> IconId {
    match condition_id {
        200..=232 => IconId::Thunderstorm,
        300..=321 => IconId::Drizzle,
        500..=531 => IconId::Rain,
        600..=622 => IconId::Snow,
        701..=781 => IconId::Atmosphere,
        800 => IconId::Clear,
        801..=804 => IconId::Cloudy,
        _ => IconId::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunderstorm_band_and_its_edges() {
        for id in 200..=232 {
            assert_eq!(map_condition_to_icon(id), IconId::Thunderstorm, "id {id}");
        }
        assert_eq!(map_condition_to_icon(199), IconId::Default);
        assert_eq!(map_condition_to_icon(233), IconId::Default);
    }

    #[test]
    fn clear_sits_between_default_and_cloudy() {
        assert_eq!(map_condition_to_icon(799), IconId::Default);
        assert_eq!(map_condition_to_icon(800), IconId::Clear);
        assert_eq!(map_condition_to_icon(801), IconId::Cloudy);
        assert_eq!(map_condition_to_icon(804), IconId::Cloudy);
        assert_eq!(map_condition_to_icon(805), IconId::Default);
    }

    #[test]
    fn remaining_bands() {
        let cases = [
            (300, IconId::Drizzle),
            (321, IconId::Drizzle),
            (322, IconId::Default),
            (500, IconId::Rain),
            (531, IconId::Rain),
            (600, IconId::Snow),
            (622, IconId::Snow),
            (700, IconId::Default),
            (701, IconId::Atmosphere),
            (781, IconId::Atmosphere),
            (0, IconId::Default),
        ];
        for (id, icon) in cases {
            assert_eq!(map_condition_to_icon(id), icon, "id {id}");
        }
    }

    #[test]
    fn file_names_match_widget_assets() {
        assert_eq!(IconId::Clear.file_name(), "sunny.png");
        assert_eq!(IconId::Snow.file_name(), "snowy.png");
        assert_eq!(IconId::Cloudy.to_string(), "cloudy");
    }
}
