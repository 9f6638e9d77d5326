//! Fixed identifier sets used as dynamic keys in the configuration document.

use crate::label::format_label;
use crate::path::PathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distribution, ad, and payment platforms supported by the bridge SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Yandex,
    GameDistribution,
    Telegram,
    Y8,
    Lagged,
    Huawei,
    Msn,
    Discord,
    Gamepush,
    JioGames,
    CrazyGames,
    Youtube,
    Vk,
    Ok,
    AbsoluteGames,
    Playgama,
    Playdeck,
    Poki,
    Mock,
    QaTool,
    Bitquest,
    Portal,
    Reddit,
}

impl Platform {
    /// Every platform, in selector order.
    pub const ALL: [Platform; 24] = [
        Platform::Facebook,
        Platform::Yandex,
        Platform::GameDistribution,
        Platform::Telegram,
        Platform::Y8,
        Platform::Lagged,
        Platform::Huawei,
        Platform::Msn,
        Platform::Discord,
        Platform::Gamepush,
        Platform::JioGames,
        Platform::CrazyGames,
        Platform::Youtube,
        Platform::Vk,
        Platform::Ok,
        Platform::AbsoluteGames,
        Platform::Playgama,
        Platform::Playdeck,
        Platform::Poki,
        Platform::Mock,
        Platform::QaTool,
        Platform::Bitquest,
        Platform::Portal,
        Platform::Reddit,
    ];

    /// Identifier as it appears in configuration keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Yandex => "yandex",
            Platform::GameDistribution => "game_distribution",
            Platform::Telegram => "telegram",
            Platform::Y8 => "y8",
            Platform::Lagged => "lagged",
            Platform::Huawei => "huawei",
            Platform::Msn => "msn",
            Platform::Discord => "discord",
            Platform::Gamepush => "gamepush",
            Platform::JioGames => "jio_games",
            Platform::CrazyGames => "crazy_games",
            Platform::Youtube => "youtube",
            Platform::Vk => "vk",
            Platform::Ok => "ok",
            Platform::AbsoluteGames => "absolute_games",
            Platform::Playgama => "playgama",
            Platform::Playdeck => "playdeck",
            Platform::Poki => "poki",
            Platform::Mock => "mock",
            Platform::QaTool => "qa_tool",
            Platform::Bitquest => "bitquest",
            Platform::Portal => "portal",
            Platform::Reddit => "reddit",
        }
    }

    /// Human readable label, e.g. `Game Distribution`.
    pub fn label(self) -> String {
        format_label(self.as_str())
    }

    /// Case-insensitive match against the label or the raw id.
    pub fn matches_filter(self, filter: &str) -> bool {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.label().to_lowercase().contains(&needle) || self.as_str().contains(&needle)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PathError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == value)
            .ok_or_else(|| PathError::UnknownPlatform(value.to_string()))
    }
}

/// Ad surfaces that carry their own placement lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdSurface {
    Interstitial,
    Rewarded,
}

impl AdSurface {
    /// Both surfaces in form order.
    pub const ALL: [AdSurface; 2] = [AdSurface::Interstitial, AdSurface::Rewarded];

    /// Key of the surface under `advertisement`.
    pub fn as_str(self) -> &'static str {
        match self {
            AdSurface::Interstitial => "interstitial",
            AdSurface::Rewarded => "rewarded",
        }
    }

    /// Resolve a property name of the advertisement object to a surface.
    pub fn from_key(key: &str) -> Option<Self> {
        AdSurface::ALL
            .into_iter()
            .find(|surface| surface.as_str() == key)
    }
}

impl fmt::Display for AdSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdSurface {
    type Err = PathError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AdSurface::from_key(value).ok_or_else(|| PathError::UnknownSurface(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{AdSurface, Platform};
    use pretty_assertions::assert_eq;

    #[test]
    fn serde_names_match_config_keys() {
        for platform in Platform::ALL {
            let encoded = serde_json::to_value(platform).expect("encode");
            assert_eq!(encoded, serde_json::Value::String(platform.as_str().to_string()));
            let parsed: Platform = platform.as_str().parse().expect("parse");
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = "myspace".parse::<Platform>().expect_err("unknown");
        assert_eq!(err.to_string(), "unknown platform: myspace");
    }

    #[test]
    fn filter_matches_label_or_id() {
        assert!(Platform::GameDistribution.matches_filter("game dist"));
        assert!(Platform::GameDistribution.matches_filter("game_d"));
        assert!(Platform::QaTool.matches_filter("QA"));
        assert!(!Platform::Poki.matches_filter("yandex"));
        assert!(Platform::Poki.matches_filter("  "));
    }

    #[test]
    fn surfaces_resolve_from_keys() {
        assert_eq!(AdSurface::from_key("rewarded"), Some(AdSurface::Rewarded));
        assert_eq!(AdSurface::from_key("banner"), None);
    }
}
