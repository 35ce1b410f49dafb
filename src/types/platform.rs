//! Advertising platforms and the per-platform constant tables

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four fixed advertising channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Google,
    Meta,
    Tiktok,
    Linkedin,
}

impl Platform {
    /// Every platform, in display order
    pub const ALL: [Platform; 4] = [
        Platform::Google,
        Platform::Meta,
        Platform::Tiktok,
        Platform::Linkedin,
    ];

    /// Key used in API payloads and responses
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Google => "google",
            Platform::Meta => "meta",
            Platform::Tiktok => "tiktok",
            Platform::Linkedin => "linkedin",
        }
    }

    /// Brand name without the product suffix
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Google => "Google",
            Platform::Meta => "Meta",
            Platform::Tiktok => "TikTok",
            Platform::Linkedin => "LinkedIn",
        }
    }

    /// Human-facing name
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Google => "Google Ads",
            Platform::Meta => "Meta Ads",
            Platform::Tiktok => "TikTok Ads",
            Platform::Linkedin => "LinkedIn Ads",
        }
    }

    /// Fallback cost per acquisition when the service reports none
    pub fn default_cpa(&self) -> f64 {
        match self {
            Platform::Google => 250.0,
            Platform::Meta => 200.0,
            Platform::Tiktok => 83.0,
            Platform::Linkedin => 205.0,
        }
    }

    /// Published benchmark the default CPA is taken from
    pub fn benchmark_source(&self) -> &'static str {
        match self {
            Platform::Google => "WordStream Google Ads Benchmarks",
            Platform::Meta => "WordStream Facebook Ads Benchmarks 2024",
            Platform::Tiktok => "Lebesgue TikTok Ads Benchmarks",
            Platform::Linkedin => "The B2B House LinkedIn Ad Benchmarks 2025",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Platform::Google),
            "meta" => Ok(Platform::Meta),
            "tiktok" => Ok(Platform::Tiktok),
            "linkedin" => Ok(Platform::Linkedin),
            other => Err(format!("Unknown platform: {}", other)),
        }
    }
}

/// A value for each platform
///
/// Fixed-size storage so a missing platform can never be represented.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerPlatform<T> {
    pub google: T,
    pub meta: T,
    pub tiktok: T,
    pub linkedin: T,
}

impl<T> PerPlatform<T> {
    /// Build by evaluating `f` once per platform
    pub fn from_fn(mut f: impl FnMut(Platform) -> T) -> Self {
        Self {
            google: f(Platform::Google),
            meta: f(Platform::Meta),
            tiktok: f(Platform::Tiktok),
            linkedin: f(Platform::Linkedin),
        }
    }

    pub fn get(&self, platform: Platform) -> &T {
        match platform {
            Platform::Google => &self.google,
            Platform::Meta => &self.meta,
            Platform::Tiktok => &self.tiktok,
            Platform::Linkedin => &self.linkedin,
        }
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = (Platform, &T)> {
        Platform::ALL.into_iter().map(move |p| (p, self.get(p)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Platform, &T) -> U) -> PerPlatform<U> {
        PerPlatform::from_fn(|p| f(p, self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cpa_table() {
        assert_eq!(Platform::Google.default_cpa(), 250.0);
        assert_eq!(Platform::Meta.default_cpa(), 200.0);
        assert_eq!(Platform::Tiktok.default_cpa(), 83.0);
        assert_eq!(Platform::Linkedin.default_cpa(), 205.0);
    }

    #[test]
    fn test_platform_from_str() {
        assert_eq!("TikTok".parse::<Platform>(), Ok(Platform::Tiktok));
        assert!("snapchat".parse::<Platform>().is_err());
    }

    #[test]
    fn test_per_platform_iteration_order() {
        let values = PerPlatform::from_fn(|p| p.key().len());
        let keys: Vec<&str> = values.iter().map(|(p, _)| p.key()).collect();
        assert_eq!(keys, vec!["google", "meta", "tiktok", "linkedin"]);
        assert_eq!(*values.get(Platform::Linkedin), 8);
    }
}
