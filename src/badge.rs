//! shields.io badge snippets.
//!
//! Version and license badges read the project name and license from the
//! config, so rendering takes the whole config plus one badge.

use crate::model::{Badge, BadgeKind, ProjectConfig};

/// Renders one badge as a markdown image. Text and color go into the URL
/// verbatim.
pub fn render_badge(config: &ProjectConfig, badge: &Badge) -> String {
    match badge.kind {
        BadgeKind::Version => format!(
            "![npm](https://img.shields.io/npm/v/{}?color={})",
            config.name.to_lowercase(),
            badge.color
        ),
        BadgeKind::License => format!(
            "![License](https://img.shields.io/badge/license-{}-{})",
            config.license, badge.color
        ),
        BadgeKind::Custom => shields_badge(&badge.text, &badge.color),
    }
}

/// Renders every badge of the config, space-joined. Empty when there are
/// no badges.
pub fn render_badges(config: &ProjectConfig) -> String {
    config
        .badges
        .iter()
        .map(|badge| render_badge(config, badge))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generic static badge.
pub fn shields_badge(text: &str, color: &str) -> String {
    format!("![{text}](https://img.shields.io/badge/{text}-{color})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_named(name: &str) -> ProjectConfig {
        ProjectConfig {
            name: name.to_string(),
            license: "Apache-2.0".to_string(),
            badges: Vec::new(),
            ..ProjectConfig::default()
        }
    }

    #[test]
    fn test_version_badge_uses_lowercased_name() {
        let config = config_named("MyLib");
        let badge = Badge::new("ignored", "blue", BadgeKind::Version);
        assert_eq!(
            render_badge(&config, &badge),
            "![npm](https://img.shields.io/npm/v/mylib?color=blue)"
        );
    }

    #[test]
    fn test_license_badge_uses_config_license() {
        let config = config_named("x");
        let badge = Badge::new("ignored", "green", BadgeKind::License);
        assert_eq!(
            render_badge(&config, &badge),
            "![License](https://img.shields.io/badge/license-Apache-2.0-green)"
        );
    }

    #[test]
    fn test_custom_badge_passes_values_through() {
        let config = config_named("x");
        let badge = Badge::new("build passing", "#ff0", BadgeKind::Custom);
        assert_eq!(
            render_badge(&config, &badge),
            "![build passing](https://img.shields.io/badge/build passing-#ff0)"
        );
    }

    #[test]
    fn test_badges_are_space_joined() {
        let mut config = config_named("x");
        assert_eq!(render_badges(&config), "");

        config.badges = vec![
            Badge::new("a", "red", BadgeKind::Custom),
            Badge::new("b", "blue", BadgeKind::Custom),
        ];
        assert_eq!(
            render_badges(&config),
            "![a](https://img.shields.io/badge/a-red) ![b](https://img.shields.io/badge/b-blue)"
        );
    }
}
