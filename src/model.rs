//! Document configuration: the values a user edits and the pipeline reads.
//!
//! Field names serialize in camelCase so a stored config stays
//! interchangeable with the browser tool's local-storage payload.

use serde::{Deserialize, Serialize};

/// Licenses offered by the shell. The generator renders any string verbatim.
pub const SUPPORTED_LICENSES: [&str; 4] = ["MIT", "Apache-2.0", "GPL-3.0", "BSD-3-Clause"];

/// Complete description of the README to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    pub name: String,
    pub description: String,
    /// Repository URL, linked from the author credit.
    pub repo_url: String,
    pub author: String,
    pub license: String,
    /// Demo image URL; an empty string omits the Demo block.
    pub demo_image: String,
    /// Rendered left to right, space-joined.
    pub badges: Vec<Badge>,
    /// Rendered in the given order.
    pub sections: Vec<Section>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            repo_url: String::new(),
            author: String::new(),
            license: "MIT".to_string(),
            demo_image: String::new(),
            badges: vec![
                Badge::new("npm", "blue", BadgeKind::Version),
                Badge::new("license", "green", BadgeKind::License),
            ],
            sections: vec![
                Section::required("installation", "Installation", "```bash\nnpm install\n```"),
                Section::required("usage", "Usage", "How to use the project"),
                Section::required("features", "Features", "- Feature 1\n- Feature 2"),
                Section::optional(
                    "api",
                    "API Documentation",
                    "## Endpoints\n\n### GET /api/v1/resource\n\nReturns a list of resources.",
                ),
                Section::optional(
                    "contributing",
                    "Contributing",
                    "1. Fork the project\n2. Create your feature branch\n3. Commit your changes\n4. Push to the branch\n5. Open a Pull Request",
                ),
            ],
        }
    }
}

impl ProjectConfig {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

/// Which shields.io URL a badge renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    /// npm version badge for the project name.
    Version,
    /// License badge for the configured license.
    License,
    /// Generic badge built from the badge's own text and color.
    #[default]
    #[serde(other)]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub color: String,
    #[serde(rename = "type", default)]
    pub kind: BadgeKind,
}

impl Badge {
    pub fn new(text: impl Into<String>, color: impl Into<String>, kind: BadgeKind) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
            kind,
        }
    }
}

/// A titled block of raw markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Unique within a config; only used to address the section for edits.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Optional sections with blank content are left out of the document.
    #[serde(default)]
    pub is_optional: bool,
    /// Starter text for new sections. Stored, never rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl Section {
    pub fn required(id: &str, title: &str, content: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            is_optional: false,
            template: None,
        }
    }

    pub fn optional(id: &str, title: &str, content: &str) -> Self {
        Self {
            is_optional: true,
            ..Self::required(id, title, content)
        }
    }

    /// Whether the section ends up in the generated document.
    pub fn is_rendered(&self) -> bool {
        !self.is_optional || !self.content.trim().is_empty()
    }
}

/// Color scheme of the editing shell. Persisted next to the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub bg_gradient: String,
    pub accent: String,
}

impl Theme {
    fn builtin(id: &str, name: &str, bg_gradient: &str, accent: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            bg_gradient: bg_gradient.to_string(),
            accent: accent.to_string(),
        }
    }

    /// Looks up one of the built-in themes by id.
    pub fn find(id: &str) -> Option<Theme> {
        themes().into_iter().find(|t| t.id == id)
    }
}

impl Default for Theme {
    fn default() -> Self {
        themes().swap_remove(0)
    }
}

/// The built-in themes, default first.
pub fn themes() -> Vec<Theme> {
    vec![
        Theme::builtin("dark", "Dark", "from-gray-900 to-gray-800", "blue"),
        Theme::builtin("midnight", "Midnight", "from-blue-900 to-gray-900", "indigo"),
        Theme::builtin("forest", "Forest", "from-green-900 to-gray-900", "emerald"),
        Theme::builtin("sunset", "Sunset", "from-orange-900 to-gray-900", "orange"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_uses_browser_field_names() {
        let json = serde_json::to_value(ProjectConfig::default()).unwrap();
        assert_eq!(json["license"], "MIT");
        assert!(json.get("repoUrl").is_some());
        assert!(json.get("demoImage").is_some());
        assert_eq!(json["badges"][0]["type"], "version");
        assert_eq!(json["sections"][3]["isOptional"], true);
        assert!(json["sections"][0].get("template").is_none());
    }

    #[test]
    fn test_unknown_badge_type_is_custom() {
        let badge: Badge =
            serde_json::from_str(r#"{"text":"build","color":"red","type":"ci"}"#).unwrap();
        assert_eq!(badge.kind, BadgeKind::Custom);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ProjectConfig =
            serde_json::from_str(r#"{"name":"Foo","sections":[{"id":"a","title":"A"}]}"#)
                .unwrap();
        assert_eq!(config.name, "Foo");
        assert_eq!(config.license, "MIT");
        assert!(!config.sections[0].is_optional);
        assert_eq!(config.sections[0].content, "");
    }

    #[test]
    fn test_section_rendering_rule() {
        assert!(Section::required("a", "A", "").is_rendered());
        assert!(!Section::optional("b", "B", "   ").is_rendered());
        assert!(Section::optional("c", "C", "text").is_rendered());
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(Theme::default().id, "dark");
        assert_eq!(Theme::find("forest").map(|t| t.accent), Some("emerald".to_string()));
        assert!(Theme::find("neon").is_none());
    }
}
