//! Editing session: owns the config and theme, persists every change and
//! re-renders the document after each edit.
//!
//! Subscribers receive the latest [`Rendered`] value through a
//! [`tokio::sync::watch`] channel, so a shell only has to wait for changes
//! instead of re-running the pipeline itself.

use crate::model::{Badge, ProjectConfig, Section, Theme};
use crate::pipeline::{Rendered, render};
use crate::storage::{CONFIG_KEY, KeyValueStore, Persistence, THEME_KEY};
use anyhow::{Result, bail};
use log::{debug, info};
use tokio::sync::watch;

/// Scalar config fields the shell edits directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    RepoUrl,
    Author,
    License,
    DemoImage,
}

pub struct Session<S: KeyValueStore> {
    persistence: Persistence<S>,
    config: ProjectConfig,
    theme: Theme,
    rendered_tx: watch::Sender<Rendered>,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads the stored config and theme, falling back to the defaults.
    pub fn open(persistence: Persistence<S>) -> Self {
        let config = persistence.load(CONFIG_KEY, ProjectConfig::default());
        let theme = persistence.load(THEME_KEY, Theme::default());
        let (rendered_tx, _) = watch::channel(render(&config));
        debug!("Session opened for '{}' with theme {}", config.name, theme.id);
        Self {
            persistence,
            config,
            theme,
            rendered_tx,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    /// Output for the current config.
    pub fn rendered(&self) -> Rendered {
        self.rendered_tx.borrow().clone()
    }

    /// Receives a new value after every edit.
    pub fn subscribe(&self) -> watch::Receiver<Rendered> {
        self.rendered_tx.subscribe()
    }

    /// Applies `f` to the config, then saves and re-renders.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut ProjectConfig) -> R) -> R {
        let result = f(&mut self.config);
        self.persistence.save(CONFIG_KEY, &self.config);
        self.rendered_tx.send_replace(render(&self.config));
        result
    }

    /// Replaces the whole config.
    pub fn replace(&mut self, config: ProjectConfig) {
        self.update(|current| *current = config);
    }

    pub fn reset(&mut self) {
        info!("Resetting config to defaults");
        self.replace(ProjectConfig::default());
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.update(|config| {
            let slot = match field {
                Field::Name => &mut config.name,
                Field::Description => &mut config.description,
                Field::RepoUrl => &mut config.repo_url,
                Field::Author => &mut config.author,
                Field::License => &mut config.license,
                Field::DemoImage => &mut config.demo_image,
            };
            *slot = value;
        });
    }

    /// Appends an empty optional section and returns its id.
    pub fn add_section(&mut self) -> String {
        self.update(|config| {
            let id = format!("section-{}", config.sections.len() + 1);
            config
                .sections
                .push(Section::optional(&id, "New Section", ""));
            id
        })
    }

    /// Removes an optional section. Required sections stay.
    pub fn remove_section(&mut self, id: &str) -> bool {
        let removable = self.config.section(id).is_some_and(|s| s.is_optional);
        if !removable {
            debug!("Section {id} is missing or required, not removing");
            return false;
        }
        self.update(|config| config.sections.retain(|s| s.id != id));
        true
    }

    pub fn set_section_content(&mut self, id: &str, content: impl Into<String>) -> Result<()> {
        self.edit_section(id, |section| section.content = content.into())
    }

    pub fn set_section_title(&mut self, id: &str, title: impl Into<String>) -> Result<()> {
        self.edit_section(id, |section| section.title = title.into())
    }

    fn edit_section(&mut self, id: &str, f: impl FnOnce(&mut Section)) -> Result<()> {
        if self.config.section(id).is_none() {
            bail!("No section with id '{id}'");
        }
        self.update(|config| {
            if let Some(section) = config.section_mut(id) {
                f(section);
            }
        });
        Ok(())
    }

    /// Swaps a section with the one before it. No-op for the first section.
    pub fn move_section_up(&mut self, id: &str) -> Result<()> {
        match self.config.section_index(id) {
            None => bail!("No section with id '{id}'"),
            Some(0) => Ok(()),
            Some(index) => {
                self.update(|config| config.sections.swap(index, index - 1));
                Ok(())
            }
        }
    }

    /// Drag-and-drop reorder: takes `dragged` out and inserts it where
    /// `target` was.
    pub fn move_section(&mut self, dragged: &str, target: &str) -> Result<()> {
        if dragged == target {
            return Ok(());
        }
        let (Some(from), Some(to)) = (
            self.config.section_index(dragged),
            self.config.section_index(target),
        ) else {
            bail!("Unknown section in move: '{dragged}' -> '{target}'");
        };
        self.update(|config| {
            let section = config.sections.remove(from);
            config.sections.insert(to, section);
        });
        Ok(())
    }

    pub fn add_badge(&mut self, badge: Badge) {
        self.update(|config| config.badges.push(badge));
    }

    pub fn remove_badge(&mut self, index: usize) -> Result<Badge> {
        if index >= self.config.badges.len() {
            bail!(
                "Badge index {index} out of range ({} badges)",
                self.config.badges.len()
            );
        }
        Ok(self.update(|config| config.badges.remove(index)))
    }

    /// Selects one of the built-in themes.
    pub fn set_theme(&mut self, id: &str) -> Result<()> {
        let Some(theme) = Theme::find(id) else {
            bail!("Unknown theme '{id}'");
        };
        self.persistence.save(THEME_KEY, &theme);
        self.theme = theme;
        Ok(())
    }
}
