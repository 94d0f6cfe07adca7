use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::{generate_palette, parse_color};
use crate::data::model::GroupSlot;
use crate::error::ReportError;

/// Optional override file looked up in the working directory.
pub const CONFIG_FILE: &str = "grapher.json";

/// One entry of the ordered label → colour mapping.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GroupSpec {
    pub label: String,
    /// Colour name; filled from a generated palette when omitted.
    #[serde(default)]
    pub color: Option<String>,
}

impl GroupSpec {
    fn new(label: &str, color: &str) -> Self {
        GroupSpec {
            label: label.to_string(),
            color: Some(color.to_string()),
        }
    }
}

/// Everything a report run needs. Every field has a default, so an empty
/// `grapher.json` (or none at all) gives the six A–F groups of 100 samples.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub group_size: usize,
    pub groups: Vec<GroupSpec>,
    /// Canvas width in pixels (8 in at 80 dpi).
    pub width: u32,
    /// Canvas height in pixels (6 in at 80 dpi).
    pub height: u32,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            input: PathBuf::from("data.txt"),
            output_dir: PathBuf::from("."),
            group_size: 100,
            groups: vec![
                GroupSpec::new("A", "red"),
                GroupSpec::new("B", "green"),
                GroupSpec::new("C", "blue"),
                GroupSpec::new("D", "orange"),
                GroupSpec::new("E", "black"),
                GroupSpec::new("F", "purple"),
            ],
            width: 640,
            height: 480,
            x_label: "Iteration Number".to_string(),
            y_label: "Time".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using built-in defaults", path.display());
            return Ok(ReportConfig::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Maximum number of input lines that are distributed into groups.
    pub fn capacity(&self) -> usize {
        self.group_size * self.groups.len()
    }

    /// Validate the configuration and resolve the ordered slot list.
    pub fn slots(&self) -> Result<Vec<GroupSlot>, ReportError> {
        if self.group_size == 0 {
            return Err(ReportError::Config("group_size must be at least 1".into()));
        }
        if self.groups.is_empty() {
            return Err(ReportError::Config("at least one group is required".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReportError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }

        let mut seen = BTreeSet::new();
        for spec in &self.groups {
            let label = spec.label.as_str();
            if label.trim().is_empty() {
                return Err(ReportError::Config("group labels must not be empty".into()));
            }
            if label.contains(['/', '\\']) || label == "." || label == ".." {
                return Err(ReportError::Config(format!(
                    "group label '{label}' cannot be used in a file name"
                )));
            }
            if !seen.insert(label) {
                return Err(ReportError::Config(format!("duplicate group label '{label}'")));
            }
        }

        let fallback = generate_palette(self.groups.len());
        self.groups
            .iter()
            .zip(fallback)
            .map(|(spec, generated)| -> Result<GroupSlot, ReportError> {
                let color = match &spec.color {
                    Some(name) => parse_color(name)?,
                    None => generated,
                };
                Ok(GroupSlot {
                    label: spec.label.clone(),
                    color,
                })
            })
            .collect()
    }
}
