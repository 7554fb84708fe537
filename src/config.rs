//! Tunables for the page effects, loadable from a JSON blob embedded in the page.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which backdrop animation the page runs. Only one is ever active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Mesh,
    Wireframe,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub variant: Variant,
    /// Id of the `<canvas>` the backdrop draws into.
    pub canvas_id: String,
    pub mesh: MeshConfig,
    pub wireframe: WireframeConfig,
    pub gallery: GalleryConfig,
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            canvas_id: "mesh-canvas".into(),
            mesh: MeshConfig::default(),
            wireframe: WireframeConfig::default(),
            gallery: GalleryConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

/// Particle mesh parameters. Distances are in CSS pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub particle_count: usize,
    /// Per-axis velocity is drawn from `[-max_speed, max_speed]`.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    pub attraction_radius: f64,
    pub attraction_strength: f64,
    pub pull: f64,
    pub parallax: f64,
    pub parallax_scale: f64,
    pub color: String,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 3.0,
            link_distance: 150.0,
            link_opacity: 0.3,
            link_width: 0.5,
            attraction_radius: 100.0,
            attraction_strength: 2.0,
            pull: 0.001,
            parallax: 0.3,
            parallax_scale: 0.01,
            color: "#ffeb3b".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireframeConfig {
    /// Fraction of the remaining rotation closed each frame.
    pub easing: f64,
    /// Radians of Y rotation per scrolled pixel.
    pub scroll_to_y: f64,
    /// Radians of Z rotation per scrolled pixel.
    pub scroll_to_z: f64,
    pub edge_alpha: f64,
    pub line_width: f64,
    pub vertex_radius: f64,
    pub color: String,
}

impl Default for WireframeConfig {
    fn default() -> Self {
        Self {
            easing: 0.08,
            scroll_to_y: 0.002,
            scroll_to_z: 0.001,
            edge_alpha: 0.5,
            line_width: 2.0,
            vertex_radius: 3.0,
            color: "#ffeb3b".into(),
        }
    }
}

/// Lightbox behaviour and the DOM contract it binds to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub swipe_threshold: f64,
    /// Selector for thumbnails; each supplies `data-full` or `src`, and `alt`.
    pub thumbnail_selector: String,
    pub overlay_id: String,
    pub image_id: String,
    pub caption_id: String,
    pub close_id: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            thumbnail_selector: ".gallery-item img".into(),
            overlay_id: "lightbox".into(),
            image_id: "lightbox-image".into(),
            caption_id: "lightbox-caption".into(),
            close_id: "lightbox-close".into(),
        }
    }
}

/// Scroll-triggered fade-in of `.section` elements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    /// Initial downward offset in pixels before the section is revealed.
    pub offset: f64,
    pub transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".section".into(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            offset: 30.0,
            transition: "all 0.6s ease".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "malformed config: {e}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl SiteConfig {
    /// Parses and validates a config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });
        if !(self.mesh.link_distance > 0.0) {
            return invalid("mesh.link_distance", "must be positive");
        }
        if !(self.mesh.attraction_radius > 0.0) {
            return invalid("mesh.attraction_radius", "must be positive");
        }
        if self.mesh.min_radius > self.mesh.max_radius {
            return invalid("mesh.min_radius", "must not exceed max_radius");
        }
        if !(self.wireframe.easing > 0.0 && self.wireframe.easing <= 1.0) {
            return invalid("wireframe.easing", "must be in (0, 1]");
        }
        if !(self.gallery.swipe_threshold >= 0.0) {
            return invalid("gallery.swipe_threshold", "must not be negative");
        }
        Ok(())
    }
}
