// Runtime settings, read from an optional TOML file and checked before anything starts.

use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Upper bound for any pixel length in the config; keeps geometry arithmetic in `i32`.
const MAX_EXTENT: i32 = 1 << 14;
const MAX_THICKNESS: i32 = 64;
const MAX_DWELL_SECS: f32 = 60.0;

/// Runtime settings. Every field has a default equal to the 640x480 reference setup,
/// so an empty file (or no file at all) gives the stock behaviour.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Draw the detected hand skeleton on the frame.
    pub show_landmarks: bool,
    pub camera: CameraConfig,
    pub detector: DetectorConfig,
    pub palette: PaletteConfig,
    pub gesture: GestureConfig,
    pub ink: InkConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_landmarks: true,
            camera: CameraConfig::default(),
            detector: DetectorConfig::default(),
            palette: PaletteConfig::default(),
            gesture: GestureConfig::default(),
            ink: InkConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub index: u32,
    pub width: u32,
    pub height: u32,
    /// Flip frames left/right before processing.
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { index: 0, width: 640, height: 480, mirror: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    pub program: String,
    pub args: Vec<String>,
    pub min_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: "python3".into(),
            args: vec!["scripts/hand_detect.py".into()],
            min_confidence: 0.6,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Pre-rendered palette image. Built-in icons are drawn when unset.
    pub path: Option<PathBuf>,
    pub margin_left: i32,
    pub slot_width: i32,
    pub height: i32,
    /// Weight of the palette when blended over the frame.
    pub alpha: f32,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self { path: None, margin_left: 150, slot_width: 50, height: 50, alpha: 0.7 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Middle finger counts as raised when its MCP joint is this many pixels below the tip.
    pub pen_threshold: i32,
    /// Hover time over a palette slot before the tool changes.
    pub dwell_secs: f32,
    pub ring_max: i32,
    pub ring_min: i32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { pen_threshold: 40, dwell_secs: 0.8, ring_max: 40, ring_min: 1 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InkConfig {
    pub thickness: i32,
    pub eraser_radius: i32,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self { thickness: 2, eraser_radius: 70 }
    }
}

impl Config {
    pub fn load<A: AsRef<Path>>(path: A) -> Result<Self, Error> {
        Self::load_impl(path.as_ref())
    }

    fn load_impl(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading `{}`: {e}", path.display())))?;
        let config = Self::parse(&contents)?;
        log::debug!("loaded config from `{}`", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        let c = &self.camera;
        if c.width == 0 || c.height == 0 || c.width > MAX_EXTENT as u32 || c.height > MAX_EXTENT as u32 {
            return Err(Error::Config(format!(
                "camera resolution must be within 1..={MAX_EXTENT} (got {}x{})",
                c.width, c.height
            )));
        }
        let p = &self.palette;
        if !(1..=MAX_EXTENT).contains(&p.slot_width) || !(1..=MAX_EXTENT).contains(&p.height) {
            return Err(Error::Config(format!(
                "palette slots must have a size within 1..={MAX_EXTENT} (got {}x{})",
                p.slot_width, p.height
            )));
        }
        if !(0..=MAX_EXTENT).contains(&p.margin_left) || p.margin_left + 5 * p.slot_width > MAX_EXTENT {
            return Err(Error::Config(format!(
                "palette must end within {MAX_EXTENT}px (margin_left {}, slot_width {})",
                p.margin_left, p.slot_width
            )));
        }
        if !(0.0..=1.0).contains(&p.alpha) {
            return Err(Error::Config(format!("palette.alpha must be in [0, 1] (got {})", p.alpha)));
        }
        let g = &self.gesture;
        if !(g.dwell_secs > 0.0 && g.dwell_secs <= MAX_DWELL_SECS) {
            return Err(Error::Config(format!(
                "gesture.dwell_secs must be in (0, {MAX_DWELL_SECS}] (got {})",
                g.dwell_secs
            )));
        }
        if g.ring_min < 0 || g.ring_min > g.ring_max || g.ring_max > MAX_EXTENT {
            return Err(Error::Config(format!(
                "gesture.ring_min must be within 0..=ring_max, ring_max at most {MAX_EXTENT} (got {} / {})",
                g.ring_min, g.ring_max
            )));
        }
        let ink = &self.ink;
        if !(1..=MAX_THICKNESS).contains(&ink.thickness) {
            return Err(Error::Config(format!(
                "ink.thickness must be within 1..={MAX_THICKNESS} (got {})",
                ink.thickness
            )));
        }
        // No point erasing beyond the frame diagonal.
        let diagonal = (c.width as f32).hypot(c.height as f32).ceil() as i32;
        if !(0..=diagonal).contains(&ink.eraser_radius) {
            return Err(Error::Config(format!(
                "ink.eraser_radius must be within 0..={diagonal} (got {})",
                ink.eraser_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_example_config() {
        Config::load("config.example.toml").unwrap();
    }

    #[test]
    fn empty_file_gives_reference_defaults() {
        let c = Config::parse("").unwrap();
        assert_eq!(c.palette.margin_left, 150);
        assert_eq!(c.palette.slot_width, 50);
        assert_eq!(c.gesture.pen_threshold, 40);
        assert_eq!(c.gesture.dwell_secs, 0.8);
        assert_eq!(c.gesture.ring_max, 40);
        assert_eq!(c.ink.eraser_radius, 70);
        assert!(c.camera.mirror);
        assert!(c.show_landmarks);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let c = Config::parse("[gesture]\ndwell_secs = 1.5\n").unwrap();
        assert_eq!(c.gesture.dwell_secs, 1.5);
        assert_eq!(c.gesture.pen_threshold, 40);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::parse("[palette]\nslot_width = 0\n").is_err());
        assert!(Config::parse("[palette]\nalpha = 1.5\n").is_err());
        assert!(Config::parse("[gesture]\ndwell_secs = 0.0\n").is_err());
        assert!(Config::parse("[gesture]\nring_min = 50\n").is_err());
        assert!(Config::parse("[ink]\nthickness = 0\n").is_err());
        assert!(Config::parse("bogus = 1\n").is_err());
    }

    #[test]
    fn rejects_sizes_that_would_overflow_later() {
        assert!(Config::parse("[gesture]\ndwell_secs = 1e30\n").is_err());
        assert!(Config::parse("[gesture]\ndwell_secs = nan\n").is_err());
        assert!(Config::parse("[gesture]\ndwell_secs = inf\n").is_err());
        assert!(Config::parse("[ink]\neraser_radius = 50000\n").is_err());
        assert!(Config::parse("[ink]\neraser_radius = -1\n").is_err());
        assert!(Config::parse("[ink]\nthickness = 100000\n").is_err());
        assert!(Config::parse("[palette]\nslot_width = 2000000000\n").is_err());
        assert!(Config::parse("[palette]\nmargin_left = 2147483000\n").is_err());
        assert!(Config::parse("[palette]\nmargin_left = -10\n").is_err());
        assert!(Config::parse("[camera]\nwidth = 100000\n").is_err());
        assert!(Config::parse("[gesture]\nring_max = 100000\n").is_err());
    }

    #[test]
    fn eraser_radius_is_bounded_by_the_frame_diagonal() {
        // 640x480 has an 800px diagonal.
        assert_eq!(Config::parse("[ink]\neraser_radius = 800\n").unwrap().ink.eraser_radius, 800);
        assert!(Config::parse("[ink]\neraser_radius = 801\n").is_err());
        assert!(Config::parse("[gesture]\ndwell_secs = 60.0\n").is_ok());
    }
}
