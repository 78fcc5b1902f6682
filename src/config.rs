use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::roi::RegionOfInterest;

pub const DEFAULT_FIST_PROFILE: &str = "/usr/local/share/opencv/haarcascades/fist.xml";
pub const DEFAULT_PALM_PROFILE: &str = "/usr/local/share/opencv/haarcascades/palm.xml";
const DEFAULT_DISPLAY: bool = true;

#[derive(Debug, Deserialize, Default)]
struct FilterConfigFile {
    display: Option<bool>,
    fist_profile: Option<PathBuf>,
    palm_profile: Option<PathBuf>,
    roi: Option<RoiConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct RoiConfigFile {
    x: Option<u32>,
    y: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub display: bool,
    pub fist_profile: PathBuf,
    pub palm_profile: PathBuf,
    /// ROI geometry is never validated. Any four values are accepted; an
    /// unsatisfiable region silently gates everything out.
    pub roi: RegionOfInterest,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            display: DEFAULT_DISPLAY,
            fist_profile: PathBuf::from(DEFAULT_FIST_PROFILE),
            palm_profile: PathBuf::from(DEFAULT_PALM_PROFILE),
            roi: RegionOfInterest::UNRESTRICTED,
        }
    }
}

impl FilterConfig {
    /// Defaults, overlaid by the JSON file named in `HANDTRACK_CONFIG` (if
    /// set), overlaid by the individual `HANDTRACK_*` variables.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("HANDTRACK_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        Ok(cfg)
    }

    fn from_file(file: FilterConfigFile) -> Self {
        let display = file.display.unwrap_or(DEFAULT_DISPLAY);
        let fist_profile = file
            .fist_profile
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIST_PROFILE));
        let palm_profile = file
            .palm_profile
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PALM_PROFILE));
        let roi = file
            .roi
            .map(|roi| {
                RegionOfInterest::new(
                    roi.x.unwrap_or(0),
                    roi.y.unwrap_or(0),
                    roi.width.unwrap_or(0),
                    roi.height.unwrap_or(0),
                )
            })
            .unwrap_or(RegionOfInterest::UNRESTRICTED);
        Self {
            display,
            fist_profile,
            palm_profile,
            roi,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(display) = std::env::var("HANDTRACK_DISPLAY") {
            if !display.trim().is_empty() {
                self.display = parse_bool("HANDTRACK_DISPLAY", &display)?;
            }
        }
        if let Ok(path) = std::env::var("HANDTRACK_PROFILE") {
            if !path.trim().is_empty() {
                self.fist_profile = PathBuf::from(path);
            }
        }
        if let Ok(path) = std::env::var("HANDTRACK_PROFILE_PALM") {
            if !path.trim().is_empty() {
                self.palm_profile = PathBuf::from(path);
            }
        }
        if let Ok(roi) = std::env::var("HANDTRACK_ROI") {
            if !roi.trim().is_empty() {
                self.roi = parse_roi_csv(&roi)?;
            }
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<FilterConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("{} must be a boolean, got {:?}", name, other)),
    }
}

fn parse_roi_csv(value: &str) -> Result<RegionOfInterest> {
    value
        .parse()
        .map_err(|err| anyhow!("HANDTRACK_ROI: {}", err))
}
