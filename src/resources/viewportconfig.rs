//! Viewport configuration resource.
//!
//! Manages tunables loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [camera]
//! min_scale = 0.6
//! max_scale = 1.8
//! zoom_in_factor = 1.12
//! zoom_out_factor = 0.88
//! pan_time_constant = 0.2
//! zoom_time_constant = 0.27
//!
//! [drift]
//! margin = 120
//! max_speed = 9
//! follow_time_constant = 0.83
//! smoothing = true
//! desired_width = 100
//! seed = 24301
//!
//! [focus]
//! dim_opacity = 0.15
//! overview_scale = 0.7
//! overview_offset = 0.15
//! layout = grid
//! min_distance = 130
//!
//! [input]
//! click_slop = 4
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::layout::LayoutKind;
use crate::resources::camera::CameraSettings;

/// Default safe values for startup
const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
const DEFAULT_MIN_SCALE: f32 = 0.6;
const DEFAULT_MAX_SCALE: f32 = 1.8;
const DEFAULT_ZOOM_IN_FACTOR: f32 = 1.12;
const DEFAULT_ZOOM_OUT_FACTOR: f32 = 0.88;
// 0.08 and 0.06 per frame at 60 Hz
const DEFAULT_PAN_TIME_CONSTANT: f32 = 0.2;
const DEFAULT_ZOOM_TIME_CONSTANT: f32 = 0.27;
const DEFAULT_POSITION_EPSILON: f32 = 0.01;
const DEFAULT_SCALE_EPSILON: f32 = 0.0001;
const DEFAULT_MARGIN: f32 = 120.0;
const DEFAULT_MAX_SPEED: f32 = 9.0;
// 0.02 per frame at 60 Hz
const DEFAULT_FOLLOW_TIME_CONSTANT: f32 = 0.83;
const DEFAULT_SMOOTHING: bool = true;
const DEFAULT_DESIRED_WIDTH: f32 = 100.0;
const DEFAULT_SEED: u64 = 0x5EED;
const DEFAULT_DIM_OPACITY: f32 = 0.15;
const DEFAULT_FADE_DURATION: f32 = 0.4;
const DEFAULT_OVERVIEW_SCALE: f32 = 0.7;
const DEFAULT_OVERVIEW_OFFSET: f32 = 0.15;
const DEFAULT_ZOOM_OUT_DURATION: f32 = 0.8;
const DEFAULT_REGROUP_DURATION: f32 = 0.9;
const DEFAULT_ZOOM_IN_DURATION: f32 = 0.8;
const DEFAULT_MIN_DISTANCE: f32 = 130.0;
const DEFAULT_SAFE_LEFT: f32 = 0.06;
const DEFAULT_SAFE_TOP: f32 = 0.1;
const DEFAULT_SAFE_RIGHT: f32 = 0.55;
const DEFAULT_SAFE_BOTTOM: f32 = 0.9;
const DEFAULT_FOCUS_Z: i32 = 100;
const DEFAULT_CLICK_SLOP: f32 = 4.0;
const DEFAULT_CONFIG_PATH: &str = "./driftfocus.ini";

/// Viewport configuration resource.
///
/// Durations are in seconds, distances in world units (equal to screen
/// pixels at camera scale 1). `safe_*` are fractions of the viewport size
/// bounding the focused layout.
#[derive(Resource, Debug, Clone)]
pub struct ViewportConfig {
    pub viewport_width: f32,
    pub viewport_height: f32,

    pub min_scale: f32,
    pub max_scale: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub pan_time_constant: f32,
    pub zoom_time_constant: f32,
    pub position_epsilon: f32,
    pub scale_epsilon: f32,

    /// Inset of the drift bounce rectangle from the viewport edges.
    pub margin: f32,
    /// Largest drift velocity component, units per second.
    pub max_speed: f32,
    pub follow_time_constant: f32,
    /// Let the visible position trail the drift target.
    pub smoothing: bool,
    /// On-screen width of an item at camera scale 1.
    pub desired_width: f32,
    pub seed: u64,

    pub dim_opacity: f32,
    pub fade_duration: f32,
    pub overview_scale: f32,
    /// Camera offset of the overview as a fraction of the viewport size.
    pub overview_offset: f32,
    pub zoom_out_duration: f32,
    pub regroup_duration: f32,
    pub zoom_in_duration: f32,
    pub layout: LayoutKind,
    /// Minimum center distance between laid out group members.
    pub min_distance: f32,
    pub safe_left: f32,
    pub safe_top: f32,
    pub safe_right: f32,
    pub safe_bottom: f32,
    /// Z-index given to focused group members.
    pub focus_z: i32,

    /// Pointer travel in pixels under which a press and release is a click.
    pub click_slop: f32,

    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_in_factor: DEFAULT_ZOOM_IN_FACTOR,
            zoom_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            pan_time_constant: DEFAULT_PAN_TIME_CONSTANT,
            zoom_time_constant: DEFAULT_ZOOM_TIME_CONSTANT,
            position_epsilon: DEFAULT_POSITION_EPSILON,
            scale_epsilon: DEFAULT_SCALE_EPSILON,
            margin: DEFAULT_MARGIN,
            max_speed: DEFAULT_MAX_SPEED,
            follow_time_constant: DEFAULT_FOLLOW_TIME_CONSTANT,
            smoothing: DEFAULT_SMOOTHING,
            desired_width: DEFAULT_DESIRED_WIDTH,
            seed: DEFAULT_SEED,
            dim_opacity: DEFAULT_DIM_OPACITY,
            fade_duration: DEFAULT_FADE_DURATION,
            overview_scale: DEFAULT_OVERVIEW_SCALE,
            overview_offset: DEFAULT_OVERVIEW_OFFSET,
            zoom_out_duration: DEFAULT_ZOOM_OUT_DURATION,
            regroup_duration: DEFAULT_REGROUP_DURATION,
            zoom_in_duration: DEFAULT_ZOOM_IN_DURATION,
            layout: LayoutKind::Grid,
            min_distance: DEFAULT_MIN_DISTANCE,
            safe_left: DEFAULT_SAFE_LEFT,
            safe_top: DEFAULT_SAFE_TOP,
            safe_right: DEFAULT_SAFE_RIGHT,
            safe_bottom: DEFAULT_SAFE_BOTTOM,
            focus_z: DEFAULT_FOCUS_Z,
            click_slop: DEFAULT_CLICK_SLOP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Camera tunables extracted from this configuration.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            min_scale: self.min_scale,
            max_scale: self.max_scale,
            zoom_in_factor: self.zoom_in_factor,
            zoom_out_factor: self.zoom_out_factor,
            pan_time_constant: self.pan_time_constant,
            zoom_time_constant: self.zoom_time_constant,
            position_epsilon: self.position_epsilon,
            scale_epsilon: self.scale_epsilon,
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        self.sanitize();

        info!(
            "Loaded config: {}x{} viewport, scale {}..{}, layout={:?}, seed={}",
            self.viewport_width,
            self.viewport_height,
            self.min_scale,
            self.max_scale,
            self.layout,
            self.seed
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        self.sanitize();
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str, slot: &mut f32| {
            if let Some(v) = config.getfloat(section, key).ok().flatten() {
                let v = v as f32;
                if v.is_finite() {
                    *slot = v;
                } else {
                    warn!("[{}] {} = {} is not finite, keeping {}", section, key, v, slot);
                }
            }
        };

        // [viewport] section
        float("viewport", "width", &mut self.viewport_width);
        float("viewport", "height", &mut self.viewport_height);

        // [camera] section
        float("camera", "min_scale", &mut self.min_scale);
        float("camera", "max_scale", &mut self.max_scale);
        float("camera", "zoom_in_factor", &mut self.zoom_in_factor);
        float("camera", "zoom_out_factor", &mut self.zoom_out_factor);
        float("camera", "pan_time_constant", &mut self.pan_time_constant);
        float("camera", "zoom_time_constant", &mut self.zoom_time_constant);
        float("camera", "position_epsilon", &mut self.position_epsilon);
        float("camera", "scale_epsilon", &mut self.scale_epsilon);

        // [drift] section
        float("drift", "margin", &mut self.margin);
        float("drift", "max_speed", &mut self.max_speed);
        float("drift", "follow_time_constant", &mut self.follow_time_constant);
        float("drift", "desired_width", &mut self.desired_width);
        if let Some(smoothing) = config.getbool("drift", "smoothing").ok().flatten() {
            self.smoothing = smoothing;
        }
        if let Some(seed) = config.getuint("drift", "seed").ok().flatten() {
            self.seed = seed;
        }

        // [focus] section
        float("focus", "dim_opacity", &mut self.dim_opacity);
        float("focus", "fade_duration", &mut self.fade_duration);
        float("focus", "overview_scale", &mut self.overview_scale);
        float("focus", "overview_offset", &mut self.overview_offset);
        float("focus", "zoom_out_duration", &mut self.zoom_out_duration);
        float("focus", "regroup_duration", &mut self.regroup_duration);
        float("focus", "zoom_in_duration", &mut self.zoom_in_duration);
        float("focus", "min_distance", &mut self.min_distance);
        float("focus", "safe_left", &mut self.safe_left);
        float("focus", "safe_top", &mut self.safe_top);
        float("focus", "safe_right", &mut self.safe_right);
        float("focus", "safe_bottom", &mut self.safe_bottom);
        if let Some(layout) = config.get("focus", "layout") {
            match layout.parse::<LayoutKind>() {
                Ok(kind) => self.layout = kind,
                Err(e) => warn!("{}; keeping {:?}", e, self.layout),
            }
        }
        if let Some(z) = config.getint("focus", "focus_z").ok().flatten() {
            self.focus_z = z as i32;
        }

        // [input] section
        float("input", "click_slop", &mut self.click_slop);
    }

    /// Repair values that would break camera or layout invariants.
    fn sanitize(&mut self) {
        if self.max_scale < self.min_scale {
            warn!(
                "max_scale {} below min_scale {}, swapping",
                self.max_scale, self.min_scale
            );
            std::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !self.min_scale.is_finite() || self.min_scale <= 0.0 {
            warn!("min_scale must be positive, using {}", DEFAULT_MIN_SCALE);
            self.min_scale = DEFAULT_MIN_SCALE;
        }
        if !self.max_scale.is_finite() || self.max_scale < self.min_scale {
            let fallback = DEFAULT_MAX_SCALE.max(self.min_scale);
            warn!("max_scale {} out of range, using {}", self.max_scale, fallback);
            self.max_scale = fallback;
        }

        positive("zoom_in_factor", &mut self.zoom_in_factor, DEFAULT_ZOOM_IN_FACTOR);
        positive("zoom_out_factor", &mut self.zoom_out_factor, DEFAULT_ZOOM_OUT_FACTOR);
        positive("overview_scale", &mut self.overview_scale, DEFAULT_OVERVIEW_SCALE);
        positive("viewport width", &mut self.viewport_width, DEFAULT_VIEWPORT_WIDTH);
        positive("viewport height", &mut self.viewport_height, DEFAULT_VIEWPORT_HEIGHT);
        positive("desired_width", &mut self.desired_width, DEFAULT_DESIRED_WIDTH);

        non_negative("max_speed", &mut self.max_speed, DEFAULT_MAX_SPEED);
        non_negative("margin", &mut self.margin, DEFAULT_MARGIN);
        non_negative("min_distance", &mut self.min_distance, DEFAULT_MIN_DISTANCE);
        non_negative("click_slop", &mut self.click_slop, DEFAULT_CLICK_SLOP);
        non_negative("pan_time_constant", &mut self.pan_time_constant, DEFAULT_PAN_TIME_CONSTANT);
        non_negative("zoom_time_constant", &mut self.zoom_time_constant, DEFAULT_ZOOM_TIME_CONSTANT);
        non_negative(
            "follow_time_constant",
            &mut self.follow_time_constant,
            DEFAULT_FOLLOW_TIME_CONSTANT,
        );
        non_negative("position_epsilon", &mut self.position_epsilon, DEFAULT_POSITION_EPSILON);
        non_negative("scale_epsilon", &mut self.scale_epsilon, DEFAULT_SCALE_EPSILON);
        non_negative("fade_duration", &mut self.fade_duration, DEFAULT_FADE_DURATION);
        non_negative("zoom_out_duration", &mut self.zoom_out_duration, DEFAULT_ZOOM_OUT_DURATION);
        non_negative("regroup_duration", &mut self.regroup_duration, DEFAULT_REGROUP_DURATION);
        non_negative("zoom_in_duration", &mut self.zoom_in_duration, DEFAULT_ZOOM_IN_DURATION);

        self.dim_opacity = self.dim_opacity.clamp(0.0, 1.0);
        if self.safe_right <= self.safe_left || self.safe_bottom <= self.safe_top {
            warn!("empty layout safe rectangle, using defaults");
            self.safe_left = DEFAULT_SAFE_LEFT;
            self.safe_top = DEFAULT_SAFE_TOP;
            self.safe_right = DEFAULT_SAFE_RIGHT;
            self.safe_bottom = DEFAULT_SAFE_BOTTOM;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            config.set(section, key, Some(value));
        };

        // [viewport] section
        set("viewport", "width", self.viewport_width.to_string());
        set("viewport", "height", self.viewport_height.to_string());

        // [camera] section
        set("camera", "min_scale", self.min_scale.to_string());
        set("camera", "max_scale", self.max_scale.to_string());
        set("camera", "zoom_in_factor", self.zoom_in_factor.to_string());
        set("camera", "zoom_out_factor", self.zoom_out_factor.to_string());
        set("camera", "pan_time_constant", self.pan_time_constant.to_string());
        set("camera", "zoom_time_constant", self.zoom_time_constant.to_string());
        set("camera", "position_epsilon", self.position_epsilon.to_string());
        set("camera", "scale_epsilon", self.scale_epsilon.to_string());

        // [drift] section
        set("drift", "margin", self.margin.to_string());
        set("drift", "max_speed", self.max_speed.to_string());
        set("drift", "follow_time_constant", self.follow_time_constant.to_string());
        set("drift", "smoothing", self.smoothing.to_string());
        set("drift", "desired_width", self.desired_width.to_string());
        set("drift", "seed", self.seed.to_string());

        // [focus] section
        set("focus", "dim_opacity", self.dim_opacity.to_string());
        set("focus", "fade_duration", self.fade_duration.to_string());
        set("focus", "overview_scale", self.overview_scale.to_string());
        set("focus", "overview_offset", self.overview_offset.to_string());
        set("focus", "zoom_out_duration", self.zoom_out_duration.to_string());
        set("focus", "regroup_duration", self.regroup_duration.to_string());
        set("focus", "zoom_in_duration", self.zoom_in_duration.to_string());
        set("focus", "layout", self.layout.as_str().to_string());
        set("focus", "min_distance", self.min_distance.to_string());
        set("focus", "safe_left", self.safe_left.to_string());
        set("focus", "safe_top", self.safe_top.to_string());
        set("focus", "safe_right", self.safe_right.to_string());
        set("focus", "safe_bottom", self.safe_bottom.to_string());
        set("focus", "focus_z", self.focus_z.to_string());

        // [input] section
        set("input", "click_slop", self.click_slop.to_string());

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}

fn positive(name: &str, slot: &mut f32, default: f32) {
    if !slot.is_finite() || *slot <= 0.0 {
        warn!("{} must be positive, using {}", name, default);
        *slot = default;
    }
}

fn non_negative(name: &str, slot: &mut f32, default: f32) {
    if !slot.is_finite() || *slot < 0.0 {
        warn!("{} must not be negative, using {}", name, default);
        *slot = default;
    }
}
