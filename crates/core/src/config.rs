//! Wave stack configuration: the immutable value a stack is built from.
//!
//! Configurations deserialize from camelCase JSON where every field is
//! optional and falls back to the defaults below. Validation is explicit and
//! runs once when a stack is (re)configured, never per frame.

use crate::error::WaveError;
use crate::shape::WaveMotion;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DEFAULT_SPEED: f64 = 2.0;
const DEFAULT_HEIGHT_RANGE: (f64, f64) = (2.0, 8.0);
const DEFAULT_AMPLITUDE: f64 = 1.0;
const DEFAULT_COMPLEXITY: f64 = 2.0;
const DEFAULT_SYNCHRONICITY: f64 = 3.0;
const DEFAULT_POINTS: usize = 20;
const DEFAULT_BANDS: usize = 2;
const DEFAULT_BACKGROUND: &str = "white";

/// Upper bound of the user-facing height scale.
const MAX_HEIGHT: f64 = 10.0;

/// Direction a linear gradient runs towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GradientDirection {
    ToTop,
    ToRight,
    ToBottom,
    ToLeft,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub color: String,
    /// Position along the gradient in [0, 1].
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub direction: GradientDirection,
    pub stops: Vec<GradientStop>,
}

/// Backdrop drawn behind every band.
///
/// Reads either `{"gradient": ..}` or `{"fillColor": ..}`. Any other key, or
/// both at once, is rejected rather than read as a transparent fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Background {
    Gradient {
        gradient: LinearGradient,
    },
    #[serde(rename_all = "camelCase")]
    Fill {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill_color: Option<String>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawBackground {
    #[serde(default)]
    gradient: Option<LinearGradient>,
    #[serde(default)]
    fill_color: Option<String>,
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBackground::deserialize(deserializer)?;
        match (raw.gradient, raw.fill_color) {
            (Some(_), Some(_)) => Err(D::Error::custom(
                "background takes either `gradient` or `fillColor`, not both",
            )),
            (Some(gradient), None) => Ok(Background::Gradient { gradient }),
            (None, fill_color) => Ok(Background::Fill { fill_color }),
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Fill {
            fill_color: Some(DEFAULT_BACKGROUND.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    Butt,
    Round,
    Square,
}

/// Presentation of one band. Geometry never depends on these fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BandStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dash_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_dash_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_cap: Option<StrokeCap>,
    /// Takes precedence over `fill_color` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<LinearGradient>,
    /// Ids of externally defined filters applied to the band, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
}

/// Full description of a wave stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveStackConfig {
    pub background: Background,
    /// `(low, high)` baseline heights on the 0..10 scale.
    pub height_range: (f64, f64),
    pub speed: f64,
    pub amplitude: f64,
    pub complexity: f64,
    /// Phase offset between consecutive bands.
    pub synchronicity: f64,
    /// Visible sample points per band, padding excluded.
    pub points: usize,
    pub bands: Vec<BandStyle>,
}

impl Default for WaveStackConfig {
    fn default() -> Self {
        Self {
            background: Background::default(),
            height_range: DEFAULT_HEIGHT_RANGE,
            speed: DEFAULT_SPEED,
            amplitude: DEFAULT_AMPLITUDE,
            complexity: DEFAULT_COMPLEXITY,
            synchronicity: DEFAULT_SYNCHRONICITY,
            points: DEFAULT_POINTS,
            bands: vec![BandStyle::default(); DEFAULT_BANDS],
        }
    }
}

impl WaveStackConfig {
    /// Parses and validates a configuration from a JSON value.
    ///
    /// Missing keys take their defaults.
    pub fn from_json(value: &Value) -> Result<Self, WaveError> {
        let config: Self =
            Self::deserialize(value).map_err(|e| WaveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, WaveError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WaveError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Motion parameters for the per-frame update.
    pub fn motion(&self) -> WaveMotion {
        WaveMotion {
            amplitude: self.amplitude,
            complexity: self.complexity,
        }
    }

    /// Checks every structural and numeric precondition of the kernel.
    pub fn validate(&self) -> Result<(), WaveError> {
        if self.bands.is_empty() {
            return Err(WaveError::GeometryConfiguration(
                "at least one band is required".into(),
            ));
        }
        if self.points == 0 {
            return Err(WaveError::GeometryConfiguration(
                "points must be at least 1".into(),
            ));
        }

        let (low, high) = self.height_range;
        for (name, value) in [("heightRange.low", low), ("heightRange.high", high)] {
            if !(0.0..=MAX_HEIGHT).contains(&value) {
                return Err(WaveError::out_of_range(name, value, "within [0, 10]"));
            }
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(WaveError::out_of_range("speed", self.speed, "> 0"));
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(WaveError::out_of_range("amplitude", self.amplitude, ">= 0"));
        }
        if !(self.complexity.is_finite() && self.complexity >= 0.0) {
            return Err(WaveError::out_of_range("complexity", self.complexity, ">= 0"));
        }
        if !self.synchronicity.is_finite() {
            return Err(WaveError::out_of_range(
                "synchronicity",
                self.synchronicity,
                "a finite number",
            ));
        }

        if let Background::Gradient { gradient } = &self.background {
            validate_gradient("background", gradient)?;
        }
        for (i, band) in self.bands.iter().enumerate() {
            if let Some(gradient) = &band.gradient {
                validate_gradient(&format!("bands[{i}]"), gradient)?;
            }
            if let Some(width) = band.stroke_width {
                if !(width.is_finite() && width >= 0.0) {
                    return Err(WaveError::out_of_range(
                        &format!("bands[{i}].strokeWidth"),
                        width,
                        ">= 0",
                    ));
                }
            }
        }
        Ok(())
    }
}

fn validate_gradient(owner: &str, gradient: &LinearGradient) -> Result<(), WaveError> {
    if gradient.stops.is_empty() {
        return Err(WaveError::InvalidGradient(format!("{owner}: no stops")));
    }
    if let Some(stop) = gradient
        .stops
        .iter()
        .find(|s| !(0.0..=1.0).contains(&s.offset))
    {
        return Err(WaveError::InvalidGradient(format!(
            "{owner}: stop offset {} outside [0, 1]",
            stop.offset
        )));
    }
    Ok(())
}

/// Which top-level configuration fields changed between two configs.
///
/// Supplied by the caller alongside a new config so the stack can decide
/// which cached geometry to drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    pub background: bool,
    pub height_range: bool,
    pub speed: bool,
    pub amplitude: bool,
    pub complexity: bool,
    pub synchronicity: bool,
    pub points: bool,
    pub bands: bool,
}

impl ConfigChanges {
    /// Every field marked as changed.
    pub fn all() -> Self {
        Self {
            background: true,
            height_range: true,
            speed: true,
            amplitude: true,
            complexity: true,
            synchronicity: true,
            points: true,
            bands: true,
        }
    }

    /// Field-by-field comparison of two configurations.
    pub fn between(old: &WaveStackConfig, new: &WaveStackConfig) -> Self {
        Self {
            background: old.background != new.background,
            height_range: old.height_range != new.height_range,
            speed: old.speed != new.speed,
            amplitude: old.amplitude != new.amplitude,
            complexity: old.complexity != new.complexity,
            synchronicity: old.synchronicity != new.synchronicity,
            points: old.points != new.points,
            bands: old.bands != new.bands,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether band baselines or noise coordinates must be rebuilt,
    /// regardless of band count.
    pub fn touches_geometry(&self) -> bool {
        self.height_range || self.synchronicity || self.points
    }
}
