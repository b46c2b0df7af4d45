//! Host-facing parameter set.
//!
//! Each parameter has a stable id, a [`ParameterKind`] describing its range
//! and default, and a plain value held in [`FilterParameters`]. Hosts that
//! work in normalised `[0, 1]` units go through the descriptor's mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::design::{DesignMethod, FilterSpec, FilterType, WindowType};
use crate::error::{FirError, Result};

/// Stable parameter identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterId {
    Function,
    Order,
    Frequency,
    WindowType,
    StopBandWeight,
    TransitionWidth,
    Amplitude,
    Spline,
    FilterType,
    UpperFrequency,
    Bypass,
}

impl ParameterId {
    pub const ALL: [ParameterId; 11] = [
        ParameterId::Function,
        ParameterId::Order,
        ParameterId::Frequency,
        ParameterId::WindowType,
        ParameterId::StopBandWeight,
        ParameterId::TransitionWidth,
        ParameterId::Amplitude,
        ParameterId::Spline,
        ParameterId::FilterType,
        ParameterId::UpperFrequency,
        ParameterId::Bypass,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParameterId::Function => "Function",
            ParameterId::Order => "Order",
            ParameterId::Frequency => "Frequency",
            ParameterId::WindowType => "WindowType",
            ParameterId::StopBandWeight => "StopBandWeight",
            ParameterId::TransitionWidth => "TransitionWidth",
            ParameterId::Amplitude => "Amplitude",
            ParameterId::Spline => "Spline",
            ParameterId::FilterType => "FilterType",
            ParameterId::UpperFrequency => "UpperFrequency",
            ParameterId::Bypass => "Bypass",
        }
    }

    pub fn descriptor(self) -> &'static ParameterDescriptor {
        // PARAMETERS is declared in ALL order
        &PARAMETERS[self as usize]
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterId {
    type Err = FirError;

    fn from_str(s: &str) -> Result<Self> {
        ParameterId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FirError::Parameter(format!("unknown parameter id: {}", s)))
    }
}

/// Range, default and value mapping of one parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterKind {
    Bool {
        default: bool,
    },
    Choice {
        choices: &'static [&'static str],
        default: usize,
    },
    Int {
        min: i64,
        max: i64,
        default: i64,
    },
    /// `skew` below 1 gives the low end of the range more resolution.
    Float {
        min: f64,
        max: f64,
        default: f64,
        skew: f64,
    },
}

impl ParameterKind {
    pub fn default_value(&self) -> f64 {
        match *self {
            ParameterKind::Bool { default } => f64::from(u8::from(default)),
            ParameterKind::Choice { default, .. } => default as f64,
            ParameterKind::Int { default, .. } => default as f64,
            ParameterKind::Float { default, .. } => default,
        }
    }

    /// Plain value range as `(min, max)`
    pub fn range(&self) -> (f64, f64) {
        match *self {
            ParameterKind::Bool { .. } => (0.0, 1.0),
            ParameterKind::Choice { choices, .. } => (0.0, choices.len().saturating_sub(1) as f64),
            ParameterKind::Int { min, max, .. } => (min as f64, max as f64),
            ParameterKind::Float { min, max, .. } => (min, max),
        }
    }

    /// Snap a plain value into range, rounding discrete kinds
    pub fn clamp(&self, plain: f64) -> f64 {
        let (min, max) = self.range();
        let value = plain.clamp(min, max);
        match self {
            ParameterKind::Float { .. } => value,
            _ => value.round(),
        }
    }

    /// Plain value to `[0, 1]`
    pub fn to_normalized(&self, plain: f64) -> f64 {
        let (min, max) = self.range();
        if max <= min {
            return 0.0;
        }
        let proportion = (self.clamp(plain) - min) / (max - min);
        match *self {
            ParameterKind::Float { skew, .. } if skew != 1.0 => proportion.powf(skew),
            _ => proportion,
        }
    }

    /// `[0, 1]` to plain value
    pub fn from_normalized(&self, normalized: f64) -> f64 {
        let (min, max) = self.range();
        let mut proportion = normalized.clamp(0.0, 1.0);
        if let ParameterKind::Float { skew, .. } = *self {
            if skew != 1.0 && proportion > 0.0 {
                proportion = (proportion.ln() / skew).exp();
            }
        }
        self.clamp(min + (max - min) * proportion)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDescriptor {
    pub id: ParameterId,
    pub name: &'static str,
    pub kind: ParameterKind,
}

pub const METHOD_CHOICES: [&str; 6] = [
    "WindowMethod",
    "KaiserMethod",
    "TransitionMethod",
    "LeastSquaresMethod",
    "HalfBandEquirippleMethod",
    "Custom",
];

pub const WINDOW_CHOICES: [&str; 8] = [
    "rectangular",
    "triangular",
    "hann",
    "hamming",
    "blackman",
    "blackmanHarris",
    "flatTop",
    "kaiser",
];

/// Window shapes offered to hosts, in `WINDOW_CHOICES` order
const WINDOW_CHOICE_TYPES: [WindowType; 8] = [
    WindowType::Rectangular,
    WindowType::Triangular,
    WindowType::Hann,
    WindowType::Hamming,
    WindowType::Blackman,
    WindowType::BlackmanHarris,
    WindowType::FlatTop,
    WindowType::Kaiser,
];

pub const FILTER_TYPE_CHOICES: [&str; 4] = ["LowPass", "HighPass", "BandPass", "BandStop"];

const FILTER_TYPES: [FilterType; 4] = [
    FilterType::LowPass,
    FilterType::HighPass,
    FilterType::BandPass,
    FilterType::BandStop,
];

/// Every parameter, in [`ParameterId::ALL`] order
pub static PARAMETERS: [ParameterDescriptor; 11] = [
    ParameterDescriptor {
        id: ParameterId::Function,
        name: "Design Method",
        kind: ParameterKind::Choice {
            choices: &METHOD_CHOICES,
            default: 0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::Order,
        name: "Order",
        kind: ParameterKind::Int {
            min: 1,
            max: 5000,
            default: 21,
        },
    },
    ParameterDescriptor {
        id: ParameterId::Frequency,
        name: "Frequency",
        kind: ParameterKind::Float {
            min: 20.0,
            max: 96000.0,
            default: 1000.0,
            skew: 1.5,
        },
    },
    ParameterDescriptor {
        id: ParameterId::WindowType,
        name: "Window",
        kind: ParameterKind::Choice {
            choices: &WINDOW_CHOICES,
            default: 3,
        },
    },
    ParameterDescriptor {
        id: ParameterId::StopBandWeight,
        name: "Stop Band Weight",
        kind: ParameterKind::Float {
            min: 1.0,
            max: 100.0,
            default: 1.0,
            skew: 1.0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::TransitionWidth,
        name: "Transition Width",
        kind: ParameterKind::Float {
            min: 0.0001,
            max: 0.5,
            default: 0.5,
            skew: 1.0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::Amplitude,
        name: "Stop Band Level",
        kind: ParameterKind::Float {
            min: -100.0,
            max: 0.0,
            default: -100.0,
            skew: 1.0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::Spline,
        name: "Spline",
        kind: ParameterKind::Float {
            min: 1.0,
            max: 4.0,
            default: 1.0,
            skew: 1.0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::FilterType,
        name: "Filter Type",
        kind: ParameterKind::Choice {
            choices: &FILTER_TYPE_CHOICES,
            default: 0,
        },
    },
    ParameterDescriptor {
        id: ParameterId::UpperFrequency,
        name: "Upper Frequency",
        kind: ParameterKind::Float {
            min: 20.0,
            max: 96000.0,
            default: 2000.0,
            skew: 1.5,
        },
    },
    ParameterDescriptor {
        id: ParameterId::Bypass,
        name: "Bypass",
        kind: ParameterKind::Bool { default: false },
    },
];

/// Design method selector without its controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MethodKind {
    Window,
    Kaiser,
    Transition,
    LeastSquares,
    HalfBandEquiripple,
    Custom,
}

impl MethodKind {
    const ALL: [MethodKind; 6] = [
        MethodKind::Window,
        MethodKind::Kaiser,
        MethodKind::Transition,
        MethodKind::LeastSquares,
        MethodKind::HalfBandEquiripple,
        MethodKind::Custom,
    ];
}

/// Plain values of every parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    pub method: MethodKind,
    pub filter_type: FilterType,
    pub order: usize,
    /// Lower (or only) cutoff in Hz.
    pub frequency: f64,
    /// Upper cutoff in Hz for band types.
    pub upper_frequency: f64,
    pub window_type: WindowType,
    pub stop_band_weight: f64,
    /// Normalised to the sample rate.
    pub transition_width: f64,
    /// Stopband level in dB (negative).
    pub amplitude: f64,
    pub spline: f64,
    pub bypass: bool,
}

impl Default for FilterParameters {
    fn default() -> Self {
        let mut params = Self {
            method: MethodKind::Window,
            filter_type: FilterType::LowPass,
            order: 0,
            frequency: 0.0,
            upper_frequency: 0.0,
            window_type: WindowType::Hamming,
            stop_band_weight: 0.0,
            transition_width: 0.0,
            amplitude: 0.0,
            spline: 0.0,
            bypass: false,
        };
        for descriptor in &PARAMETERS {
            params.apply(descriptor.id, descriptor.kind.default_value());
        }
        params
    }
}

impl FilterParameters {
    /// Set a parameter from a plain value, clamped into its declared range
    pub fn set(&mut self, id: ParameterId, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(FirError::Parameter(format!("{} must be finite, got {}", id, value)));
        }
        self.apply(id, id.descriptor().kind.clamp(value));
        Ok(())
    }

    /// Set a parameter from a host-normalised `[0, 1]` value
    pub fn set_normalized(&mut self, id: ParameterId, normalized: f64) -> Result<()> {
        if !normalized.is_finite() {
            return Err(FirError::Parameter(format!(
                "{} normalised value must be finite, got {}",
                id, normalized
            )));
        }
        self.apply(id, id.descriptor().kind.from_normalized(normalized));
        Ok(())
    }

    /// Current plain value
    ///
    /// `None` for a window shape that is not among the host choices (only
    /// reachable through a config file).
    pub fn get(&self, id: ParameterId) -> Option<f64> {
        let value = match id {
            ParameterId::Function => index_of(&MethodKind::ALL, self.method)? as f64,
            ParameterId::Order => self.order as f64,
            ParameterId::Frequency => self.frequency,
            ParameterId::WindowType => index_of(&WINDOW_CHOICE_TYPES, self.window_type)? as f64,
            ParameterId::StopBandWeight => self.stop_band_weight,
            ParameterId::TransitionWidth => self.transition_width,
            ParameterId::Amplitude => self.amplitude,
            ParameterId::Spline => self.spline,
            ParameterId::FilterType => index_of(&FILTER_TYPES, self.filter_type)? as f64,
            ParameterId::UpperFrequency => self.upper_frequency,
            ParameterId::Bypass => f64::from(u8::from(self.bypass)),
        };
        Some(value)
    }

    /// Current value in the host's `[0, 1]` range
    pub fn get_normalized(&self, id: ParameterId) -> Option<f64> {
        self.get(id).map(|v| id.descriptor().kind.to_normalized(v))
    }

    /// Store an already-clamped value
    fn apply(&mut self, id: ParameterId, value: f64) {
        let index = value as usize;
        match id {
            ParameterId::Function => self.method = MethodKind::ALL[index],
            ParameterId::Order => self.order = index,
            ParameterId::Frequency => self.frequency = value,
            ParameterId::WindowType => self.window_type = WINDOW_CHOICE_TYPES[index],
            ParameterId::StopBandWeight => self.stop_band_weight = value,
            ParameterId::TransitionWidth => self.transition_width = value,
            ParameterId::Amplitude => self.amplitude = value,
            ParameterId::Spline => self.spline = value,
            ParameterId::FilterType => self.filter_type = FILTER_TYPES[index],
            ParameterId::UpperFrequency => self.upper_frequency = value,
            ParameterId::Bypass => self.bypass = value >= 0.5,
        }
    }

    /// Design method with the controls it reads
    pub fn design_method(&self) -> DesignMethod {
        let transition_width = self.transition_width;
        match self.method {
            MethodKind::Window => DesignMethod::Window,
            MethodKind::Kaiser => DesignMethod::Kaiser { transition_width },
            MethodKind::Transition => DesignMethod::Transition {
                transition_width,
                spline: self.spline,
            },
            MethodKind::LeastSquares => DesignMethod::LeastSquares {
                transition_width,
                stopband_weight: self.stop_band_weight,
            },
            MethodKind::HalfBandEquiripple => DesignMethod::HalfBandEquiripple { transition_width },
            MethodKind::Custom => DesignMethod::Custom,
        }
    }

    /// Snapshot the parameters as a design request at `sample_rate`
    pub fn to_spec(&self, sample_rate: f64) -> FilterSpec {
        FilterSpec {
            method: self.design_method(),
            filter_type: self.filter_type,
            window_type: self.window_type,
            order: self.order,
            sample_rate,
            cutoff_low: self.frequency,
            cutoff_high: self.upper_frequency,
            stopband_attenuation_db: self.amplitude,
        }
    }
}

fn index_of<T: PartialEq>(items: &[T], item: T) -> Option<usize> {
    items.iter().position(|x| *x == item)
}
