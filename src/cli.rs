//! Filter flags shared by the command-line tools.

use clap::Args;

use crate::design::{FilterType, WindowType};
use crate::error::Result;
use crate::params::{FilterParameters, MethodKind, ParameterId};

/// Overrides applied on top of defaults or a config file
///
/// Values go through the same range clamping as host parameter changes.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Design method
    #[arg(short = 'm', long, value_enum)]
    pub method: Option<MethodKind>,

    /// Response type
    #[arg(short = 't', long = "type", value_enum)]
    pub filter_type: Option<FilterType>,

    /// Number of taps for methods that take an explicit length
    #[arg(short = 'n', long)]
    pub order: Option<usize>,

    /// Cutoff (lower band edge for band types) in Hz
    #[arg(short = 'f', long)]
    pub frequency: Option<f64>,

    /// Upper band edge in Hz for band-pass / band-stop
    #[arg(long)]
    pub upper_frequency: Option<f64>,

    /// Window shape for the window method
    #[arg(short = 'w', long, value_enum)]
    pub window: Option<WindowType>,

    /// Stop-band weight for the least-squares method
    #[arg(long)]
    pub stop_band_weight: Option<f64>,

    /// Transition width as a fraction of the sample rate
    #[arg(long)]
    pub transition_width: Option<f64>,

    /// Stop-band level in dB (e.g. -80)
    #[arg(short = 'a', long, allow_hyphen_values = true)]
    pub amplitude: Option<f64>,

    /// Spline order for the transition method
    #[arg(long)]
    pub spline: Option<f64>,

    /// Replace the filter with a pass-through
    #[arg(long)]
    pub bypass: bool,
}

impl FilterArgs {
    pub fn apply(&self, params: &mut FilterParameters) -> Result<()> {
        if let Some(method) = self.method {
            params.method = method;
        }
        if let Some(filter_type) = self.filter_type {
            params.filter_type = filter_type;
        }
        if let Some(window) = self.window {
            params.window_type = window;
        }

        let numeric = [
            (ParameterId::Order, self.order.map(|n| n as f64)),
            (ParameterId::Frequency, self.frequency),
            (ParameterId::UpperFrequency, self.upper_frequency),
            (ParameterId::StopBandWeight, self.stop_band_weight),
            (ParameterId::TransitionWidth, self.transition_width),
            (ParameterId::Amplitude, self.amplitude),
            (ParameterId::Spline, self.spline),
        ];
        for (id, value) in numeric {
            if let Some(value) = value {
                params.set(id, value)?;
            }
        }

        if self.bypass {
            params.bypass = true;
        }
        Ok(())
    }
}
