//! Host-facing shell around the designer and the convolution engine.
//!
//! [`FilterController`] runs at control rate: it owns the parameters,
//! re-designs on every change and offers the result through the shared
//! [`HandoffSlot`]. [`FilterEngine`] runs at audio rate and adopts whatever
//! the slot holds at the start of each block. [`FirPlugin`] bundles both for
//! single-threaded hosts and can be split for two-thread hosts.

use std::sync::Arc;

use crate::config::PluginConfig;
use crate::design::{self, DesignedFilter, FilterSpec};
use crate::engine::{FilterEngine, HandoffSlot};
use crate::error::{FirError, Result};
use crate::params::{FilterParameters, PARAMETERS, ParameterDescriptor, ParameterId};

/// Control-rate half: parameters in, designed filters out
pub struct FilterController {
    slot: Arc<HandoffSlot>,
    parameters: FilterParameters,
    sample_rate: Option<f64>,
    /// Designed but not yet accepted by a contended slot.
    undelivered: Option<DesignedFilter>,
    last_valid: Option<FilterSpec>,
}

impl FilterController {
    pub fn new(slot: Arc<HandoffSlot>, parameters: FilterParameters) -> Self {
        Self {
            slot,
            parameters,
            sample_rate: None,
            undelivered: None,
            last_valid: None,
        }
    }

    /// Record the session sample rate and design the first filter
    ///
    /// A design the current parameters cannot produce is logged and leaves
    /// the previous filter active; only an unusable sample rate is an error.
    pub fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(FirError::Config(format!(
                "sample rate must be positive, got {}",
                sample_rate
            )));
        }
        self.sample_rate = Some(sample_rate);
        if let Err(e) = self.update_filter() {
            log::debug!("Prepared at {} Hz without a new filter: {}", sample_rate, e);
        }
        Ok(())
    }

    /// Change one parameter (plain units) and re-design
    ///
    /// The value is stored even when the resulting design is rejected, so a
    /// follow-up change to another parameter can make it valid again.
    pub fn set_parameter(&mut self, id: ParameterId, value: f64) -> Result<()> {
        self.parameters.set(id, value)?;
        self.update_filter()
    }

    /// Change one parameter from a host-normalised `[0, 1]` value
    pub fn set_parameter_normalized(&mut self, id: ParameterId, normalized: f64) -> Result<()> {
        self.parameters.set_normalized(id, normalized)?;
        self.update_filter()
    }

    /// Replace every parameter at once and re-design
    pub fn set_parameters(&mut self, parameters: FilterParameters) -> Result<()> {
        self.parameters = parameters;
        self.update_filter()
    }

    /// Design from the current parameters and offer the result
    ///
    /// On a rejected spec the error is logged and returned, and whatever the
    /// engine is running stays in effect. Before `prepare` there is no sample
    /// rate to design at, so this does nothing.
    pub fn update_filter(&mut self) -> Result<()> {
        let Some(sample_rate) = self.sample_rate else {
            return Ok(());
        };

        let filter = if self.parameters.bypass {
            DesignedFilter::passthrough()
        } else {
            let spec = self.parameters.to_spec(sample_rate);
            match design::design(&spec) {
                Ok(coefficients) => {
                    log::debug!(
                        "Designed {:?} {:?}: {} taps, group delay {} samples",
                        spec.method,
                        spec.filter_type,
                        coefficients.len(),
                        coefficients.group_delay_samples()
                    );
                    self.last_valid = Some(spec);
                    DesignedFilter::new(coefficients, spec)
                }
                Err(e) => {
                    log::warn!("Rejected filter update, keeping previous filter: {}", e);
                    return Err(e);
                }
            }
        };

        // A newer design supersedes anything still waiting
        self.undelivered = None;
        self.offer(filter);
        Ok(())
    }

    /// Re-offer a design that met a busy slot
    ///
    /// Returns `true` when nothing is left undelivered. Also frees the filter
    /// the audio context last swapped out.
    pub fn retry_pending(&mut self) -> bool {
        self.collect_retired();
        if let Some(filter) = self.undelivered.take() {
            self.offer(filter);
        }
        self.undelivered.is_none()
    }

    /// Drop the filter the audio context parked after its last adoption
    pub fn collect_retired(&mut self) -> bool {
        self.slot.collect_retired().is_some()
    }

    fn offer(&mut self, filter: DesignedFilter) {
        if let Err(filter) = self.slot.try_swap(filter) {
            log::debug!("Hand-off slot busy, deferring {}-tap update", filter.coefficients.len());
            self.undelivered = Some(filter);
        }
    }

    pub fn parameters(&self) -> &FilterParameters {
        &self.parameters
    }

    pub fn sample_rate(&self) -> Option<f64> {
        self.sample_rate
    }

    /// Spec of the most recent design that passed validation
    pub fn last_valid_spec(&self) -> Option<&FilterSpec> {
        self.last_valid.as_ref()
    }

    pub fn has_undelivered(&self) -> bool {
        self.undelivered.is_some()
    }

    pub fn slot(&self) -> &Arc<HandoffSlot> {
        &self.slot
    }
}

/// Single-owner FIR processor
///
/// # Example
/// ```
/// use firshell::params::ParameterId;
/// use firshell::plugin::FirPlugin;
///
/// let mut plugin = FirPlugin::new();
/// plugin.prepare(48000.0, 64, 1).unwrap();
/// plugin.set_parameter(ParameterId::Order, 31.0).unwrap();
///
/// let mut block = [0.0f32; 64];
/// block[0] = 1.0;
/// plugin.process(&mut [&mut block[..]]);
/// assert_eq!(plugin.latency_samples(), 15);
/// ```
pub struct FirPlugin {
    controller: FilterController,
    engine: FilterEngine,
}

impl FirPlugin {
    pub fn new() -> Self {
        Self::with_parameters(FilterParameters::default())
    }

    pub fn with_parameters(parameters: FilterParameters) -> Self {
        let slot = Arc::new(HandoffSlot::new());
        Self {
            controller: FilterController::new(slot.clone(), parameters),
            engine: FilterEngine::new(slot),
        }
    }

    /// Build and prepare a plugin from a loaded config
    pub fn from_config(config: &PluginConfig) -> Result<Self> {
        let mut plugin = Self::with_parameters(config.filter);
        plugin.prepare(
            f64::from(config.audio.sample_rate),
            config.audio.max_block_size,
            usize::from(config.audio.channels),
        )?;
        Ok(plugin)
    }

    pub fn parameter_descriptors(&self) -> &'static [ParameterDescriptor] {
        &PARAMETERS
    }

    pub fn parameters(&self) -> &FilterParameters {
        self.controller.parameters()
    }

    pub fn set_parameter(&mut self, id: ParameterId, value: f64) -> Result<()> {
        self.controller.set_parameter(id, value)
    }

    pub fn set_parameter_normalized(&mut self, id: ParameterId, normalized: f64) -> Result<()> {
        self.controller.set_parameter_normalized(id, normalized)
    }

    pub fn set_parameters(&mut self, parameters: FilterParameters) -> Result<()> {
        self.controller.set_parameters(parameters)
    }

    /// Size the engine and design the first filter for a session
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize, num_channels: usize) -> Result<()> {
        self.engine.prepare(sample_rate, max_block_size, num_channels)?;
        self.controller.prepare(sample_rate)
    }

    pub fn process(&mut self, block: &mut [&mut [f32]]) {
        self.engine.process(block);
    }

    pub fn process_interleaved(&mut self, data: &mut [f32]) {
        self.engine.process_interleaved(data);
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn release_resources(&mut self) {
        self.engine.release_resources();
        self.controller.collect_retired();
    }

    pub fn latency_samples(&self) -> usize {
        self.engine.latency_samples()
    }

    pub fn active_filter(&self) -> &DesignedFilter {
        self.engine.active_filter()
    }

    pub fn controller(&self) -> &FilterController {
        &self.controller
    }

    /// Separate the halves for hosts that run control and audio on
    /// different threads
    pub fn split(self) -> (FilterController, FilterEngine) {
        (self.controller, self.engine)
    }
}

impl Default for FirPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CUSTOM_TAPS;
    use crate::design::{DesignMethod, FilterType};

    fn prepared() -> FirPlugin {
        let mut plugin = FirPlugin::new();
        plugin.prepare(44100.0, 32, 2).unwrap();
        plugin
    }

    fn run_block(plugin: &mut FirPlugin) {
        let mut left = [0.0f32; 32];
        let mut right = [0.0f32; 32];
        plugin.process(&mut [&mut left[..], &mut right[..]]);
    }

    #[test]
    fn test_passthrough_before_prepare() {
        let mut plugin = FirPlugin::new();
        // No sample rate yet, nothing to design
        plugin.set_parameter(ParameterId::Order, 11.0).unwrap();
        assert_eq!(plugin.parameters().order, 11);
        assert!(plugin.active_filter().spec.is_none());
    }

    #[test]
    fn test_prepare_designs_default_filter() {
        let mut plugin = prepared();
        run_block(&mut plugin);
        assert_eq!(plugin.active_filter().coefficients.len(), 21);
        assert_eq!(plugin.latency_samples(), 10);
    }

    #[test]
    fn test_custom_method() {
        let mut plugin = prepared();
        plugin.set_parameter(ParameterId::Function, 5.0).unwrap();
        run_block(&mut plugin);
        assert_eq!(plugin.active_filter().coefficients.taps(), &CUSTOM_TAPS);
        assert_eq!(plugin.latency_samples(), 3);
    }

    #[test]
    fn test_rejected_band_keeps_previous_filter() {
        let mut plugin = prepared();
        run_block(&mut plugin);
        let before = plugin.active_filter().clone();

        plugin.set_parameter(ParameterId::UpperFrequency, 500.0).unwrap();
        let err = plugin.set_parameter(ParameterId::FilterType, 2.0).unwrap_err();
        assert!(matches!(err, FirError::InvalidFilterSpec(_)));
        assert_eq!(plugin.parameters().filter_type, FilterType::BandPass);

        run_block(&mut plugin);
        assert_eq!(plugin.active_filter(), &before);

        // Fixing the band makes the stored type valid again
        plugin.set_parameter(ParameterId::UpperFrequency, 4000.0).unwrap();
        run_block(&mut plugin);
        let spec = plugin.active_filter().spec.unwrap();
        assert_eq!(spec.filter_type, FilterType::BandPass);
        assert_eq!(spec.cutoff_high, 4000.0);
    }

    #[test]
    fn test_bypass_installs_passthrough() {
        let mut plugin = prepared();
        plugin.set_parameter(ParameterId::Bypass, 1.0).unwrap();
        run_block(&mut plugin);
        assert_eq!(plugin.latency_samples(), 0);

        let mut block = [0.25f32, -0.5, 1.0];
        plugin.process(&mut [&mut block[..]]);
        assert_eq!(block, [0.25, -0.5, 1.0]);
    }

    #[test]
    fn test_prepare_rejects_bad_rate() {
        let mut plugin = FirPlugin::new();
        assert!(matches!(plugin.prepare(0.0, 32, 2), Err(FirError::Config(_))));
        assert!(plugin.controller().sample_rate().is_none());
    }

    #[test]
    fn test_prepare_survives_invalid_parameters() {
        // 30 kHz is above Nyquist at 44.1 kHz
        let params = FilterParameters {
            frequency: 30000.0,
            ..FilterParameters::default()
        };
        let mut plugin = FirPlugin::with_parameters(params);
        plugin.prepare(44100.0, 32, 2).unwrap();
        run_block(&mut plugin);
        assert!(plugin.active_filter().spec.is_none());

        // Same parameters are fine at a higher rate
        plugin.prepare(96000.0, 32, 2).unwrap();
        run_block(&mut plugin);
        assert_eq!(plugin.active_filter().spec.unwrap().sample_rate, 96000.0);
    }

    #[test]
    fn test_controller_retries_busy_slot() {
        let slot = Arc::new(HandoffSlot::new());
        let mut controller = FilterController::new(slot.clone(), FilterParameters::default());
        let mut engine = FilterEngine::new(slot.clone());
        engine.prepare(48000.0, 16, 1).unwrap();

        let busy = slot.hold();
        controller.prepare(48000.0).unwrap();
        assert!(controller.has_undelivered());
        assert!(!engine.adopt_pending());
        drop(busy);

        assert!(controller.retry_pending());
        assert!(!controller.has_undelivered());
        assert!(engine.adopt_pending());
        assert_eq!(engine.active_filter().coefficients.len(), 21);
        assert!(controller.collect_retired());
    }

    #[test]
    fn test_method_switch_with_default_controls() {
        let mut plugin = prepared();
        for (choice, expected_len) in [(1.0, 15), (2.0, 21)] {
            plugin.set_parameter(ParameterId::Function, choice).unwrap();
            run_block(&mut plugin);
            assert_eq!(plugin.active_filter().coefficients.len(), expected_len);
        }
        let spec = plugin.controller().last_valid_spec().unwrap();
        assert!(matches!(spec.method, DesignMethod::Transition { .. }));

        // Least squares needs a narrower transition than the 0.5 default
        assert!(plugin.set_parameter(ParameterId::Function, 3.0).is_err());
        let spec = plugin.controller().last_valid_spec().unwrap();
        assert!(matches!(spec.method, DesignMethod::Transition { .. }));
    }

    #[test]
    fn test_latest_parameter_wins() {
        let mut plugin = prepared();
        for order in [15.0, 17.0, 19.0, 41.0] {
            plugin.set_parameter(ParameterId::Order, order).unwrap();
        }
        run_block(&mut plugin);
        assert_eq!(plugin.active_filter().coefficients.len(), 41);
    }

    #[test]
    fn test_split_halves_share_slot() {
        let plugin = prepared();
        let (mut controller, mut engine) = plugin.split();
        controller.set_parameter(ParameterId::Order, 7.0).unwrap();
        assert!(engine.adopt_pending());
        assert_eq!(engine.active_filter().coefficients.len(), 7);
    }
}
