#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 0.0,
            bottom: 25.0,
            left: 0.0,
            right: 0.0,
        }
    }
}

/// Alpha schedule and integration constants of the layout driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub alpha_start: f32,
    /// Multiplier applied to alpha once per tick.
    pub alpha_decay: f32,
    pub alpha_min: f32,
    /// Fraction of last tick's displacement carried into the next one.
    pub friction: f32,
    /// Scales alpha into the gravity pull rate.
    pub gravity_damping: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha_start: 1.0,
            alpha_decay: 0.99,
            alpha_min: 0.005,
            friction: 0.9,
            gravity_damping: 0.1,
        }
    }
}

impl SimulationConfig {
    /// Upper bound on ticks before alpha falls under `alpha_min`.
    pub fn max_ticks(&self) -> usize {
        if self.alpha_start < self.alpha_min {
            return 0;
        }
        let decay = self.alpha_decay.clamp(0.0, 0.999_999);
        if decay <= 0.0 {
            return 1;
        }
        let ticks = (self.alpha_min / self.alpha_start).ln() / decay.ln();
        ticks.ceil().max(0.0) as usize + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    pub padding: f32,
    pub scale: f32,
    pub margin: Margin,
    pub clamp_right_edge: bool,
    pub simulation: SimulationConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            scale: 1.0,
            margin: Margin::default(),
            clamp_right_edge: true,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ChartConfig {
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = if padding.is_finite() {
            padding.max(0.0)
        } else {
            0.0
        };
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_finite() { scale } else { 1.0 };
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_right_edge_clamp(mut self, clamp: bool) -> Self {
        self.clamp_right_edge = clamp;
        self
    }

    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_returns_updated_values() {
        let base = ChartConfig::default();
        let config = base.with_padding(2.0).with_scale(5.0);

        assert_eq!(base.padding, 0.0);
        assert_eq!(base.scale, 1.0);
        assert_eq!(config.padding, 2.0);
        assert_eq!(config.scale, 5.0);
        assert_eq!(config.margin.bottom, 25.0);
    }

    #[test]
    fn padding_rejects_negative_and_nan() {
        assert_eq!(ChartConfig::default().with_padding(-3.0).padding, 0.0);
        assert_eq!(ChartConfig::default().with_padding(f32::NAN).padding, 0.0);
    }

    #[test]
    fn default_schedule_is_bounded() {
        let ticks = SimulationConfig::default().max_ticks();
        assert!((520..=540).contains(&ticks), "ticks = {ticks}");
    }
}
