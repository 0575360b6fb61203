/// What to do when a transform property has some of its axis curves missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncompleteChannelPolicy {
    /// Drop the whole property.
    Skip,
    /// Resample with zero standing in for the missing axes.
    #[default]
    ZeroFill,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
}

/// How scale keyframes follow the coordinate adjust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleConversion {
    /// Transformed as directions through the rotational part.
    #[default]
    RotationOnly,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ConversionConfig {
    pub incomplete_channels: IncompleteChannelPolicy,
    /// Unit of the field of view derived from a focal length track.
    pub focal_length_fov_unit: AngleUnit,
    pub scale_conversion: ScaleConversion,
    /// Sample rate the scene uses when baking animation into the destination pivot.
    pub pivot_bake_frame_rate: f64,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            incomplete_channels: IncompleteChannelPolicy::default(),
            focal_length_fov_unit: AngleUnit::default(),
            scale_conversion: ScaleConversion::default(),
            pivot_bake_frame_rate: Self::DEFAULT_PIVOT_BAKE_FRAME_RATE,
        }
    }
}

impl ConversionConfig {
    pub const DEFAULT_PIVOT_BAKE_FRAME_RATE: f64 = 30.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_incomplete_channels(mut self, policy: IncompleteChannelPolicy) -> Self {
        self.incomplete_channels = policy;
        self
    }

    pub fn with_focal_length_fov_unit(mut self, unit: AngleUnit) -> Self {
        self.focal_length_fov_unit = unit;
        self
    }

    pub fn with_scale_conversion(mut self, conversion: ScaleConversion) -> Self {
        self.scale_conversion = conversion;
        self
    }

    /// Rates that are not finite and positive fall back to the default.
    pub fn with_pivot_bake_frame_rate(mut self, frame_rate: f64) -> Self {
        self.pivot_bake_frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            tracing::warn!(
                "ignoring pivot bake frame rate {frame_rate}, using {}",
                Self::DEFAULT_PIVOT_BAKE_FRAME_RATE
            );
            Self::DEFAULT_PIVOT_BAKE_FRAME_RATE
        };
        self
    }
}
