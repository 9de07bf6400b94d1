/// Easing curve applied to transition progress before sales are interpolated.
///
/// `Linear` is the default and steps progress evenly as `i / n`. The in-out curves slow the
/// start and end of a transition; they reshape only the interpolated frames, the first and
/// final frames still hold the exact generation values.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    #[default]
    Linear,
    InOutQuad,
    InOutCubic,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InOutQuad => in_out(t, 2),
            Self::InOutCubic => in_out(t, 3),
        }
    }

    /// Eased progress of interpolated frame `index` out of `frames` (index < frames).
    pub fn frame_progress(self, index: usize, frames: usize) -> f64 {
        if frames == 0 {
            return 1.0;
        }
        self.apply(index as f64 / frames as f64)
    }
}

// Symmetric power curve: accelerates over the first half, mirrors over the second.
fn in_out(t: f64, power: i32) -> f64 {
    if t < 0.5 {
        (2.0 * t).powi(power) / 2.0
    } else {
        1.0 - (2.0 - 2.0 * t).powi(power) / 2.0
    }
}
