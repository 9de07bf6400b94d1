//! Value and rank scales for laying out a keyframe.
//!
//! The session only computes [`ScaleDomains`]; renderers turn them into positions with
//! [`LinearScale`] (bar length, axis ticks) and [`BandScale`] (bar slot per rank).

use crate::keyframes::Keyframe;

/// Domain used when every bar in a frame is zero, so the value scale never collapses.
pub const MIN_SALES_DOMAIN: f64 = 0.001;

/// Inner and outer band padding, as a fraction of the band step.
pub const BAND_PADDING: f64 = 0.15;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleDomains {
    pub max_sales: f64, // > 0
    pub bands: usize,   // one band per rank
}

impl ScaleDomains {
    pub fn for_keyframe(keyframe: &Keyframe) -> Self {
        let max_sales = keyframe
            .max_sales()
            .filter(|m| *m > 0.0)
            .unwrap_or(MIN_SALES_DOMAIN);
        Self {
            max_sales,
            bands: keyframe.len(),
        }
    }
}

/// Maps `[0, max]` onto `[0, width]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub max: f64,
    pub width: f64,
}

impl LinearScale {
    pub fn new(max: f64, width: f64) -> Self {
        Self { max, width }
    }

    pub fn apply(&self, value: f64) -> f64 {
        if self.max == 0.0 {
            return 0.0;
        }
        value / self.max * self.width
    }

    /// Round tick values from 0 up to `max`, roughly `count` of them, stepping by 1, 2 or 5
    /// times a power of ten.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if !self.max.is_finite() || self.max <= 0.0 {
            return vec![0.0];
        }
        let step = nice_step(self.max / count.max(1) as f64);
        let n = (self.max / step + 1e-9).floor() as usize;
        (0..=n).map(|i| i as f64 * step).collect()
    }
}

fn nice_step(raw: f64) -> f64 {
    let power = 10f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * power
}

/// Splits `[0, height]` into `count` evenly padded, centered bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub height: f64,
    pub padding: f64,
}

impl BandScale {
    pub fn new(count: usize, height: f64) -> Self {
        Self {
            count,
            height,
            padding: BAND_PADDING,
        }
    }

    pub fn step(&self) -> f64 {
        let n = self.count as f64;
        self.height / (n + self.padding).max(1.0)
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding)
    }

    /// Top edge of the band for `rank`, or `None` past the last band.
    pub fn position(&self, rank: usize) -> Option<f64> {
        if rank >= self.count {
            return None;
        }
        let step = self.step();
        Some(self.padding * step + rank as f64 * step)
    }
}
