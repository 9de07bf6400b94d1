use crate::{
    config::RaceConfig,
    dataset::GenerationIndex,
    error::{RaceError, RaceResult},
    keyframes::{Keyframe, KeyframeOptions, generate_keyframes},
    render::{FrameTiming, Renderer},
    scale::ScaleDomains,
    snapshot::PRE_HISTORY,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Idle,
    Playing,
}

/// Owns the generation cursor and drives transitions through a [`Renderer`].
///
/// Every playback method borrows the session mutably, so transitions never overlap: a caller
/// that receives navigation requests during playback awaits the running call before issuing
/// the next one.
pub struct RaceSession<R> {
    index: GenerationIndex,
    config: RaceConfig,
    renderer: R,
    current: u32,
    state: PlayState,
}

impl<R: Renderer> RaceSession<R> {
    /// Fails if the config is invalid or any generation in its bounds is missing from `index`.
    pub fn new(index: GenerationIndex, config: RaceConfig, renderer: R) -> RaceResult<Self> {
        config.validate()?;
        for generation in config.min_generation..=config.max_generation {
            if !index.contains(generation) {
                return Err(RaceError::lookup(generation));
            }
        }
        Ok(Self {
            current: config.start_generation,
            index,
            config,
            renderer,
            state: PlayState::Idle,
        })
    }

    pub fn current_generation(&self) -> u32 {
        self.current
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn index(&self) -> &GenerationIndex {
        &self.index
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > self.config.min_generation
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.config.max_generation
    }

    /// Reveals the current generation, animating up from nothing.
    pub async fn start(&mut self) -> RaceResult<()> {
        self.play(PRE_HISTORY, self.current).await
    }

    /// Steps back one generation. Returns `false` without rendering at the lower bound.
    pub async fn previous(&mut self) -> RaceResult<bool> {
        if !self.can_go_previous() {
            return Ok(false);
        }
        let target = self.current - 1;
        self.play(self.current, target).await?;
        self.current = target;
        tracing::info!(generation = target, "moved to previous generation");
        Ok(true)
    }

    /// Steps forward one generation. Returns `false` without rendering at the upper bound.
    pub async fn next(&mut self) -> RaceResult<bool> {
        if !self.can_go_next() {
            return Ok(false);
        }
        let target = self.current + 1;
        self.play(self.current, target).await?;
        self.current = target;
        tracing::info!(generation = target, "moved to next generation");
        Ok(true)
    }

    /// Renders every keyframe of the `start -> end` transition, one after another.
    ///
    /// The cursor is left untouched; navigation methods move it once this resolves.
    #[tracing::instrument(skip(self))]
    pub async fn play(&mut self, start: u32, end: u32) -> RaceResult<()> {
        let year_range = self.index.year_range(end)?;
        self.renderer.set_generation_label(end, year_range)?;

        let keyframes = generate_keyframes(
            &self.index,
            start,
            end,
            KeyframeOptions::from(&self.config),
        )?;

        self.state = PlayState::Playing;
        let result = self.step_through(&keyframes).await;
        self.state = PlayState::Idle;
        result
    }

    async fn step_through(&mut self, keyframes: &[Keyframe]) -> RaceResult<()> {
        let count = keyframes.len();
        for (index, keyframe) in keyframes.iter().enumerate() {
            let domains = ScaleDomains::for_keyframe(keyframe);
            self.renderer.set_scale_domains(domains)?;

            let timing = FrameTiming {
                index,
                count,
                duration_ms: self.config.frame_duration_ms,
            };
            tracing::debug!(
                index,
                bars = keyframe.len(),
                max_sales = domains.max_sales,
                "rendering keyframe"
            );
            self.renderer.render_keyframe(keyframe, timing).await?;
        }
        Ok(())
    }
}
