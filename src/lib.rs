#![forbid(unsafe_code)]

//! Bar chart race engine for console-maker unit sales.
//!
//! A transition between two generations is turned into a sequence of ranked
//! [`Keyframe`]s by [`generate_keyframes`]; a [`RaceSession`] plays those keyframes through
//! a [`Renderer`] one at a time and owns the generation cursor used for navigation.

pub mod anim_ease;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod keyframes;
pub mod palette;
pub mod ranking;
pub mod render;
pub mod scale;
pub mod session;
pub mod snapshot;

pub use anim_ease::Ease;
pub use config::RaceConfig;
pub use dataset::{BUNDLED_DATASET, GenerationData, GenerationIndex, SalesRecord};
pub use error::{RaceError, RaceResult};
pub use format::{format_axis_tick, format_units};
pub use keyframes::{Keyframe, KeyframeOptions, generate_keyframes};
pub use palette::{MAKER_COLOURS, Palette, Rgb8};
pub use ranking::{RankedEntry, rank};
pub use render::{
    ChartSize, FrameTiming, JsonLinesRenderer, RecordingRenderer, RenderEvent, Renderer,
};
pub use scale::{BAND_PADDING, BandScale, LinearScale, MIN_SALES_DOMAIN, ScaleDomains};
pub use session::{PlayState, RaceSession};
pub use snapshot::{CompanySet, PRE_HISTORY, SalesEntry, SalesSnapshot};
