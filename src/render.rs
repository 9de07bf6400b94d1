use std::io::Write;

use crate::{
    error::{RaceError, RaceResult},
    format::{format_axis_tick, format_units},
    keyframes::Keyframe,
    palette::Palette,
    scale::{BandScale, LinearScale, MIN_SALES_DOMAIN, ScaleDomains},
};

/// Position of a keyframe within its transition and how long its visual transition lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameTiming {
    pub index: usize,
    pub count: usize,
    pub duration_ms: u64,
}

impl FrameTiming {
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

/// Presentation layer driven by [`RaceSession`](crate::RaceSession).
///
/// `render_keyframe` resolves once the visual transition to `keyframe` has finished; the
/// session does not start the next keyframe before that.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    fn set_generation_label(&mut self, generation: u32, year_range: &str) -> RaceResult<()>;

    fn set_scale_domains(&mut self, domains: ScaleDomains) -> RaceResult<()>;

    async fn render_keyframe(
        &mut self,
        keyframe: &Keyframe,
        timing: FrameTiming,
    ) -> RaceResult<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent {
    GenerationLabel {
        generation: u32,
        year_range: String,
    },
    ScaleDomains(ScaleDomains),
    Keyframe {
        keyframe: Keyframe,
        timing: FrameTiming,
    },
}

/// Keeps every call in memory. Transitions complete immediately.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyframes(&self) -> impl Iterator<Item = &Keyframe> {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::Keyframe { keyframe, .. } => Some(keyframe),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = (u32, &str)> {
        self.events.iter().filter_map(|e| match e {
            RenderEvent::GenerationLabel {
                generation,
                year_range,
            } => Some((*generation, year_range.as_str())),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn set_generation_label(&mut self, generation: u32, year_range: &str) -> RaceResult<()> {
        self.events.push(RenderEvent::GenerationLabel {
            generation,
            year_range: year_range.to_string(),
        });
        Ok(())
    }

    fn set_scale_domains(&mut self, domains: ScaleDomains) -> RaceResult<()> {
        self.events.push(RenderEvent::ScaleDomains(domains));
        Ok(())
    }

    async fn render_keyframe(
        &mut self,
        keyframe: &Keyframe,
        timing: FrameTiming,
    ) -> RaceResult<()> {
        self.events.push(RenderEvent::Keyframe {
            keyframe: keyframe.clone(),
            timing,
        });
        Ok(())
    }
}

#[derive(serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Line<'a> {
    GenerationLabel {
        generation: u32,
        year_range: &'a str,
    },
    ScaleDomains {
        max_sales: f64,
        bands: usize,
        ticks: Vec<Tick>,
    },
    Keyframe {
        index: usize,
        count: usize,
        duration_ms: u64,
        progress: f64,
        bars: Vec<Bar<'a>>,
    },
}

#[derive(serde::Serialize)]
struct Tick {
    value: f64,
    x: f64,
    label: String,
}

#[derive(serde::Serialize)]
struct Bar<'a> {
    company: &'a str,
    rank: usize,
    sales: f64,
    x: f64, // bar length from the value axis
    y: f64, // top of the rank band
    height: f64,
    units: String,
    console: &'a str,
    tooltip: &'a str,
    colour: String,
}

/// Plot area the bars are laid out in, margins excluded.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
        }
    }
}

impl ChartSize {
    /// One axis tick per 200 units of width.
    pub fn tick_count(&self) -> usize {
        ((self.width / 200.0) as usize).max(1)
    }
}

/// Writes one JSON object per call, newline separated.
///
/// Bars carry their layout within [`ChartSize`], palette colour and a formatted unit count,
/// and domain updates carry labelled axis ticks, so a thin client can draw the chart without
/// knowing about the dataset.
pub struct JsonLinesRenderer<W: Write> {
    out: W,
    palette: Palette,
    size: ChartSize,
    domains: ScaleDomains,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_layout(out, Palette::default(), ChartSize::default())
    }

    pub fn with_layout(out: W, palette: Palette, size: ChartSize) -> Self {
        Self {
            out,
            palette,
            size,
            domains: ScaleDomains {
                max_sales: MIN_SALES_DOMAIN,
                bands: 0,
            },
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, line: &Line<'_>) -> RaceResult<()> {
        serde_json::to_writer(&mut self.out, line)
            .map_err(|e| RaceError::render(format!("write event: {e}")))?;
        self.out
            .write_all(b"\n")
            .map_err(|e| RaceError::render(format!("write event: {e}")))
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn set_generation_label(&mut self, generation: u32, year_range: &str) -> RaceResult<()> {
        self.emit(&Line::GenerationLabel {
            generation,
            year_range,
        })
    }

    fn set_scale_domains(&mut self, domains: ScaleDomains) -> RaceResult<()> {
        self.domains = domains;
        let x = LinearScale::new(domains.max_sales, self.size.width);
        let ticks = x
            .ticks(self.size.tick_count())
            .into_iter()
            .map(|value| Tick {
                value,
                x: x.apply(value),
                label: format_axis_tick(value),
            })
            .collect();
        self.emit(&Line::ScaleDomains {
            max_sales: domains.max_sales,
            bands: domains.bands,
            ticks,
        })
    }

    async fn render_keyframe(
        &mut self,
        keyframe: &Keyframe,
        timing: FrameTiming,
    ) -> RaceResult<()> {
        let x = LinearScale::new(self.domains.max_sales, self.size.width);
        let y = BandScale::new(keyframe.len(), self.size.height);
        let bars = keyframe
            .entries
            .iter()
            .map(|e| Bar {
                company: &e.company,
                rank: e.rank,
                sales: e.sales,
                x: x.apply(e.sales),
                y: y.position(e.rank).unwrap_or(0.0),
                height: y.bandwidth(),
                units: format_units(e.sales),
                console: &e.console,
                tooltip: &e.tooltip,
                colour: self.palette.colour(&e.company).to_hex(),
            })
            .collect();
        self.emit(&Line::Keyframe {
            index: timing.index,
            count: timing.count,
            duration_ms: timing.duration_ms,
            progress: keyframe.progress,
            bars,
        })?;
        if timing.is_last() {
            self.out
                .flush()
                .map_err(|e| RaceError::render(format!("flush events: {e}")))?;
        }
        Ok(())
    }
}
