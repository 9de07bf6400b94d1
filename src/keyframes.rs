use crate::{
    anim_ease::Ease,
    config::RaceConfig,
    dataset::GenerationIndex,
    error::{RaceError, RaceResult},
    ranking::{RankedEntry, rank},
    snapshot::{CompanySet, SalesSnapshot},
};

/// One ranked snapshot of every tracked company at an animation instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub progress: f64, // eased, 0..1; exactly 1.0 on the final frame
    pub entries: Vec<RankedEntry>,
}

impl Keyframe {
    pub fn max_sales(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.sales).reduce(f64::max)
    }

    pub fn find(&self, company: &str) -> Option<&RankedEntry> {
        self.entries.iter().find(|e| e.company == company)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyframeOptions {
    pub frames: usize, // interpolated frames; one exact frame is appended
    pub ease: Ease,
}

impl Default for KeyframeOptions {
    fn default() -> Self {
        Self {
            frames: 30,
            ease: Ease::Linear,
        }
    }
}

impl From<&RaceConfig> for KeyframeOptions {
    fn from(cfg: &RaceConfig) -> Self {
        Self {
            frames: cfg.frames_per_transition,
            ease: cfg.ease,
        }
    }
}

/// Keyframes animating the race from `start` to `end`.
///
/// Returns `opts.frames` interpolated frames followed by one frame holding the exact
/// `end` values with zero-sales companies removed. `start == 0` animates from nothing.
#[tracing::instrument(skip(index))]
pub fn generate_keyframes(
    index: &GenerationIndex,
    start: u32,
    end: u32,
    opts: KeyframeOptions,
) -> RaceResult<Vec<Keyframe>> {
    if opts.frames == 0 {
        return Err(RaceError::config("keyframe count must be > 0"));
    }

    let companies = CompanySet::for_transition(index, start, end)?;
    let start_data = SalesSnapshot::capture(index, &companies, start)?;
    let end_data = SalesSnapshot::capture(index, &companies, end)?;

    let mut keyframes = Vec::with_capacity(opts.frames + 1);
    for frame in 0..opts.frames {
        let progress = opts.ease.frame_progress(frame, opts.frames);
        let entries = rank(
            &companies,
            |company| lerp(start_data.sales(company), end_data.sales(company), progress),
            &end_data,
        );
        keyframes.push(Keyframe { progress, entries });
    }

    let mut last = rank(&companies, |company| end_data.sales(company), &end_data);
    last.retain(|e| e.sales != 0.0);
    keyframes.push(Keyframe {
        progress: 1.0,
        entries: last,
    });

    tracing::debug!(
        companies = companies.len(),
        keyframes = keyframes.len(),
        "generated keyframes"
    );
    Ok(keyframes)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SalesRecord;

    fn index() -> GenerationIndex {
        let rec = |company: &str, generation: u32, units: f64| SalesRecord {
            company: company.to_string(),
            generation,
            units_sold_millions: units,
            console: format!("{company}-{generation}"),
            tooltip: String::new(),
            gen_years: String::new(),
        };
        GenerationIndex::build(vec![
            rec("Atari", 1, 10.0),
            rec("Mattel", 1, 4.0),
            rec("Atari", 2, 2.0),
            rec("Sega", 2, 8.0),
        ])
        .unwrap()
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(3.0, 9.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 9.0, 1.0), 9.0);
        assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
    }

    #[test]
    fn frame_count_is_frames_plus_one() {
        let opts = KeyframeOptions {
            frames: 5,
            ease: Ease::Linear,
        };
        let kfs = generate_keyframes(&index(), 1, 2, opts).unwrap();
        assert_eq!(kfs.len(), 6);
        assert_eq!(kfs[5].progress, 1.0);
    }

    #[test]
    fn dropped_company_fades_out_then_disappears() {
        let kfs = generate_keyframes(&index(), 1, 2, KeyframeOptions::default()).unwrap();
        let first = &kfs[0];
        assert_eq!(first.find("Mattel").unwrap().sales, 4.0);
        // labels always come from the destination generation
        assert_eq!(first.find("Mattel").unwrap().console, "");
        assert_eq!(first.find("Atari").unwrap().console, "Atari-2");

        let last = kfs.last().unwrap();
        assert!(last.find("Mattel").is_none());
        assert_eq!(last.len(), 2);
    }

    #[test]
    fn eased_frames_keep_exact_endpoints() {
        let opts = KeyframeOptions {
            frames: 10,
            ease: Ease::InOutQuad,
        };
        let kfs = generate_keyframes(&index(), 1, 2, opts).unwrap();
        assert_eq!(kfs[0].find("Atari").unwrap().sales, 10.0);
        assert_eq!(kfs[10].find("Atari").unwrap().sales, 2.0);
    }

    #[test]
    fn zero_frames_is_config_error() {
        let opts = KeyframeOptions {
            frames: 0,
            ease: Ease::Linear,
        };
        assert!(matches!(
            generate_keyframes(&index(), 1, 2, opts),
            Err(RaceError::Config(_))
        ));
    }

    #[test]
    fn unknown_generation_is_lookup_error() {
        assert!(matches!(
            generate_keyframes(&index(), 2, 3, KeyframeOptions::default()),
            Err(RaceError::Lookup { generation: 3 })
        ));
    }

    #[test]
    fn max_sales_of_empty_frame_is_none() {
        let kf = Keyframe {
            progress: 1.0,
            entries: vec![],
        };
        assert_eq!(kf.max_sales(), None);
    }
}
