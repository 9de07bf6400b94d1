use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::error::{RaceError, RaceResult};

/// Console sales table bundled with the crate (generations 1 through 9).
pub const BUNDLED_DATASET: &str = include_str!("../data/consoles.json");

/// One row of the sales table.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Generation")]
    pub generation: u32,
    #[serde(rename = "Units Sold (millions)")]
    pub units_sold_millions: f64,
    #[serde(rename = "Console")]
    pub console: String,
    #[serde(rename = "Tooltip", default)]
    pub tooltip: String,
    #[serde(rename = "Gen Years", default)]
    pub gen_years: String,
}

/// Records of a single generation, in dataset order.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationData {
    pub year_range: String, // taken from the first row
    pub records: Vec<SalesRecord>,
}

impl GenerationData {
    pub fn find(&self, company: &str) -> Option<&SalesRecord> {
        self.records.iter().find(|r| r.company == company)
    }

    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.company.as_str())
    }
}

/// Sales rows grouped by generation. Built once, read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationIndex {
    generations: BTreeMap<u32, GenerationData>,
}

impl GenerationIndex {
    pub fn build(records: Vec<SalesRecord>) -> RaceResult<Self> {
        if records.is_empty() {
            return Err(RaceError::data_load("dataset has no rows"));
        }

        let mut generations: BTreeMap<u32, GenerationData> = BTreeMap::new();
        for (row, record) in records.into_iter().enumerate() {
            validate_record(row, &record)?;
            generations
                .entry(record.generation)
                .or_insert_with(|| GenerationData {
                    year_range: record.gen_years.clone(),
                    records: Vec::new(),
                })
                .records
                .push(record);
        }

        tracing::debug!(generations = generations.len(), "built generation index");
        Ok(Self { generations })
    }

    pub fn from_json_str(s: &str) -> RaceResult<Self> {
        let records: Vec<SalesRecord> = serde_json::from_str(s)
            .map_err(|e| RaceError::data_load(format!("parse dataset JSON: {e}")))?;
        Self::build(records)
    }

    pub fn from_path(path: &Path) -> RaceResult<Self> {
        let f = File::open(path).map_err(|e| {
            RaceError::data_load(format!("open dataset '{}': {e}", path.display()))
        })?;
        let records: Vec<SalesRecord> = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RaceError::data_load(format!("parse dataset '{}': {e}", path.display())))?;
        Self::build(records)
    }

    pub fn bundled() -> RaceResult<Self> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn get(&self, generation: u32) -> RaceResult<&GenerationData> {
        self.generations
            .get(&generation)
            .ok_or_else(|| RaceError::lookup(generation))
    }

    pub fn contains(&self, generation: u32) -> bool {
        self.generations.contains_key(&generation)
    }

    pub fn year_range(&self, generation: u32) -> RaceResult<&str> {
        Ok(self.get(generation)?.year_range.as_str())
    }

    pub fn generations(&self) -> impl Iterator<Item = u32> + '_ {
        self.generations.keys().copied()
    }

    pub fn first_generation(&self) -> Option<u32> {
        self.generations.keys().next().copied()
    }

    pub fn last_generation(&self) -> Option<u32> {
        self.generations.keys().next_back().copied()
    }
}

fn validate_record(row: usize, r: &SalesRecord) -> RaceResult<()> {
    if r.generation == 0 {
        return Err(RaceError::data_load(format!(
            "row {row}: generation 0 is reserved"
        )));
    }
    if r.company.trim().is_empty() {
        return Err(RaceError::data_load(format!("row {row}: empty company")));
    }
    if !r.units_sold_millions.is_finite() || r.units_sold_millions < 0.0 {
        return Err(RaceError::data_load(format!(
            "row {row}: units sold must be a finite value >= 0, got {}",
            r.units_sold_millions
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(company: &str, generation: u32, units: f64) -> SalesRecord {
        SalesRecord {
            company: company.to_string(),
            generation,
            units_sold_millions: units,
            console: format!("{company} console"),
            tooltip: String::new(),
            gen_years: format!("gen {generation} years"),
        }
    }

    #[test]
    fn groups_by_generation_in_dataset_order() {
        let idx = GenerationIndex::build(vec![
            rec("Sega", 2, 30.75),
            rec("Nintendo", 1, 61.91),
            rec("Nintendo", 2, 49.10),
        ])
        .unwrap();

        assert_eq!(idx.generations().collect::<Vec<_>>(), vec![1, 2]);
        let g2: Vec<&str> = idx.get(2).unwrap().companies().collect();
        assert_eq!(g2, vec!["Sega", "Nintendo"]);
        assert_eq!(idx.year_range(2).unwrap(), "gen 2 years");
    }

    #[test]
    fn missing_generation_is_lookup_error() {
        let idx = GenerationIndex::build(vec![rec("Atari", 2, 30.0)]).unwrap();
        assert!(matches!(
            idx.get(3),
            Err(RaceError::Lookup { generation: 3 })
        ));
    }

    #[test]
    fn rejects_invalid_rows() {
        assert!(GenerationIndex::build(vec![]).is_err());
        assert!(GenerationIndex::build(vec![rec("Atari", 0, 1.0)]).is_err());
        assert!(GenerationIndex::build(vec![rec("Atari", 1, -1.0)]).is_err());
        assert!(GenerationIndex::build(vec![rec("Atari", 1, f64::NAN)]).is_err());
        assert!(GenerationIndex::build(vec![rec(" ", 1, 1.0)]).is_err());
    }

    #[test]
    fn parses_table_column_names() {
        let json = r#"[{"Company":"Nintendo","Generation":1,"Units Sold (millions)":61.91,
            "Console":"NES","Tooltip":"Nintendo Entertainment System","Gen Years":"1983-2003"}]"#;
        let idx = GenerationIndex::from_json_str(json).unwrap();
        let r = idx.get(1).unwrap().find("Nintendo").unwrap();
        assert_eq!(r.units_sold_millions, 61.91);
        assert_eq!(r.console, "NES");
    }

    #[test]
    fn malformed_json_is_data_load_error() {
        assert!(matches!(
            GenerationIndex::from_json_str("{not json"),
            Err(RaceError::DataLoad(_))
        ));
    }

    #[test]
    fn bundled_dataset_covers_nine_generations() {
        let idx = GenerationIndex::bundled().unwrap();
        assert_eq!(idx.first_generation(), Some(1));
        assert_eq!(idx.last_generation(), Some(9));
        for g in 1..=9 {
            assert!(!idx.get(g).unwrap().year_range.is_empty());
        }
    }
}
