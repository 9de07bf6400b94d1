use std::collections::BTreeMap;

use crate::{dataset::GenerationIndex, error::RaceResult};

/// Sentinel for "before the first generation": no companies, all-zero sales.
pub const PRE_HISTORY: u32 = 0;

/// Insertion-ordered set of company names taking part in one transition.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CompanySet {
    names: Vec<String>,
}

impl CompanySet {
    /// Start companies (skipped for [`PRE_HISTORY`]) followed by newcomers of `end`.
    pub fn for_transition(index: &GenerationIndex, start: u32, end: u32) -> RaceResult<Self> {
        let mut set = Self::default();
        if start != PRE_HISTORY {
            for company in index.get(start)?.companies() {
                set.insert(company);
            }
        }
        for company in index.get(end)?.companies() {
            set.insert(company);
        }
        Ok(set)
    }

    /// Returns `false` if `company` was already present.
    pub fn insert(&mut self, company: &str) -> bool {
        if self.contains(company) {
            return false;
        }
        self.names.push(company.to_string());
        true
    }

    pub fn contains(&self, company: &str) -> bool {
        self.names.iter().any(|n| n == company)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for CompanySet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::default();
        for company in iter {
            set.insert(company);
        }
        set
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SalesEntry {
    pub sales: f64,
    pub console: String,
    pub tooltip: String,
}

/// Per-company sales and labels for one generation.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SalesSnapshot {
    entries: BTreeMap<String, SalesEntry>,
}

impl SalesSnapshot {
    /// Companies missing from `generation` get zero sales and empty labels.
    pub fn capture(
        index: &GenerationIndex,
        companies: &CompanySet,
        generation: u32,
    ) -> RaceResult<Self> {
        if generation == PRE_HISTORY {
            return Ok(Self::zeroed(companies));
        }

        let data = index.get(generation)?;
        let entries = companies
            .iter()
            .map(|company| {
                let entry = data
                    .find(company)
                    .map(|r| SalesEntry {
                        sales: r.units_sold_millions,
                        console: r.console.clone(),
                        tooltip: r.tooltip.clone(),
                    })
                    .unwrap_or_default();
                (company.to_string(), entry)
            })
            .collect();
        Ok(Self { entries })
    }

    pub fn zeroed(companies: &CompanySet) -> Self {
        let entries = companies
            .iter()
            .map(|c| (c.to_string(), SalesEntry::default()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, company: &str) -> Option<&SalesEntry> {
        self.entries.get(company)
    }

    /// Zero for companies outside the snapshot.
    pub fn sales(&self, company: &str) -> f64 {
        self.get(company).map_or(0.0, |e| e.sales)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
