use crate::snapshot::{CompanySet, SalesSnapshot};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedEntry {
    pub company: String,
    pub sales: f64,
    pub console: String,
    pub tooltip: String,
    pub rank: usize, // 0 = largest sales
}

/// Ranks `companies` by descending `sales_of`, labelling each entry from `reference`.
///
/// The sort is stable, so tied companies keep the set's iteration order. NaN sales rank
/// ahead of every number instead of breaking the ordering.
pub fn rank<F>(companies: &CompanySet, sales_of: F, reference: &SalesSnapshot) -> Vec<RankedEntry>
where
    F: Fn(&str) -> f64,
{
    let mut ranking: Vec<RankedEntry> = companies
        .iter()
        .map(|company| {
            let labels = reference.get(company);
            RankedEntry {
                company: company.to_string(),
                sales: sales_of(company),
                console: labels.map(|e| e.console.clone()).unwrap_or_default(),
                tooltip: labels.map(|e| e.tooltip.clone()).unwrap_or_default(),
                rank: 0,
            }
        })
        .collect();

    ranking.sort_by(|a, b| b.sales.total_cmp(&a.sales));

    for (i, entry) in ranking.iter_mut().enumerate() {
        entry.rank = i;
    }
    ranking
}
