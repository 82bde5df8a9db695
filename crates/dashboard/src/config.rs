//! Dashboard configuration.

use equity_core::{Rank, Sex};

/// Which widgets the dashboard builds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// One percent-professors display is built per entry, in this order.
    pub genders: Vec<Sex>,
    /// Layers of the rank-distribution chart, bottom to top.
    pub ranks: Vec<Rank>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            genders: Sex::ALL.to_vec(),
            ranks: Rank::ALL.to_vec(),
        }
    }
}

impl DashboardConfig {
    /// Sets the genders that get a percent-professors display.
    pub fn with_genders(mut self, genders: impl IntoIterator<Item = Sex>) -> Self {
        self.genders = unique(genders);
        self
    }

    /// Sets the stacked layers of the rank-distribution chart.
    pub fn with_ranks(mut self, ranks: impl IntoIterator<Item = Rank>) -> Self {
        self.ranks = unique(ranks);
        self
    }

    /// Drops repeated entries, keeping the first occurrence of each.
    pub(crate) fn deduplicated(self) -> Self {
        Self {
            genders: unique(self.genders),
            ranks: unique(self.ranks),
        }
    }
}

fn unique<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds_every_widget() {
        let config = DashboardConfig::default();
        assert_eq!(config.genders, vec![Sex::Female, Sex::Male]);
        assert_eq!(config.ranks, vec![Rank::Prof, Rank::AsstProf, Rank::AssocProf]);
    }

    #[test]
    fn test_builder() {
        let config = DashboardConfig::default()
            .with_genders([Sex::Female])
            .with_ranks([Rank::AssocProf, Rank::Prof]);
        assert_eq!(config.genders, vec![Sex::Female]);
        assert_eq!(config.ranks, vec![Rank::AssocProf, Rank::Prof]);
    }

    #[test]
    fn test_repeated_entries_kept_once() {
        let config = DashboardConfig::default()
            .with_genders([Sex::Male, Sex::Female, Sex::Male])
            .with_ranks([Rank::Prof, Rank::Prof, Rank::AsstProf]);
        assert_eq!(config.genders, vec![Sex::Male, Sex::Female]);
        assert_eq!(config.ranks, vec![Rank::Prof, Rank::AsstProf]);

        let config = DashboardConfig {
            genders: vec![Sex::Female, Sex::Female],
            ranks: vec![Rank::AssocProf, Rank::AssocProf],
        }
        .deduplicated();
        assert_eq!(config.genders, vec![Sex::Female]);
        assert_eq!(config.ranks, vec![Rank::AssocProf]);
    }
}
