//! The dashboard context.
//!
//! `Dashboard` owns the crossfilter over the loaded records, one dimension
//! per filterable widget and the groups behind every widget. Selections are
//! applied through it; each one updates the groups incrementally and then
//! publishes a fresh snapshot to the subscribers.

use crate::config::DashboardConfig;
use crate::reducers::{average_salary, PercentProfessors, ProfessorShare, RankShare, RankShareAcc};
use crate::snapshot::{
    BarChart, DashboardSnapshot, NumberDisplay, ScatterPlot, ScatterPoint, SelectMenu, StackLayer,
    StackedBarChart,
};
use crate::subscription::{SubscriptionId, SubscriptionManager};
use core::fmt;
use equity_core::{Error, Rank, Result, SalaryRecord, Sex};
use equity_dataset::LoadOptions;
use equity_incremental::{AverageAcc, Crossfilter, Dimension, Group, GroupAll};
use hashbrown::HashMap;

/// The widgets that accept a selection.
///
/// Scatter plots are display-only and have no entry here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    DisciplineSelector,
    GenderBalance,
    AverageSalary,
    RankDistribution,
}

impl View {
    /// Every selectable view.
    pub const ALL: [View; 4] = [
        View::DisciplineSelector,
        View::GenderBalance,
        View::AverageSalary,
        View::RankDistribution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::DisciplineSelector => "discipline",
            View::GenderBalance => "gender balance",
            View::AverageSalary => "average salary",
            View::RankDistribution => "rank distribution",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite scatter key: `(metric, salary, rank, sex)`.
type ScatterKey = (u32, u32, Rank, Sex);

type Metric = fn(&SalaryRecord) -> Option<u32>;

/// A salary scatter against one years metric.
struct ScatterView {
    metric: Dimension<u32>,
    points: Group<ScatterKey, u64>,
    /// Extent over the whole dataset, shown when no active record has the
    /// metric.
    full_extent: Option<(u32, u32)>,
}

impl ScatterView {
    fn build(cf: &mut Crossfilter<SalaryRecord>, metric: Metric) -> Result<Self> {
        let dimension = cf.dimension_opt(metric)?;
        let keyed = cf.dimension_opt(move |r: &SalaryRecord| Some((metric(r)?, r.salary?, r.rank, r.sex)))?;
        let points = cf.group(&keyed)?.count();
        let full_extent = cf.extent(&dimension);
        Ok(Self {
            metric: dimension,
            points,
            full_extent,
        })
    }

    fn snapshot(&self, cf: &Crossfilter<SalaryRecord>) -> ScatterPlot {
        let points = self
            .points
            .all()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|((x, salary, rank, sex), count)| ScatterPoint {
                x,
                salary,
                rank,
                sex,
                count,
            })
            .collect();
        ScatterPlot {
            x_domain: cf.extent(&self.metric).or(self.full_extent),
            points,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Selections {
    discipline: Option<String>,
    gender_balance: Option<Sex>,
    average_salary: Option<Sex>,
    rank_distribution: Option<Sex>,
}

/// A cross-filtered salary-equity dashboard over one dataset.
pub struct Dashboard {
    cf: Crossfilter<SalaryRecord>,
    config: DashboardConfig,
    discipline: Dimension<String>,
    disciplines: Group<String, u64>,
    professors: Vec<(Sex, GroupAll<ProfessorShare>)>,
    gender_sex: Dimension<Sex>,
    gender_balance: Group<Sex, u64>,
    salary_sex: Dimension<Sex>,
    average_salary: Group<Sex, AverageAcc>,
    rank_sex: Dimension<Sex>,
    rank_layers: HashMap<Rank, Group<Sex, RankShareAcc>>,
    service: ScatterView,
    phd: ScatterView,
    selections: Selections,
    subscriptions: SubscriptionManager,
}

impl Dashboard {
    /// Builds every widget over the records.
    ///
    /// Fails with `Error::EmptyDataset` when there are no records.
    /// Repeated genders or ranks in the configuration are built once.
    pub fn from_records(records: Vec<SalaryRecord>, config: DashboardConfig) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let config = config.deduplicated();
        let mut cf = Crossfilter::new(records);

        let discipline = cf.dimension(|r: &SalaryRecord| r.discipline.clone())?;
        let disciplines = cf.group(&discipline)?.count();

        let professors = config
            .genders
            .iter()
            .map(|&sex| {
                let reducer = PercentProfessors::new(sex);
                (reducer.sex(), cf.group_all(reducer))
            })
            .collect();

        let gender_sex = cf.dimension(|r: &SalaryRecord| r.sex)?;
        let gender_balance = cf.group(&gender_sex)?.count();

        let salary_sex = cf.dimension(|r: &SalaryRecord| r.sex)?;
        let average_salary = cf.group(&salary_sex)?.reduce(average_salary());

        let rank_sex = cf.dimension(|r: &SalaryRecord| r.sex)?;
        let mut rank_layers = HashMap::new();
        for &rank in &config.ranks {
            let layer = cf.group(&rank_sex)?.reduce(RankShare::new(rank));
            rank_layers.insert(rank, layer);
        }

        let service = ScatterView::build(&mut cf, |r| r.yrs_service)?;
        let phd = ScatterView::build(&mut cf, |r| r.yrs_since_phd)?;

        log::debug!(
            "built dashboard over {} records with {} dimensions",
            cf.size(),
            cf.dimension_count()
        );

        Ok(Self {
            cf,
            config,
            discipline,
            disciplines,
            professors,
            gender_sex,
            gender_balance,
            salary_sex,
            average_salary,
            rank_sex,
            rank_layers,
            service,
            phd,
            selections: Selections::default(),
            subscriptions: SubscriptionManager::new(),
        })
    }

    /// Loads the dataset and builds the dashboard over it.
    ///
    /// Any load failure is returned as is; no partial dashboard is built.
    pub fn load(options: &LoadOptions, config: DashboardConfig) -> Result<Self> {
        let dataset = equity_dataset::load(options)?;
        log::info!("building dashboard from {}", options.path.display());
        Self::from_records(dataset.into_records(), config)
    }

    /// Returns the configuration the dashboard was built with.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns the engine context.
    pub fn crossfilter(&self) -> &Crossfilter<SalaryRecord> {
        &self.cf
    }

    /// Selects a discipline in the dropdown, or clears it with `None`.
    ///
    /// An unknown discipline fails with `Error::InvalidSelection` and leaves
    /// every filter as it was.
    pub fn select_discipline(&mut self, discipline: Option<&str>) -> Result<()> {
        match discipline {
            Some(name) => {
                let known = self.discipline.distinct_keys();
                if known.binary_search_by(|key| key.as_str().cmp(name)).is_err() {
                    return Err(Error::invalid_selection(View::DisciplineSelector.as_str(), name));
                }
                self.cf.filter_exact(&self.discipline, name.to_string())?;
            }
            None => {
                self.cf.clear_filter(&self.discipline)?;
            }
        }
        self.selections.discipline = discipline.map(str::to_string);
        log::debug!("discipline selection: {:?}", discipline);
        self.publish();
        Ok(())
    }

    /// Selects a gender bar in one of the charts over `sex`, or clears the
    /// chart's selection with `None`.
    ///
    /// A gender with no bar in the chart fails with `Error::InvalidSelection`
    /// and leaves every filter as it was.
    pub fn select_gender(&mut self, view: View, sex: Option<Sex>) -> Result<()> {
        let dimension = match view {
            View::GenderBalance => &self.gender_sex,
            View::AverageSalary => &self.salary_sex,
            View::RankDistribution => &self.rank_sex,
            View::DisciplineSelector => {
                let value = sex.map_or("none", |s| s.as_str());
                return Err(Error::invalid_selection(view.as_str(), value));
            }
        };
        if let Some(sex) = sex {
            if dimension.distinct_keys().binary_search(&sex).is_err() {
                return Err(Error::invalid_selection(view.as_str(), sex.as_str()));
            }
        }
        match sex {
            Some(sex) => self.cf.filter_exact(dimension, sex)?,
            None => self.cf.clear_filter(dimension)?,
        };
        match view {
            View::GenderBalance => self.selections.gender_balance = sex,
            View::AverageSalary => self.selections.average_salary = sex,
            View::RankDistribution => self.selections.rank_distribution = sex,
            View::DisciplineSelector => {}
        }
        log::debug!("{} selection: {:?}", view, sex);
        self.publish();
        Ok(())
    }

    /// Clears the selection of one view.
    pub fn clear(&mut self, view: View) -> Result<()> {
        match view {
            View::DisciplineSelector => self.select_discipline(None),
            _ => self.select_gender(view, None),
        }
    }

    /// Clears every selection.
    pub fn filter_all(&mut self) {
        let changes = self.cf.filter_all();
        self.selections = Selections::default();
        log::debug!("reset all selections, {} records re-entered", changes.len());
        self.publish();
    }

    /// Captures the current value of every widget.
    pub fn snapshot(&self) -> DashboardSnapshot {
        let percent_professors = self
            .professors
            .iter()
            .map(|(sex, share)| NumberDisplay {
                sex: *sex,
                value: share.value().ratio(),
            })
            .collect();

        let layers = self
            .config
            .ranks
            .iter()
            .filter_map(|rank| {
                let group = self.rank_layers.get(rank)?;
                Some(StackLayer {
                    rank: *rank,
                    bars: group.values(|acc| acc.percent()),
                })
            })
            .collect();

        DashboardSnapshot {
            discipline_selector: SelectMenu {
                options: self.disciplines.all(),
                selected: self.selections.discipline.clone(),
            },
            percent_professors,
            gender_balance: BarChart {
                bars: self.gender_balance.all(),
                selected: self.selections.gender_balance,
            },
            average_salary: BarChart {
                bars: self.average_salary.values(|acc| acc.value()),
                selected: self.selections.average_salary,
            },
            rank_distribution: StackedBarChart {
                layers,
                selected: self.selections.rank_distribution,
            },
            service_salary: self.service.snapshot(&self.cf),
            phd_salary: self.phd.snapshot(&self.cf),
            active_records: self.cf.active_len(),
            total_records: self.cf.size(),
        }
    }

    /// Registers a callback called with a snapshot after every selection.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DashboardSnapshot) + 'static,
    {
        self.subscriptions.subscribe(callback)
    }

    /// Removes a subscription. Returns false for an unknown ID.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.unsubscribe(id)
    }

    fn publish(&self) {
        if self.subscriptions.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscriptions.notify_all(&snapshot);
    }
}
