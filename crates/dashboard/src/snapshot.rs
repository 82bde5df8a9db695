//! Ready-to-draw widget values.
//!
//! A `DashboardSnapshot` is a plain copy of every widget's `(key, value)`
//! pairs at one point in time. It holds no handles into the engine, so a
//! renderer may keep it across later selections.

use core::fmt;
use equity_core::{Rank, Sex};

/// The discipline dropdown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectMenu {
    /// Every discipline with its record count, in ascending order.
    pub options: Vec<(String, u64)>,
    pub selected: Option<String>,
}

/// A single percentage display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberDisplay {
    pub sex: Sex,
    /// Fraction in `[0, 1]`.
    pub value: f64,
}

impl NumberDisplay {
    /// Formats the value as a percentage with two decimals.
    pub fn formatted(&self) -> String {
        format!("{:.2}%", self.value * 100.0)
    }
}

/// A bar chart over `sex`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarChart<V> {
    pub bars: Vec<(Sex, V)>,
    pub selected: Option<Sex>,
}

impl<V: Copy> BarChart<V> {
    /// Returns the bar for one gender.
    pub fn value(&self, sex: Sex) -> Option<V> {
        self.bars.iter().find(|(key, _)| *key == sex).map(|(_, v)| *v)
    }
}

/// One rank's layer of the stacked chart. Values are percentages.
#[derive(Clone, Debug, PartialEq)]
pub struct StackLayer {
    pub rank: Rank,
    pub bars: Vec<(Sex, f64)>,
}

/// Rank distribution by gender, one layer per rank.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StackedBarChart {
    pub layers: Vec<StackLayer>,
    pub selected: Option<Sex>,
}

impl StackedBarChart {
    /// Returns the layer of one rank.
    pub fn layer(&self, rank: Rank) -> Option<&StackLayer> {
        self.layers.iter().find(|layer| layer.rank == rank)
    }
}

/// A scatter point; `count` records share its coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScatterPoint {
    pub x: u32,
    pub salary: u32,
    pub rank: Rank,
    pub sex: Sex,
    pub count: u64,
}

impl ScatterPoint {
    /// The hover label of the point.
    pub fn title(&self) -> String {
        format!("{} earned {}", self.rank, self.salary)
    }
}

impl fmt::Display for ScatterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {} {} x{}", self.x, self.salary, self.rank, self.sex, self.count)
    }
}

/// Salary against a years metric.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterPlot {
    /// Smallest and largest metric value shown on the x axis.
    pub x_domain: Option<(u32, u32)>,
    /// Points with at least one visible record, in key order.
    pub points: Vec<ScatterPoint>,
}

impl ScatterPlot {
    /// Number of records behind the visible points.
    pub fn record_count(&self) -> u64 {
        self.points.iter().map(|point| point.count).sum()
    }
}

/// Every widget of the dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub discipline_selector: SelectMenu,
    /// One display per configured gender, in configuration order.
    pub percent_professors: Vec<NumberDisplay>,
    pub gender_balance: BarChart<u64>,
    pub average_salary: BarChart<f64>,
    pub rank_distribution: StackedBarChart,
    pub service_salary: ScatterPlot,
    pub phd_salary: ScatterPlot,
    pub active_records: usize,
    pub total_records: usize,
}

impl DashboardSnapshot {
    /// Returns the percent-professors display of one gender.
    pub fn percent_professors_of(&self, sex: Sex) -> Option<&NumberDisplay> {
        self.percent_professors.iter().find(|display| display.sex == sex)
    }
}
