//! Equity Dashboard - Cross-filtered views over the salary dataset.
//!
//! The dashboard builds eight widgets over one shared filter context:
//!
//! - A discipline dropdown (count per discipline)
//! - Percent of professors, once per configured gender
//! - Gender balance (count per sex)
//! - Average salary per sex
//! - Rank distribution per sex, stacked by rank
//! - Salary against years of service, and against years since PhD
//!
//! Selecting a discipline or a gender bar filters every other widget. A
//! widget never filters itself, so the dropdown keeps listing every
//! discipline with its full count. After each selection the dashboard
//! publishes a `DashboardSnapshot` to its subscribers.
//!
//! # Example
//!
//! ```
//! use equity_core::{Rank, SalaryRecord, Sex};
//! use equity_dashboard::{Dashboard, DashboardConfig};
//!
//! let records = vec![
//!     SalaryRecord::new("A", Sex::Female, Rank::Prof).with_salary(Some(100)),
//!     SalaryRecord::new("B", Sex::Female, Rank::AsstProf).with_salary(Some(300)),
//! ];
//! let mut dashboard = Dashboard::from_records(records, DashboardConfig::default())?;
//! assert_eq!(dashboard.snapshot().average_salary.value(Sex::Female), Some(200.0));
//!
//! dashboard.select_discipline(Some("A"))?;
//! assert_eq!(dashboard.snapshot().average_salary.value(Sex::Female), Some(100.0));
//! # Ok::<(), equity_core::Error>(())
//! ```

mod config;
mod dashboard;
pub mod reducers;
mod snapshot;
mod subscription;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, View};
pub use reducers::{PercentProfessors, ProfessorShare, RankShare, RankShareAcc};
pub use snapshot::{
    BarChart, DashboardSnapshot, NumberDisplay, ScatterPlot, ScatterPoint, SelectMenu, StackLayer,
    StackedBarChart,
};
pub use subscription::{SnapshotCallback, SubscriptionId, SubscriptionManager};
