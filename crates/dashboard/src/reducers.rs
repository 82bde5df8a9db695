//! Salary-specific reducers.
//!
//! Each accumulator reports 0 for its ratio when the denominator is zero,
//! and every remove that brings the denominator to zero clears the
//! numerator too.

use equity_core::{Rank, SalaryRecord, Sex};
use equity_incremental::{Average, Reducer};

/// Salary as an aggregate input. Records without a salary are skipped.
pub fn salary_of(record: &SalaryRecord) -> Option<u64> {
    record.salary.map(u64::from)
}

/// Average salary reducer.
pub type AverageSalary = Average<fn(&SalaryRecord) -> Option<u64>>;

/// Creates the average-salary reducer.
pub fn average_salary() -> AverageSalary {
    Average::new(salary_of as fn(&SalaryRecord) -> Option<u64>)
}

/// Records of one gender, and how many of them are full professors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfessorShare {
    pub count: u64,
    pub are_prof: u64,
}

impl ProfessorShare {
    /// Fraction of professors, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.are_prof as f64 / self.count as f64
        }
    }
}

/// Share of full professors among the records of one gender.
#[derive(Clone, Copy, Debug)]
pub struct PercentProfessors {
    sex: Sex,
}

impl PercentProfessors {
    pub fn new(sex: Sex) -> Self {
        Self { sex }
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }
}

impl Reducer<SalaryRecord> for PercentProfessors {
    type Acc = ProfessorShare;

    fn init(&self) -> ProfessorShare {
        ProfessorShare::default()
    }

    fn add(&self, acc: &mut ProfessorShare, record: &SalaryRecord) {
        if record.sex == self.sex {
            acc.count += 1;
            if record.is_professor() {
                acc.are_prof += 1;
            }
        }
    }

    fn remove(&self, acc: &mut ProfessorShare, record: &SalaryRecord) {
        if record.sex == self.sex {
            acc.count = acc.count.saturating_sub(1);
            if acc.count == 0 {
                acc.are_prof = 0;
            } else if record.is_professor() {
                acc.are_prof = acc.are_prof.saturating_sub(1);
            }
        }
    }
}

/// Records in a bucket, and how many of them hold one rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RankShareAcc {
    pub total: u64,
    pub matched: u64,
}

impl RankShareAcc {
    /// Share of the rank as a percentage, in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64 * 100.0
        }
    }
}

/// Counts every record and the ones holding `rank`.
///
/// One instance per rank gives the stacked layers of the rank distribution.
#[derive(Clone, Copy, Debug)]
pub struct RankShare {
    rank: Rank,
}

impl RankShare {
    pub fn new(rank: Rank) -> Self {
        Self { rank }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }
}

impl Reducer<SalaryRecord> for RankShare {
    type Acc = RankShareAcc;

    fn init(&self) -> RankShareAcc {
        RankShareAcc::default()
    }

    fn add(&self, acc: &mut RankShareAcc, record: &SalaryRecord) {
        acc.total += 1;
        if record.rank == self.rank {
            acc.matched += 1;
        }
    }

    fn remove(&self, acc: &mut RankShareAcc, record: &SalaryRecord) {
        acc.total = acc.total.saturating_sub(1);
        if acc.total == 0 {
            acc.matched = 0;
        } else if record.rank == self.rank {
            acc.matched = acc.matched.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(sex: Sex, rank: Rank, salary: Option<u32>) -> SalaryRecord {
        SalaryRecord::new("A", sex, rank).with_salary(salary)
    }

    #[test]
    fn test_average_salary() {
        let reducer = average_salary();
        let low = rec(Sex::Female, Rank::Prof, Some(100));
        let high = rec(Sex::Female, Rank::Prof, Some(300));
        let mut acc = reducer.init();

        reducer.add(&mut acc, &low);
        reducer.add(&mut acc, &high);
        assert_eq!(acc.value(), 200.0);

        reducer.remove(&mut acc, &high);
        assert_eq!(acc.value(), 100.0);

        reducer.remove(&mut acc, &low);
        assert_eq!(acc.value(), 0.0);
        assert_eq!(acc.total, 0);
    }

    #[test]
    fn test_average_salary_skips_missing() {
        let reducer = average_salary();
        let mut acc = reducer.init();
        reducer.add(&mut acc, &rec(Sex::Male, Rank::Prof, None));
        reducer.add(&mut acc, &rec(Sex::Male, Rank::Prof, Some(50)));
        assert_eq!(acc.count, 1);
        assert_eq!(acc.value(), 50.0);
    }

    #[test]
    fn test_percent_professors() {
        let reducer = PercentProfessors::new(Sex::Female);
        let mut acc = reducer.init();
        reducer.add(&mut acc, &rec(Sex::Female, Rank::Prof, None));
        reducer.add(&mut acc, &rec(Sex::Female, Rank::AsstProf, None));
        reducer.add(&mut acc, &rec(Sex::Male, Rank::Prof, None));
        assert_eq!(acc, ProfessorShare { count: 2, are_prof: 1 });
        assert_eq!(acc.ratio(), 0.5);
    }

    #[test]
    fn test_percent_professors_empty() {
        let reducer = PercentProfessors::new(Sex::Male);
        assert_eq!(reducer.sex(), Sex::Male);
        let mut acc = reducer.init();
        reducer.add(&mut acc, &rec(Sex::Female, Rank::Prof, None));
        assert_eq!(acc.ratio(), 0.0);
    }

    #[test]
    fn test_rank_share() {
        let reducer = RankShare::new(Rank::Prof);
        assert_eq!(reducer.rank(), Rank::Prof);
        let mut acc = reducer.init();
        for i in 0..10 {
            let rank = if i < 4 { Rank::Prof } else { Rank::AssocProf };
            reducer.add(&mut acc, &rec(Sex::Male, rank, None));
        }
        assert_eq!(acc.percent(), 40.0);

        for i in 0..10 {
            let rank = if i < 4 { Rank::Prof } else { Rank::AssocProf };
            reducer.remove(&mut acc, &rec(Sex::Male, rank, None));
        }
        assert_eq!(acc, RankShareAcc::default());
        assert_eq!(acc.percent(), 0.0);
    }
}
