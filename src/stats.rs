//! Derived statistics for the dashboard and reports panels.
//!
//! Everything here is a pure function of the current record list and is
//! recomputed on every frame.

use chrono::{Datelike, NaiveDate};

use crate::models::student::{StudentRecord, StudentStatus};

/// Record counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub graduated: usize,
}

impl StatusCounts {
    pub fn from_records(records: &[StudentRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Default::default()
            },
            |mut counts, r| {
                match r.status {
                    StudentStatus::Active => counts.active += 1,
                    StudentStatus::Inactive => counts.inactive += 1,
                    StudentStatus::Graduated => counts.graduated += 1,
                }
                counts
            },
        )
    }

    /// Count for a single status.
    pub fn count(&self, status: StudentStatus) -> usize {
        match status {
            StudentStatus::Active => self.active,
            StudentStatus::Inactive => self.inactive,
            StudentStatus::Graduated => self.graduated,
        }
    }
}

/// Number of records in one grade.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeCount {
    pub grade: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Number of records in one status.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusShare {
    pub status: StudentStatus,
    pub count: usize,
    pub percentage: f64,
}

/// `count / total * 100`, or `0.0` for an empty set.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Count records per grade label, in the order of `labels`.
///
/// Records whose grade is not in `labels` are not counted anywhere but still
/// contribute to the percentage denominator.
pub fn grade_distribution(records: &[StudentRecord], labels: &[&'static str]) -> Vec<GradeCount> {
    labels
        .iter()
        .map(|&grade| {
            let count = records.iter().filter(|r| r.grade == grade).count();
            GradeCount {
                grade,
                count,
                percentage: percentage(count, records.len()),
            }
        })
        .collect()
}

/// Count and share of each status, in `StudentStatus::ALL` order.
pub fn status_breakdown(records: &[StudentRecord]) -> Vec<StatusShare> {
    let counts = StatusCounts::from_records(records);
    StudentStatus::ALL
        .iter()
        .map(|&status| {
            let count = counts.count(status);
            StatusShare {
                status,
                count,
                percentage: percentage(count, counts.total),
            }
        })
        .collect()
}

/// Mean of `current_year - birth_year`, rounded to the nearest whole year
/// with halves rounded up.
///
/// Month and day are ignored, so a student whose birthday has not yet come
/// this year is counted one year older. A birth date in the future yields a
/// negative age, which is reported as is. Returns 0 for an empty set.
pub fn average_age(records: &[StudentRecord], current_year: i32) -> i32 {
    if records.is_empty() {
        return 0;
    }
    let sum: i64 = records
        .iter()
        .map(|r| i64::from(current_year - r.date_of_birth.year()))
        .sum();
    let mean = sum as f64 / records.len() as f64;
    (mean + 0.5).floor() as i32
}

/// The first `n` records in list order.
pub fn recent_enrollments(records: &[StudentRecord], n: usize) -> &[StudentRecord] {
    &records[..records.len().min(n)]
}

/// Everything the dashboard and reports panels display.
#[derive(Debug, Clone)]
pub struct StudentStats {
    pub counts: StatusCounts,
    pub statuses: Vec<StatusShare>,
    pub grades: Vec<GradeCount>,
    pub average_age: i32,
}

impl StudentStats {
    pub fn compute(records: &[StudentRecord], grades: &[&'static str], today: NaiveDate) -> Self {
        Self {
            counts: StatusCounts::from_records(records),
            statuses: status_breakdown(records),
            grades: grade_distribution(records, grades),
            average_age: average_age(records, today.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::grade;
    use crate::seed;

    fn seeded() -> Vec<StudentRecord> {
        seed::default_records().unwrap()
    }

    #[test]
    fn test_status_counts() {
        let mut records = seeded();
        records[0].status = StudentStatus::Graduated;
        records[1].status = StudentStatus::Inactive;

        let counts = StatusCounts::from_records(&records);
        assert_eq!(
            counts,
            StatusCounts {
                total: 3,
                active: 1,
                inactive: 1,
                graduated: 1
            }
        );
    }

    #[test]
    fn test_percentage_empty_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_breakdowns_over_empty_set() {
        let statuses = status_breakdown(&[]);
        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|s| s.count == 0 && s.percentage == 0.0));

        let grades = grade_distribution(&[], &grade::ALL);
        assert_eq!(grades.len(), 4);
        assert!(grades.iter().all(|g| g.percentage == 0.0 && !g.percentage.is_nan()));
    }

    #[test]
    fn test_grade_distribution() {
        let mut records = seeded();
        records[2].grade = grade::TENTH.to_string();

        let dist = grade_distribution(&records, &grade::ALL);
        let counts: Vec<_> = dist.iter().map(|g| (g.grade, g.count)).collect();
        assert_eq!(
            counts,
            [
                (grade::NINTH, 0),
                (grade::TENTH, 2),
                (grade::ELEVENTH, 1),
                (grade::TWELFTH, 0)
            ]
        );
        assert!((dist[1].percentage - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_average_age_year_only() {
        // Born 2008, 2007, 2006 -> ages 18, 19, 20 in 2026.
        assert_eq!(average_age(&seeded(), 2026), 19);
    }

    #[test]
    fn test_average_age_ignores_birthday() {
        let mut records = seeded();
        records.truncate(1);
        records[0].date_of_birth = NaiveDate::from_ymd_opt(2010, 12, 31).unwrap();
        // Still 16 on Jan 1 2026 by year-only subtraction.
        assert_eq!(average_age(&records, 2026), 16);
    }

    #[test]
    fn test_average_age_rounds() {
        let mut records = seeded();
        records.truncate(2);
        // 2008 and 2007 in 2026 -> 18 and 19 -> 18.5 -> 19
        assert_eq!(average_age(&records, 2026), 19);
    }

    #[test]
    fn test_average_age_future_birth_date() {
        let mut records = seeded();
        records.truncate(2);
        records[0].date_of_birth = NaiveDate::from_ymd_opt(2027, 1, 1).unwrap();
        records[1].date_of_birth = NaiveDate::from_ymd_opt(2028, 1, 1).unwrap();
        // -1 and -2 -> -1.5, halves round up -> -1
        assert_eq!(average_age(&records, 2026), -1);

        records.truncate(1);
        assert_eq!(average_age(&records, 2026), -1);
    }

    #[test]
    fn test_average_age_empty() {
        assert_eq!(average_age(&[], 2026), 0);
    }

    #[test]
    fn test_recent_enrollments() {
        let records = seeded();
        assert_eq!(recent_enrollments(&records, 5).len(), 3);
        assert_eq!(recent_enrollments(&records, 2)[1].id, "2");
    }

    #[test]
    fn test_compute_bundle() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let stats = StudentStats::compute(&seeded(), &grade::DASHBOARD, today);
        assert_eq!(stats.counts.active, 3);
        assert_eq!(stats.grades.len(), 3);
        assert_eq!(stats.average_age, 19);
        assert!((stats.statuses[0].percentage - 100.0).abs() < f64::EPSILON);
    }
}
