//! Per-student attendance statistics over a date range.

use chrono::NaiveDate;

use crate::db::repositories::attendance_repository::{AttendanceRepository, StudentStatsRow};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::attendance::Scope;
use crate::models::stats::{StatRow, StatsOverview, StatsSummary};

/// Students under this rate (and with data) are flagged.
const ISSUE_RATE_THRESHOLD: i64 = 80;

pub struct StatsService {
    db: DbPool,
}

impl StatsService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Rows come back ordered by display name, the stable order the ranking
    /// helpers preserve across equal rates.
    pub fn build_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        scope: &Scope,
    ) -> AppResult<Vec<StatRow>> {
        if start > end {
            return Err(AppError::validation("start date is after end date"));
        }

        let conn = self.db.get_connection()?;
        let rows = AttendanceRepository::stats_by_student(&conn, scope, &start, &end)?;
        Ok(rows.into_iter().map(stat_row).collect())
    }

    pub fn overview(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        scope: &Scope,
    ) -> AppResult<StatsOverview> {
        let rows = self.build_stats(start, end, scope)?;

        let mut summary = StatsSummary {
            students: rows.len() as i64,
            ..StatsSummary::default()
        };
        for row in &rows {
            summary.present_count += row.present_count;
            summary.absent_count += row.absent_count;
            summary.late_count += row.late_count;
            summary.excused_count += row.excused_count;
            summary.total_records += row.total_records;
        }
        summary.overall_rate = attendance_rate(summary.present_count, summary.total_records);

        Ok(StatsOverview { rows, summary })
    }

    /// Best attendance first; ties keep the incoming (name) order.
    pub fn top_performers(rows: &[StatRow], limit: usize) -> Vec<StatRow> {
        let mut ranked = rows.to_vec();
        ranked.sort_by(|a, b| b.rate.cmp(&a.rate));
        ranked.truncate(limit);
        ranked
    }

    /// Students with a rate under the threshold and at least one record.
    /// No data is no data, not an issue.
    pub fn attendance_issues(rows: &[StatRow]) -> Vec<StatRow> {
        let mut flagged: Vec<StatRow> = rows
            .iter()
            .filter(|row| row.rate < ISSUE_RATE_THRESHOLD && row.total_records > 0)
            .cloned()
            .collect();
        flagged.sort_by(|a, b| a.rate.cmp(&b.rate));
        flagged
    }
}

fn stat_row(row: StudentStatsRow) -> StatRow {
    let rate = attendance_rate(row.present_count, row.total_records);
    StatRow {
        student_id: row.student_id,
        student_name: row.student_name,
        class_id: row.class_id,
        present_count: row.present_count,
        absent_count: row.absent_count,
        late_count: row.late_count,
        excused_count: row.excused_count,
        total_records: row.total_records,
        rate,
    }
}

fn attendance_rate(present: i64, total: i64) -> i64 {
    if total > 0 {
        ((present as f64 / total as f64) * 100.0).round() as i64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, present: i64, total: i64) -> StatRow {
        StatRow {
            student_id: format!("id-{name}"),
            student_name: name.to_string(),
            class_id: None,
            present_count: present,
            absent_count: total - present,
            late_count: 0,
            excused_count: 0,
            total_records: total,
            rate: attendance_rate(present, total),
        }
    }

    #[test]
    fn rate_is_rounded_and_bounded() {
        assert_eq!(attendance_rate(18, 20), 90);
        assert_eq!(attendance_rate(1, 3), 33);
        assert_eq!(attendance_rate(2, 3), 67);
        assert_eq!(attendance_rate(0, 0), 0);
        assert_eq!(attendance_rate(5, 5), 100);
    }

    #[test]
    fn top_performers_is_stable_on_ties() {
        let rows = vec![row("aviva", 9, 10), row("batya", 10, 10), row("chana", 9, 10)];
        let top = StatsService::top_performers(&rows, 2);
        assert_eq!(top[0].student_name, "batya");
        assert_eq!(top[1].student_name, "aviva");
    }

    #[test]
    fn issues_exclude_no_data_and_good_rates() {
        let rows = vec![
            row("aviva", 18, 20), // 90, fine
            row("batya", 7, 10),  // 70, flagged
            row("chana", 0, 0),   // no data
            row("dina", 5, 10),   // 50, flagged first
        ];
        let issues = StatsService::attendance_issues(&rows);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].student_name, "dina");
        assert_eq!(issues[1].student_name, "batya");
    }
}
