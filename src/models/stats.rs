use serde::{Deserialize, Serialize};

/// Per-student attendance tallies over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRow {
    pub student_id: String,
    pub student_name: String,
    pub class_id: Option<String>,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
    pub total_records: i64,
    /// `round(present / totalRecords * 100)`, 0 when nothing is recorded.
    pub rate: i64,
}

/// Roll-up across all students of a stats query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub students: i64,
    pub present_count: i64,
    pub absent_count: i64,
    pub late_count: i64,
    pub excused_count: i64,
    pub total_records: i64,
    pub overall_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsOverview {
    pub rows: Vec<StatRow>,
    pub summary: StatsSummary,
}
