use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            "excused" => Some(AttendanceStatus::Excused),
            _ => None,
        }
    }
}

/// Which status vocabulary the deployment records. Resolved once at startup;
/// aggregation code is shared between the two.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AttendanceModel {
    /// Boolean present/absent.
    TwoState,
    /// present/absent/late/excused. Subsumes two-state and is the default.
    FourState,
}

impl Default for AttendanceModel {
    fn default() -> Self {
        AttendanceModel::FourState
    }
}

impl AttendanceModel {
    pub fn allows(&self, status: AttendanceStatus) -> bool {
        match self {
            AttendanceModel::FourState => true,
            AttendanceModel::TwoState => matches!(
                status,
                AttendanceStatus::Present | AttendanceStatus::Absent
            ),
        }
    }
}

/// Tenant/ownership filter applied to attendance and enrollment queries.
/// Holiday data is deliberately outside this scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    pub teacher_id: Option<String>,
    pub class_id: Option<String>,
}

impl Scope {
    pub fn teacher(teacher_id: impl Into<String>) -> Self {
        Scope {
            teacher_id: Some(teacher_id.into()),
            class_id: None,
        }
    }

    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = Some(class_id.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub teacher_id: String,
    pub class_id: Option<String>,
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    pub status: AttendanceStatus,
    pub note: Option<String>,
}

/// One student's mark in a day-marking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub student_id: String,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub note: Option<String>,
}
