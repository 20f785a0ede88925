use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    pub class_id: Option<String>,
    pub active: bool,
}

/// Input shape for enrolling a student.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub teacher_id: String,
    #[serde(default)]
    pub class_id: Option<String>,
}
