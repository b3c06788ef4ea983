use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_MAX_STUDENTS: i32 = 40;

// 班级实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct Class {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub section: String,
    pub academic_year: String,
    pub class_teacher_id: Option<i64>,
    pub max_students: i32,
    pub room_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Class {
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.name, self.section)
    }
}

// 关联展示用的精简班级信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "class.ts")]
pub struct ClassBrief {
    pub id: i64,
    pub name: String,
    pub section: String,
}

impl From<&Class> for ClassBrief {
    fn from(class: &Class) -> Self {
        Self {
            id: class.id,
            name: class.name.clone(),
            section: class.section.clone(),
        }
    }
}
