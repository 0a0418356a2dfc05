use serde::{Deserialize, Serialize};

/// 学生邮箱花名册，保持上传文件中的行序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    pub entries: Vec<String>,
}

impl Roster {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
