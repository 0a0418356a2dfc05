use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 未提交时各字段使用的哨兵值
pub const NOT_SUBMITTED: &str = "Not Submitted";

/// 单个项目的成绩记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub score: String,
    pub grade: String,
    pub feedback: String,
}

impl ProjectRecord {
    /// 构造全部字段为哨兵值的记录
    pub fn not_submitted() -> Self {
        Self {
            score: NOT_SUBMITTED.to_string(),
            grade: NOT_SUBMITTED.to_string(),
            feedback: NOT_SUBMITTED.to_string(),
        }
    }

    /// 是否存在任一提取到的字段
    pub fn is_submitted(&self) -> bool {
        self.score != NOT_SUBMITTED || self.grade != NOT_SUBMITTED || self.feedback != NOT_SUBMITTED
    }
}

impl Default for ProjectRecord {
    fn default() -> Self {
        Self::not_submitted()
    }
}

/// 单个学生的全部项目成绩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentFeedback {
    pub email: String,
    /// 按项目编号排序的成绩记录
    pub records: BTreeMap<u32, ProjectRecord>,
}

/// 整个批次的成绩汇总，保持花名册顺序
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackTable {
    pub students: Vec<StudentFeedback>,
}

impl FeedbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, email: impl Into<String>, records: BTreeMap<u32, ProjectRecord>) {
        self.students.push(StudentFeedback {
            email: email.into(),
            records,
        });
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
