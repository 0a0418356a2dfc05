//! 成绩提取服务
//!
//! 以 "Project {n}" 标题切分聊天记录，在每个项目自己的正文片段内
//! 独立匹配分数、等级和评语，三个字段互不影响

use std::collections::BTreeMap;

use anyhow::Result;
use regex::Regex;

use crate::models::{ProjectRange, ProjectRecord, NOT_SUBMITTED};

/// 项目标题的统一匹配模式
const PROJECT_HEADER: &str = r"(?i)\bproject\s*(\d+)\b";

/// 从聊天记录中提取区间内每个项目的成绩记录
///
/// # 参数
/// - `transcript`: 聊天记录文本
/// - `range`: 项目编号区间
///
/// # 返回
/// 每个编号恰好一条记录；未匹配到的字段为 "Not Submitted"
pub fn extract_feedback(
    transcript: &str,
    range: &ProjectRange,
) -> Result<BTreeMap<u32, ProjectRecord>> {
    let header_re = Regex::new(PROJECT_HEADER)?;
    let score_re = Regex::new(r"(?i)score[:\s]*([0-9]+)")?;
    let grade_re = Regex::new(r"(?i)grade[:\s]*([a-f][+-]?)")?;
    let feedback_re = Regex::new(r"(?is)feedback[:\s]*(.+)")?;

    // 定位全部项目标题：(标题起点, 正文起点, 项目编号)
    let headers: Vec<(usize, usize, u32)> = header_re
        .captures_iter(transcript)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?.as_str().parse().ok()?;
            Some((whole.start(), whole.end(), number))
        })
        .collect();

    let mut records = BTreeMap::new();
    for project in range.iter() {
        let sections = sections_for(transcript, &headers, project);
        records.insert(
            project,
            ProjectRecord {
                score: first_capture(&sections, &score_re),
                grade: first_capture(&sections, &grade_re),
                feedback: first_capture(&sections, &feedback_re),
            },
        );
    }

    Ok(records)
}

/// 某个项目的全部正文片段：从它自己的标题到下一个任意项目标题之间的文本
fn sections_for<'a>(
    transcript: &'a str,
    headers: &[(usize, usize, u32)],
    project: u32,
) -> Vec<&'a str> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, header)| header.2 == project)
        .map(|(position, header)| {
            let end = headers
                .get(position + 1)
                .map(|next| next.0)
                .unwrap_or(transcript.len());
            &transcript[header.1..end]
        })
        .collect()
}

/// 依次在各片段中查找第一个非空捕获，找不到时退回哨兵值
fn first_capture(sections: &[&str], re: &Regex) -> String {
    sections
        .iter()
        .find_map(|section| {
            re.captures(section)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| NOT_SUBMITTED.to_string())
}
