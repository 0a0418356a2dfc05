//! 单个学生处理器
//!
//! 抓取聊天记录 → 提取成绩；单个学生的任何失败都降级为哨兵记录，
//! 不会中断整个批次

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::clients::PortalClient;
use crate::models::{ProjectRange, ProjectRecord};
use crate::services::{chat_service, feedback_service};
use crate::utils::logging::truncate_text;

/// 单个学生的处理结果
#[derive(Debug)]
pub struct StudentResult {
    /// 区间内每个项目编号恰好一条记录
    pub records: BTreeMap<u32, ProjectRecord>,
    /// 是否抓取到了聊天记录
    pub transcript_found: bool,
}

/// 处理单个学生：抓取聊天记录并提取区间内全部项目的成绩
///
/// # 参数
/// - `portal`: 已登录的门户客户端
/// - `email`: 学生邮箱
/// - `range`: 项目编号区间
pub async fn process_student(
    portal: &PortalClient,
    email: &str,
    range: &ProjectRange,
) -> StudentResult {
    info!("📩 正在处理: {}", email);

    let transcript = match chat_service::fetch_transcript(portal, email).await {
        Ok(transcript) => transcript,
        Err(e) => {
            warn!("⚠️ 获取聊天记录失败，按未提交处理: {} ({})", email, e);
            String::new()
        }
    };

    let transcript_found = !transcript.trim().is_empty();
    if transcript_found {
        debug!("聊天记录预览: {}", truncate_text(&transcript, 120));
    } else {
        warn!("⚠️ 没有聊天记录: {}", email);
    }

    let records = match records_for_transcript(&transcript, range) {
        Ok(records) => records,
        Err(e) => {
            warn!("⚠️ 成绩提取失败，按未提交处理: {} ({})", email, e);
            sentinel_records(range)
        }
    };

    let submitted = records.values().filter(|r| r.is_submitted()).count();
    info!("✓ 提取完成: {}/{} 个项目有提交记录", submitted, range.count());

    StudentResult {
        records,
        transcript_found,
    }
}

/// 根据聊天记录生成成绩记录，空记录时整体填充哨兵值
pub fn records_for_transcript(
    transcript: &str,
    range: &ProjectRange,
) -> anyhow::Result<BTreeMap<u32, ProjectRecord>> {
    if transcript.trim().is_empty() {
        return Ok(sentinel_records(range));
    }

    feedback_service::extract_feedback(transcript, range)
}

/// 区间内每个项目一条 "Not Submitted" 记录
pub fn sentinel_records(range: &ProjectRange) -> BTreeMap<u32, ProjectRecord> {
    range
        .iter()
        .map(|project| (project, ProjectRecord::not_submitted()))
        .collect()
}
