//! 花名册读取服务

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use tracing::info;

use crate::error::AppError;
use crate::models::Roster;

/// 花名册中的邮箱列名，必须逐字匹配
const EMAIL_COLUMN: &str = "email";

/// 读取花名册 Excel 文件
///
/// # 参数
/// - `path`: 花名册文件路径
///
/// # 返回
/// 按行序排列的邮箱列表；缺少 email 列时返回错误
pub fn load_roster(path: &Path) -> Result<Roster> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("打开花名册失败: {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .context("花名册中没有工作表")?
        .with_context(|| format!("读取花名册工作表失败: {}", path.display()))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(AppError::MissingEmailColumn)?;
    let email_column = header
        .iter()
        .position(|cell| cell.get_string().map(str::trim) == Some(EMAIL_COLUMN))
        .ok_or(AppError::MissingEmailColumn)?;

    let entries: Vec<String> = rows
        .filter_map(|row| row.get(email_column))
        .filter_map(|cell| cell.as_string())
        .map(|email| email.trim().to_string())
        .filter(|email| !email.is_empty())
        .collect();

    info!("📂 花名册读取完成: {} 个邮箱", entries.len());
    Ok(Roster::new(entries))
}
