//! Excel 报表生成服务
//!
//! 分数写入单元格正文，等级与评语放进单元格批注，不占用表格主体

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, Note, Workbook};
use tracing::info;

use crate::models::{FeedbackTable, ProjectRange, ProjectRecord};

/// 表头填充色
const HEADER_FILL: u32 = 0xFF6600;
/// 列宽在最长内容基础上增加的余量
const COLUMN_MARGIN: usize = 3;

/// 报表文件名：{批次}_Project{起}-{止}_scores.xlsx
pub fn report_file_name(batch_name: &str, range: &ProjectRange) -> String {
    format!(
        "{}_Project{}-{}_scores.xlsx",
        batch_name,
        range.start(),
        range.end()
    )
}

/// 将成绩汇总渲染为内存中的 xlsx 字节流
///
/// # 参数
/// - `table`: 成绩汇总
/// - `range`: 项目编号区间
/// - `author`: 批注作者名
pub fn build_report(table: &FeedbackTable, range: &ProjectRange, author: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Feedback")?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    // 表头：Email + 每个项目一列
    let mut column_widths = vec!["Email".len()];
    worksheet.write_string_with_format(0, 0, "Email", &header_format)?;
    for (offset, project) in range.iter().enumerate() {
        let title = format!("Project {}", project);
        column_widths.push(title.chars().count());
        worksheet.write_string_with_format(0, (offset + 1) as u16, &title, &header_format)?;
    }

    // 数据行：分数为正文，等级与评语为批注
    let fallback = ProjectRecord::not_submitted();
    for (row_offset, student) in table.students.iter().enumerate() {
        let row = (row_offset + 1) as u32;
        worksheet.write_string(row, 0, student.email.as_str())?;
        column_widths[0] = column_widths[0].max(student.email.chars().count());

        for (offset, project) in range.iter().enumerate() {
            let record = student.records.get(&project).unwrap_or(&fallback);
            let column = (offset + 1) as u16;

            worksheet.write_string(row, column, record.score.as_str())?;
            column_widths[offset + 1] = column_widths[offset + 1].max(record.score.chars().count());

            let note = Note::new(format!(
                "Grade: {}\nFeedback:\n{}",
                record.grade, record.feedback
            ))
            .set_author(author);
            worksheet.insert_note(row, column, &note)?;
        }
    }

    // 列宽取该列最长内容加固定余量
    for (column, width) in column_widths.iter().enumerate() {
        worksheet.set_column_width(column as u16, (width + COLUMN_MARGIN) as f64)?;
    }

    let buffer = workbook.save_to_buffer().context("生成 xlsx 字节流失败")?;
    info!("📄 报表生成完成: {} 字节", buffer.len());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    use calamine::{Reader, Xlsx};
    use pretty_assertions::assert_eq;

    use crate::models::NOT_SUBMITTED;

    fn sample_table() -> FeedbackTable {
        let mut table = FeedbackTable::new();

        let mut alice = BTreeMap::new();
        alice.insert(
            1,
            ProjectRecord {
                score: "87".to_string(),
                grade: "B+".to_string(),
                feedback: "Good structure".to_string(),
            },
        );
        alice.insert(2, ProjectRecord::not_submitted());
        alice.insert(3, ProjectRecord::not_submitted());
        table.push("alice@example.com", alice);

        let mut bob = BTreeMap::new();
        for project in 1..=3 {
            bob.insert(project, ProjectRecord::not_submitted());
        }
        table.push("bob@example.com", bob);

        table
    }

    fn cell_grid(buffer: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook = Xlsx::new(Cursor::new(buffer)).expect("报表应是合法的 xlsx");
        let sheet = workbook
            .worksheet_range("Feedback")
            .expect("应存在 Feedback 工作表");

        sheet
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_file_name_encodes_batch_and_range() {
        let range = ProjectRange::new(1, 4).expect("区间应合法");
        assert_eq!(
            report_file_name("DataScience_July2025", &range),
            "DataScience_July2025_Project1-4_scores.xlsx"
        );
    }

    #[test]
    fn test_grid_has_header_plus_one_row_per_student() {
        let range = ProjectRange::new(1, 3).expect("区间应合法");
        let buffer = build_report(&sample_table(), &range, "Nexthikes").expect("报表应能生成");

        let grid = cell_grid(buffer);
        assert_eq!(grid.len(), 3, "表头 + 2 行数据");
        assert_eq!(
            grid[0],
            vec!["Email", "Project 1", "Project 2", "Project 3"]
        );
        assert_eq!(grid[1][0], "alice@example.com");
        assert_eq!(grid[1][1], "87");
        assert_eq!(grid[1][2], NOT_SUBMITTED);
        assert_eq!(grid[2][0], "bob@example.com");
    }

    #[test]
    fn test_building_twice_yields_identical_cells() {
        let range = ProjectRange::new(1, 3).expect("区间应合法");
        let table = sample_table();

        let first = build_report(&table, &range, "Nexthikes").expect("报表应能生成");
        let second = build_report(&table, &range, "Nexthikes").expect("报表应能生成");

        assert_eq!(cell_grid(first), cell_grid(second));
    }

    #[test]
    fn test_missing_record_falls_back_to_sentinel_cell() {
        let mut table = FeedbackTable::new();
        table.push("carol@example.com", BTreeMap::new());

        let range = ProjectRange::new(1, 2).expect("区间应合法");
        let buffer = build_report(&table, &range, "Nexthikes").expect("报表应能生成");

        let grid = cell_grid(buffer);
        assert_eq!(grid[1][1], NOT_SUBMITTED);
        assert_eq!(grid[1][2], NOT_SUBMITTED);
    }
}
