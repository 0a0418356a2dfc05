//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用生命周期**：构建门户客户端、登录、收尾统计
//! 2. **输入校验**：在任何网络请求之前读取并校验花名册
//! 3. **顺序处理**：严格按花名册顺序逐个处理。门户只允许单会话，
//!    并发请求会触发反自动化防护，所以不做并发
//! 4. **进度上报**：每处理完一个学生回调一次进度
//! 5. **结果落盘**：生成报表并写入输出目录

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::RunOptions;
use crate::clients::PortalClient;
use crate::config::Config;
use crate::error::AppError;
use crate::models::{FeedbackTable, ProjectRange, Roster};
use crate::orchestrator::student_processor;
use crate::services::{auth_service, report_service, roster_service};

/// 应用主结构
pub struct App {
    config: Config,
    options: RunOptions,
    portal: PortalClient,
}

/// 批次统计
#[derive(Debug, Default)]
pub struct BatchStats {
    /// 抓取到聊天记录的学生数
    pub with_transcript: usize,
    /// 没有聊天记录的学生数
    pub without_transcript: usize,
}

/// 批次处理结果
#[derive(Debug)]
pub struct BatchOutcome {
    pub table: FeedbackTable,
    pub stats: BatchStats,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config, options: RunOptions) -> Result<Self> {
        let portal = PortalClient::new(&config)?;

        Ok(Self {
            config,
            options,
            portal,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        log_startup(&self.options);

        // 读取并校验花名册，在任何网络请求之前完成
        let roster = roster_service::load_roster(&self.options.roster_path)?;
        if roster.is_empty() {
            warn!("⚠️ 花名册中没有邮箱，将生成只含表头的报表");
        }

        // 登录，失败则整体终止，不产生部分结果
        info!("🔄 正在登录门户...");
        let logged_in =
            auth_service::login(&self.portal, &self.options.username, &self.options.password)
                .await?;
        if !logged_in {
            return Err(AppError::LoginFailed.into());
        }
        info!("✅ 登录成功");

        // 逐个处理
        let outcome = process_roster(&self.portal, &roster, &self.options.range, |done, total| {
            log_progress(done, total);
        })
        .await;

        info!("🎉 全部学生处理完成");

        // 生成并写出报表
        let report = report_service::build_report(
            &outcome.table,
            &self.options.range,
            &self.config.report_author,
        )?;
        let path = self.report_path();
        fs::write(&path, &report)
            .with_context(|| format!("写入报表文件失败: {}", path.display()))?;

        print_final_stats(&outcome.stats, roster.len(), &path);

        Ok(())
    }

    /// 报表输出路径
    fn report_path(&self) -> PathBuf {
        self.options.output_dir.join(report_service::report_file_name(
            &self.options.batch_name,
            &self.options.range,
        ))
    }
}

/// 按花名册顺序逐个处理学生，每处理完一个回调一次进度
pub async fn process_roster(
    portal: &PortalClient,
    roster: &Roster,
    range: &ProjectRange,
    mut on_progress: impl FnMut(usize, usize),
) -> BatchOutcome {
    let total = roster.len();
    let mut table = FeedbackTable::new();
    let mut stats = BatchStats::default();

    for (index, email) in roster.iter().enumerate() {
        let result = student_processor::process_student(portal, email, range).await;

        if result.transcript_found {
            stats.with_transcript += 1;
        } else {
            stats.without_transcript += 1;
        }
        table.push(email, result.records);

        on_progress(index + 1, total);
    }

    BatchOutcome { table, stats }
}

// ========== 日志辅助函数 ==========

fn log_startup(options: &RunOptions) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量成绩提取模式");
    info!("📌 批次: {}", options.batch_name);
    info!(
        "📊 项目区间: Project {} - Project {}",
        options.range.start(),
        options.range.end()
    );
    info!("{}", "=".repeat(60));
}

fn log_progress(done: usize, total: usize) {
    let percent = done as f64 / total as f64 * 100.0;
    info!("📊 进度: {}/{} ({:.0}%)", done, total, percent);
}

fn print_final_stats(stats: &BatchStats, total: usize, path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 有聊天记录: {}/{}", stats.with_transcript, total);
    info!("❌ 无聊天记录: {}", stats.without_transcript);
    info!("{}", "=".repeat(60));
    info!("\n📥 报表已保存至: {}", path.display());
}
