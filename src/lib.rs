//! # Score Recorder
//!
//! 从实习门户聊天记录中批量提取项目成绩并导出 Excel 报表的工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 会话层（Clients）
//! - `clients/` - 持有稀缺资源（登录会话 Cookie），只暴露请求能力
//! - `PortalClient` - 唯一的会话 owner，提供登录页/登录表单/聊天页请求
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `auth_service` - 登录握手能力（_token 提取 + 成功标志检查）
//! - `chat_service` - 聊天记录抓取与解析能力
//! - `feedback_service` - 分数/等级/评语提取能力
//! - `roster_service` - 花名册读取能力
//! - `report_service` - Excel 报表生成能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量处理器，管理会话和整体流程
//! - `orchestrator/student_processor` - 单个学生处理器，抓取 → 提取
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use cli::{Cli, RunOptions};
pub use clients::PortalClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    FeedbackTable, ProjectRange, ProjectRecord, Roster, StudentFeedback, NOT_SUBMITTED,
};
pub use orchestrator::App;
