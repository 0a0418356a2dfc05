//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 管理应用生命周期（校验、登录、统计、落盘）
//! - 严格按花名册顺序逐个处理，不做并发
//! - 每个学生处理完后上报一次进度
//!
//! ### `student_processor` - 单个学生处理器
//! - 抓取单个学生的聊天记录
//! - 提取区间内全部项目的成绩
//! - 失败降级为哨兵记录，不中断批次
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Roster)
//!     ↓
//! student_processor (处理单个 email)
//!     ↓
//! services (能力层：auth / chat / feedback / roster / report)
//!     ↓
//! clients (会话层：PortalClient)
//! ```

pub mod batch_processor;
pub mod student_processor;

// 重新导出主要类型
pub use batch_processor::{App, BatchOutcome, BatchStats};
pub use student_processor::{process_student, StudentResult};
