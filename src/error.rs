//! 应用程序错误类型

use thiserror::Error;

/// 应用程序错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 项目编号超出允许范围
    #[error("项目编号 {0} 超出允许范围 [1, 20]")]
    ProjectOutOfRange(u32),

    /// 项目区间起止颠倒
    #[error("项目区间无效: 起始编号 {start} 大于结束编号 {end}")]
    InvalidProjectRange { start: u32, end: u32 },

    /// 花名册缺少 email 列
    #[error("花名册中缺少名为 'email' 的列")]
    MissingEmailColumn,

    /// 登录失败
    #[error("登录失败，请检查管理员邮箱和密码")]
    LoginFailed,
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
