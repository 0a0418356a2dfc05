//! 命令行参数定义

use std::path::PathBuf;

use clap::Parser;

use crate::error::AppResult;
use crate::models::ProjectRange;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "score_recorder",
    version,
    about = "从实习聊天记录中提取项目成绩并导出 Excel 报表"
)]
pub struct Cli {
    /// 管理员邮箱
    #[arg(long)]
    pub username: String,

    /// 管理员密码
    #[arg(long)]
    pub password: String,

    /// 批次名称（用于输出文件名）
    #[arg(long)]
    pub batch: String,

    /// 学生邮箱花名册（Excel 文件，必须包含名为 email 的列）
    #[arg(long)]
    pub roster: PathBuf,

    /// 起始项目编号
    #[arg(long, default_value_t = 1)]
    pub start_project: u32,

    /// 结束项目编号
    #[arg(long, default_value_t = 4)]
    pub end_project: u32,

    /// 报表输出目录
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// 校验后的运行参数
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub username: String,
    pub password: String,
    pub batch_name: String,
    pub roster_path: PathBuf,
    pub range: ProjectRange,
    pub output_dir: PathBuf,
}

impl Cli {
    /// 将命令行参数转换为校验后的运行参数
    ///
    /// 项目区间不合法时返回错误，在任何网络请求之前拦截
    pub fn into_run_options(self) -> AppResult<RunOptions> {
        let range = ProjectRange::new(self.start_project, self.end_project)?;

        Ok(RunOptions {
            username: self.username,
            password: self.password,
            batch_name: self.batch,
            roster_path: self.roster,
            range,
            output_dir: self.output_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec![
            "score_recorder",
            "--username",
            "admin@nexthikes.com",
            "--password",
            "secret",
            "--batch",
            "DataScience_July2025",
            "--roster",
            "emails.xlsx",
        ];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).expect("参数应能解析")
    }

    #[test]
    fn test_default_project_range() {
        let options = parse(&[]).into_run_options().expect("默认区间应合法");
        assert_eq!(options.range.start(), 1);
        assert_eq!(options.range.end(), 4);
        assert_eq!(options.batch_name, "DataScience_July2025");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let cli = parse(&["--start-project", "5", "--end-project", "2"]);
        let err = cli.into_run_options().unwrap_err();
        assert!(matches!(err, AppError::InvalidProjectRange { start: 5, end: 2 }));
    }

    #[test]
    fn test_missing_required_argument_rejected() {
        let result = Cli::try_parse_from(["score_recorder", "--username", "a@b.com"]);
        assert!(result.is_err(), "缺少必填参数时应报错");
    }
}
