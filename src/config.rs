use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// 程序配置
///
/// 门户地址等原先写死的常量在这里作为运行时配置暴露：
/// 默认值 → 可选的 TOML 配置文件 → 环境变量逐项覆盖
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 登录页面地址
    pub login_url: String,
    /// 聊天记录地址模板，{email} 为占位符
    pub chat_url_template: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 单次 HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    /// 报表批注的作者名
    pub report_author: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_url: "https://digicrome.org/admin/login".to_string(),
            chat_url_template: "https://digicrome.org/admin/internship/singlechat?search={email}"
                .to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0 Safari/537.36"
                .to_string(),
            http_timeout_secs: 20,
            report_author: "Nexthikes".to_string(),
        }
    }
}

impl Config {
    /// 加载配置：配置文件（如存在）+ 环境变量覆盖
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("SCORE_RECORDER_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("读取配置文件失败: {}", path))?;
            Self::from_toml_str(&content).with_context(|| format!("解析配置文件失败: {}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// 从 TOML 文本解析配置，缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 逐项应用环境变量覆盖
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("LOGIN_URL") {
            self.login_url = v;
        }
        if let Ok(v) = std::env::var("CHAT_URL_TEMPLATE") {
            self.chat_url_template = v;
        }
        if let Ok(v) = std::env::var("USER_AGENT") {
            self.user_agent = v;
        }
        if let Ok(v) = std::env::var("HTTP_TIMEOUT_SECS") {
            if let Ok(n) = v.parse() {
                self.http_timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("REPORT_AUTHOR") {
            self.report_author = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert!(config.login_url.ends_with("/admin/login"));
        assert!(config.chat_url_template.contains("{email}"));
        assert_eq!(config.http_timeout_secs, 20);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            login_url = "http://localhost:8080/admin/login"
            http_timeout_secs = 5
            "#,
        )
        .expect("TOML 应能解析");

        assert_eq!(config.login_url, "http://localhost:8080/admin/login");
        assert_eq!(config.http_timeout_secs, 5);
        // 未覆盖的字段保持默认值
        assert_eq!(config.report_author, "Nexthikes");
    }
}
