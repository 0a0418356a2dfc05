pub mod auth_service;
pub mod chat_service;
pub mod feedback_service;
pub mod report_service;
pub mod roster_service;

use anyhow::{anyhow, Result};
use scraper::Selector;

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("解析 CSS 选择器 {} 失败: {}", css, e))
}
