//! 聊天记录抓取与解析服务
//!
//! 只保留左对齐（学生发出）的消息，右对齐的教务消息按设计排除

use anyhow::Result;
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::clients::PortalClient;
use crate::services::parse_selector;

/// 抓取并解析单个学生的聊天记录
///
/// # 参数
/// - `portal`: 已登录的门户客户端
/// - `email`: 学生邮箱
///
/// # 返回
/// 按页面顺序换行拼接的消息文本；页面中没有聊天容器时返回空字符串
pub async fn fetch_transcript(portal: &PortalClient, email: &str) -> Result<String> {
    let html = portal.fetch_chat_page(email).await?;
    parse_transcript(&html)
}

/// 从聊天页面 HTML 中提取学生消息
pub fn parse_transcript(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let screen_selector = parse_selector("div#chat-screen")?;

    let Some(screen) = document.select(&screen_selector).next() else {
        return Ok(String::new());
    };

    let row_selector = parse_selector(r#"div[style*="text-align"]"#)?;
    let alert_selector = parse_selector("div.alert")?;
    let small_selector = parse_selector("small")?;

    let mut messages = Vec::new();
    for row in screen.select(&row_selector) {
        let style = row.value().attr("style").unwrap_or_default();
        // 左对齐为学生消息，其余跳过
        if !style.contains("left") {
            continue;
        }

        let Some(alert) = row.select(&alert_selector).next() else {
            continue;
        };

        let text = element_text(alert);
        let timestamp = alert
            .select(&small_selector)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty());

        match timestamp {
            Some(ts) => {
                let body = text.replace(&ts, "");
                messages.push(format!("[{}] {}", ts, body.trim()));
            }
            None => messages.push(text),
        }
    }

    debug!("解析出 {} 条学生消息", messages.len());
    Ok(messages.join("\n"))
}

/// 提取元素的可见文本，文本节点之间用单个空格连接
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_container_yields_empty_transcript() {
        let html = "<html><body><p>No chat found</p></body></html>";
        assert_eq!(parse_transcript(html).expect("解析不应失败"), "");
    }

    #[test]
    fn test_only_left_aligned_messages_survive() {
        let html = r#"<div id="chat-screen">
            <div style="text-align: left;"><div class="alert">Project 1 submitted</div></div>
            <div style="text-align: right;"><div class="alert">Please wait for review</div></div>
            <div style="text-align: left;"><div class="alert">Thanks</div></div>
        </div>"#;

        let transcript = parse_transcript(html).expect("解析不应失败");
        assert_eq!(transcript, "Project 1 submitted\nThanks");
    }

    #[test]
    fn test_timestamp_is_stripped_and_prefixed() {
        let html = r#"<div id="chat-screen">
            <div style="text-align: left;">
                <div class="alert">Project 2 done <small>2025-07-01 10:00</small></div>
            </div>
        </div>"#;

        let transcript = parse_transcript(html).expect("解析不应失败");
        assert_eq!(transcript, "[2025-07-01 10:00] Project 2 done");
    }

    #[test]
    fn test_row_without_alert_is_skipped() {
        let html = r#"<div id="chat-screen">
            <div style="text-align: left;"><span>no alert div here</span></div>
            <div style="text-align: left;"><div class="alert">Hello</div></div>
        </div>"#;

        let transcript = parse_transcript(html).expect("解析不应失败");
        assert_eq!(transcript, "Hello");
    }

    #[test]
    fn test_nested_markup_text_is_joined_with_spaces() {
        let html = r#"<div id="chat-screen">
            <div style="text-align: left;">
                <div class="alert"><b>Project 3</b><p>Score: 90</p></div>
            </div>
        </div>"#;

        let transcript = parse_transcript(html).expect("解析不应失败");
        assert_eq!(transcript, "Project 3 Score: 90");
    }
}
