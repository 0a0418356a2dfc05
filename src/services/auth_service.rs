//! 登录握手服务
//!
//! 拉取登录页 → 提取一次性 _token → 提交凭据 → 检查成功标志

use anyhow::Result;
use scraper::Html;
use tracing::{debug, warn};

use crate::clients::PortalClient;
use crate::services::parse_selector;

/// 登录门户
///
/// # 参数
/// - `portal`: 门户客户端
/// - `username`: 管理员邮箱
/// - `password`: 管理员密码
///
/// # 返回
/// 登录成功返回 Ok(true)；_token 缺失或响应中没有成功标志时返回 Ok(false)。
/// 只有网络层故障才返回 Err。只尝试一次，不做重试
pub async fn login(portal: &PortalClient, username: &str, password: &str) -> Result<bool> {
    let login_page = portal.fetch_login_page().await?;

    let token = match extract_csrf_token(&login_page)? {
        Some(token) => token,
        None => {
            warn!("⚠️ 登录页面中没有找到 _token 隐藏域");
            return Ok(false);
        }
    };
    debug!("已取得 _token，长度 {}", token.len());

    let body = portal.submit_login(username, password, &token).await?;
    Ok(has_login_markers(&body))
}

/// 从登录页面中提取防伪 _token
pub fn extract_csrf_token(html: &str) -> Result<Option<String>> {
    let document = Html::parse_document(html);
    let selector = parse_selector(r#"input[name="_token"]"#)?;

    Ok(document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string))
}

/// 响应正文中是否出现登录成功标志（dashboard 或 logout）
pub fn has_login_markers(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("dashboard") || lower.contains("logout")
}
