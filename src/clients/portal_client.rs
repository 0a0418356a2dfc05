/// 门户 HTTP 客户端
///
/// 封装所有与门户之间的请求，内部的 Cookie 存储即登录会话
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT_LANGUAGE, REFERER};
use reqwest::Client;

use crate::config::Config;

/// 门户客户端
pub struct PortalClient {
    http: Client,
    login_url: String,
    chat_url_template: String,
}

impl PortalClient {
    /// 根据配置构建客户端
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("构建 HTTP 客户端失败")?;

        Ok(Self {
            http,
            login_url: config.login_url.clone(),
            chat_url_template: config.chat_url_template.clone(),
        })
    }

    /// 拉取登录页面
    pub async fn fetch_login_page(&self) -> Result<String> {
        let response = self
            .http
            .get(&self.login_url)
            .header(REFERER, self.login_url.as_str())
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .with_context(|| format!("访问登录页面失败: {}", self.login_url))?;

        response.text().await.context("读取登录页面内容失败")
    }

    /// 提交登录表单，返回跳转后的页面内容
    pub async fn submit_login(
        &self,
        username: &str,
        password: &str,
        token: &str,
    ) -> Result<String> {
        let form = [("email", username), ("password", password), ("_token", token)];

        let response = self
            .http
            .post(&self.login_url)
            .header(REFERER, self.login_url.as_str())
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .form(&form)
            .send()
            .await
            .with_context(|| format!("提交登录表单失败: {}", self.login_url))?;

        response.text().await.context("读取登录响应内容失败")
    }

    /// 单个学生的聊天记录地址
    pub fn chat_url(&self, email: &str) -> String {
        self.chat_url_template.replace("{email}", email)
    }

    /// 拉取单个学生的聊天记录页面
    pub async fn fetch_chat_page(&self, email: &str) -> Result<String> {
        let url = self.chat_url(email);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("访问聊天记录失败: {}", url))?;

        response.text().await.context("读取聊天记录内容失败")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_substitution() {
        let client = PortalClient::new(&Config::default()).expect("客户端应能构建");
        assert_eq!(
            client.chat_url("alice@example.com"),
            "https://digicrome.org/admin/internship/singlechat?search=alice@example.com"
        );
    }
}
