//! OAuth2 登录服务
//!
//! 标准 authorization-code 流程：
//!
//! 1. `login_url()` 生成供应商授权地址并登记 CSRF state
//! 2. 用户在供应商侧确认后回调 `/api/auth/oauth/callback?code&state`
//! 3. `exchange()` 校验 state、用 code 换取 access token、拉取用户邮箱
//!
//! 成功/失败的最终响应由 API 层的 success/failure handler 决定
//! (签发 JWT 并重定向回前端，或带错误码重定向)。

use std::sync::Arc;

use dashmap::DashMap;
use oauth2::basic::BasicClient;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use url::Url;

use crate::AppError;
use crate::utils::AppResult;
use crate::utils::time::now_millis;
use shared::ErrorCode;

/// Configured OAuth2 client type (auth + token endpoints set)
pub type OAuthClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// CSRF state 有效期
const STATE_TTL_MILLIS: i64 = 10 * 60 * 1000;

/// OAuth2 提供商配置
///
/// 默认值指向 Google；换供应商只需覆盖环境变量。
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub redirect_url: String,
}

impl OAuthConfig {
    pub fn from_env(app_url: &str) -> Self {
        Self {
            client_id: std::env::var("OAUTH_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("OAUTH_CLIENT_SECRET").unwrap_or_default(),
            auth_url: std::env::var("OAUTH_AUTH_URL")
                .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".into()),
            token_url: std::env::var("OAUTH_TOKEN_URL")
                .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".into()),
            userinfo_url: std::env::var("OAUTH_USERINFO_URL")
                .unwrap_or_else(|_| "https://openidconnect.googleapis.com/v1/userinfo".into()),
            redirect_url: std::env::var("OAUTH_REDIRECT_URL")
                .unwrap_or_else(|_| format!("{}/api/auth/oauth/callback", app_url)),
        }
    }

    /// 未配置 client_id 时整个 OAuth 登录入口关闭
    pub fn is_enabled(&self) -> bool {
        !self.client_id.is_empty()
    }
}

/// 供应商 userinfo 响应 (只关心邮箱)
#[derive(Debug, Deserialize)]
struct ProviderUserInfo {
    email: Option<String>,
}

/// OAuth2 登录服务
#[derive(Clone)]
pub struct OAuthService {
    client: Option<OAuthClient>,
    http_client: reqwest::Client,
    userinfo_url: String,
    /// 待校验的 CSRF state → 过期时间戳 (Unix millis)
    pending_states: Arc<DashMap<String, i64>>,
}

impl OAuthService {
    pub fn new(config: &OAuthConfig) -> AppResult<Self> {
        let client = if config.is_enabled() {
            let auth_url = AuthUrl::new(config.auth_url.clone())
                .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
            let token_url = TokenUrl::new(config.token_url.clone())
                .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;
            let redirect_url = RedirectUrl::new(config.redirect_url.clone())
                .map_err(|e| AppError::with_message(ErrorCode::ConfigError, e.to_string()))?;

            Some(
                BasicClient::new(ClientId::new(config.client_id.clone()))
                    .set_client_secret(ClientSecret::new(config.client_secret.clone()))
                    .set_auth_uri(auth_url)
                    .set_token_uri(token_url)
                    .set_redirect_uri(redirect_url),
            )
        } else {
            None
        };

        // 禁用重定向跟随，防止供应商地址被劫持成 SSRF 跳板
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            http_client,
            userinfo_url: config.userinfo_url.clone(),
            pending_states: Arc::new(DashMap::new()),
        })
    }

    fn client(&self) -> AppResult<&OAuthClient> {
        self.client.as_ref().ok_or_else(|| {
            AppError::with_message(ErrorCode::ConfigError, "OAuth2 login is not configured")
        })
    }

    /// 生成授权地址并登记 CSRF state
    pub fn login_url(&self) -> AppResult<Url> {
        let (authorize_url, csrf_state) = self
            .client()?
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("email".to_string()))
            .url();

        self.prune_expired_states();
        self.pending_states
            .insert(csrf_state.secret().clone(), now_millis() + STATE_TTL_MILLIS);

        Ok(authorize_url)
    }

    /// 校验 state 并用授权码换取用户邮箱
    pub async fn exchange(&self, code: String, state: String) -> AppResult<String> {
        // state 一次性消费
        let valid = match self.pending_states.remove(&state) {
            Some((_, expires_at)) => expires_at >= now_millis(),
            None => false,
        };
        if !valid {
            return Err(AppError::new(ErrorCode::OAuthStateMismatch));
        }

        let token = self
            .client()?
            .exchange_code(AuthorizationCode::new(code))
            .request_async(&self.http_client)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "OAuth2 code exchange failed");
                AppError::new(ErrorCode::OAuthExchangeFailed)
            })?;

        self.fetch_email(token.access_token().secret()).await
    }

    /// 使用 access token 拉取供应商档案中的邮箱
    async fn fetch_email(&self, access_token: &str) -> AppResult<String> {
        let user_info = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "OAuth2 userinfo request failed");
                AppError::new(ErrorCode::OAuthExchangeFailed)
            })?
            .json::<ProviderUserInfo>()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "OAuth2 userinfo response malformed");
                AppError::new(ErrorCode::OAuthExchangeFailed)
            })?;

        user_info.email.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OAuthExchangeFailed,
                "Provider profile has no email",
            )
        })
    }

    fn prune_expired_states(&self) {
        let now = now_millis();
        self.pending_states.retain(|_, expires_at| *expires_at >= now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OAuthConfig {
        OAuthConfig {
            client_id: "client".into(),
            client_secret: "secret".into(),
            auth_url: "https://provider.test/auth".into(),
            token_url: "https://provider.test/token".into(),
            userinfo_url: "https://provider.test/userinfo".into(),
            redirect_url: "http://localhost:3000/api/auth/oauth/callback".into(),
        }
    }

    #[test]
    fn test_login_url_carries_state() {
        let service = OAuthService::new(&test_config()).unwrap();
        let url = service.login_url().unwrap();
        assert!(url.as_str().starts_with("https://provider.test/auth"));

        let state = url
            .query_pairs()
            .find(|(k, _)| k == "state")
            .map(|(_, v)| v.to_string())
            .expect("state param present");
        assert!(service.pending_states.contains_key(&state));
    }

    #[tokio::test]
    async fn test_unknown_state_rejected() {
        let service = OAuthService::new(&test_config()).unwrap();
        let err = service
            .exchange("code".into(), "bogus-state".into())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OAuthStateMismatch);
    }

    #[test]
    fn test_disabled_without_client_id() {
        let mut config = test_config();
        config.client_id.clear();
        let service = OAuthService::new(&config).unwrap();
        assert!(service.login_url().is_err());
    }
}
