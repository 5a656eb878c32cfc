//! Client configuration and transport layer.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, Proxy};

use crate::error::{Error, Result};

/// 凭据环境变量，按优先级读取。
pub const API_KEY_ENV_VARS: [&str; 3] = ["API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
const DEFAULT_API_VERSION: &str = "v1beta";

/// Gemini 客户端。
///
/// 构造时必须提供 API Key，缺失即失败，之后的任何请求都不会再检查凭据。
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub http: HttpClient,
    pub api_client: ApiClient,
}

/// HTTP 配置。
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub headers: HashMap<String, String>,
    pub base_url: Option<String>,
    pub api_version: Option<String>,
}

impl Client {
    /// 使用 API Key 创建客户端。
    ///
    /// # Errors
    /// 当 API Key 为空或构建 HTTP 客户端失败时返回错误。
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// 从环境变量创建客户端。
    ///
    /// 依次读取 `API_KEY`、`GEMINI_API_KEY`、`GOOGLE_API_KEY`；
    /// `GENAI_BASE_URL`/`GEMINI_BASE_URL` 与 `GENAI_API_VERSION` 可覆盖默认端点。
    ///
    /// # Errors
    /// 当凭据缺失或构建客户端失败时返回错误。
    pub fn from_env() -> Result<Self> {
        ClientBuilder::from_env()?.build()
    }

    /// 创建 Builder。
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// 访问 Models API。
    #[must_use]
    pub fn models(&self) -> crate::models::Models {
        crate::models::Models::new(self.inner.clone())
    }

    /// 当前请求的基础 URL（已规范化，以 `/` 结尾）。
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.api_client.base_url
    }

    /// 当前使用的 API 版本。
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.inner.api_client.api_version
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// 客户端 Builder。
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    http_options: HttpOptions,
}

impl ClientBuilder {
    /// 以环境变量预填 Builder，规则同 [`Client::from_env`]。
    ///
    /// # Errors
    /// 当所有凭据环境变量都缺失或为空时返回错误。
    pub fn from_env() -> Result<Self> {
        let api_key = API_KEY_ENV_VARS
            .iter()
            .find_map(|name| non_empty_env(name))
            .ok_or_else(|| Error::InvalidConfig {
                message: "API_KEY environment variable not set (GEMINI_API_KEY and GOOGLE_API_KEY are also accepted)".into(),
            })?;
        let mut builder = Client::builder().api_key(api_key);
        if let Some(base_url) =
            non_empty_env("GENAI_BASE_URL").or_else(|| non_empty_env("GEMINI_BASE_URL"))
        {
            builder = builder.base_url(base_url);
        }
        if let Some(api_version) = non_empty_env("GENAI_API_VERSION") {
            builder = builder.api_version(api_version);
        }
        Ok(builder)
    }

    /// 设置 API Key。
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// 设置请求超时（秒）。
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.http_options.timeout = Some(secs);
        self
    }

    /// 设置代理。
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.http_options.proxy = Some(url.into());
        self
    }

    /// 增加默认 HTTP 头。
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_options.headers.insert(key.into(), value.into());
        self
    }

    /// 设置自定义基础 URL。
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http_options.base_url = Some(base_url.into());
        self
    }

    /// 设置 API 版本。
    #[must_use]
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.http_options.api_version = Some(api_version.into());
        self
    }

    /// 构建客户端。
    ///
    /// # Errors
    /// 当 API Key 缺失、参数无效或构建 HTTP 客户端失败时返回错误。
    pub fn build(self) -> Result<Client> {
        let Self {
            api_key,
            http_options,
        } = self;

        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::InvalidConfig {
                message: "API key required for Gemini API".into(),
            })?;
        let headers = Self::build_headers(&http_options, &api_key)?;
        let http = Self::build_http_client(&http_options, headers)?;

        let api_client = ApiClient::new(&http_options);

        Ok(Client {
            inner: Arc::new(ClientInner { http, api_client }),
        })
    }

    fn build_headers(http_options: &HttpOptions, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &http_options.headers {
            let name =
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| Error::InvalidConfig {
                    message: format!("Invalid header name: {key}"),
                })?;
            let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidConfig {
                message: format!("Invalid header value for {key}"),
            })?;
            headers.insert(name, value);
        }

        let header_name = HeaderName::from_static("x-goog-api-key");
        if !headers.contains_key(&header_name) {
            let mut header_value =
                HeaderValue::from_str(api_key).map_err(|_| Error::InvalidConfig {
                    message: "Invalid API key value".into(),
                })?;
            header_value.set_sensitive(true);
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn build_http_client(http_options: &HttpOptions, headers: HeaderMap) -> Result<HttpClient> {
        let mut http_builder = HttpClient::builder();
        if let Some(timeout) = http_options.timeout {
            http_builder = http_builder.timeout(Duration::from_secs(timeout));
        }

        if let Some(proxy_url) = &http_options.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| Error::InvalidConfig {
                message: format!("Invalid proxy: {e}"),
            })?;
            http_builder = http_builder.proxy(proxy);
        }

        Ok(http_builder.default_headers(headers).build()?)
    }
}

impl ClientInner {
    /// 发送请求。
    ///
    /// # Errors
    /// 当请求构建或网络请求失败时返回错误。
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        Ok(self.http.execute(request).await?)
    }
}

pub(crate) struct ApiClient {
    pub base_url: String,
    pub api_version: String,
}

impl ApiClient {
    /// 创建 API 客户端配置。
    pub fn new(http_options: &HttpOptions) -> Self {
        let base_url = http_options
            .base_url
            .as_deref()
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), normalize_base_url);
        let api_version = http_options
            .api_version
            .clone()
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());

        Self {
            base_url,
            api_version,
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let mut value = base_url.trim().to_string();
    if !value.ends_with('/') {
        value.push('/');
    }
    value
}
