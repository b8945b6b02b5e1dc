//! Request building, signing and dispatch
//!
//! Every endpoint wrapper reduces to a [`RequestDescriptor`]. The executor
//! turns it into an HTTP request, attaches a fresh token when the endpoint
//! is private, and classifies the response.

use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Request, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use upbit_auth::{Credentials, QueryParams, RequestSigner};

use crate::error::{RestError, RestResult};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP method used by the exchange API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// POST carries parameters in the body; GET and DELETE in the URL
    fn params_in_body(&self) -> bool {
        matches!(self, Self::Post)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to issue one API call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    pub params: QueryParams,
    pub authenticated: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: QueryParams::new(),
            authenticated: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Mark the request as requiring a signed token
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }
}

/// Sends [`RequestDescriptor`]s to the exchange
///
/// Holds only immutable configuration and is cheap to clone.
#[derive(Clone)]
pub struct RequestExecutor {
    http: Client,
    base_url: String,
    timeout: Option<Duration>,
    credentials: Credentials,
}

impl RequestExecutor {
    /// `timeout` is applied to every request. With `None` the HTTP client's
    /// own timeout, if any, is the only limit.
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        credentials: Credentials,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            timeout,
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Build the HTTP request for `descriptor` without sending it
    ///
    /// The query string (GET, DELETE) or body (POST) is the exact string the
    /// token's `query_hash` was computed over.
    pub fn build_request(&self, descriptor: &RequestDescriptor) -> RestResult<Request> {
        let encoded = if descriptor.params.is_empty() {
            None
        } else {
            Some(descriptor.params.encode()?)
        };

        let mut url = format!("{}{}", self.base_url, descriptor.path);
        if !descriptor.method.params_in_body() {
            if let Some(query) = &encoded {
                url.push('?');
                url.push_str(query);
            }
        }
        let url = Url::parse(&url).map_err(|e| RestError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut builder = self
            .http
            .request(descriptor.method.into(), url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if matches!(descriptor.method, Method::Post | Method::Delete) {
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
        }

        if descriptor.method.params_in_body() {
            builder = builder.body(encoded.unwrap_or_default());
        }

        if descriptor.authenticated {
            let token = RequestSigner::new(&self.credentials).sign(&descriptor.params)?;
            builder = builder.header(AUTHORIZATION, token.bearer());
        }

        Ok(builder.build()?)
    }

    /// Send `descriptor` and return the raw success body
    ///
    /// Statuses >= 400 become [`RestError::Api`] when the body is an Upbit
    /// error envelope and [`RestError::UnexpectedResponse`] otherwise. No
    /// retry is attempted. After a [`RestError::Timeout`] the exchange may
    /// or may not have acted on the request.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> RestResult<Vec<u8>> {
        let request = self.build_request(descriptor)?;

        debug!(
            method = %descriptor.method,
            path = %descriptor.path,
            authenticated = descriptor.authenticated,
            "Sending request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(path = %descriptor.path, status = status.as_u16(), bytes = body.len(), "Received response");

        if status.as_u16() >= 400 {
            let err = RestError::from_response(status.as_u16(), &body);
            warn!(path = %descriptor.path, status = status.as_u16(), error = %err, "Request failed");
            return Err(err);
        }

        Ok(body.to_vec())
    }

    /// Send `descriptor` and decode the JSON body
    pub async fn send<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> RestResult<T> {
        let body = self.execute(descriptor).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> RestResult<T> {
        self.send(&Self::descriptor(Method::Get, path, params, authenticated))
            .await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> RestResult<T> {
        self.send(&Self::descriptor(Method::Post, path, params, authenticated))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> RestResult<T> {
        self.send(&Self::descriptor(Method::Delete, path, params, authenticated))
            .await
    }

    fn descriptor(
        method: Method,
        path: &str,
        params: QueryParams,
        authenticated: bool,
    ) -> RequestDescriptor {
        let descriptor = RequestDescriptor::new(method, path).with_params(params);
        if authenticated {
            descriptor.authenticated()
        } else {
            descriptor
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("credentials", &self.credentials)
            .finish()
    }
}
