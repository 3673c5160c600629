//! API gateway client
//!
//! [`ApiClient`] is the single outbound path to the backend. It turns typed
//! parameters into a flat query map, delegates the call to a [`Transport`]
//! and decodes the JSON answer. The production transport is
//! [`HttpTransport`](crate::http::HttpTransport); tests plug in their own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::http::HttpTransport;

/// Query string parameters, sorted by name
pub type QueryParams = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional parts of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub params: QueryParams,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn params<P: Serialize + ?Sized>(params: &P) -> Result<Self> {
        Ok(Self {
            params: to_query_params(params)?,
            body: None,
        })
    }

    pub fn body<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Self {
            params: QueryParams::new(),
            body: Some(serde_json::to_value(body).map_err(|e| Error::Validation(e.to_string()))?),
        })
    }
}

/// A fully resolved request handed to a [`Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    pub params: QueryParams,
    pub body: Option<Value>,
}

/// Sends one request and returns the decoded JSON body.
///
/// Implementations fail with [`Error::Network`] when no response arrives and
/// with [`Error::HttpStatus`] for non-2xx answers. An empty 2xx body is
/// returned as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<Value>;
}

/// Flatten a serializable value into query parameters.
///
/// `None` fields are omitted. Strings are taken verbatim, numbers and
/// booleans in their JSON spelling. Nested objects and arrays cannot be
/// expressed in the backend's query syntax and are rejected.
pub fn to_query_params<P: Serialize + ?Sized>(params: &P) -> Result<QueryParams> {
    let value = serde_json::to_value(params).map_err(|e| Error::Validation(e.to_string()))?;

    let fields = match value {
        Value::Null => return Ok(QueryParams::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(Error::Validation(format!(
                "query parameters must be an object, got {other}"
            )))
        }
    };

    let mut out = QueryParams::new();
    for (name, value) in fields {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::Validation(format!(
                    "query parameter '{name}' must be a scalar"
                )))
            }
        };
        out.insert(name, rendered);
    }
    Ok(out)
}

/// Stateless gateway to the backend REST API
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client backed by `reqwest`
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn request(&self, method: Method, path: &str, options: RequestOptions) -> Result<Value> {
        let started = Instant::now();
        let request = ApiRequest {
            method,
            path: path.to_string(),
            params: options.params,
            body: options.body,
        };

        match self.transport.send(request).await {
            Ok(value) => {
                tracing::debug!(
                    method = %method,
                    path,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "API request completed"
                );
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(
                    method = %method,
                    path,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = %err,
                    "API request failed"
                );
                Err(err)
            }
        }
    }

    /// Raw GET, for callers that normalize the body themselves
    pub async fn get_value<P: Serialize + ?Sized>(&self, path: &str, params: &P) -> Result<Value> {
        self.request(Method::Get, path, RequestOptions::params(params)?)
            .await
    }

    pub async fn get<T, P>(&self, path: &str, params: &P) -> Result<T>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        decode(self.get_value(path, params).await?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(
            self.request(Method::Post, path, RequestOptions::body(body)?)
                .await?,
        )
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(
            self.request(Method::Put, path, RequestOptions::body(body)?)
                .await?,
        )
    }

    /// DELETE; the response body is ignored
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request(Method::Delete, path, RequestOptions::default())
            .await
            .map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}
