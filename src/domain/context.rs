//! Per-request data the logger reads from the hosting server.

use axum::http::{Extensions, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Request parameters, keyed by parameter name.
pub type Params = BTreeMap<String, ParamValue>;

/// Capability of record-like values that may appear among request parameters.
///
/// The value filter converts such a value to its plain field mapping before
/// redaction, so every field is subject to the same rules as any other map.
pub trait ToFields: fmt::Debug + Send + Sync {
    fn to_fields(&self) -> Map<String, Value>;
}

/// A single request parameter value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<ParamValue>),
    Map(Params),
    Record(Arc<dyn ToFields>),
}

impl ParamValue {
    /// Wraps any [`ToFields`] implementor.
    pub fn record<T: ToFields + 'static>(record: T) -> Self {
        Self::Record(Arc::new(record))
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Params> for ParamValue {
    fn from(value: Params) -> Self {
        Self::Map(value)
    }
}

impl From<UploadedFile> for ParamValue {
    fn from(value: UploadedFile) -> Self {
        Self::record(value)
    }
}

/// Descriptor of a file received in a multipart upload.
///
/// Serializes as `{content_type, filename, path}`, with `null` for
/// missing parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub content_type: Option<String>,
    pub filename: Option<String>,
    pub path: Option<String>,
}

impl UploadedFile {
    pub fn new(
        content_type: Option<&str>,
        filename: Option<&str>,
        path: Option<&str>,
    ) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            filename: filename.map(str::to_string),
            path: path.map(str::to_string),
        }
    }
}

impl ToFields for UploadedFile {
    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("content_type".into(), self.content_type.clone().into());
        fields.insert("filename".into(), self.filename.clone().into());
        fields.insert("path".into(), self.path.clone().into());
        fields
    }
}

/// Identity of the handler that served a request, rendered as `name#action`.
///
/// Handlers insert it into the response extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerId {
    pub name: Option<String>,
    pub action: Option<String>,
}

impl HandlerId {
    pub fn new(name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            action: Some(action.into()),
        }
    }
}

/// Correlation id attached to a request by an upstream layer.
///
/// Takes precedence over the configured request id header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

/// Extra parameters a handler wants to appear in the `params` field,
/// e.g. a decoded JSON body or upload descriptors.
///
/// Inserted into the response extensions; merged over query parameters.
#[derive(Debug, Clone, Default)]
pub struct LoggedParams(pub Params);

/// Everything the record assembler may read about a request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub method: String,
    pub path: String,
    /// `None` until a response exists.
    pub status: Option<u16>,
    pub headers: HeaderMap,
    pub params: Params,
    pub request_id: Option<String>,
    pub handler: HandlerId,
    /// Only read by caller-supplied extra attribute functions.
    pub extensions: Extensions,
}

impl RequestContext {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Appends a header. Invalid names or values are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_handler(mut self, handler: HandlerId) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }
}
