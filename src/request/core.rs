use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

use super::input::{CliInput, HttpInput, Payload, RequestSource};
use super::method::Method;
use crate::error::DispatchError;
use crate::ids::RequestId;

/// Header consulted for a method override.
pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Body field consulted for a method override.
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Header carrying a caller-supplied request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// MIME type reported for every command-line request.
pub const CLI_MIME_TYPE: &str = "cli";

/// Where a request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginKind {
    Http,
    Cli,
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginKind::Http => write!(f, "http"),
            OriginKind::Cli => write!(f, "cli"),
        }
    }
}

/// Canonical view of a request, independent of transport.
///
/// The method is resolved and validated at construction and never changes.
/// The extension is detected at most once; when found it is stripped from
/// the cached path.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    origin: OriginKind,
    method: Method,
    path: String,
    raw_query: Option<String>,
    payload: Payload,
    forced_format: Option<String>,
    headers: HashMap<String, String>,
    secure: bool,
    script_path: Option<String>,
    // None until detection has run
    extension: Option<Option<String>>,
}

impl RequestContext {
    /// Build a context from transport data.
    ///
    /// `payload` replaces the payload the transport would supply; `method`
    /// takes precedence over every other method source.
    ///
    /// # Errors
    ///
    /// `UnsupportedMethod` when the resolved method is outside the supported set.
    pub fn new(
        source: RequestSource,
        payload: Option<Payload>,
        method: Option<&str>,
    ) -> Result<Self, DispatchError> {
        let method = resolve_method(&source, method)?;
        let ctx = match source {
            RequestSource::Http(input) => {
                let payload = payload.unwrap_or_else(|| input.merged_params());
                RequestContext {
                    request_id: RequestId::from_header_or_new(
                        input.get_header(REQUEST_ID_HEADER),
                    ),
                    origin: OriginKind::Http,
                    method,
                    path: normalize_path(&decode_path(&input.path)),
                    raw_query: input.query_string,
                    payload,
                    forced_format: None,
                    headers: input.headers,
                    secure: input.secure,
                    script_path: input.script_path,
                    extension: None,
                }
            }
            RequestSource::Cli(cli) => {
                let payload = payload.unwrap_or_else(|| cli.payload());
                let raw = cli.query().unwrap_or_default().to_string();
                RequestContext {
                    request_id: RequestId::new(),
                    origin: OriginKind::Cli,
                    method,
                    path: normalize_path(&decode_path(&raw)),
                    raw_query: Some(raw),
                    payload,
                    forced_format: cli.format().map(str::to_string),
                    headers: HashMap::new(),
                    secure: false,
                    script_path: None,
                    extension: None,
                }
            }
        };

        debug!(
            request_id = %ctx.request_id,
            origin = %ctx.origin,
            method = %ctx.method,
            path = %ctx.path,
            payload_keys = ctx.payload.len(),
            "Request normalized"
        );
        Ok(ctx)
    }

    /// Context for an HTTP request using the transport's own payload and method.
    ///
    /// # Errors
    ///
    /// See [`RequestContext::new`].
    pub fn from_http(input: HttpInput) -> Result<Self, DispatchError> {
        Self::new(RequestSource::Http(input), None, None)
    }

    /// Context for a command-line invocation (arguments after the program name).
    ///
    /// # Errors
    ///
    /// See [`RequestContext::new`].
    pub fn from_cli<I, S>(args: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(RequestSource::Cli(CliInput::new(args)), None, None)
    }

    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    #[must_use]
    pub fn origin(&self) -> OriginKind {
        self.origin
    }

    #[must_use]
    pub fn from_cli_origin(&self) -> bool {
        self.origin == OriginKind::Cli
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    #[must_use]
    pub fn is(&self, method: Method) -> bool {
        self.method == method
    }

    /// Normalized, decoded path. Loses its extension once one is detected.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn raw_query(&self) -> Option<&str> {
        self.raw_query.as_deref()
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    #[must_use]
    pub fn payload_value(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Explicitly requested format: forced CLI format, then the `format` field.
    #[must_use]
    pub fn format(&self) -> Option<String> {
        if let Some(forced) = &self.forced_format {
            return Some(forced.clone());
        }
        match self.payload.get("format")? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Whether extension detection has already run.
    #[must_use]
    pub fn extension_checked(&self) -> bool {
        self.extension.is_some()
    }

    /// Detect (once) and return the path extension.
    ///
    /// When a raw query string is present the candidate is only accepted if
    /// it can be found there, so dotted identifiers such as `/keys/a.b` are
    /// left alone. Without a query string the candidate is accepted.
    pub fn extension(&mut self) -> Option<&str> {
        if self.extension.is_none() {
            let detected = detect_extension(&self.path, self.raw_query.as_deref());
            let ext = detected.map(|(base, ext)| {
                self.path = normalize_path(&base);
                ext
            });
            debug!(
                request_id = %self.request_id,
                extension = ?ext,
                path = %self.path,
                "Extension detection complete"
            );
            self.extension = Some(ext);
        }
        self.extension.as_ref().and_then(|e| e.as_deref())
    }

    /// First type of the `Accept` header without parameters; `cli` for CLI requests.
    #[must_use]
    pub fn mime_type(&self) -> Option<String> {
        if self.from_cli_origin() {
            return Some(CLI_MIME_TYPE.to_string());
        }
        let accept = self.header("accept")?;
        let first = accept.split(',').next().unwrap_or_default();
        let bare = first.split(';').next().unwrap_or_default().trim();
        (!bare.is_empty()).then(|| bare.to_string())
    }

    /// Format to render with: explicit format, then extension, then MIME type.
    pub fn negotiated_format(&mut self) -> Option<String> {
        if let Some(format) = self.format() {
            return Some(format);
        }
        if let Some(ext) = self.extension() {
            return Some(ext.to_string());
        }
        self.mime_type()
    }

    /// Public URL of the application entry point, always ending in `/`.
    ///
    /// `None` for CLI requests or when no `Host` header was sent.
    #[must_use]
    pub fn site_url(&self) -> Option<String> {
        if self.from_cli_origin() {
            return None;
        }
        let host = self.header("host")?;
        let scheme = if self.secure { "https" } else { "http" };
        let script = self.script_path.as_deref().unwrap_or("/");
        let mount = if self.path == "/" {
            script
        } else {
            script.strip_suffix(self.path.as_str()).unwrap_or(script)
        };
        let mut url = format!("{scheme}://{host}");
        if !mount.starts_with('/') {
            url.push('/');
        }
        url.push_str(mount);
        if !url.ends_with('/') {
            url.push('/');
        }
        Some(url)
    }

    /// Directory portion of [`site_url`](Self::site_url), used for asset links.
    #[must_use]
    pub fn site_path(&self) -> Option<String> {
        let site_url = self.site_url()?;
        let base = url::Url::parse(site_url.trim_end_matches('/')).ok()?;
        base.join("./").ok().map(|u| u.to_string())
    }
}

fn resolve_method(source: &RequestSource, explicit: Option<&str>) -> Result<Method, DispatchError> {
    let raw = match (explicit, source) {
        (Some(m), _) => m,
        (None, RequestSource::Http(input)) => input
            .body
            .get(METHOD_OVERRIDE_FIELD)
            .map(String::as_str)
            .or_else(|| input.get_header(METHOD_OVERRIDE_HEADER))
            .unwrap_or(input.method.as_str()),
        (None, RequestSource::Cli(cli)) => cli.method().unwrap_or("GET"),
    };
    raw.parse()
}

/// Percent-decode a raw path component. Applied exactly once, at ingestion.
#[must_use]
pub fn decode_path(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

/// Canonical path shape: leading `/`, no trailing `/` except for the root.
///
/// Idempotent. Does not decode.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Returns `(path without extension, extension)` when the final `.`/`_`
/// segment is a genuine extension.
fn detect_extension(path: &str, raw_query: Option<&str>) -> Option<(String, String)> {
    let idx = path.rfind(['.', '_'])?;
    let ext = &path[idx + 1..];
    if ext.is_empty() || ext.contains('/') {
        return None;
    }
    let base = &path[..idx];
    if let Some(query) = raw_query {
        let probe = format!("{base}.{ext}");
        if !query.contains(probe.trim_start_matches('/')) {
            return None;
        }
    }
    Some((base.to_string(), ext.to_string()))
}
