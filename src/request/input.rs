use serde_json::Value;
use std::collections::HashMap;

/// Request payload: parameter name → value. Unordered.
pub type Payload = HashMap<String, Value>;

/// Raw transport data a [`RequestContext`](super::RequestContext) is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestSource {
    Http(HttpInput),
    Cli(CliInput),
}

/// HTTP request data as handed over by the transport.
///
/// Header names are stored lowercase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpInput {
    pub method: String,
    /// Raw (still percent-encoded) path component
    pub path: String,
    /// Raw query string, exactly as received, without the leading `?`
    pub query_string: Option<String>,
    pub headers: HashMap<String, String>,
    /// Decoded body fields (form posts)
    pub body: HashMap<String, String>,
    /// Values bound by an upstream route match
    pub route_params: HashMap<String, String>,
    pub secure: bool,
    /// Physical path of the entry script, e.g. `/app/index.php/users`
    pub script_path: Option<String>,
}

impl HttpInput {
    /// Split a request target (`/path?query`) into path and query string.
    #[must_use]
    pub fn new(method: &str, target: &str) -> Self {
        let (path, query_string) = match target.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (target.to_string(), None),
        };
        Self {
            method: method.to_string(),
            path,
            query_string,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    #[must_use]
    pub fn body_field(mut self, name: &str, value: &str) -> Self {
        self.body.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn route_param(mut self, name: &str, value: &str) -> Self {
        self.route_params.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn script_path(mut self, path: &str) -> Self {
        self.script_path = Some(path.to_string());
        self
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Query string, body fields and route values, later sources winning.
    #[must_use]
    pub fn merged_params(&self) -> Payload {
        let mut payload: Payload = self
            .query_string
            .as_deref()
            .map(parse_query_string)
            .unwrap_or_default();
        for (k, v) in self.body.iter().chain(self.route_params.iter()) {
            payload.insert(k.clone(), Value::String(v.clone()));
        }
        payload
    }
}

/// Positional command-line arguments, program name excluded.
///
/// Layout: 1 = method, 2 = query path, 3 = forced format, 4 = query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliInput {
    pub args: Vec<String>,
}

impl CliInput {
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// 1-indexed positional argument.
    #[must_use]
    pub fn arg(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.args.get(i))
            .map(String::as_str)
    }

    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.arg(1)
    }

    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.arg(2)
    }

    /// Forced format. An empty argument is a placeholder, not a format.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.arg(3).filter(|f| !f.is_empty())
    }

    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.arg(4)
    }

    /// The query path becomes a key with an empty value; the query string is merged in.
    #[must_use]
    pub fn payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload.insert(
            self.query().unwrap_or_default().to_string(),
            Value::String(String::new()),
        );
        if let Some(qs) = self.query_string() {
            payload.extend(parse_query_string(qs));
        }
        payload
    }
}

/// Parse `a=1&b=2` into a payload, URL-decoding names and values.
#[must_use]
pub fn parse_query_string(query: &str) -> Payload {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}
