//! Log records and call-argument normalization
//!
//! Every leveled call carries an ordered list of [`CallArg`]s. The
//! normalizer reduces that list to exactly one `(message, metadata)`
//! pair, expanding error values and collecting stray arguments so that
//! nothing the caller passed is silently dropped.

use super::log_level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed metadata map attached to every record.
pub type Metadata = Map<String, Value>;

/// Metadata key collecting trailing arguments that are not a single map.
pub const ARGS_KEY: &str = "args";

/// Metadata key carrying an expanded leading error value.
pub const ERROR_KEY: &str = "error";

/// A structured log record, constructed per accepted call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: Metadata,
}

impl LogRecord {
    pub fn new(level: Level, message: String, metadata: Metadata) -> Self {
        Self {
            level,
            message,
            timestamp: Utc::now(),
            metadata,
        }
    }
}

/// Captured form of an error value: type name, display text and the
/// display text of each source in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
    pub chain: Vec<String>,
}

impl ErrorDetail {
    pub fn capture<E: std::error::Error + ?Sized>(err: &E) -> Self {
        let full = std::any::type_name::<E>();
        let name = full.rsplit("::").next().unwrap_or(full).to_string();

        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }

        Self {
            name,
            message: err.to_string(),
            chain,
        }
    }

    /// JSON form stored in record metadata.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::String(self.message.clone()))
    }
}

/// One argument of a leveled call.
#[derive(Debug, Clone)]
pub enum CallArg {
    /// Plain text; used verbatim as the message when leading.
    Text(String),
    /// A plain key-value map; merged into metadata when it is the only
    /// trailing argument.
    Map(Metadata),
    /// A captured error value.
    Error(ErrorDetail),
    /// Any other JSON-representable value.
    Value(Value),
}

impl CallArg {
    /// Capture an error value as a call argument.
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        CallArg::Error(ErrorDetail::capture(err))
    }

    /// JSON form used inside the trailing `args` list.
    fn into_value(self) -> Value {
        match self {
            CallArg::Text(text) => Value::String(text),
            CallArg::Map(map) => Value::Object(map),
            CallArg::Error(detail) => detail.to_value(),
            CallArg::Value(value) => value,
        }
    }
}

impl From<&str> for CallArg {
    fn from(s: &str) -> Self {
        CallArg::Text(s.to_string())
    }
}

impl From<String> for CallArg {
    fn from(s: String) -> Self {
        CallArg::Text(s)
    }
}

impl From<Metadata> for CallArg {
    fn from(map: Metadata) -> Self {
        CallArg::Map(map)
    }
}

impl From<ErrorDetail> for CallArg {
    fn from(detail: ErrorDetail) -> Self {
        CallArg::Error(detail)
    }
}

impl From<Value> for CallArg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => CallArg::Text(s),
            Value::Object(map) => CallArg::Map(map),
            other => CallArg::Value(other),
        }
    }
}

impl From<bool> for CallArg {
    fn from(b: bool) -> Self {
        CallArg::Value(Value::Bool(b))
    }
}

impl From<i32> for CallArg {
    fn from(i: i32) -> Self {
        CallArg::Value(Value::from(i))
    }
}

impl From<i64> for CallArg {
    fn from(i: i64) -> Self {
        CallArg::Value(Value::from(i))
    }
}

impl From<u64> for CallArg {
    fn from(i: u64) -> Self {
        CallArg::Value(Value::from(i))
    }
}

impl From<f64> for CallArg {
    fn from(f: f64) -> Self {
        CallArg::Value(Value::from(f))
    }
}

/// Conversion accepted by the leveled methods: a single argument, a
/// tuple of arguments, or an explicit `Vec<CallArg>`.
pub trait IntoCallArgs {
    fn into_call_args(self) -> Vec<CallArg>;
}

impl<T: Into<CallArg>> IntoCallArgs for T {
    fn into_call_args(self) -> Vec<CallArg> {
        vec![self.into()]
    }
}

impl IntoCallArgs for () {
    fn into_call_args(self) -> Vec<CallArg> {
        Vec::new()
    }
}

impl IntoCallArgs for Vec<CallArg> {
    fn into_call_args(self) -> Vec<CallArg> {
        self
    }
}

impl<A: Into<CallArg>, B: Into<CallArg>> IntoCallArgs for (A, B) {
    fn into_call_args(self) -> Vec<CallArg> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A: Into<CallArg>, B: Into<CallArg>, C: Into<CallArg>> IntoCallArgs for (A, B, C) {
    fn into_call_args(self) -> Vec<CallArg> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}

impl<A: Into<CallArg>, B: Into<CallArg>, C: Into<CallArg>, D: Into<CallArg>> IntoCallArgs
    for (A, B, C, D)
{
    fn into_call_args(self) -> Vec<CallArg> {
        vec![self.0.into(), self.1.into(), self.2.into(), self.3.into()]
    }
}

/// Output of [`normalize`]: the message and the call-local metadata,
/// before logger-level context and identity are merged in.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCall {
    pub message: String,
    pub metadata: Metadata,
}

/// Reduce an ordered argument list to one `(message, metadata)` pair.
///
/// Rules, in order:
/// 1. Empty list: empty message, empty metadata.
/// 2. Leading error: message is the error text, metadata gains an
///    `error` entry with the expanded detail.
/// 3. Leading text: used verbatim.
/// 4. Any other leading value: compact JSON encoding, degrading to a
///    plain string conversion if encoding fails.
/// 5. Exactly one trailing map merges into metadata with caller keys
///    winning; any other trailing shape is collected under `args` in
///    call order.
///
/// Never panics; any internal failure degrades to a coarser record.
pub fn normalize(args: Vec<CallArg>) -> NormalizedCall {
    let mut metadata = Metadata::new();
    let mut iter = args.into_iter();

    let message = match iter.next() {
        None => String::new(),
        Some(CallArg::Error(detail)) => {
            let text = detail.message.clone();
            metadata.insert(ERROR_KEY.to_string(), detail.to_value());
            text
        }
        Some(CallArg::Text(text)) => text,
        Some(CallArg::Map(map)) => stringify(&Value::Object(map)),
        Some(CallArg::Value(value)) => stringify(&value),
    };

    let rest: Vec<CallArg> = iter.collect();
    if rest.len() == 1 && matches!(rest[0], CallArg::Map(_)) {
        if let Some(CallArg::Map(map)) = rest.into_iter().next() {
            for (key, value) in map {
                metadata.insert(key, value);
            }
        }
    } else if !rest.is_empty() {
        let values: Vec<Value> = rest.into_iter().map(CallArg::into_value).collect();
        metadata.insert(ARGS_KEY.to_string(), Value::Array(values));
    }

    NormalizedCall {
        message: sanitize_message(&message),
        metadata,
    }
}

/// Escape newlines, carriage returns and tabs so a single call cannot
/// forge additional log lines.
fn sanitize_message(message: &str) -> String {
    message
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn stringify(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(list: Vec<CallArg>) -> NormalizedCall {
        normalize(list)
    }

    #[test]
    fn test_empty_call() {
        let call = args(vec![]);
        assert_eq!(call.message, "");
        assert!(call.metadata.is_empty());
    }

    #[test]
    fn test_string_message_verbatim() {
        let call = args(vec!["service ready".into()]);
        assert_eq!(call.message, "service ready");
        assert!(!call.metadata.contains_key(ARGS_KEY));
    }

    #[test]
    fn test_leading_error_expands() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "socket missing");
        let call = args(vec![CallArg::error(&err)]);

        assert_eq!(call.message, "socket missing");
        let detail = call.metadata.get(ERROR_KEY).expect("error entry");
        assert_eq!(detail["name"], "Error");
        assert_eq!(detail["message"], "socket missing");
    }

    #[test]
    fn test_leading_value_serialized() {
        let call = args(vec![json!(42).into()]);
        assert_eq!(call.message, "42");

        let call = args(vec![json!({"code": 7}).into()]);
        assert_eq!(call.message, "{\"code\":7}");
    }

    #[test]
    fn test_single_trailing_map_merges() {
        let call = args(vec!["x".into(), json!({"user": "kim", "attempt": 2}).into()]);
        assert_eq!(call.message, "x");
        assert_eq!(call.metadata["user"], "kim");
        assert_eq!(call.metadata["attempt"], 2);
        assert!(!call.metadata.contains_key(ARGS_KEY));
    }

    #[test]
    fn test_trailing_map_overrides_error_entry() {
        let err = std::io::Error::other("boom");
        let call = args(vec![
            CallArg::error(&err),
            json!({"error": "overridden"}).into(),
        ]);
        assert_eq!(call.metadata[ERROR_KEY], "overridden");
    }

    #[test]
    fn test_multiple_trailing_args_collected() {
        let call = args(vec!["x".into(), json!(1).into(), "two".into()]);
        let list = call.metadata[ARGS_KEY].as_array().expect("args list");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], 1);
        assert_eq!(list[1], "two");
    }

    #[test]
    fn test_single_non_map_trailing_arg_collected() {
        let call = args(vec!["x".into(), json!(99).into()]);
        let list = call.metadata[ARGS_KEY].as_array().expect("args list");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0], 99);
    }

    #[test]
    fn test_trailing_errors_expand_individually() {
        let a = std::io::Error::other("first");
        let b = std::io::Error::other("second");
        let call = args(vec!["x".into(), CallArg::error(&a), CallArg::error(&b)]);

        let list = call.metadata[ARGS_KEY].as_array().expect("args list");
        assert_eq!(list[0]["message"], "first");
        assert_eq!(list[1]["message"], "second");
    }

    #[test]
    fn test_message_sanitized() {
        let call = args(vec!["line\ninjected\tpart".into()]);
        assert_eq!(call.message, "line\\ninjected\\tpart");
    }

    #[test]
    fn test_error_chain_captured() {
        #[derive(Debug)]
        struct Outer(std::io::Error);
        impl std::fmt::Display for Outer {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "outer failure")
            }
        }
        impl std::error::Error for Outer {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let err = Outer(std::io::Error::other("inner cause"));
        let detail = ErrorDetail::capture(&err);
        assert_eq!(detail.name, "Outer");
        assert_eq!(detail.message, "outer failure");
        assert_eq!(detail.chain, vec!["inner cause".to_string()]);
    }

    #[test]
    fn test_normalization_idempotent() {
        let build = || {
            vec![
                CallArg::from("x"),
                json!({"k": [1, 2, 3]}).into(),
                CallArg::from(true),
            ]
        };
        assert_eq!(normalize(build()), normalize(build()));
    }
}
