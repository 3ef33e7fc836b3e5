//! Route parameters - ordered key/value mapping plus merge helpers.

use serde_json::{Map, Value};

/// Ordered parameter mapping (insertion order is kept for query strings).
pub type Params = Map<String, Value>;

/// Build `Params` from key/value pairs.
///
/// ```ignore
/// let params = params([("id", 123.into()), ("slug", "hello".into())]);
/// ```
pub fn params<K, I>(pairs: I) -> Params
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Recursively merge `extra` into `base`.
///
/// - Scalars in `extra` override same-named keys in `base`
/// - Arrays at a shared key are concatenated (`base` first)
/// - Objects at a shared key are merged recursively
pub fn merge(mut base: Params, extra: Params) -> Params {
    merge_into(&mut base, extra);
    base
}

/// In-place variant of [`merge`].
pub fn merge_into(base: &mut Params, extra: Params) {
    for (key, value) in extra {
        match (base.get_mut(&key), value) {
            (Some(Value::Array(existing)), Value::Array(items)) => existing.extend(items),
            (Some(Value::Object(existing)), Value::Object(nested)) => merge_into(existing, nested),
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

/// Prefix every key with `prefix`, keeping order.
///
/// `{id: 1, slug: "a"}` with `p` -> `{pid: 1, pslug: "a"}`
pub fn prefix_keys(params: Params, prefix: &str) -> Params {
    params
        .into_iter()
        .map(|(key, value)| (format!("{prefix}{key}"), value))
        .collect()
}
