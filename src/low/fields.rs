//! Scalar field population
//!
//! Each low-level type reads its leaf fields through these helpers, naming the
//! source key explicitly. A field whose YAML kind does not match is skipped,
//! or reported as a type mismatch when `strict_types` is set.

use super::base::Positioned;
use super::context::BuildContext;
use crate::error::Error;
use crate::yaml::{Node, NodeKind, Scalar, ScalarTag};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

/// A field type decodable from a single YAML scalar
pub trait FromScalar: Sized {
    /// How the expected kind reads in a type-mismatch error
    const EXPECTED: &'static str;

    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

impl FromScalar for String {
    const EXPECTED: &'static str = "a string";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        (scalar.tag != ScalarTag::Null).then(|| scalar.value.clone())
    }
}

impl FromScalar for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_bool()
    }
}

impl FromScalar for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_i64()
    }
}

impl FromScalar for u64 {
    const EXPECTED: &'static str = "a non-negative integer";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_i64().and_then(|v| u64::try_from(v).ok())
    }
}

impl FromScalar for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_f64()
    }
}

/// Skips a mismatched field, or fails in strict mode
fn mismatch<T>(key: &str, expected: &str, node: &Node, ctx: &BuildContext) -> Result<Option<T>, Error> {
    if ctx.config().strict_types {
        return Err(Error::type_mismatch(key, expected, node));
    }
    trace!(
        target: "strata::fields",
        "skipping '{key}' at {}: expected {expected}, found {}",
        node.position(),
        node.kind_name()
    );
    Ok(None)
}

/// Reads the scalar field `key` of `root`. Absent and null fields are `None`.
///
/// # Errors
///
/// Returns a type mismatch in strict mode when the value has the wrong kind.
pub fn scalar<T: FromScalar>(
    root: &Node,
    key: &str,
    ctx: &BuildContext,
) -> Result<Option<Positioned<T>>, Error> {
    let Some((key_node, value_node)) = root.get_entry(key) else {
        return Ok(None);
    };
    if value_node.is_null() {
        return Ok(None);
    }
    match value_node.scalar().and_then(T::from_scalar) {
        Some(value) => Ok(Some(Positioned::new(
            value,
            Some(key_node.clone()),
            value_node.clone(),
        ))),
        None => mismatch(key, T::EXPECTED, value_node, ctx),
    }
}

/// Reads a sequence of strings, such as `required` or an operation's `tags`
///
/// # Errors
///
/// Returns a type mismatch in strict mode when the value is not a sequence of scalars.
pub fn string_list(
    root: &Node,
    key: &str,
    ctx: &BuildContext,
) -> Result<Option<Positioned<Vec<Positioned<String>>>>, Error> {
    let Some((key_node, value_node)) = root.get_entry(key) else {
        return Ok(None);
    };
    if !value_node.is_sequence() {
        return mismatch(key, "a sequence of strings", value_node, ctx);
    }
    let mut values = Vec::with_capacity(value_node.items().len());
    for item in value_node.items() {
        match item.scalar().and_then(String::from_scalar) {
            Some(value) => values.push(Positioned::new(value, None, item.clone())),
            None if ctx.config().strict_types => {
                return Err(Error::type_mismatch(key, "a sequence of strings", item));
            }
            None => {}
        }
    }
    Ok(Some(Positioned::new(
        values,
        Some(key_node.clone()),
        value_node.clone(),
    )))
}

/// Reads a mapping of strings, such as OAuth scopes or a discriminator mapping
///
/// # Errors
///
/// Returns a type mismatch in strict mode when the value is not a mapping of scalars.
pub fn string_map(
    root: &Node,
    key: &str,
    ctx: &BuildContext,
) -> Result<Option<Positioned<IndexMap<String, Positioned<String>>>>, Error> {
    let Some((key_node, value_node)) = root.get_entry(key) else {
        return Ok(None);
    };
    if !value_node.is_mapping() {
        return mismatch(key, "a mapping of strings", value_node, ctx);
    }
    let mut values = IndexMap::with_capacity(value_node.entries().len());
    for (k, v) in value_node.entries() {
        let entry = k
            .as_str()
            .zip(v.scalar().and_then(String::from_scalar));
        match entry {
            Some((name, value)) => {
                values.insert(
                    name.to_string(),
                    Positioned::new(value, Some(k.clone()), v.clone()),
                );
            }
            None if ctx.config().strict_types => {
                return Err(Error::type_mismatch(key, "a mapping of strings", v));
            }
            None => {}
        }
    }
    Ok(Some(Positioned::new(
        values,
        Some(key_node.clone()),
        value_node.clone(),
    )))
}

/// Reads a free-form value such as `example`, `default` or `value`
#[must_use]
pub fn any_value(root: &Node, key: &str) -> Option<Positioned<Value>> {
    let (key_node, value_node) = root.get_entry(key)?;
    decode_any(value_node).map(|value| Positioned::new(value, Some(key_node.clone()), value_node.clone()))
}

/// Best-effort native decoding: a mapping, then a sequence, then any scalar.
/// Scalars without a JSON form fall back to their text.
#[must_use]
pub fn decode_any(node: &Node) -> Option<Value> {
    match node.kind() {
        NodeKind::Mapping(_) | NodeKind::Sequence(_) => node.to_json(),
        NodeKind::Scalar(scalar) => node
            .to_json()
            .or_else(|| Some(Value::String(scalar.value.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConfig;
    use crate::error::ErrorKind;
    use crate::index::SpecIndex;
    use crate::low::context::CancellationToken;
    use crate::yaml::parse_document;
    use serde_json::json;

    fn context(root: &Node, strict: bool) -> BuildContext {
        BuildContext::new(
            SpecIndex::new(root.clone()),
            BuildConfig {
                strict_types: strict,
                ..BuildConfig::default()
            },
            CancellationToken::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_typed_scalars_with_positions() {
        let root = parse_document(
            "title: Pet\nmaxLength: 10\nminimum: 1.5\nnullable: true\nversion: 1.0\n",
            "",
        )
        .unwrap();
        let ctx = context(&root, false);

        let title = scalar::<String>(&root, "title", &ctx).unwrap().unwrap();
        assert_eq!(title.value, "Pet");
        assert_eq!(title.position().line, 1);
        assert_eq!(title.key_position().unwrap().column, 1);

        assert_eq!(scalar::<u64>(&root, "maxLength", &ctx).unwrap().unwrap().value, 10);
        assert!((scalar::<f64>(&root, "minimum", &ctx).unwrap().unwrap().value - 1.5).abs() < f64::EPSILON);
        assert!(scalar::<bool>(&root, "nullable", &ctx).unwrap().unwrap().value);
        assert_eq!(scalar::<String>(&root, "version", &ctx).unwrap().unwrap().value, "1.0");
        assert!(scalar::<String>(&root, "absent", &ctx).unwrap().is_none());
    }

    #[test]
    fn test_mismatched_kind_is_skipped() {
        let root = parse_document("maxLength: ten\nnullable: [true]\n", "").unwrap();
        let ctx = context(&root, false);
        assert!(scalar::<u64>(&root, "maxLength", &ctx).unwrap().is_none());
        assert!(scalar::<bool>(&root, "nullable", &ctx).unwrap().is_none());
    }

    #[test]
    fn test_strict_mode_reports_mismatch() {
        let root = parse_document("maxLength: ten\n", "").unwrap();
        let ctx = context(&root, true);
        let err = scalar::<u64>(&root, "maxLength", &ctx).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::TypeMismatch));
        assert!(err.to_string().contains("'maxLength' must be a non-negative integer, found a string at line 1 col 12"));
    }

    #[test]
    fn test_string_collections() {
        let root = parse_document(
            "required: [id, name]\nscopes:\n  read: Read access\n  write: Write access\n",
            "",
        )
        .unwrap();
        let ctx = context(&root, false);
        let required = string_list(&root, "required", &ctx).unwrap().unwrap();
        let names: Vec<_> = required.value.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(names, ["id", "name"]);

        let scopes = string_map(&root, "scopes", &ctx).unwrap().unwrap();
        assert_eq!(scopes.value["write"].value, "Write access");
        assert_eq!(scopes.value["write"].position().line, 4);
    }

    #[test]
    fn test_decode_any_tries_each_shape() {
        let root = parse_document(
            "m: {a: 1}\ns: [1, x]\ni: 7\nb: false\nt: text\nn: .nan\n",
            "",
        )
        .unwrap();
        let value = |key: &str| decode_any(root.get(key).unwrap()).unwrap();
        assert_eq!(value("m"), json!({"a": 1}));
        assert_eq!(value("s"), json!([1, "x"]));
        assert_eq!(value("i"), json!(7));
        assert_eq!(value("b"), json!(false));
        assert_eq!(value("t"), json!("text"));
        assert_eq!(value("n"), json!(".nan"));
    }
}
