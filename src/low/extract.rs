//! Object, array and map extraction
//!
//! Every extractor finds the child labelled `label` under `root`, resolving
//! `root` first when the whole object is a `$ref`, then resolves the child and
//! builds it. A missing label is `Ok(None)`, never an error.

use super::base::{Buildable, Positioned, PositionedMap};
use super::context::BuildContext;
use super::extensions::is_extension;
use super::locator;
use crate::error::Error;
use crate::yaml::Node;

/// Builds `T` from `node`, resolving it first unless `T` resolves lazily
///
/// # Errors
///
/// Returns an error if the reference cannot be resolved or the build fails.
pub fn build_positioned<T: Buildable>(
    key: Option<&Node>,
    node: &Node,
    ctx: &BuildContext,
) -> Result<Positioned<T>, Error> {
    if !T::RESOLVE_REFERENCES {
        let value = T::build(key, node, ctx)?;
        return Ok(Positioned::new(value, key.cloned(), node.clone()));
    }
    let (target, reference) = locator::resolve(node, ctx)?;
    let value = T::build(key, &target, ctx)?;
    Ok(Positioned::new(value, key.cloned(), target).with_reference(reference))
}

fn find_child(label: &str, root: &Node, ctx: &BuildContext) -> Result<Option<(Node, Node)>, Error> {
    let (root, _) = locator::resolve(root, ctx)?;
    Ok(root
        .get_entry(label)
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone())))
}

fn find_collection(
    label: &str,
    root: &Node,
    ctx: &BuildContext,
) -> Result<Option<(Node, Positioned<Node>)>, Error> {
    let Some((key, value)) = find_child(label, root, ctx)? else {
        return Ok(None);
    };
    let (target, reference) = locator::resolve(&value, ctx)?;
    Ok(Some((
        key.clone(),
        Positioned::new(target.clone(), Some(key), target).with_reference(reference),
    )))
}

/// Non-extension entries of a mapping with their names
fn named_entries<'a>(
    label: &str,
    node: &'a Node,
) -> Result<Vec<(&'a str, &'a Node, &'a Node)>, Error> {
    if !node.is_mapping() {
        return Err(Error::type_mismatch(label, "a mapping", node));
    }
    let mut entries = Vec::with_capacity(node.entries().len());
    for (key, value) in node.entries() {
        let Some(name) = key.as_str() else {
            return Err(Error::type_mismatch(label, "a mapping with scalar keys", key));
        };
        if !is_extension(name) {
            entries.push((name, key, value));
        }
    }
    Ok(entries)
}

/// Builds the object under `label`.
///
/// # Errors
///
/// Returns an error if a reference cannot be resolved or the object fails to build.
pub fn extract_object<T: Buildable>(
    label: &str,
    root: &Node,
    ctx: &BuildContext,
) -> Result<Option<Positioned<T>>, Error> {
    let Some((key, value)) = find_child(label, root, ctx)? else {
        return Ok(None);
    };
    build_positioned(Some(&key), &value, ctx).map(Some)
}

/// Builds every item of the sequence under `label`; the first failing item fails the array.
///
/// # Errors
///
/// Returns a type mismatch if the value is not a sequence, or the first item error.
pub fn extract_array<T: Buildable>(
    label: &str,
    root: &Node,
    ctx: &BuildContext,
) -> Result<Option<Positioned<Vec<Positioned<T>>>>, Error> {
    let Some((_, collection)) = find_collection(label, root, ctx)? else {
        return Ok(None);
    };
    let node = &collection.value;
    if !node.is_sequence() {
        return Err(Error::type_mismatch(label, "a sequence", node));
    }
    let items = node
        .items()
        .iter()
        .map(|item| build_positioned(None, item, ctx))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(collection.map(|_| items)))
}

/// Builds every non-extension entry of the mapping under `label`; the first
/// failing entry fails the map.
///
/// # Errors
///
/// Returns a type mismatch if the value is not a mapping, or the first entry error.
pub fn extract_map<T: Buildable>(
    label: &str,
    root: &Node,
    ctx: &BuildContext,
) -> Result<Option<Positioned<PositionedMap<T>>>, Error> {
    let Some((_, collection)) = find_collection(label, root, ctx)? else {
        return Ok(None);
    };
    let mut built = PositionedMap::new();
    for (name, key, value) in named_entries(label, &collection.value)? {
        built.insert(name.to_string(), build_positioned(Some(key), value, ctx)?);
    }
    Ok(Some(collection.map(|_| built)))
}

/// Like [`extract_map`], but entries are built concurrently and a failing
/// entry is left out with its error recorded in the session.
///
/// # Errors
///
/// Returns an error only when the value under `label` is not a usable mapping.
pub fn extract_map_collected<T: Buildable>(
    label: &str,
    root: &Node,
    ctx: &BuildContext,
) -> Result<Option<Positioned<PositionedMap<T>>>, Error> {
    let Some((_, collection)) = find_collection(label, root, ctx)? else {
        return Ok(None);
    };
    let built = collect_entries(label, &collection.value, ctx)?;
    Ok(Some(collection.map(|_| built)))
}

/// Builds the non-extension entries of `node` itself concurrently, recording
/// failures instead of returning them.
///
/// # Errors
///
/// Returns a type mismatch if `node` is not a mapping with scalar keys.
pub fn collect_entries<T: Buildable>(
    label: &str,
    node: &Node,
    ctx: &BuildContext,
) -> Result<PositionedMap<T>, Error> {
    let entries = named_entries(label, node)?;
    let built = ctx.fan_out(&entries, |(name, key, value)| {
        if ctx.is_cancelled() {
            return None;
        }
        ctx.settle(name, build_positioned(Some(*key), value, ctx))
            .map(|value| ((*name).to_string(), value))
    });
    Ok(built.into_iter().flatten().collect())
}
