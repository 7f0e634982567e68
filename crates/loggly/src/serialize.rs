// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Structured values with identity, and their human-readable rendering.
//!
//! [`Value`] models the loosely structured data applications attach to log
//! messages. Mappings are shared handles ([`Mapping`]), so a value graph can
//! refer back to itself the same way object graphs do in dynamic languages.
//! Every walk over the graph keeps the stack of mappings on the active path
//! and stops at the first repeated identity:
//!
//! ```text
//!   {name: "cyclical", cycle: ─┐}      serialize ─> "name=cyclical, cycle=<Circular>"
//!    ^                         │
//!    └─────────────────────────┘
//! ```
//!
//! The `key=value, ...` rendering produced by [`serialize`] is meant for
//! diagnostics. Wire bodies are plain JSON, see [`Value::to_json`].
//!
//! Reference cycles keep their mappings alive; break a cycle with
//! [`Mapping::remove`] when the graph is no longer needed.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::constants::CIRCULAR_MARKER;

/// A structured value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Map(Mapping),
}

/// Ordered, shared mapping from keys to values.
///
/// Cloning a `Mapping` clones the handle: both copies refer to the same
/// entries. Use [`deep_clone`] for an independent copy.
#[derive(Clone, Default)]
pub struct Mapping(Rc<RefCell<Vec<(String, Value)>>>);

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`. A replaced key keeps its position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut entries = self.0.borrow_mut();
        let index = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(index).1)
    }

    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// True when both handles refer to the same mapping.
    #[must_use]
    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn identity(&self) -> Identity {
        Rc::as_ptr(&self.0)
    }
}

impl Drop for Mapping {
    fn drop(&mut self) {
        // Nested mappings are emptied into a worklist instead of recursing.
        if Rc::strong_count(&self.0) != 1 {
            return;
        }
        let mut pending: Vec<Value> = match self.0.try_borrow_mut() {
            Ok(mut entries) => std::mem::take(&mut *entries)
                .into_iter()
                .map(|(_, value)| value)
                .collect(),
            Err(_) => return,
        };
        while let Some(value) = pending.pop() {
            match value {
                Value::Map(mapping) => {
                    if Rc::strong_count(&mapping.0) == 1 {
                        if let Ok(mut entries) = mapping.0.try_borrow_mut() {
                            let entries = std::mem::take(&mut *entries);
                            pending.extend(entries.into_iter().map(|(_, value)| value));
                        }
                    }
                }
                Value::List(items) => pending.extend(items),
                _ => {}
            }
        }
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Mapping")
            .field(&serialize(&Value::Map(self.clone())))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Map(mapping)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => Value::Map(object.into_iter().collect()),
        }
    }
}

impl Value {
    /// Converts to JSON. A mapping that refers back to one of its ancestors
    /// becomes the `"<Circular>"` string.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut builder = JsonBuilder::default();
        walk(self, &mut builder);
        builder.result.unwrap_or(serde_json::Value::Null)
    }
}

type Identity = *const RefCell<Vec<(String, Value)>>;

/// Callbacks of [`walk`], in document order.
trait Visit {
    /// Called for every mapping reached. `circular` is true when the mapping
    /// is one of its own ancestors. Returning false skips its entries and
    /// the matching `leave_map`.
    fn enter_map(&mut self, mapping: &Mapping, circular: bool) -> bool;
    fn key(&mut self, index: usize, key: &str);
    fn leave_map(&mut self);
    fn enter_list(&mut self);
    fn item(&mut self, index: usize);
    fn leave_list(&mut self);
    fn scalar(&mut self, value: &Value);
}

/// Where a list being walked lives: the root value or the value of a
/// mapping entry, then `path` indices down through nested lists.
#[derive(Clone)]
enum Anchor {
    Root,
    Entry(Mapping, usize),
}

enum Frame {
    Map {
        mapping: Mapping,
        next: usize,
    },
    List {
        anchor: Anchor,
        path: Vec<usize>,
        next: usize,
    },
}

enum Found {
    Leaf,
    Map(Mapping),
    List(Anchor, Vec<usize>),
    End,
}

/// Depth-first walk over `root` with the frames kept on the heap, so the
/// nesting depth is bounded by memory rather than by the call stack.
fn walk(root: &Value, visitor: &mut impl Visit) {
    let mut frames = Vec::new();
    let mut ancestors = HashSet::new();

    match root {
        Value::Map(mapping) => enter(mapping.clone(), &mut frames, &mut ancestors, visitor),
        Value::List(_) => {
            visitor.enter_list();
            frames.push(Frame::List {
                anchor: Anchor::Root,
                path: Vec::new(),
                next: 0,
            });
        }
        scalar => visitor.scalar(scalar),
    }

    loop {
        let found = match frames.last_mut() {
            None => break,
            Some(Frame::Map { mapping, next }) => {
                let index = *next;
                *next += 1;
                let entries = mapping.0.borrow();
                let found = match entries.get(index) {
                    None => Found::End,
                    Some((key, value)) => {
                        visitor.key(index, key);
                        child(value, visitor, || Anchor::Entry(mapping.clone(), index), Vec::new())
                    }
                };
                found
            }
            Some(Frame::List { anchor, path, next }) => {
                let index = *next;
                *next += 1;
                with_items(root, anchor, path, |items| match items.get(index) {
                    None => Found::End,
                    Some(item) => {
                        visitor.item(index);
                        let mut item_path = path.clone();
                        item_path.push(index);
                        child(item, visitor, || anchor.clone(), item_path)
                    }
                })
                .unwrap_or(Found::End)
            }
        };

        match found {
            Found::Leaf => {}
            Found::Map(mapping) => enter(mapping, &mut frames, &mut ancestors, visitor),
            Found::List(anchor, path) => {
                visitor.enter_list();
                frames.push(Frame::List {
                    anchor,
                    path,
                    next: 0,
                });
            }
            Found::End => match frames.pop() {
                Some(Frame::Map { mapping, .. }) => {
                    ancestors.remove(&mapping.identity());
                    visitor.leave_map();
                }
                Some(Frame::List { .. }) => visitor.leave_list(),
                None => {}
            },
        }
    }
}

fn enter(
    mapping: Mapping,
    frames: &mut Vec<Frame>,
    ancestors: &mut HashSet<Identity>,
    visitor: &mut impl Visit,
) {
    let identity = mapping.identity();
    let circular = ancestors.contains(&identity);
    if visitor.enter_map(&mapping, circular) && !circular {
        ancestors.insert(identity);
        frames.push(Frame::Map { mapping, next: 0 });
    }
}

fn child(
    value: &Value,
    visitor: &mut impl Visit,
    anchor: impl FnOnce() -> Anchor,
    path: Vec<usize>,
) -> Found {
    match value {
        Value::Map(mapping) => Found::Map(mapping.clone()),
        Value::List(_) => Found::List(anchor(), path),
        scalar => {
            visitor.scalar(scalar);
            Found::Leaf
        }
    }
}

fn with_items<R>(
    root: &Value,
    anchor: &Anchor,
    path: &[usize],
    f: impl FnOnce(&[Value]) -> R,
) -> Option<R> {
    match anchor {
        Anchor::Root => list_at(root, path).map(f),
        Anchor::Entry(mapping, index) => {
            let entries = mapping.0.borrow();
            let (_, value) = entries.get(*index)?;
            let result = list_at(value, path).map(f);
            result
        }
    }
}

fn list_at<'v>(value: &'v Value, path: &[usize]) -> Option<&'v [Value]> {
    let mut current = value;
    for &index in path {
        match current {
            Value::List(items) => current = items.get(index)?,
            _ => return None,
        }
    }
    match current {
        Value::List(items) => Some(items),
        _ => None,
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
    depth: usize,
}

impl Visit for Renderer {
    fn enter_map(&mut self, _mapping: &Mapping, circular: bool) -> bool {
        if circular {
            self.out.push_str(CIRCULAR_MARKER);
            return false;
        }
        if self.depth > 0 {
            self.out.push('{');
        }
        self.depth += 1;
        true
    }

    fn key(&mut self, index: usize, key: &str) {
        if index > 0 {
            self.out.push_str(", ");
        }
        self.out.push_str(key);
        self.out.push('=');
    }

    fn leave_map(&mut self) {
        self.depth -= 1;
        if self.depth > 0 {
            self.out.push('}');
        }
    }

    fn enter_list(&mut self) {
        self.out.push('[');
        self.depth += 1;
    }

    fn item(&mut self, index: usize) {
        if index > 0 {
            self.out.push_str(", ");
        }
    }

    fn leave_list(&mut self) {
        self.depth -= 1;
        self.out.push(']');
    }

    fn scalar(&mut self, value: &Value) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.out.push_str(&n.to_string()),
            Value::String(s) => self.out.push_str(s),
            Value::List(_) | Value::Map(_) => {}
        }
    }
}

enum JsonPart {
    Object(serde_json::Map<String, serde_json::Value>, String),
    Array(Vec<serde_json::Value>),
}

#[derive(Default)]
struct JsonBuilder {
    parts: Vec<JsonPart>,
    result: Option<serde_json::Value>,
}

impl JsonBuilder {
    fn push(&mut self, value: serde_json::Value) {
        match self.parts.last_mut() {
            Some(JsonPart::Object(object, key)) => {
                object.insert(std::mem::take(key), value);
            }
            Some(JsonPart::Array(items)) => items.push(value),
            None => self.result = Some(value),
        }
    }
}

impl Visit for JsonBuilder {
    fn enter_map(&mut self, _mapping: &Mapping, circular: bool) -> bool {
        if circular {
            self.push(serde_json::Value::String(CIRCULAR_MARKER.to_string()));
            return false;
        }
        self.parts
            .push(JsonPart::Object(serde_json::Map::new(), String::new()));
        true
    }

    fn key(&mut self, _index: usize, key: &str) {
        if let Some(JsonPart::Object(_, pending)) = self.parts.last_mut() {
            *pending = key.to_string();
        }
    }

    fn leave_map(&mut self) {
        if let Some(JsonPart::Object(object, _)) = self.parts.pop() {
            self.push(serde_json::Value::Object(object));
        }
    }

    fn enter_list(&mut self) {
        self.parts.push(JsonPart::Array(Vec::new()));
    }

    fn item(&mut self, _index: usize) {}

    fn leave_list(&mut self) {
        if let Some(JsonPart::Array(items)) = self.parts.pop() {
            self.push(serde_json::Value::Array(items));
        }
    }

    fn scalar(&mut self, value: &Value) {
        let json = match value {
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Null | Value::List(_) | Value::Map(_) => serde_json::Value::Null,
        };
        self.push(json);
    }
}

/// Renders `value` as `key1=val1, key2=val2, ...` in key insertion order.
///
/// Nested mappings render inline between braces, lists as `[a, b]`, strings
/// without quotes. A mapping already on the path from the root renders as
/// `<Circular>`. Nesting depth is not limited by the call stack.
#[must_use]
pub fn serialize(value: &Value) -> String {
    let mut renderer = Renderer::default();
    walk(value, &mut renderer);
    renderer.out
}

enum ClonePart {
    Map(Mapping, String),
    List(Vec<Value>),
}

/// Builds the copy. `copies` maps every original mapping reached so far to
/// its copy, which also resolves cycles.
#[derive(Default)]
struct Cloner {
    copies: HashMap<Identity, Mapping>,
    parts: Vec<ClonePart>,
    result: Option<Value>,
}

impl Cloner {
    fn push(&mut self, value: Value) {
        match self.parts.last_mut() {
            Some(ClonePart::Map(copy, key)) => {
                copy.0.borrow_mut().push((std::mem::take(key), value));
            }
            Some(ClonePart::List(items)) => items.push(value),
            None => self.result = Some(value),
        }
    }
}

impl Visit for Cloner {
    fn enter_map(&mut self, mapping: &Mapping, _circular: bool) -> bool {
        if let Some(copy) = self.copies.get(&mapping.identity()) {
            let copy = copy.clone();
            self.push(Value::Map(copy));
            return false;
        }
        let copy = Mapping::new();
        self.copies.insert(mapping.identity(), copy.clone());
        self.parts.push(ClonePart::Map(copy, String::new()));
        true
    }

    fn key(&mut self, _index: usize, key: &str) {
        if let Some(ClonePart::Map(_, pending)) = self.parts.last_mut() {
            *pending = key.to_string();
        }
    }

    fn leave_map(&mut self) {
        if let Some(ClonePart::Map(copy, _)) = self.parts.pop() {
            self.push(Value::Map(copy));
        }
    }

    fn enter_list(&mut self) {
        self.parts.push(ClonePart::List(Vec::new()));
    }

    fn item(&mut self, _index: usize) {}

    fn leave_list(&mut self) {
        if let Some(ClonePart::List(items)) = self.parts.pop() {
            self.push(Value::List(items));
        }
    }

    fn scalar(&mut self, value: &Value) {
        self.push(value.clone());
    }
}

/// Returns an independent copy of `value`: every nested mapping is a new
/// mapping. Shared and cyclic references are reproduced within the copy.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    let mut cloner = Cloner::default();
    walk(value, &mut cloner);
    cloner.result.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn common() -> Mapping {
        let deep: Mapping = [("first", "first"), ("second", "second")]
            .into_iter()
            .collect();
        let obj = Mapping::new();
        obj.insert("name", "common");
        obj.insert("deep", deep);
        obj
    }

    #[test]
    fn test_serialize_flat() {
        let obj: Mapping = [("a", Value::from(1_i64)), ("b", Value::from("two"))]
            .into_iter()
            .collect();
        obj.insert("c", Value::Null);
        obj.insert("d", true);
        assert_eq!(serialize(&obj.into()), "a=1, b=two, c=null, d=true");
    }

    #[test]
    fn test_serialize_nested_and_lists() {
        let obj = common();
        obj.insert("list", vec!["x", "y"]);
        assert_eq!(
            serialize(&obj.into()),
            "name=common, deep={first=first, second=second}, list=[x, y]"
        );
    }

    #[test]
    fn test_serialize_direct_cycle() {
        let obj = Mapping::new();
        obj.insert("name", "cyclical");
        obj.insert("cycle", obj.clone());
        assert_eq!(serialize(&obj.clone().into()), "name=cyclical, cycle=<Circular>");
        obj.remove("cycle");
    }

    #[test]
    fn test_serialize_indirect_cycle() {
        let parent = Mapping::new();
        let child = Mapping::new();
        parent.insert("name", "parent");
        child.insert("up", parent.clone());
        parent.insert("child", child);
        assert_eq!(
            serialize(&parent.clone().into()),
            "name=parent, child={up=<Circular>}"
        );
        parent.remove("child");
    }

    #[test]
    fn test_serialize_shared_sibling_is_not_circular() {
        let shared: Mapping = [("k", "v")].into_iter().collect();
        let obj = Mapping::new();
        obj.insert("left", shared.clone());
        obj.insert("right", shared);
        assert_eq!(serialize(&obj.into()), "left={k=v}, right={k=v}");
    }

    #[test]
    fn test_serialize_scalar() {
        assert_eq!(serialize(&Value::from("plain")), "plain");
        assert_eq!(serialize(&Value::Null), "null");
        assert_eq!(serialize(&Mapping::new().into()), "");
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let original = common();
        let Value::Map(copy) = deep_clone(&original.clone().into()) else {
            panic!("expected a mapping");
        };
        assert!(!copy.ptr_eq(&original));

        let Some(Value::Map(original_deep)) = original.get("deep") else {
            panic!("expected nested mapping");
        };
        let Some(Value::Map(copy_deep)) = copy.get("deep") else {
            panic!("expected nested mapping");
        };
        assert!(!copy_deep.ptr_eq(&original_deep));

        copy_deep.insert("first", "changed");
        copy.insert("name", "changed");
        assert_eq!(
            serialize(&original.into()),
            "name=common, deep={first=first, second=second}"
        );
    }

    #[test]
    fn test_deep_clone_preserves_cycles() {
        let obj = Mapping::new();
        obj.insert("name", "cyclical");
        obj.insert("cycle", obj.clone());

        let Value::Map(copy) = deep_clone(&obj.clone().into()) else {
            panic!("expected a mapping");
        };
        let Some(Value::Map(cycle)) = copy.get("cycle") else {
            panic!("expected cycle");
        };
        assert!(cycle.ptr_eq(&copy));
        assert!(!copy.ptr_eq(&obj));

        obj.remove("cycle");
        copy.remove("cycle");
    }

    #[test]
    fn test_to_json() {
        let obj = Mapping::new();
        obj.insert("name", "cyclical");
        obj.insert("cycle", obj.clone());
        obj.insert("n", 1.5);
        assert_eq!(
            Value::from(obj.clone()).to_json(),
            json!({"name": "cyclical", "cycle": "<Circular>", "n": 1.5})
        );
        obj.remove("cycle");
    }

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = Value::from(json!({"z": 1, "a": {"b": [true, null]}}));
        assert_eq!(serialize(&value), "z=1, a={b=[true, null]}");
    }

    const DEEP: usize = 100_000;

    /// `{n: {n: ... {}}}` with `depth` mappings below the root.
    fn chain(depth: usize) -> Mapping {
        let mut inner = Mapping::new();
        for _ in 0..depth {
            let outer = Mapping::new();
            outer.insert("n", inner);
            inner = outer;
        }
        inner
    }

    #[test]
    fn test_serialize_deep_nesting() {
        let rendered = serialize(&chain(DEEP).into());
        assert_eq!(rendered.len(), 4 * DEEP);
        assert!(rendered.starts_with("n={n={"));
        assert!(rendered.ends_with("{}}}"));
        assert!(!rendered.contains(CIRCULAR_MARKER));
    }

    #[test]
    fn test_deep_clone_deep_nesting() {
        let original = chain(DEEP);
        let Value::Map(copy) = deep_clone(&original.clone().into()) else {
            panic!("expected a mapping");
        };
        assert!(!copy.ptr_eq(&original));
        assert_eq!(serialize(&copy.into()).len(), 4 * DEEP);
    }

    #[test]
    fn test_to_json_deep_nesting() {
        let json = Value::from(chain(DEEP)).to_json();
        let mut depth = 0;
        let mut cursor = &json;
        while let Some(next) = cursor.get("n") {
            depth += 1;
            cursor = next;
        }
        assert_eq!(depth, DEEP);
        assert_eq!(cursor, &json!({}));
        // serde_json drops nested values recursively.
        std::mem::forget(json);
    }

    #[test]
    fn test_drop_deep_nesting_inside_list() {
        let value = Value::List(vec![chain(DEEP).into(), Value::from("tail")]);
        assert_eq!(serialize(&value).len(), 4 * DEEP + 2 + ", tail".len() + 2);
        drop(value);
    }

    #[test]
    fn test_cycle_below_deep_nesting() {
        let root = chain(DEEP);
        let mut cursor = root.clone();
        while let Some(Value::Map(next)) = cursor.get("n") {
            cursor = next;
        }
        cursor.insert("back", root.clone());
        let rendered = serialize(&root.clone().into());
        assert!(rendered.ends_with("{back=<Circular>}}}"));
        cursor.remove("back");
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z]{0,6}".prop_map(serde_json::Value::String),
        ];
        leaf.prop_recursive(8, 64, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_serialize_lists_top_level_keys_in_order(
            entries in prop::collection::btree_map("[a-z]{1,4}", arb_json(), 1..6)
        ) {
            let object: serde_json::Map<String, serde_json::Value> =
                entries.into_iter().collect();
            let keys: Vec<String> = object.keys().cloned().collect();
            let value = Value::from(serde_json::Value::Object(object));
            let rendered = serialize(&value);

            let mut cursor = 0;
            for key in keys {
                let needle = format!("{key}=");
                let found = rendered[cursor..].find(&needle);
                prop_assert!(found.is_some(), "missing key {} in {}", key, rendered);
                cursor += found.unwrap_or(0) + needle.len();
            }
            prop_assert!(!rendered.contains(CIRCULAR_MARKER));
        }

        #[test]
        fn prop_deep_clone_round_trips_json(json in arb_json()) {
            let value = Value::from(json.clone());
            prop_assert_eq!(deep_clone(&value).to_json(), json);
        }
    }
}
