//! Schema compaction — JSON Schema documents → TypeScript-like type text.
//!
//! A titled object or enum becomes a hoisted `type Name = ...` definition;
//! anonymous shapes stay inline at their use site. Definitions are emitted
//! in dependency order because hoisted child definitions accumulate before
//! the parent appends its own.

use serde_json::{Map, Value};
use std::collections::BTreeSet;

use tp_core::error::{Result, TokpackError};

/// Rendering toggles for [`compact`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
    /// Join each object's properties on one line instead of one per line.
    pub minify: bool,
    /// Display snake_case property keys as camelCase.
    pub camel_case: bool,
}

/// One recognized JSON-Schema shape. Exactly one discriminator matches per
/// node; a fragment with no `$ref`/`enum`/combinator/`type` key is `Any`.
enum SchemaNode<'a> {
    Ref { target: &'a str },
    Array { items: Option<&'a Value> },
    Enum { values: &'a Vec<Value>, title: Option<&'a str> },
    Combinator { variants: &'a Vec<Value>, title: Option<&'a str> },
    Object { schema: &'a Map<String, Value>, title: Option<&'a str> },
    Primitive { kind: &'a str },
    Any,
}

/// A hoisted `type Name = Body` definition.
struct TypeDefinition {
    name: String,
    body: String,
}

impl TypeDefinition {
    fn render(&self) -> String {
        format!("type {} = {}", self.name, self.body)
    }
}

/// Result of compiling one schema node: how to reference it from the parent,
/// plus every named definition hoisted out of it.
struct Compaction {
    reference: String,
    hoisted: Vec<TypeDefinition>,
}

impl Compaction {
    fn inline(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            hoisted: Vec::new(),
        }
    }
}

/// Compile a JSON-Schema document into newline-joined type definitions.
///
/// The worklist is the document's definition table (`definitions` or `$defs`,
/// in declaration order) followed by the document's own root shape; the
/// output is the flattened hoisted definitions of every entry.
pub fn compact(document: &Value, options: &SchemaOptions) -> Result<String> {
    let empty = Map::new();
    let root = document.as_object().unwrap_or(&empty);
    let defs = root
        .get("definitions")
        .or_else(|| root.get("$defs"))
        .and_then(Value::as_object);

    let mut known: BTreeSet<&str> = defs
        .map(|d| d.keys().map(String::as_str).collect())
        .unwrap_or_default();
    if let Some(title) = root.get("title").and_then(Value::as_str) {
        known.insert(title);
    }

    let mut worklist: Vec<&Value> = Vec::new();
    if let Some(defs) = defs {
        worklist.extend(defs.values());
    }
    worklist.push(document);

    let mut out: Vec<String> = Vec::new();
    for entry in worklist {
        let compaction = compile(entry, &known, options)?;
        out.extend(compaction.hoisted.iter().map(TypeDefinition::render));
    }
    Ok(out.join("\n"))
}

/// Compile the schema reflected from a data model type.
#[cfg(feature = "schemars")]
pub fn compact_model<T: schemars::JsonSchema>(options: &SchemaOptions) -> Result<String> {
    let schema = schemars::schema_for!(T);
    let document = serde_json::to_value(&schema)?;
    compact(&document, options)
}

fn classify(value: &Value) -> SchemaNode<'_> {
    let Some(map) = value.as_object() else {
        return SchemaNode::Any;
    };
    if let Some(target) = map.get("$ref").and_then(Value::as_str) {
        return SchemaNode::Ref { target };
    }
    if let Some(values) = map.get("enum").and_then(Value::as_array) {
        return SchemaNode::Enum {
            values,
            title: title_of(map),
        };
    }
    for key in ["allOf", "anyOf", "oneOf"] {
        if let Some(variants) = map.get(key).and_then(Value::as_array) {
            return SchemaNode::Combinator {
                variants,
                title: title_of(map),
            };
        }
    }
    match map.get("type").and_then(Value::as_str) {
        Some("array") => SchemaNode::Array {
            items: map.get("items"),
        },
        Some("object") => SchemaNode::Object {
            schema: map,
            title: title_of(map),
        },
        Some(kind) => SchemaNode::Primitive { kind },
        None => SchemaNode::Any,
    }
}

fn title_of(map: &Map<String, Value>) -> Option<&str> {
    map.get("title").and_then(Value::as_str)
}

/// Node-local, side-effect-free compile. A `Ref` never recurses into its
/// target, so `$ref`-linked definitions cannot cause unbounded recursion.
fn compile(value: &Value, known: &BTreeSet<&str>, options: &SchemaOptions) -> Result<Compaction> {
    match classify(value) {
        SchemaNode::Ref { target } => {
            let name = target.rsplit('/').next().unwrap_or(target);
            if name.is_empty() || !known.contains(name) {
                return Err(TokpackError::MalformedReference {
                    target: target.to_string(),
                });
            }
            Ok(Compaction::inline(name))
        }
        SchemaNode::Array { items } => {
            let inner = match items {
                Some(items) => compile(items, known, options)?,
                None => Compaction::inline("any"),
            };
            Ok(Compaction {
                reference: format!("{}[]", inner.reference),
                hoisted: inner.hoisted,
            })
        }
        SchemaNode::Enum { values, title } => {
            let union = values
                .iter()
                .map(|v| format!("'{}'", scalar_text(v)))
                .collect::<Vec<_>>()
                .join(" | ");
            Ok(named_or_inline(union, title, Vec::new()))
        }
        SchemaNode::Combinator { variants, title } => {
            let mut refs = Vec::with_capacity(variants.len());
            let mut hoisted = Vec::new();
            for variant in variants {
                let child = compile(variant, known, options)?;
                refs.push(child.reference);
                hoisted.extend(child.hoisted);
            }
            if refs.len() == 1 {
                // A single-variant combinator adds no information.
                return Ok(Compaction {
                    reference: refs.remove(0),
                    hoisted,
                });
            }
            Ok(named_or_inline(refs.join(" | "), title, hoisted))
        }
        SchemaNode::Object { schema, title } => compile_object(schema, title, known, options),
        SchemaNode::Primitive { kind } => Ok(Compaction::inline(primitive_name(kind))),
        SchemaNode::Any => Ok(Compaction::inline("any")),
    }
}

fn compile_object(
    schema: &Map<String, Value>,
    title: Option<&str>,
    known: &BTreeSet<&str>,
    options: &SchemaOptions,
) -> Result<Compaction> {
    let properties = schema.get("properties").and_then(Value::as_object);
    let Some(properties) = properties.filter(|p| !p.is_empty()) else {
        return compile_map_object(schema.get("additionalProperties"), title, known, options);
    };

    let required: BTreeSet<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|xs| xs.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut hoisted = Vec::new();
    let mut lines = Vec::with_capacity(properties.len());
    for (key, prop) in properties {
        let child = compile(prop, known, options)?;
        hoisted.extend(child.hoisted);

        let display = if options.camel_case {
            to_camel_case(key)
        } else {
            key.clone()
        };
        let marker = if required.contains(key.as_str()) { "" } else { "?" };
        let mut line = format!("{display}{marker}: {};", child.reference);
        if let Some(comment) = property_comment(prop) {
            line.push_str(&comment);
        }
        lines.push(line);
    }

    let body = if options.minify {
        format!("{{ {} }}", lines.join(" "))
    } else {
        format!("{{\n {}\n}}", lines.join("\n "))
    };
    Ok(named_or_inline(body, title, hoisted))
}

/// Object with no declared properties: a string-keyed map. The value type is
/// `additionalProperties` (single schema or list of alternatives); with
/// nothing declared the map stays opaque.
fn compile_map_object(
    additional: Option<&Value>,
    title: Option<&str>,
    known: &BTreeSet<&str>,
    options: &SchemaOptions,
) -> Result<Compaction> {
    let mut hoisted = Vec::new();
    let value_union = match additional {
        Some(single @ Value::Object(_)) => {
            let child = compile(single, known, options)?;
            hoisted = child.hoisted;
            Some(child.reference)
        }
        Some(Value::Array(alternatives)) if !alternatives.is_empty() => {
            let mut refs = Vec::with_capacity(alternatives.len());
            for alternative in alternatives {
                let child = compile(alternative, known, options)?;
                refs.push(child.reference);
                hoisted.extend(child.hoisted);
            }
            Some(refs.join(" | "))
        }
        _ => None,
    };

    let body = match value_union {
        Some(union) => format!("Record<string, {union}>"),
        None => "Record<string, unknown>".to_string(),
    };
    Ok(named_or_inline(body, title, hoisted))
}

fn named_or_inline(body: String, title: Option<&str>, mut hoisted: Vec<TypeDefinition>) -> Compaction {
    match title {
        Some(name) => {
            hoisted.push(TypeDefinition {
                name: name.to_string(),
                body,
            });
            Compaction {
                reference: name.to_string(),
                hoisted,
            }
        }
        None => Compaction {
            reference: body,
            hoisted,
        },
    }
}

fn primitive_name(kind: &str) -> &'static str {
    match kind {
        "string" => "string",
        "number" => "float",
        "integer" => "int",
        "boolean" => "bool",
        "object" => "object",
        other => {
            tracing::warn!(kind = other, "unclassifiable primitive type tag, emitting `unknown`");
            "unknown"
        }
    }
}

/// Trailing block comment for a property carrying a description, a format
/// hint, or a default value, in that fixed order.
fn property_comment(prop: &Value) -> Option<String> {
    let map = prop.as_object()?;
    let description = map.get("description").and_then(Value::as_str);
    let format_hint = map.get("format").and_then(Value::as_str);
    let default = map.get("default");
    if description.is_none() && format_hint.is_none() && default.is_none() {
        return None;
    }

    let mut out = String::from(" /*");
    if let Some(text) = description {
        out.push(' ');
        out.push_str(text);
    }
    if let Some(hint) = format_hint {
        out.push_str(" format = ");
        out.push_str(hint);
    }
    if let Some(value) = default {
        out.push_str(" default = ");
        out.push_str(&scalar_text(value));
    }
    out.push_str(" */");
    Some(out)
}

/// Bare text of a scalar: strings without their JSON quotes, everything else
/// in compact JSON form.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `snake_case` → `camelCase`: every underscore-delimited segment after the
/// first gets its first letter upper-cased.
fn to_camel_case(key: &str) -> String {
    let mut segments = key.split('_');
    let mut out = String::with_capacity(key.len());
    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
