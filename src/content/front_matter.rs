use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::{DeserializeSeed, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("malformed front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("front matter is not a key/value mapping")]
    NotAMapping,
}

/// Metadata block of a post: every key maps to an ordered list of values.
/// Scalar keys hold a single value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    entries: HashMap<String, Vec<String>>,
}

impl FrontMatter {
    /// First value of `key`, the accessor for scalar fields.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
            .and_then(|values| values.first())
            .map(|v| v.as_str())
    }

    /// All values of `key`, in declaration order.
    pub fn values(&self, key: &str) -> &[String] {
        match self.entries.get(key) {
            Some(values) => values.as_slice(),
            None => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_yaml(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }

        // Entry shapes come from the typed tree, scalar text from a second read of the source.
        let mapping = match serde_yaml::from_str::<Value>(yaml)? {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(FrontMatter::default()),
            _ => return Err(FrontMatterError::NotAMapping),
        };

        let shapes: Vec<Shape> = mapping.values().map(Shape::of).collect();
        let entries = EntriesSeed { shapes: &shapes }
            .deserialize(serde_yaml::Deserializer::from_str(yaml))?;

        Ok(FrontMatter { entries })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Scalar,
    Scalars,
    MixedSequence,
    Empty,
    Ignored,
}

impl Shape {
    fn of(value: &Value) -> Shape {
        match value {
            Value::Null => Shape::Empty,
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
            Value::Sequence(items) if items.iter().all(is_plain_scalar) => Shape::Scalars,
            Value::Sequence(_) => Shape::MixedSequence,
            Value::Mapping(_) | Value::Tagged(_) => Shape::Ignored,
        }
    }
}

fn is_plain_scalar(value: &Value) -> bool {
    matches!(value, Value::Bool(_) | Value::Number(_) | Value::String(_))
}

/// A scalar read as the text of the source document.
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ScalarText)
    }
}

struct EntriesSeed<'a> {
    shapes: &'a [Shape],
}

impl<'de> DeserializeSeed<'de> for EntriesSeed<'_> {
    type Value = HashMap<String, Vec<String>>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for EntriesSeed<'_> {
    type Value = HashMap<String, Vec<String>>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a front matter mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = HashMap::with_capacity(self.shapes.len());
        let mut shapes = self.shapes.iter();

        while let Some(key) = map.next_key::<Value>()? {
            let values = match shapes.next().copied().unwrap_or(Shape::Ignored) {
                Shape::Scalar => vec![map.next_value::<ScalarText>()?.0],
                Shape::Scalars => map.next_value::<Vec<ScalarText>>()?
                    .into_iter()
                    .map(|text| text.0)
                    .collect(),
                Shape::MixedSequence => match map.next_value::<Value>()? {
                    Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
                    _ => Vec::new(),
                },
                Shape::Empty => {
                    map.next_value::<IgnoredAny>()?;
                    Vec::new()
                }
                Shape::Ignored => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };

            if let Some(key) = scalar_to_string(&key) {
                entries.insert(key, values);
            }
        }

        Ok(entries)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Splits `raw` into its front matter and the markdown body that follows it.
///
/// The block must open on the first line with `---` and close with another `---` line.
/// Without a complete block the whole text is the body and the front matter is empty.
pub fn split_front_matter(raw: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    lazy_static! {
        static ref FRONT_MATTER_REGEX: Regex = Regex::new(
            r"(?ms)\A---[ \t]*\r?\n(?P<yaml>.*?)^---[ \t]*\r?$\n?"
        ).unwrap();
    }

    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(caps) = FRONT_MATTER_REGEX.captures(text) else {
        return Ok((FrontMatter::default(), text));
    };

    let (Some(block), Some(yaml)) = (caps.get(0), caps.name("yaml")) else {
        return Ok((FrontMatter::default(), text));
    };

    let front_matter = FrontMatter::from_yaml(yaml.as_str())?;
    Ok((front_matter, &text[block.end()..]))
}
