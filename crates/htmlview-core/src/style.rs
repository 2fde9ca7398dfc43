//! Style objects
//!
//! A style is a flat, insertion-ordered mapping from property name to value,
//! the shape host UI frameworks accept as an inline style. Layers are merged
//! left to right, later layers winning per key.

use indexmap::IndexMap;

/// A single style or prop value
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Numeric value (sizes, flex factors, opacity)
    Number(f64),
    /// String value (colors, enum-like keywords)
    Str(String),
    /// Boolean flag
    Bool(bool),
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Number(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Number(f64::from(value))
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

/// A flattened style object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    properties: IndexMap<String, PropValue>,
}

impl Style {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property, replacing any previous value
    pub fn set(&mut self, name: &str, value: impl Into<PropValue>) {
        self.properties.insert(name.to_string(), value.into());
    }

    /// Get a property value
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.properties.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Iterate properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` onto this style. Keys present in `other` win.
    pub fn merge(&mut self, other: &Style) {
        for (name, value) in &other.properties {
            self.properties.insert(name.clone(), value.clone());
        }
    }

    /// Flatten a sequence of optional layers, left to right.
    ///
    /// This is the equivalent of a host style array such as
    /// `[base, inherited, override]`; missing layers are skipped.
    pub fn merged<'a, I>(layers: I) -> Style
    where
        I: IntoIterator<Item = Option<&'a Style>>,
    {
        let mut result = Style::new();
        for layer in layers.into_iter().flatten() {
            result.merge(layer);
        }
        result
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Style {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Mapping from tag name to the style configured for it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: IndexMap<String, Style>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, tag: &str, style: Style) -> Self {
        self.insert(tag, style);
        self
    }

    /// Set the style for a tag (tag names are matched lowercase)
    pub fn insert(&mut self, tag: &str, style: Style) {
        self.rules.insert(tag.to_lowercase(), style);
    }

    /// Style configured for a tag, if any
    pub fn get(&self, tag: &str) -> Option<&Style> {
        self.rules.get(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let mut base = Style::new().with("color", "black").with("fontSize", 12);
        base.merge(&Style::new().with("color", "red"));

        assert_eq!(base.get("color"), Some(&PropValue::from("red")));
        assert_eq!(base.get("fontSize"), Some(&PropValue::Number(12.0)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_merged_skips_missing_layers() {
        let a = Style::new().with("margin", 4);
        let b = Style::new().with("margin", 8).with("padding", 2);

        let style = Style::merged([Some(&a), None, Some(&b)]);
        assert_eq!(style.get("margin"), Some(&PropValue::Number(8.0)));
        assert_eq!(style.get("padding"), Some(&PropValue::Number(2.0)));

        assert!(Style::merged([None, None]).is_empty());
    }

    #[test]
    fn test_from_iter_keeps_order() {
        let style: Style = [("b", 1), ("a", 2)].into_iter().collect();
        let keys: Vec<_> = style.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_stylesheet_lowercases_tags() {
        let sheet = Stylesheet::new().with("P", Style::new().with("color", "blue"));
        assert!(sheet.get("p").is_some());
        assert!(sheet.get("div").is_none());
    }
}
