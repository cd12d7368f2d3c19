//! Tagged HL7 field values and their accessors
//!
//! A field is absent, a bare scalar, one composite value (components, each of
//! which may carry `&`-delimited sub-components), or a list of repetitions.
//! Accessors pattern-match on the tag; nothing probes shapes at runtime.

/// One `^`-delimited component of a field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// Plain component text
    Text(String),
    /// Component split into `&`-delimited sub-components
    Sub(Vec<String>),
}

impl Component {
    /// First non-nested value of the component
    ///
    /// For sub-components this unwraps one level and returns the first one.
    pub fn first(&self) -> Option<&str> {
        match self {
            Component::Text(s) => non_empty(s),
            Component::Sub(parts) => parts.first().and_then(|s| non_empty(s)),
        }
    }

    fn has_content(&self) -> bool {
        match self {
            Component::Text(s) => !s.is_empty(),
            Component::Sub(parts) => parts.iter().any(|s| !s.is_empty()),
        }
    }

    fn render(&self) -> String {
        match self {
            Component::Text(s) => s.clone(),
            Component::Sub(parts) => parts.join("&"),
        }
    }
}

/// One logical instance of a field (a single repetition)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Bare scalar
    Scalar(String),
    /// Composite value
    Components(Vec<Component>),
}

/// A field as delivered by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawField {
    /// Field not present or empty
    #[default]
    Absent,
    /// Bare scalar
    Scalar(String),
    /// A single composite value
    Components(Vec<Component>),
    /// Repeated instances (`~`-delimited)
    Repetition(Vec<FieldValue>),
}

/// Borrowed view of one logical field instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instance<'a> {
    /// Bare scalar
    Scalar(&'a str),
    /// Composite value
    Components(&'a [Component]),
}

impl<'a> From<&'a FieldValue> for Instance<'a> {
    fn from(value: &'a FieldValue) -> Self {
        match value {
            FieldValue::Scalar(s) => Instance::Scalar(s),
            FieldValue::Components(c) => Instance::Components(c),
        }
    }
}

impl<'a> Instance<'a> {
    /// Value of the component at `index`, `None` when missing or empty
    ///
    /// A scalar is equivalent to a one-component value.
    pub fn component(&self, index: usize) -> Option<&'a str> {
        match *self {
            Instance::Scalar(s) if index == 0 => non_empty(s),
            Instance::Scalar(_) => None,
            Instance::Components(components) => components.get(index).and_then(Component::first),
        }
    }

    /// Non-empty sub-components of the component at `index`
    pub fn subcomponents(&self, index: usize) -> Vec<&'a str> {
        match *self {
            Instance::Scalar(s) if index == 0 => non_empty(s).into_iter().collect(),
            Instance::Scalar(_) => Vec::new(),
            Instance::Components(components) => match components.get(index) {
                Some(Component::Text(s)) => non_empty(s).into_iter().collect(),
                Some(Component::Sub(parts)) => {
                    parts.iter().filter_map(|s| non_empty(s)).collect()
                }
                None => Vec::new(),
            },
        }
    }

    /// First component, the usual "value" of a field
    pub fn first(&self) -> Option<&'a str> {
        self.component(0)
    }

    /// True when any leaf carries text
    pub fn has_content(&self) -> bool {
        match self {
            Instance::Scalar(s) => !s.is_empty(),
            Instance::Components(components) => components.iter().any(Component::has_content),
        }
    }

    /// The instance rendered back to `^`/`&`-delimited text, trailing empty
    /// components dropped
    pub fn text(&self) -> Option<String> {
        match self {
            Instance::Scalar(s) => non_empty(s).map(str::to_string),
            Instance::Components(components) => {
                let mut rendered: Vec<String> = components.iter().map(Component::render).collect();
                while rendered.last().is_some_and(|s| s.is_empty()) {
                    rendered.pop();
                }
                if rendered.is_empty() {
                    None
                } else {
                    Some(rendered.join("^"))
                }
            }
        }
    }
}

impl RawField {
    /// Scalar at component `index` of the first instance
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry::domain::field::{Component, RawField};
    ///
    /// let field = RawField::Components(vec![
    ///     Component::Text("ADT".to_string()),
    ///     Component::Text("A01".to_string()),
    /// ]);
    /// assert_eq!(field.value(1), Some("A01"));
    /// assert_eq!(field.value(2), None);
    /// ```
    pub fn value(&self, index: usize) -> Option<&str> {
        self.instance().and_then(|instance| instance.component(index))
    }

    /// First component of the first instance
    pub fn first(&self) -> Option<&str> {
        self.value(0)
    }

    /// The first instance, if any
    pub fn instance(&self) -> Option<Instance<'_>> {
        self.values().into_iter().next()
    }

    /// Ordered logical instances of the field
    ///
    /// A composite value is exactly one instance; only an explicit repetition
    /// list yields several.
    pub fn values(&self) -> Vec<Instance<'_>> {
        match self {
            RawField::Absent => Vec::new(),
            RawField::Scalar(s) => vec![Instance::Scalar(s)],
            RawField::Components(c) => vec![Instance::Components(c)],
            RawField::Repetition(reps) => reps.iter().map(Instance::from).collect(),
        }
    }

    /// True iff at least one leaf value is a non-empty string
    pub fn exists(&self) -> bool {
        self.values().iter().any(Instance::has_content)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Component {
        Component::Text(s.to_string())
    }

    #[test]
    fn test_value_on_scalar() {
        let field = RawField::Scalar("M".to_string());
        assert_eq!(field.value(0), Some("M"));
        assert_eq!(field.value(1), None);
    }

    #[test]
    fn test_value_empty_is_absent() {
        assert_eq!(RawField::Scalar(String::new()).first(), None);
        assert_eq!(RawField::Components(vec![]).first(), None);
        assert_eq!(RawField::Absent.first(), None);
        assert_eq!(RawField::Components(vec![text(""), text("x")]).first(), None);
    }

    #[test]
    fn test_value_unwraps_subcomponents() {
        let field = RawField::Components(vec![Component::Sub(vec![
            "123 Main St".to_string(),
            "Apt 4".to_string(),
        ])]);
        assert_eq!(field.first(), Some("123 Main St"));
    }

    #[test]
    fn test_value_on_repetition_reads_first_instance() {
        let field = RawField::Repetition(vec![
            FieldValue::Components(vec![text("12345"), text(""), text("")]),
            FieldValue::Components(vec![text("67890")]),
        ]);
        assert_eq!(field.first(), Some("12345"));
    }

    #[test]
    fn test_values_components_is_one_instance() {
        let field = RawField::Components(vec![text("DOE"), text("JOHN")]);
        let values = field.values();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].component(1), Some("JOHN"));
    }

    #[test]
    fn test_values_repetition() {
        let field = RawField::Repetition(vec![
            FieldValue::Scalar("2106-3".to_string()),
            FieldValue::Components(vec![text("2054-5"), text("Black")]),
        ]);
        let values = field.values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].first(), Some("2106-3"));
        assert_eq!(values[1].component(1), Some("Black"));
    }

    #[test]
    fn test_values_absent_is_empty() {
        assert!(RawField::Absent.values().is_empty());
    }

    #[test]
    fn test_exists() {
        assert!(!RawField::Absent.exists());
        assert!(!RawField::Scalar(String::new()).exists());
        assert!(!RawField::Components(vec![text(""), Component::Sub(vec![String::new()])]).exists());
        assert!(RawField::Components(vec![text(""), Component::Sub(vec!["x".to_string()])]).exists());
        assert!(RawField::Repetition(vec![
            FieldValue::Scalar(String::new()),
            FieldValue::Scalar("Y".to_string()),
        ])
        .exists());
    }

    #[test]
    fn test_subcomponents() {
        let field = RawField::Components(vec![
            Component::Sub(vec!["1 Main".to_string(), String::new(), "Unit 2".to_string()]),
            text("Springfield"),
        ]);
        let instance = field.instance().unwrap();
        assert_eq!(instance.subcomponents(0), vec!["1 Main", "Unit 2"]);
        assert_eq!(instance.subcomponents(1), vec!["Springfield"]);
        assert!(instance.subcomponents(5).is_empty());
    }

    #[test]
    fn test_instance_text_renders_components() {
        let field = RawField::Components(vec![text(">"), text("100"), text(""), text("")]);
        assert_eq!(field.instance().unwrap().text(), Some(">^100".to_string()));
        assert_eq!(RawField::Scalar("ok".to_string()).instance().unwrap().text(), Some("ok".to_string()));
    }
}
