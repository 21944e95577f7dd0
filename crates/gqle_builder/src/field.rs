//! Selection-set fields.

/// An entry of a selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A leaf field.
    Simple(String),
    /// A field with its own selection set.
    Complex { root: String, children: Vec<Field> },
}

impl Field {
    /// Creates a leaf field.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple(name.into())
    }

    /// Creates a field selecting `children`.
    pub fn complex<I, F>(root: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        Self::Complex {
            root: root.into(),
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// The field's name (the root name for complex fields).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(name) | Self::Complex { root: name, .. } => name,
        }
    }

    /// Child fields; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Field] {
        match self {
            Self::Simple(_) => &[],
            Self::Complex { children, .. } => children,
        }
    }

    /// Renders the field as selection-set text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            Self::Simple(name) => {
                out.push_str(name);
                out.push('\n');
            }
            Self::Complex { root, children } => {
                out.push_str(root);
                out.push('\n');
                out.push_str("{\n");
                for child in children {
                    child.write_to(out);
                }
                out.push('}');
            }
        }
    }
}

impl From<&str> for Field {
    fn from(name: &str) -> Self {
        Self::simple(name)
    }
}

impl From<String> for Field {
    fn from(name: String) -> Self {
        Self::Simple(name)
    }
}
