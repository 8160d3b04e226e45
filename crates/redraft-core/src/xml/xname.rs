use std::borrow::Cow;
use std::fmt;

/// Namespace-qualified XML name.
///
/// Names produced by the constants in [`super::namespaces`] borrow their
/// strings, so looking an element up by name costs no allocation. Names read
/// from a part own theirs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct XName {
    pub namespace: Option<Cow<'static, str>>,
    pub local_name: Cow<'static, str>,
}

impl XName {
    pub const fn new(namespace: &'static str, local_name: &'static str) -> Self {
        Self {
            namespace: if namespace.is_empty() {
                None
            } else {
                Some(Cow::Borrowed(namespace))
            },
            local_name: Cow::Borrowed(local_name),
        }
    }

    /// A name copied out of parsed markup.
    pub fn owned(namespace: &str, local_name: &str) -> Self {
        Self {
            namespace: (!namespace.is_empty()).then(|| Cow::Owned(namespace.to_string())),
            local_name: Cow::Owned(local_name.to_string()),
        }
    }

    pub const fn local(local_name: &'static str) -> Self {
        Self::new("", local_name)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn local_name(&self) -> &str {
        &self.local_name
    }
}

impl fmt::Display for XName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace() {
            Some(ns) => write!(f, "{{{}}}{}", ns, self.local_name),
            None => f.write_str(&self.local_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XAttribute {
    pub name: XName,
    pub value: String,
}

impl XAttribute {
    pub fn new(name: XName, value: &str) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_and_parsed_names_compare_equal() {
        assert_eq!(XName::new("urn:w", "p"), XName::owned("urn:w", "p"));
        assert_ne!(XName::new("urn:w", "p"), XName::owned("urn:x", "p"));
    }

    #[test]
    fn empty_namespace_is_unqualified() {
        let name = XName::owned("", "val");
        assert_eq!(name, XName::local("val"));
        assert_eq!(name.namespace(), None);
        assert_eq!(name.to_string(), "val");
    }

    #[test]
    fn qualified_name_displays_in_clark_notation() {
        assert_eq!(XName::new("urn:w", "t").to_string(), "{urn:w}t");
    }
}
