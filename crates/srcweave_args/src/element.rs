//! The parsed representation of one argument.

use indexmap::IndexMap;
use std::fmt;

/// Object literal properties in source order, keyed by their source key
/// text (quotes and computed-key brackets included).
pub type ObjectEntries = IndexMap<String, ParsedElement>;

/// One argument, classified once at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedElement {
    /// Text that is kept verbatim: identifiers, literals, and anything that
    /// could not be classified.
    Leaf(String),
    /// `[a, b, c]`
    ArrayLiteral(Vec<ParsedElement>),
    /// `name(args)`
    Call { name: String, args: Vec<ParsedElement> },
    /// `Name<T>` when `call_args` is `None`, `Name<T>()` for `Some(vec![])`
    /// and `Name<T>(args)` otherwise.
    Generic {
        name: String,
        type_args: Vec<ParsedElement>,
        call_args: Option<Vec<ParsedElement>>,
    },
    /// `(params) => body`, with annotations when a return type was written.
    ArrowFn {
        params: Vec<ParsedElement>,
        types: Option<ArrowTypes>,
        body: Box<ParsedElement>,
    },
    /// `{ key: value, shorthand }`. A shorthand or spread property is stored
    /// with a [`ParsedElement::Leaf`] value equal to its key.
    ObjectLiteral(ObjectEntries),
    /// `expr as TargetType`
    TypeAssertion {
        target_type: String,
        expr: Box<ParsedElement>,
    },
}

/// Annotations of a typed arrow function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowTypes {
    /// One entry per parameter; `None` for a parameter written without one.
    pub params: Vec<Option<String>>,
    pub return_type: String,
}

impl ParsedElement {
    pub fn leaf(text: impl Into<String>) -> Self {
        ParsedElement::Leaf(text.into())
    }

    /// The verbatim text of a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ParsedElement::Leaf(text) => Some(text),
            _ => None,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, ParsedElement::Leaf(_))
    }

    /// The callee name of a call or generic.
    pub fn callee(&self) -> Option<&str> {
        match self {
            ParsedElement::Call { name, .. } | ParsedElement::Generic { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ParsedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::serialize_element(self))
    }
}
