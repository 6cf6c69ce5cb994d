//! srcweave_args: Call-argument parsing and serialization.
//!
//! Splits argument-list text at top-level commas and classifies every
//! segment into a [`ParsedElement`] without a grammar-aware front end.
//! [`serialize`] is the structural inverse of [`parse_arguments`]:
//!
//! ```
//! use srcweave_args::{parse_arguments, serialize};
//!
//! let parsed = parse_arguments("a, [1, 2], f<T>(x)");
//! assert_eq!(serialize(&parsed), "a, [1, 2], f<T>(x)");
//! ```

mod calls;
mod element;
mod parser;
mod serializer;
mod split;

pub use calls::{CallSite, CallSiteCollector};
pub use element::{ArrowTypes, ObjectEntries, ParsedElement};
pub use parser::{parse_arguments, parse_element};
pub use serializer::{serialize, serialize_element};
pub use split::{find_matching_close, split_top_level};
