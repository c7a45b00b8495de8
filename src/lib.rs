//! # structured_fields
//!
//! A parser and canonical serializer for Structured Field Values, the typed
//! grammar used for HTTP header and trailer field values.
//!
//! ## What are Structured Field Values?
//!
//! A constrained ASCII grammar with three top-level shapes, all built from the
//! same scalars:
//!
//! - **Item**: one bare item with parameters, e.g. `2;foo=bar`
//! - **List**: comma-separated members, e.g. `gzip, br;q=0.5, (a b)`
//! - **Dictionary**: ordered `key=member` pairs, e.g. `u=2, i`
//!
//! Bare items are strings, byte sequences, booleans, integers, decimals and
//! tokens. A member is either an item or a parenthesized inner list of items.
//!
//! ## Key Features
//!
//! - **Strict**: one malformed byte rejects the whole field, with the offset
//!   where recognition failed
//! - **Canonical output**: serializing always produces the normalized form, so
//!   parse then serialize is idempotent
//! - **Order preserving**: dictionaries and parameters keep insertion order
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use structured_fields::{parse_dictionary, to_string, BareItem};
//!
//! let dict = parse_dictionary("u=2,   i").unwrap();
//! let urgency = dict
//!     .load("u")
//!     .and_then(|member| member.as_item())
//!     .and_then(|item| item.bare_item().as_integer());
//! assert_eq!(urgency, Some(2));
//!
//! // Bare keys are `?1`; output is always canonical.
//! assert_eq!(to_string(&dict).unwrap(), "u=2, i=?1");
//! ```
//!
//! ### Building values
//!
//! ```rust
//! use structured_fields::{to_string, BareItem, InnerList, Item, List, Token};
//!
//! let mut list = List::new();
//! list.push(Item::new(Token::new("gzip")));
//!
//! let mut br = Item::new(Token::new("br"));
//! br.params_mut().store("q", Some(BareItem::Decimal(0.5)));
//! list.push(br);
//!
//! list.push(InnerList::new(vec![Item::new(1i64), Item::new(2i64)]));
//! assert_eq!(to_string(&list).unwrap(), "gzip, br;q=0.5, (1 2)");
//! ```
//!
//! ### Choosing the shape at runtime
//!
//! ```rust
//! use structured_fields::{parse, FieldType};
//!
//! let field_type: FieldType = "list".parse().unwrap();
//! let value = parse("a, b", field_type).unwrap();
//! assert_eq!(value.as_list().map(|l| l.len()), Some(2));
//! ```
//!
//! ## Errors
//!
//! Parsing returns [`ParseError`] (message plus byte offset); serializing
//! returns [`SerializeError`]. Both convert into the umbrella [`Error`].
//!
//! ## Demos
//!
//! See the `demos/` directory:
//!
//! - **`priority.rs`** - Reading a priority dictionary
//! - **`build_field.rs`** - Building and serializing a list by hand
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod grammar;
pub mod lexical;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Parser;
pub use error::{Error, ParseError, Result, SerializeError};
pub use map::OrderedMap;
pub use options::ParserOptions;
pub use ser::{SerializeField, Serializer};
pub use value::{
    BareItem, Dictionary, FieldType, FieldValue, InnerList, Item, ItemType, List, Member,
    MemberType, Parameters, Token,
};

use std::io;

/// Parses a field value as an [`Item`].
///
/// # Examples
///
/// ```rust
/// use structured_fields::{parse_item, BareItem};
///
/// let item = parse_item("\"hello\";lang=en").unwrap();
/// assert_eq!(item.bare_item(), &BareItem::String("hello".to_string()));
/// assert_eq!(item.params().len(), 1);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not a single valid item. Empty
/// input is an error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_item(input: &str) -> std::result::Result<Item, ParseError> {
    Parser::new(input).parse_item()
}

/// Parses a field value as a [`List`].
///
/// # Examples
///
/// ```rust
/// use structured_fields::parse_list;
///
/// let list = parse_list("sugar, tea, rum").unwrap();
/// assert_eq!(list.len(), 3);
/// assert!(parse_list("").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not a valid list.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_list(input: &str) -> std::result::Result<List, ParseError> {
    Parser::new(input).parse_list()
}

/// Parses a field value as a [`Dictionary`].
///
/// # Examples
///
/// ```rust
/// use structured_fields::parse_dictionary;
///
/// let dict = parse_dictionary("a=?0, b, c;foo=bar").unwrap();
/// let keys: Vec<_> = dict.keys().cloned().collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not a valid dictionary, including
/// when a key repeats.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_dictionary(input: &str) -> std::result::Result<Dictionary, ParseError> {
    Parser::new(input).parse_dictionary()
}

/// Parses a field value as the shape named by `field_type`.
///
/// # Errors
///
/// Returns a [`ParseError`] if the input is not valid for that shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str, field_type: FieldType) -> std::result::Result<FieldValue, ParseError> {
    Parser::new(input).parse(field_type)
}

/// Parses a field that arrived as several field lines.
///
/// The lines are combined with `", "` before parsing, the way a recipient
/// folds repeated header fields. Offsets in errors refer to the combined text.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{parse_field_lines, FieldType};
///
/// let value = parse_field_lines(&["a=1", "b=2"], FieldType::Dictionary).unwrap();
/// assert_eq!(value.as_dictionary().map(|d| d.len()), Some(2));
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] if the combined value is not valid for that shape.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_field_lines<S>(
    lines: &[S],
    field_type: FieldType,
) -> std::result::Result<FieldValue, ParseError>
where
    S: AsRef<str>,
{
    let combined = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(", ");
    parse(&combined, field_type)
}

/// Serializes a field value to its canonical string form.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{parse_list, to_string};
///
/// let list = parse_list("1.50,   ?1 ,(a)").unwrap();
/// assert_eq!(to_string(&list).unwrap(), "1.5, ?1, (a)");
/// ```
///
/// # Errors
///
/// Returns a [`SerializeError`] if the value holds something that has no
/// canonical form, such as an out-of-range integer or an invalid key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> std::result::Result<String, SerializeError>
where
    T: ?Sized + SerializeField,
{
    let mut serializer = Serializer::new();
    value.serialize_field(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serializes a field value to a writer in canonical form.
///
/// Nothing is written if serialization fails.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{to_writer, Item};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Item::new(42i64)).unwrap();
/// assert_eq!(buffer, b"42");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + SerializeField,
{
    let serialized = to_string(value)?;
    writer
        .write_all(serialized.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
