//! Canonical serialization of Structured Field Values.
//!
//! This module provides the [`Serializer`], which renders an [`Item`], a
//! [`List`] or a [`Dictionary`] into its canonical ASCII form.
//!
//! ## Overview
//!
//! - **Canonical output**: whitespace is normalized to `, ` between members and
//!   a single space inside inner lists
//! - **Validated on output**: keys, tokens, strings and numeric ranges are
//!   checked here, so values built by hand fail with a [`SerializeError`]
//!   instead of producing text no parser would accept
//! - **Closed set of inputs**: only the three field shapes implement
//!   [`SerializeField`], so nothing else can be passed to the serializer
//!
//! ## Usage
//!
//! Most users should use [`to_string`](crate::to_string):
//!
//! ```rust
//! use structured_fields::{to_string, BareItem, Item};
//!
//! let mut item = Item::new(BareItem::Decimal(2.0));
//! item.params_mut().store("a", None);
//! assert_eq!(to_string(&item).unwrap(), "2.0;a");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use structured_fields::{parse_list, Serializer};
//!
//! let list = parse_list("a,   (b c)").unwrap();
//!
//! let mut serializer = Serializer::new();
//! serializer.serialize_list(&list).unwrap();
//! assert_eq!(serializer.into_inner(), "a, (b c)");
//! ```

use crate::error::SerializeError;
use crate::lexical::{self, MAX_INTEGER, MIN_INTEGER};
use crate::value::{
    BareItem, Dictionary, FieldValue, InnerList, Item, List, Member, Parameters, Token,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

type SResult = std::result::Result<(), SerializeError>;

/// Total digit budget of a serialized decimal, sign included.
const DECIMAL_DIGIT_BUDGET: usize = 15;

/// A top-level field shape that can be serialized.
///
/// Implemented for [`Item`], [`List`], [`Dictionary`] and [`FieldValue`].
pub trait SerializeField {
    fn serialize_field(&self, serializer: &mut Serializer) -> SResult;
}

impl SerializeField for Item {
    fn serialize_field(&self, serializer: &mut Serializer) -> SResult {
        serializer.serialize_item(self)
    }
}

impl SerializeField for List {
    fn serialize_field(&self, serializer: &mut Serializer) -> SResult {
        serializer.serialize_list(self)
    }
}

impl SerializeField for Dictionary {
    fn serialize_field(&self, serializer: &mut Serializer) -> SResult {
        serializer.serialize_dictionary(self)
    }
}

impl SerializeField for FieldValue {
    fn serialize_field(&self, serializer: &mut Serializer) -> SResult {
        match self {
            FieldValue::Item(item) => serializer.serialize_item(item),
            FieldValue::List(list) => serializer.serialize_list(list),
            FieldValue::Dictionary(dict) => serializer.serialize_dictionary(dict),
        }
    }
}

/// The canonical serializer.
///
/// Output accumulates across calls; after an error the buffer holds a partial
/// rendering and should be discarded.
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        // Field values are short; one header line fits without reallocating.
        Serializer {
            output: String::with_capacity(64),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Renders `key=member` pairs joined by `, `.
    pub fn serialize_dictionary(&mut self, dict: &Dictionary) -> SResult {
        for (i, (key, member)) in dict.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_key(key)?;
            self.output.push('=');
            self.serialize_member(member)?;
        }
        Ok(())
    }

    /// Renders members joined by `, `.
    pub fn serialize_list(&mut self, list: &List) -> SResult {
        for (i, member) in list.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.serialize_member(member)?;
        }
        Ok(())
    }

    pub fn serialize_item(&mut self, item: &Item) -> SResult {
        self.serialize_bare_item(item.bare_item())?;
        self.serialize_parameters(item.params())
    }

    fn serialize_member(&mut self, member: &Member) -> SResult {
        match member {
            Member::Item(item) => self.serialize_item(item),
            Member::InnerList(list) => self.serialize_inner_list(list),
        }
    }

    fn serialize_inner_list(&mut self, list: &InnerList) -> SResult {
        self.output.push('(');
        for (i, item) in list.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.serialize_item(item)?;
        }
        self.output.push(')');
        self.serialize_parameters(list.params())
    }

    /// A parameter holding no value, or holding `?1`, renders as a bare `;key`.
    fn serialize_parameters(&mut self, params: &Parameters) -> SResult {
        for (key, value) in params.iter() {
            self.output.push(';');
            self.write_key(key)?;
            match value {
                None | Some(BareItem::Bool(true)) => {}
                Some(bare_item) => {
                    self.output.push('=');
                    self.serialize_bare_item(bare_item)?;
                }
            }
        }
        Ok(())
    }

    fn serialize_bare_item(&mut self, bare_item: &BareItem) -> SResult {
        match bare_item {
            BareItem::String(s) => self.write_string(s),
            BareItem::ByteSeq(bytes) => {
                self.write_byte_seq(bytes);
                Ok(())
            }
            BareItem::Bool(b) => {
                self.write_bool(*b);
                Ok(())
            }
            BareItem::Integer(i) => self.write_integer(*i),
            BareItem::Decimal(d) => self.write_decimal(*d),
            BareItem::Token(t) => self.write_token(t),
        }
    }

    fn write_key(&mut self, key: &str) -> SResult {
        if !lexical::is_valid_key(key) {
            return Err(SerializeError::InvalidKey(key.to_string()));
        }
        self.output.push_str(key);
        Ok(())
    }

    fn write_integer(&mut self, value: i64) -> SResult {
        if !(MIN_INTEGER..=MAX_INTEGER).contains(&value) {
            return Err(SerializeError::IntegerOutOfRange(value));
        }
        self.output.push_str(&value.to_string());
        Ok(())
    }

    /// Shortest round-trip fixed-point form, fraction truncated to fit the
    /// 15 digit budget. Always has at least one fractional digit.
    fn write_decimal(&mut self, value: f64) -> SResult {
        if !value.is_finite() {
            return Err(SerializeError::NonFiniteDecimal(value));
        }
        // f64's Display never switches to exponent notation.
        let formatted = value.to_string();
        let (int_part, frac_part) = formatted
            .split_once('.')
            .unwrap_or((formatted.as_str(), ""));

        if int_part.len() > DECIMAL_DIGIT_BUDGET
            || (value >= 0.0 && int_part.len() > DECIMAL_DIGIT_BUDGET - 1)
        {
            return Err(SerializeError::DecimalOutOfRange(value));
        }

        let frac_len = frac_part.len().min(DECIMAL_DIGIT_BUDGET - int_part.len());
        self.output.push_str(int_part);
        self.output.push('.');
        if frac_len == 0 {
            self.output.push('0');
        } else {
            self.output.push_str(&frac_part[..frac_len]);
        }
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> SResult {
        self.output.push('"');
        for (index, b) in value.bytes().enumerate() {
            if !lexical::is_string_char(b) {
                return Err(SerializeError::InvalidStringChar { index });
            }
            if b == b'\\' || b == b'"' {
                self.output.push('\\');
            }
            self.output.push(b as char);
        }
        self.output.push('"');
        Ok(())
    }

    fn write_token(&mut self, token: &Token) -> SResult {
        if !token.is_valid() {
            return Err(SerializeError::InvalidToken(token.to_string()));
        }
        self.output.push_str(token.as_str());
        Ok(())
    }

    fn write_byte_seq(&mut self, bytes: &[u8]) {
        self.output.push('*');
        self.output.push_str(&STANDARD.encode(bytes));
        self.output.push('*');
    }

    fn write_bool(&mut self, value: bool) {
        self.output.push_str(if value { "?1" } else { "?0" });
    }
}
