//! Structured Field Value parsing.
//!
//! This module provides the [`Parser`], a recursive-descent recognizer that
//! turns a raw field value into an [`Item`], a [`List`] or a [`Dictionary`].
//!
//! ## Overview
//!
//! - **Single pass**: the cursor only moves forward; the next byte alone picks
//!   the production, so nothing is ever backtracked
//! - **All or nothing**: the first grammar violation aborts the parse with a
//!   [`ParseError`] carrying the byte offset; no partial value is returned
//! - **Whole input**: optional whitespace around the value is skipped, anything
//!   else left over is an error
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use structured_fields::{parse_dictionary, BareItem};
//!
//! let dict = parse_dictionary("u=2, i").unwrap();
//! let urgency = dict.load("u").and_then(|m| m.as_item()).map(|i| i.bare_item());
//! assert_eq!(urgency, Some(&BareItem::Integer(2)));
//! ```
//!
//! A [`Parser`] holds the cursor for exactly one input. Create a new one for
//! each field value.

use crate::error::ParseError;
use crate::lexical::{self, MAX_DECIMAL_FRACTION_DIGITS, MAX_KEY_LEN};
use crate::options::ParserOptions;
use crate::value::{
    BareItem, Dictionary, FieldType, FieldValue, InnerList, Item, List, Member, Parameters, Token,
};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

type PResult<T> = std::result::Result<T, ParseError>;

/// Maximum number of integer digits, sign excluded.
const MAX_INTEGER_DIGITS: usize = 15;

const PADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

// Some producers drop the `=` padding.
const UNPADDED: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

/// The Structured Field Value parser.
///
/// A parser handles one field value: the `parse_*` methods consume it.
///
/// # Examples
///
/// ```rust
/// use structured_fields::Parser;
///
/// let item = Parser::new("foo;f;g=?0").parse_item().unwrap();
/// assert_eq!(item.params().len(), 2);
/// ```
///
/// A consumed parser cannot be used again:
///
/// ```compile_fail
/// use structured_fields::Parser;
///
/// let parser = Parser::new("a, b");
/// let first = parser.parse_list();
/// let second = parser.parse_list();
/// ```
pub struct Parser<'a> {
    input: &'a [u8],
    position: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParserOptions::default())
    }

    pub fn with_options(input: &'a str, options: ParserOptions) -> Self {
        Parser {
            input: input.as_bytes(),
            position: 0,
            options,
        }
    }

    /// Creates a parser over raw field bytes. Bytes outside ASCII are
    /// rejected wherever they appear.
    pub fn from_bytes(input: &'a [u8]) -> Self {
        Parser {
            input,
            position: 0,
            options: ParserOptions::default(),
        }
    }

    /// Parses the whole input as a single item.
    pub fn parse_item(self) -> PResult<Item> {
        self.top_level(Self::item)
    }

    /// Parses the whole input as a list. Empty input yields an empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::Parser;
    ///
    /// assert!(Parser::new("").parse_list().unwrap().is_empty());
    /// assert!(Parser::new("a, b,").parse_list().is_err());
    /// ```
    pub fn parse_list(self) -> PResult<List> {
        self.top_level(Self::list)
    }

    /// Parses the whole input as a dictionary. Empty input yields an empty
    /// dictionary; a repeated key is an error.
    pub fn parse_dictionary(self) -> PResult<Dictionary> {
        self.top_level(Self::dictionary)
    }

    /// Parses the whole input as the given field shape.
    pub fn parse(self, field_type: FieldType) -> PResult<FieldValue> {
        match field_type {
            FieldType::Item => self.parse_item().map(FieldValue::Item),
            FieldType::List => self.parse_list().map(FieldValue::List),
            FieldType::Dictionary => self.parse_dictionary().map(FieldValue::Dictionary),
        }
    }

    fn top_level<T>(mut self, production: fn(&mut Self) -> PResult<T>) -> PResult<T> {
        self.skip_ows();
        let result = match production(&mut self) {
            Ok(value) => self.end().map(|()| value),
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            if self.options.trace {
                tracing::debug!(
                    position = err.position(),
                    message = err.message(),
                    "field value rejected"
                );
            }
        }
        result
    }

    fn dictionary(&mut self) -> PResult<Dictionary> {
        self.trace("dictionary");
        let mut dict = Dictionary::new();
        while !self.at_end() {
            let key_start = self.position;
            let key = self.key()?;
            if dict.contains_key(&key) {
                return Err(ParseError::new(
                    key_start,
                    format!("duplicate key in dictionary: {key}"),
                ));
            }

            let member = if self.peek() == Some(b'=') {
                self.position += 1;
                self.member()?
            } else {
                let params = self.parameters()?;
                Member::Item(Item::with_params(BareItem::Bool(true), params))
            };
            dict.store(key, member);

            if !self.member_separator("dictionary")? {
                break;
            }
        }
        Ok(dict)
    }

    fn list(&mut self) -> PResult<List> {
        self.trace("list");
        let mut members = Vec::new();
        while !self.at_end() {
            members.push(self.member()?);
            if !self.member_separator("list")? {
                break;
            }
        }
        Ok(List::from(members))
    }

    /// Consumes `OWS "," OWS` between members. Returns `false` at end of input.
    fn member_separator(&mut self, container: &str) -> PResult<bool> {
        self.skip_ows();
        if self.at_end() {
            return Ok(false);
        }
        self.expect(b',')?;
        self.skip_ows();
        if self.at_end() {
            return Err(ParseError::new(
                self.position,
                format!("trailing comma in {container}"),
            ));
        }
        Ok(true)
    }

    fn member(&mut self) -> PResult<Member> {
        self.trace("member");
        if self.peek() == Some(b'(') {
            self.inner_list().map(Member::InnerList)
        } else {
            self.item().map(Member::Item)
        }
    }

    fn inner_list(&mut self) -> PResult<InnerList> {
        self.trace("inner_list");
        self.expect(b'(')?;
        let mut items = Vec::new();
        if self.peek() != Some(b')') {
            loop {
                items.push(self.item()?);
                match self.peek() {
                    Some(b')') => break,
                    Some(b' ') => {
                        self.position += 1;
                        if matches!(self.peek(), Some(b' ' | b')')) {
                            return Err(ParseError::new(
                                self.position,
                                "inner list items must be separated by exactly one space",
                            ));
                        }
                    }
                    Some(b) => {
                        return Err(ParseError::new(
                            self.position,
                            format!(
                                "malformed inner list: expected a space or ')', found {}",
                                describe(b)
                            ),
                        ))
                    }
                    None => return Err(self.unexpected_end("inner list")),
                }
            }
        }
        // closing ')'
        self.position += 1;
        let params = self.parameters()?;
        Ok(InnerList::with_params(items, params))
    }

    fn item(&mut self) -> PResult<Item> {
        self.trace("item");
        let bare_item = self.bare_item()?;
        let params = self.parameters()?;
        Ok(Item::with_params(bare_item, params))
    }

    fn parameters(&mut self) -> PResult<Parameters> {
        self.trace("parameters");
        let mut params = Parameters::new();
        while self.peek() == Some(b';') {
            self.position += 1;
            self.skip_ows();
            let key_start = self.position;
            let key = self.key()?;
            if params.contains_key(&key) {
                return Err(ParseError::new(
                    key_start,
                    format!("duplicate parameter key: {key}"),
                ));
            }
            let value = if self.peek() == Some(b'=') {
                self.position += 1;
                Some(self.bare_item()?)
            } else {
                None
            };
            params.store(key, value);
        }
        Ok(params)
    }

    fn bare_item(&mut self) -> PResult<BareItem> {
        self.trace("bare_item");
        match self.peek() {
            Some(b'"') => self.string().map(BareItem::String),
            Some(b'*') => self.byte_seq().map(BareItem::ByteSeq),
            Some(b'?') => self.boolean().map(BareItem::Bool),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.number(),
            Some(b) if lexical::is_token_start(b) => self.token().map(BareItem::Token),
            Some(b) => Err(ParseError::new(
                self.position,
                format!("unexpected character {}", describe(b)),
            )),
            None => Err(self.unexpected_end("bare item")),
        }
    }

    fn string(&mut self) -> PResult<String> {
        self.trace("string");
        self.expect(b'"')?;
        let mut out = String::new();
        loop {
            let Some(b) = self.next_byte() else {
                return Err(ParseError::new(self.position, "unterminated string"));
            };
            match b {
                b'\\' => match self.next_byte() {
                    Some(c @ (b'"' | b'\\')) => out.push(c as char),
                    Some(c) => {
                        return Err(ParseError::new(
                            self.position - 1,
                            format!("invalid escape {} in string, expected '\"' or '\\'", describe(c)),
                        ))
                    }
                    None => return Err(ParseError::new(self.position, "unterminated string")),
                },
                b'"' => return Ok(out),
                b if lexical::is_string_char(b) => out.push(b as char),
                b => {
                    return Err(ParseError::new(
                        self.position - 1,
                        format!("character {} outside of printable ASCII in string", describe(b)),
                    ))
                }
            }
        }
    }

    fn token(&mut self) -> PResult<Token> {
        self.trace("token");
        let start = self.position;
        match self.peek() {
            Some(b) if lexical::is_token_start(b) => self.position += 1,
            _ => return Err(ParseError::new(start, "expected token")),
        }
        self.advance_while(lexical::is_token_char);
        Ok(Token::new(self.text(start)))
    }

    fn key(&mut self) -> PResult<String> {
        self.trace("key");
        let start = self.position;
        match self.peek() {
            Some(b) if lexical::is_key_start(b) => self.position += 1,
            Some(b) => {
                return Err(ParseError::new(
                    start,
                    format!("expected key starting with a-z, found {}", describe(b)),
                ))
            }
            None => return Err(self.unexpected_end("key")),
        }
        self.advance_while(lexical::is_key_char);
        if self.position - start > MAX_KEY_LEN {
            return Err(ParseError::new(
                start,
                format!("key exceeds {MAX_KEY_LEN} characters"),
            ));
        }
        Ok(self.text(start))
    }

    fn byte_seq(&mut self) -> PResult<Vec<u8>> {
        self.trace("byte_seq");
        self.expect(b'*')?;
        let start = self.position;
        self.advance_while(lexical::is_base64_char);
        let end = self.position;
        match self.peek() {
            Some(b'*') => self.position += 1,
            Some(b) => {
                return Err(ParseError::new(
                    self.position,
                    format!("invalid character {} in byte sequence", describe(b)),
                ))
            }
            None => return Err(ParseError::new(self.position, "unterminated byte sequence")),
        }

        let encoded = &self.input[start..end];
        PADDED
            .decode(encoded)
            .or_else(|_| UNPADDED.decode(encoded))
            .map_err(|err| ParseError::new(start, format!("invalid base64 in byte sequence: {err}")))
    }

    fn boolean(&mut self) -> PResult<bool> {
        self.trace("boolean");
        self.expect(b'?')?;
        match self.next_byte() {
            Some(b'1') => Ok(true),
            Some(b'0') => Ok(false),
            Some(_) => Err(ParseError::new(
                self.position - 1,
                "a '?' must be followed by '0' or '1'",
            )),
            None => Err(self.unexpected_end("boolean")),
        }
    }

    /// `-`? DIGIT+ (`.` DIGIT{1,6})?
    fn number(&mut self) -> PResult<BareItem> {
        self.trace("number");
        let start = self.position;
        if self.peek() == Some(b'-') {
            self.position += 1;
        }
        let digits_start = self.position;
        self.advance_while(|b| b.is_ascii_digit());
        if self.position == digits_start {
            return Err(ParseError::new(self.position, "expected a digit"));
        }

        let has_fraction = self.peek() == Some(b'.')
            && matches!(self.input.get(self.position + 1), Some(b) if b.is_ascii_digit());
        if has_fraction {
            self.position += 1;
            let fraction_start = self.position;
            while self.position - fraction_start < MAX_DECIMAL_FRACTION_DIGITS
                && matches!(self.peek(), Some(b) if b.is_ascii_digit())
            {
                self.position += 1;
            }
            return self
                .text(start)
                .parse::<f64>()
                .map(BareItem::Decimal)
                .map_err(|err| ParseError::new(start, format!("invalid decimal: {err}")));
        }

        if self.position - digits_start > MAX_INTEGER_DIGITS {
            return Err(ParseError::new(
                start,
                "too many digits: integers must not have more than 15 digits",
            ));
        }
        self.text(start)
            .parse::<i64>()
            .map(BareItem::Integer)
            .map_err(|err| ParseError::new(start, format!("invalid integer: {err}")))
    }

    fn end(&mut self) -> PResult<()> {
        self.skip_ows();
        if self.at_end() {
            Ok(())
        } else {
            Err(ParseError::new(
                self.position,
                "expected end of input, but found more data",
            ))
        }
    }

    fn expect(&mut self, expected: u8) -> PResult<()> {
        match self.peek() {
            Some(b) if b == expected => {
                self.position += 1;
                Ok(())
            }
            Some(b) => Err(ParseError::new(
                self.position,
                format!("expected '{}', found {}", expected as char, describe(b)),
            )),
            None => Err(ParseError::new(
                self.position,
                format!("expected '{}', found end of input", expected as char),
            )),
        }
    }

    fn unexpected_end(&self, what: &str) -> ParseError {
        ParseError::new(self.position, format!("unexpected end of input in {what}"))
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    #[inline]
    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.position += 1;
        Some(b)
    }

    fn advance_while(&mut self, pred: impl Fn(u8) -> bool) {
        while matches!(self.peek(), Some(b) if pred(b)) {
            self.position += 1;
        }
    }

    fn skip_ows(&mut self) {
        self.advance_while(lexical::is_ows);
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Input from `start` to the cursor. Only called on ranges already
    /// checked to be ASCII.
    fn text(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.position]).into_owned()
    }

    fn trace(&self, production: &'static str) {
        if self.options.trace {
            tracing::trace!(
                production,
                position = self.position,
                rest = %String::from_utf8_lossy(&self.input[self.position..]),
                "enter"
            );
        }
    }
}

fn describe(b: u8) -> String {
    if lexical::is_string_char(b) {
        format!("'{}'", b as char)
    } else {
        format!("0x{b:02x}")
    }
}
