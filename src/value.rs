//! Typed representation of Structured Field Values.
//!
//! ## Core Types
//!
//! - [`BareItem`]: one scalar (string, byte sequence, boolean, integer, decimal, token)
//! - [`Item`]: a bare item with its [`Parameters`]
//! - [`InnerList`]: a parenthesized group of items with its own parameters
//! - [`Member`]: an item or an inner list, the entry type of lists and dictionaries
//! - [`List`] and [`Dictionary`]: the two container field shapes
//! - [`FieldValue`]: any of the three top-level shapes, tagged by [`FieldType`]
//!
//! Values are plain owned trees. Every container owns its children exclusively
//! and there are no back-references.
//!
//! ## Building Values
//!
//! ```rust
//! use structured_fields::{BareItem, Item, Parameters, Token};
//!
//! let mut params = Parameters::new();
//! params.store("q", Some(BareItem::Decimal(0.9)));
//!
//! let item = Item::with_params(Token::new("text/html"), params);
//! assert!(item.bare_item().is_token());
//! ```
//!
//! ## Extracting Values
//!
//! `as_*` accessors return `None` on a variant mismatch; `TryFrom` conversions
//! return [`Error::TypeMismatch`](crate::Error::TypeMismatch):
//!
//! ```rust
//! use structured_fields::BareItem;
//!
//! let value = BareItem::Integer(42);
//! assert_eq!(value.as_integer(), Some(42));
//! assert_eq!(value.as_bool(), None);
//!
//! assert!(bool::try_from(value).is_err());
//! ```

use crate::lexical;
use crate::map::OrderedMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::ser::{SerializeSeq, SerializeStruct, SerializeTuple};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// An unquoted identifier, distinct from a quoted string.
///
/// Construction does not validate; [`Token::is_valid`] reports whether the
/// value would serialize.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Token(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns `true` if the token matches the token character class.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::Token;
    ///
    /// assert!(Token::new("gzip").is_valid());
    /// assert!(!Token::new("9lives").is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        lexical::is_valid_token(&self.0)
    }
}

impl Deref for Token {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token(value)
    }
}

/// The discriminant of a [`BareItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemType {
    String,
    ByteSeq,
    Bool,
    Integer,
    Decimal,
    Token,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemType::String => "string",
            ItemType::ByteSeq => "byte sequence",
            ItemType::Bool => "boolean",
            ItemType::Integer => "integer",
            ItemType::Decimal => "decimal",
            ItemType::Token => "token",
        })
    }
}

/// A scalar value without parameters.
///
/// The payloads are not range-checked on construction. Integers outside
/// 15 digits, decimals over the digit budget, invalid tokens and strings with
/// non-printable characters are all accepted here and rejected by the serializer.
#[derive(Clone, Debug, PartialEq)]
pub enum BareItem {
    String(String),
    ByteSeq(Vec<u8>),
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Token(Token),
}

impl BareItem {
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            BareItem::String(_) => ItemType::String,
            BareItem::ByteSeq(_) => ItemType::ByteSeq,
            BareItem::Bool(_) => ItemType::Bool,
            BareItem::Integer(_) => ItemType::Integer,
            BareItem::Decimal(_) => ItemType::Decimal,
            BareItem::Token(_) => ItemType::Token,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, BareItem::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_byte_seq(&self) -> bool {
        matches!(self, BareItem::ByteSeq(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, BareItem::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, BareItem::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, BareItem::Decimal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, BareItem::Token(_))
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::BareItem;
    ///
    /// assert_eq!(BareItem::from("hello").as_str(), Some("hello"));
    /// assert_eq!(BareItem::Integer(42).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BareItem::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_byte_seq(&self) -> Option<&[u8]> {
        match self {
            BareItem::ByteSeq(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BareItem::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BareItem::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a decimal, returns it. Integers are not widened.
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            BareItem::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            BareItem::Token(t) => Some(t),
            _ => None,
        }
    }
}

impl Serialize for BareItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BareItem::String(s) => serializer.serialize_str(s),
            BareItem::ByteSeq(bytes) => {
                let mut state = serializer.serialize_struct("ByteSeq", 2)?;
                state.serialize_field("__type", "binary")?;
                state.serialize_field("value", &STANDARD.encode(bytes))?;
                state.end()
            }
            BareItem::Bool(b) => serializer.serialize_bool(*b),
            BareItem::Integer(i) => serializer.serialize_i64(*i),
            BareItem::Decimal(d) => serializer.serialize_f64(*d),
            BareItem::Token(t) => t.serialize(serializer),
        }
    }
}

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Token", 2)?;
        state.serialize_field("__type", "token")?;
        state.serialize_field("value", &self.0)?;
        state.end()
    }
}

macro_rules! try_from_bare_item {
    ($target:ty, $variant:ident, $expected:expr) => {
        impl TryFrom<BareItem> for $target {
            type Error = crate::Error;

            fn try_from(value: BareItem) -> crate::Result<Self> {
                match value {
                    BareItem::$variant(v) => Ok(v),
                    other => Err(crate::Error::type_mismatch($expected, other.item_type())),
                }
            }
        }
    };
}

try_from_bare_item!(String, String, ItemType::String);
try_from_bare_item!(Vec<u8>, ByteSeq, ItemType::ByteSeq);
try_from_bare_item!(bool, Bool, ItemType::Bool);
try_from_bare_item!(i64, Integer, ItemType::Integer);
try_from_bare_item!(f64, Decimal, ItemType::Decimal);
try_from_bare_item!(Token, Token, ItemType::Token);

impl From<bool> for BareItem {
    fn from(value: bool) -> Self {
        BareItem::Bool(value)
    }
}

impl From<i32> for BareItem {
    fn from(value: i32) -> Self {
        BareItem::Integer(i64::from(value))
    }
}

impl From<i64> for BareItem {
    fn from(value: i64) -> Self {
        BareItem::Integer(value)
    }
}

impl From<u32> for BareItem {
    fn from(value: u32) -> Self {
        BareItem::Integer(i64::from(value))
    }
}

impl From<f64> for BareItem {
    fn from(value: f64) -> Self {
        BareItem::Decimal(value)
    }
}

impl From<String> for BareItem {
    fn from(value: String) -> Self {
        BareItem::String(value)
    }
}

impl From<&str> for BareItem {
    fn from(value: &str) -> Self {
        BareItem::String(value.to_string())
    }
}

impl From<Vec<u8>> for BareItem {
    fn from(value: Vec<u8>) -> Self {
        BareItem::ByteSeq(value)
    }
}

impl From<&[u8]> for BareItem {
    fn from(value: &[u8]) -> Self {
        BareItem::ByteSeq(value.to_vec())
    }
}

impl From<Token> for BareItem {
    fn from(value: Token) -> Self {
        BareItem::Token(value)
    }
}

/// Parameters attached to an [`Item`] or an [`InnerList`].
///
/// A `None` value means the key is present without a value, which renders as
/// `;key` and is boolean-true by convention. `Some(BareItem::Bool(true))` also
/// renders as `;key` but stays distinguishable until serialization.
pub type Parameters = OrderedMap<Option<BareItem>>;

/// An ordered map of keys to members.
pub type Dictionary = OrderedMap<Member>;

/// A bare item with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    bare_item: BareItem,
    params: Parameters,
}

impl Item {
    /// Creates an item with no parameters.
    pub fn new(bare_item: impl Into<BareItem>) -> Self {
        Item {
            bare_item: bare_item.into(),
            params: Parameters::new(),
        }
    }

    pub fn with_params(bare_item: impl Into<BareItem>, params: Parameters) -> Self {
        Item {
            bare_item: bare_item.into(),
            params,
        }
    }

    #[must_use]
    pub fn bare_item(&self) -> &BareItem {
        &self.bare_item
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    #[must_use]
    pub fn into_parts(self) -> (BareItem, Parameters) {
        (self.bare_item, self.params)
    }
}

impl From<BareItem> for Item {
    fn from(value: BareItem) -> Self {
        Item::new(value)
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.bare_item)?;
        tuple.serialize_element(&self.params)?;
        tuple.end()
    }
}

/// A parenthesized sequence of items. Its parameters belong to the group,
/// not to any inner item.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct InnerList {
    items: Vec<Item>,
    params: Parameters,
}

impl InnerList {
    pub fn new(items: Vec<Item>) -> Self {
        InnerList {
            items,
            params: Parameters::new(),
        }
    }

    pub fn with_params(items: Vec<Item>, params: Parameters) -> Self {
        InnerList { items, params }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    #[must_use]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl Serialize for InnerList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.items)?;
        tuple.serialize_element(&self.params)?;
        tuple.end()
    }
}

/// The discriminant of a [`Member`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberType {
    Item,
    InnerList,
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberType::Item => "item",
            MemberType::InnerList => "inner list",
        })
    }
}

/// An entry of a [`List`] or a value of a [`Dictionary`].
#[derive(Clone, Debug, PartialEq)]
pub enum Member {
    Item(Item),
    InnerList(InnerList),
}

impl Member {
    #[must_use]
    pub const fn member_type(&self) -> MemberType {
        match self {
            Member::Item(_) => MemberType::Item,
            Member::InnerList(_) => MemberType::InnerList,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self, Member::Item(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_inner_list(&self) -> bool {
        matches!(self, Member::InnerList(_))
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Member::Item(item) => Some(item),
            Member::InnerList(_) => None,
        }
    }

    #[must_use]
    pub fn as_inner_list(&self) -> Option<&InnerList> {
        match self {
            Member::InnerList(list) => Some(list),
            Member::Item(_) => None,
        }
    }

    /// Returns the parameters of the item or of the inner list.
    #[must_use]
    pub fn params(&self) -> &Parameters {
        match self {
            Member::Item(item) => item.params(),
            Member::InnerList(list) => list.params(),
        }
    }
}

impl From<Item> for Member {
    fn from(value: Item) -> Self {
        Member::Item(value)
    }
}

impl From<InnerList> for Member {
    fn from(value: InnerList) -> Self {
        Member::InnerList(value)
    }
}

impl From<BareItem> for Member {
    fn from(value: BareItem) -> Self {
        Member::Item(Item::new(value))
    }
}

impl TryFrom<Member> for Item {
    type Error = crate::Error;

    fn try_from(value: Member) -> crate::Result<Self> {
        match value {
            Member::Item(item) => Ok(item),
            other => Err(crate::Error::type_mismatch(
                MemberType::Item,
                other.member_type(),
            )),
        }
    }
}

impl TryFrom<Member> for InnerList {
    type Error = crate::Error;

    fn try_from(value: Member) -> crate::Result<Self> {
        match value {
            Member::InnerList(list) => Ok(list),
            other => Err(crate::Error::type_mismatch(
                MemberType::InnerList,
                other.member_type(),
            )),
        }
    }
}

impl Serialize for Member {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Member::Item(item) => item.serialize(serializer),
            Member::InnerList(list) => list.serialize(serializer),
        }
    }
}

/// An ordered sequence of members.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct List(Vec<Member>);

impl List {
    #[must_use]
    pub fn new() -> Self {
        List(Vec::new())
    }

    pub fn push(&mut self, member: impl Into<Member>) {
        self.0.push(member.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Member> {
        self.0.get(index)
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.0
    }

    pub fn members_mut(&mut self) -> &mut Vec<Member> {
        &mut self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Member> {
        self.0
    }
}

impl From<Vec<Member>> for List {
    fn from(value: Vec<Member>) -> Self {
        List(value)
    }
}

impl FromIterator<Member> for List {
    fn from_iter<T: IntoIterator<Item = Member>>(iter: T) -> Self {
        List(iter.into_iter().collect())
    }
}

impl IntoIterator for List {
    type Item = Member;
    type IntoIter = std::vec::IntoIter<Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for member in &self.0 {
            seq.serialize_element(member)?;
        }
        seq.end()
    }
}

/// Dictionaries and parameters serialize as a sequence of `[key, value]` pairs
/// so that order survives formats with unordered objects.
impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

/// The three top-level shapes a field value can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Item,
    List,
    Dictionary,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldType::Item => "item",
            FieldType::List => "list",
            FieldType::Dictionary => "dictionary",
        })
    }
}

impl FromStr for FieldType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "item" => Ok(FieldType::Item),
            "list" => Ok(FieldType::List),
            "dictionary" => Ok(FieldType::Dictionary),
            other => Err(crate::Error::InvalidFieldType(other.to_string())),
        }
    }
}

/// A parsed field value of any shape.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Item(Item),
    List(List),
    Dictionary(Dictionary),
}

impl FieldValue {
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Item(_) => FieldType::Item,
            FieldValue::List(_) => FieldType::List,
            FieldValue::Dictionary(_) => FieldType::Dictionary,
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            FieldValue::Item(item) => Some(item),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            FieldValue::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            FieldValue::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }
}

impl From<Item> for FieldValue {
    fn from(value: Item) -> Self {
        FieldValue::Item(value)
    }
}

impl From<List> for FieldValue {
    fn from(value: List) -> Self {
        FieldValue::List(value)
    }
}

impl From<Dictionary> for FieldValue {
    fn from(value: Dictionary) -> Self {
        FieldValue::Dictionary(value)
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FieldValue::Item(item) => item.serialize(serializer),
            FieldValue::List(list) => list.serialize(serializer),
            FieldValue::Dictionary(dict) => dict.serialize(serializer),
        }
    }
}
