//! Property-based tests for the parse/serialize round trip.
//!
//! Values are generated from the grammar's own character classes, serialized,
//! parsed back and compared.

use proptest::prelude::*;
use structured_fields::{
    parse_dictionary, parse_item, parse_list, to_string, BareItem, Dictionary, InnerList, Item,
    List, Member, Parameters, Token,
};

const MAX_INTEGER: i64 = 999_999_999_999_999;

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_*-]{0,7}"
}

fn token() -> impl Strategy<Value = Token> {
    "[A-Za-z][A-Za-z0-9_.:%*/-]{0,11}".prop_map(Token::new)
}

fn bare_item() -> impl Strategy<Value = BareItem> {
    prop_oneof![
        (-MAX_INTEGER..=MAX_INTEGER).prop_map(BareItem::Integer),
        // Three fractional digits always survive the 15 digit budget.
        (-999_999_999i64..=999_999_999, 0u32..1000).prop_map(|(int, frac)| {
            let text = format!("{int}.{frac:03}");
            BareItem::Decimal(text.parse().unwrap())
        }),
        "[ -~]{0,16}".prop_map(BareItem::String),
        token().prop_map(BareItem::Token),
        prop::collection::vec(any::<u8>(), 0..24).prop_map(BareItem::ByteSeq),
        any::<bool>().prop_map(BareItem::Bool),
    ]
}

fn parameters() -> impl Strategy<Value = Parameters> {
    prop::collection::vec((key(), prop::option::of(bare_item())), 0..3).prop_map(|entries| {
        let mut params = Parameters::new();
        for (key, value) in entries {
            // A stored `?1` reads back as a bare parameter.
            let value = value.filter(|v| *v != BareItem::Bool(true));
            params.store(key, value);
        }
        params
    })
}

fn item() -> impl Strategy<Value = Item> {
    (bare_item(), parameters()).prop_map(|(bare_item, params)| Item::with_params(bare_item, params))
}

fn member() -> impl Strategy<Value = Member> {
    prop_oneof![
        3 => item().prop_map(Member::Item),
        1 => (prop::collection::vec(item(), 0..4), parameters())
            .prop_map(|(items, params)| Member::InnerList(InnerList::with_params(items, params))),
    ]
}

proptest! {
    #[test]
    fn prop_integer_in_range_round_trips(n in -MAX_INTEGER..=MAX_INTEGER) {
        let text = n.to_string();
        let item = parse_item(&text).unwrap();
        prop_assert_eq!(item.bare_item(), &BareItem::Integer(n));
        prop_assert_eq!(to_string(&item).unwrap(), text);
    }

    #[test]
    fn prop_integer_out_of_range_fails(n in prop_oneof![
        i64::MIN..-MAX_INTEGER,
        (MAX_INTEGER + 1)..=i64::MAX,
    ]) {
        prop_assert!(to_string(&Item::new(n)).is_err());
        prop_assert!(parse_item(&n.to_string()).is_err());
    }

    #[test]
    fn prop_token_round_trips(t in token()) {
        let text = t.to_string();
        let item = parse_item(&text).unwrap();
        prop_assert_eq!(item.bare_item(), &BareItem::Token(t));
        prop_assert_eq!(to_string(&item).unwrap(), text);
    }

    #[test]
    fn prop_printable_string_round_trips(s in "[ -~]{0,32}") {
        let item = Item::new(s.clone());
        let text = to_string(&item).unwrap();
        let parsed = parse_item(&text).unwrap();
        prop_assert_eq!(parsed.bare_item().as_str(), Some(s.as_str()));
    }

    #[test]
    fn prop_control_characters_rejected(prefix in "[a-z]{0,4}", c in 0u8..0x20) {
        let s = format!("{prefix}{}", c as char);
        prop_assert!(to_string(&Item::new(s.clone())).is_err());
        let quoted = format!("\"{s}\"");
        prop_assert!(parse_item(&quoted).is_err());
    }

    #[test]
    fn prop_item_round_trips(item in item()) {
        let text = to_string(&item).unwrap();
        let parsed = parse_item(&text).unwrap();
        prop_assert_eq!(&parsed, &item);
        prop_assert_eq!(to_string(&parsed).unwrap(), text);
    }

    #[test]
    fn prop_list_serialization_is_idempotent(members in prop::collection::vec(member(), 0..5)) {
        let list: List = members.into_iter().collect();
        let once = to_string(&list).unwrap();
        let parsed = parse_list(&once).unwrap();
        prop_assert_eq!(&parsed, &list);
        prop_assert_eq!(to_string(&parsed).unwrap(), once);
    }

    #[test]
    fn prop_dictionary_serialization_is_idempotent(
        entries in prop::collection::vec((key(), member()), 0..5)
    ) {
        let mut dict = Dictionary::new();
        for (key, member) in entries {
            dict.store(key, member);
        }
        let once = to_string(&dict).unwrap();
        let parsed = parse_dictionary(&once).unwrap();
        let keys: Vec<_> = parsed.keys().collect();
        let expected: Vec<_> = dict.keys().collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(to_string(&parsed).unwrap(), once);
    }

    #[test]
    fn prop_parser_never_panics(input in "[ -~\t]{0,40}") {
        let _ = parse_item(&input);
        let _ = parse_list(&input);
        let _ = parse_dictionary(&input);
    }
}
