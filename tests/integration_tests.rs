use structured_fields::{
    parse, parse_dictionary, parse_field_lines, parse_item, parse_list, to_string, to_writer,
    BareItem, Dictionary, Error, FieldType, InnerList, Item, List, Member, Parameters, Parser,
    ParserOptions, SerializeError, Token,
};

fn token(s: &str) -> BareItem {
    BareItem::Token(Token::new(s))
}

fn canonical(input: &str, field_type: FieldType) -> String {
    let value = parse(input, field_type).unwrap();
    to_string(&value).unwrap()
}

#[test]
fn test_canonical_lists() {
    let cases = [
        ("1,2,3", "1, 2, 3"),
        ("  a ,\tb  ", "a, b"),
        ("1.50, -0.0, 007", "1.5, -0.0, 7"),
        ("\"a\\\\b\", \"q\\\"\"", "\"a\\\\b\", \"q\\\"\""),
        ("(a b);x=1, ()", "(a b);x=1, ()"),
        ("text/html;charset=utf-8;q=0.9", "text/html;charset=utf-8;q=0.9"),
        ("a;  b=1", "a;b=1"),
        ("*aGVsbG8*", "*aGVsbG8=*"),
        ("", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(canonical(input, FieldType::List), expected, "input: {input:?}");
    }
}

#[test]
fn test_canonical_dictionaries() {
    let cases = [
        ("a=1,b=2", "a=1, b=2"),
        ("a, b=?0", "a=?1, b=?0"),
        ("a;x=1, b=(1 2);y", "a=?1;x=1, b=(1 2);y"),
        ("key*-_9=tok", "key*-_9=tok"),
        ("", ""),
    ];

    for (input, expected) in cases {
        assert_eq!(
            canonical(input, FieldType::Dictionary),
            expected,
            "input: {input:?}"
        );
    }
}

#[test]
fn test_round_trip_is_idempotent() {
    let inputs = [
        (FieldType::Item, "  \"hello world\";lang=\"en\";q=0.123  "),
        (FieldType::Item, "-999999999999999;a;b=?0"),
        (FieldType::List, "*AQID*, ?1;x, tok:en/x%y*z, 12.000001"),
        (FieldType::List, "(1),(\"x\" y);q,   z"),
        (FieldType::Dictionary, "u=2, i, p=(a b c);lvl=1, d=1.0"),
    ];

    for (field_type, input) in inputs {
        let value = parse(input, field_type).unwrap();
        let once = to_string(&value).unwrap();
        let twice = to_string(&parse(&once, field_type).unwrap()).unwrap();
        assert_eq!(once, twice, "input: {input:?}");
    }
}

#[test]
fn test_malformed_input_is_rejected() {
    let cases = [
        (FieldType::Item, "\"unterminated"),
        (FieldType::Item, "\"ctl\u{1}\""),
        (FieldType::Item, "?2"),
        (FieldType::Item, "?"),
        (FieldType::Item, "1;A=2"),
        (FieldType::Item, "1;a=1;a=2"),
        (FieldType::Item, "1 2"),
        (FieldType::Item, ""),
        (FieldType::Item, "1."),
        (FieldType::Item, "*not base64*"),
        (FieldType::List, "a,"),
        (FieldType::List, "a,,b"),
        (FieldType::List, "(a"),
        (FieldType::List, "(a  b)"),
        (FieldType::Dictionary, "a=1, a=2"),
        (FieldType::Dictionary, "a=1,"),
        (FieldType::Dictionary, "1=a"),
        (FieldType::Dictionary, "a=\"\\x\""),
    ];

    for (field_type, input) in cases {
        assert!(
            parse(input, field_type).is_err(),
            "{field_type} {input:?} should fail"
        );
    }
}

#[test]
fn test_error_positions() {
    let err = parse_item("\"abc").unwrap_err();
    assert_eq!(err.position(), 4);
    assert!(err.to_string().ends_with("at position 4"));

    assert_eq!(parse_list("a, b, ").unwrap_err().position(), 6);
    assert_eq!(parse_dictionary("a=1, b=2, a=3").unwrap_err().position(), 10);
    assert_eq!(parse_item("1;a;a").unwrap_err().position(), 4);
}

#[test]
fn test_integer_boundaries() {
    let max = parse_item("999999999999999").unwrap();
    assert_eq!(max.bare_item(), &BareItem::Integer(999_999_999_999_999));
    assert_eq!(to_string(&max).unwrap(), "999999999999999");

    let min = parse_item("-999999999999999").unwrap();
    assert_eq!(to_string(&min).unwrap(), "-999999999999999");

    assert!(parse_item("1000000000000000").is_err());
    assert!(parse_item("-1000000000000000").is_err());

    let too_big = Item::new(1_000_000_000_000_000i64);
    assert_eq!(
        to_string(&too_big).unwrap_err(),
        SerializeError::IntegerOutOfRange(1_000_000_000_000_000)
    );
}

#[test]
fn test_decimal_serialization() {
    assert_eq!(to_string(&Item::new(1.123456789)).unwrap(), "1.123456789");
    assert_eq!(
        to_string(&Item::new(123456789.123456789)).unwrap(),
        "123456789.123456"
    );
    assert_eq!(to_string(&Item::new(3.0)).unwrap(), "3.0");
    assert!(to_string(&Item::new(1e15)).is_err());
    assert!(to_string(&Item::new(f64::INFINITY)).is_err());
}

#[test]
fn test_byte_sequence_padding_tolerance() {
    for input in ["*aGVsbG8=*", "*aGVsbG8*"] {
        let item = parse_item(input).unwrap();
        assert_eq!(item.bare_item().as_byte_seq(), Some(&b"hello"[..]));
        assert_eq!(to_string(&item).unwrap(), "*aGVsbG8=*");
    }
}

#[test]
fn test_dictionary_bare_key_shorthand() {
    let dict = parse_dictionary("a, b=?0").unwrap();

    let mut expected = Dictionary::new();
    expected.store("a", Member::Item(Item::new(true)));
    expected.store("b", Member::Item(Item::new(false)));
    assert_eq!(dict, expected);

    let mut reversed = Dictionary::new();
    reversed.store("b", Member::Item(Item::new(false)));
    reversed.store("a", Member::Item(Item::new(true)));
    assert_ne!(dict, reversed);
}

#[test]
fn test_parameter_order_is_part_of_the_value() {
    let item = parse_item("tok;a=1;b=2").unwrap();

    let mut swapped = Parameters::new();
    swapped.store("b", Some(BareItem::Integer(2)));
    swapped.store("a", Some(BareItem::Integer(1)));
    let reordered = Item::with_params(token("tok"), swapped);

    assert_ne!(item, reordered);
    assert_ne!(to_string(&item).unwrap(), to_string(&reordered).unwrap());

    let list = parse_list("(x y);p;q, z;q;p").unwrap();
    assert_ne!(list, parse_list("(x y);q;p, z;p;q").unwrap());
}

#[test]
fn test_empty_containers() {
    assert!(parse_list("").unwrap().is_empty());
    assert!(parse_list("   ").unwrap().is_empty());
    assert!(parse_dictionary("").unwrap().is_empty());
    assert_eq!(to_string(&List::new()).unwrap(), "");
    assert_eq!(to_string(&Dictionary::new()).unwrap(), "");
}

#[test]
fn test_inner_list_with_parameters() {
    let list = parse_list("(a b);x=1").unwrap();
    let inner = list.get(0).and_then(Member::as_inner_list).unwrap();

    let items: Vec<_> = inner.iter().map(Item::bare_item).cloned().collect();
    assert_eq!(items, vec![token("a"), token("b")]);
    assert_eq!(inner.params().load("x"), Some(&Some(BareItem::Integer(1))));
    assert_eq!(to_string(&list).unwrap(), "(a b);x=1");
}

#[test]
fn test_programmatic_values() {
    let mut params = Parameters::new();
    params.store("lvl", Some(BareItem::Integer(3)));
    params.store("flag", None);

    let mut dict = Dictionary::new();
    dict.store("name", Member::from(Item::new("wheel")));
    dict.store(
        "parts",
        Member::from(InnerList::with_params(
            vec![Item::new(token("spoke")), Item::new(b"\x00\xff".to_vec())],
            params,
        )),
    );
    // Overwriting keeps the first position.
    dict.store("name", Member::from(Item::new("hub")));

    assert_eq!(
        to_string(&dict).unwrap(),
        "name=\"hub\", parts=(spoke *AP8=*);lvl=3;flag"
    );
}

#[test]
fn test_serialize_rejects_invalid_values() {
    assert!(matches!(
        to_string(&Item::new("tab\there")),
        Err(SerializeError::InvalidStringChar { index: 3 })
    ));
    assert!(matches!(
        to_string(&Item::new(Token::new("9lives"))),
        Err(SerializeError::InvalidToken(_))
    ));

    let mut dict = Dictionary::new();
    dict.store("UPPER", Member::from(Item::new(1i64)));
    assert!(matches!(
        to_string(&dict),
        Err(SerializeError::InvalidKey(key)) if key == "UPPER"
    ));
}

#[test]
fn test_field_lines() {
    let value = parse_field_lines(&["a;x", "b, c"], FieldType::List).unwrap();
    assert_eq!(to_string(&value).unwrap(), "a;x, b, c");

    let lines = vec!["u=1".to_string(), "u=2".to_string()];
    assert!(parse_field_lines(lines.as_slice(), FieldType::Dictionary).is_err());
}

#[test]
fn test_writer_and_error_conversion() {
    let mut out = Vec::new();
    to_writer(&mut out, &parse_dictionary("a=1").unwrap()).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "a=1");

    let err: Error = parse_list("a,").unwrap_err().into();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_parser_with_trace_gives_same_result() {
    let input = "a=(1 2);x, b=\"s\", c=*AA==*";
    let plain = Parser::new(input).parse_dictionary().unwrap();
    let traced = Parser::with_options(input, ParserOptions::new().with_trace(true))
        .parse_dictionary()
        .unwrap();
    assert_eq!(plain, traced);
}

#[test]
fn test_typed_extraction() {
    let item = parse_item("42").unwrap();
    let (bare, _) = item.into_parts();
    assert_eq!(i64::try_from(bare.clone()).unwrap(), 42);

    let err = String::try_from(bare).unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}
