//! Building a list by hand, serializing it and reading it back.
//!
//! Run with: cargo run --example build_field

use std::error::Error;
use structured_fields::{
    parse_list, to_string, to_writer, BareItem, InnerList, Item, List, Parameters, Token,
};

fn main() -> Result<(), Box<dyn Error>> {
    let mut list = List::new();

    let mut gzip = Item::new(Token::new("gzip"));
    gzip.params_mut().store("q", Some(BareItem::Decimal(1.0)));
    list.push(gzip);

    let mut params = Parameters::new();
    params.store("lvl", Some(BareItem::Integer(5)));
    list.push(InnerList::with_params(
        vec![Item::new(Token::new("br")), Item::new(b"dict".to_vec())],
        params,
    ));

    list.push(Item::new("free text, with \"quotes\""));

    let text = to_string(&list)?;
    println!("Serialized: {text}");

    let parsed = parse_list(&text)?;
    assert_eq!(parsed, list);
    println!("✓ Round-trip successful");

    // Values that have no canonical form are rejected, never written.
    let bad = Item::new(Token::new("9-not-a-token"));
    if let Err(err) = to_string(&bad) {
        println!("Rejected: {err}");
    }

    print!("Written: ");
    to_writer(std::io::stdout(), &list)?;
    println!();

    Ok(())
}
