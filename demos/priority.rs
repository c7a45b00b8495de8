//! Reading a priority dictionary such as `u=2, i`.
//!
//! Run with: cargo run --example priority

use std::error::Error;
use structured_fields::{parse_dictionary, to_string, BareItem, Dictionary};

const DEFAULT_URGENCY: i64 = 3;

#[derive(Debug, PartialEq)]
struct Priority {
    urgency: i64,
    incremental: bool,
}

impl Priority {
    fn from_dictionary(dict: &Dictionary) -> Self {
        let bare = |key: &str| {
            dict.load(key)
                .and_then(|member| member.as_item())
                .map(|item| item.bare_item())
        };

        // Members of the wrong type are ignored, not rejected.
        let urgency = match bare("u") {
            Some(BareItem::Integer(u)) if (0..=7).contains(u) => *u,
            _ => DEFAULT_URGENCY,
        };
        let incremental = matches!(bare("i"), Some(BareItem::Bool(true)));

        Priority {
            urgency,
            incremental,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    for header in ["u=2, i", "i=?0", "u=9, x;y", "u=\"high\""] {
        let dict = parse_dictionary(header)?;
        let priority = Priority::from_dictionary(&dict);
        println!("{header:<12} => {priority:?} (canonical: {})", to_string(&dict)?);
    }

    match parse_dictionary("u=2, u=3") {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("rejected: {err}"),
    }

    Ok(())
}
