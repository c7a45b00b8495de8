//! Structured Field Value grammar
//!
//! This module documents the grammar accepted by [`Parser`](crate::Parser) and
//! produced by [`Serializer`](crate::Serializer).
//!
//! # Overview
//!
//! A field value is plain ASCII. The caller decides which of the three
//! top-level shapes to expect; the text alone does not say.
//!
//! ```text
//! sf-list       = list-member *( OWS "," OWS list-member )
//! list-member   = sf-item / inner-list
//!
//! inner-list    = "(" [ sf-item *( SP sf-item ) ] ")" parameters
//!
//! parameters    = *( ";" OWS param-key [ "=" param-value ] )
//! param-key     = key
//! key           = lcalpha *( lcalpha / DIGIT / "_" / "-" / "*" )
//! lcalpha       = %x61-7A ; a-z
//! param-value   = bare-item
//!
//! sf-dictionary = dict-member *( OWS "," OWS dict-member )
//! dict-member   = member-key ( parameters / ( "=" member-value ))
//! member-key    = key
//! member-value  = sf-item / inner-list
//!
//! sf-item       = bare-item parameters
//! bare-item     = sf-integer / sf-decimal / sf-string / sf-token
//!                 / sf-binary / sf-boolean
//! ```
//!
//! `OWS` is any run of spaces and horizontal tabs. Leading and trailing `OWS`
//! around the whole value is ignored; anything else left over is an error.
//!
//! # Keys
//!
//! - First character: `a`-`z`
//! - Following characters: `a`-`z`, `0`-`9`, `_`, `-`, `*`
//! - At most 255 characters
//!
//! A key may not repeat within one dictionary or one parameter list.
//!
//! # Bare Items
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Integer | `-`? 1 to 15 digits | `-42` |
//! | Decimal | `-`? digits `.` 1 to 6 digits | `4.5` |
//! | String | `"` printable ASCII, `\"` and `\\` escapes `"` | `"hi \"x\""` |
//! | Token | letter, then letters, digits or `_-.:%*/` | `text/html` |
//! | Byte sequence | `*` base64 `*` | `*aGVsbG8=*` |
//! | Boolean | `?1` or `?0` | `?1` |
//!
//! The first byte decides the type: `-` or a digit starts a number, `"` a
//! string, `*` a byte sequence, `?` a boolean and a letter a token.
//!
//! ## Numbers
//!
//! A number is a decimal when its digits are followed by `.` and at least one
//! digit; otherwise it ends before the `.`, which then fails as unexpected
//! input.
//!
//! ```text
//! 42          integer
//! -0.25       decimal
//! 1.          error at offset 1
//! 1.1234567   error at offset 8 (more than 6 fractional digits)
//! ```
//!
//! ## Byte Sequences
//!
//! The content between the asterisks is standard base64. Padding may be
//! present or omitted, and non-zero trailing bits are tolerated. Output is
//! always padded.
//!
//! # Parameters
//!
//! A parameter written without `=` has no value. It is stored as `None` and
//! means `?1`. A parameter holding `?1` serializes the same way:
//!
//! ```text
//! text/html;charset=utf-8;q=0.9;preload
//! ```
//!
//! # Dictionaries
//!
//! A member written without `=` is the boolean `?1` and may carry parameters:
//!
//! ```text
//! u=2, i, a;x=1
//! ```
//!
//! Dictionary members are always serialized with `=`, so the value above
//! becomes `u=2, i=?1, a=?1;x=1`.
//!
//! # Inner Lists
//!
//! Items are separated by exactly one space, with no space after `(` or before
//! `)`:
//!
//! ```text
//! (a b c);lvl=2     accepted
//! ()                accepted, empty
//! ( a)              rejected
//! (a  b)            rejected
//! ```
//!
//! # Canonical Form
//!
//! - Members are joined with `, `
//! - Decimals use the shortest representation that reads back the same value,
//!   truncated to 15 significant digits, and always keep one fractional digit
//! - Strings escape only `"` and `\`
//! - Byte sequences use padded standard base64
//!
//! Parsing a canonical string and serializing it again gives the same string.
//!
//! # Multiple Field Lines
//!
//! A field that appears on several lines is parsed as if the lines were joined
//! with `, `. See [`parse_field_lines`](crate::parse_field_lines).

// This module contains only documentation; no implementation code
