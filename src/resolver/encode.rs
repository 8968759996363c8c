//! Placeholder encoding.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// URI component set: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode `text` for substitution into a `{query}` placeholder.
///
/// Percent-encoding runs first so that `%20` produced for a space is still
/// turned into `+`.
pub fn encode(text: &str, encode_placeholder: bool, space_to_plus: bool) -> String {
    let encoded: Cow<'_, str> = if encode_placeholder {
        utf8_percent_encode(text, COMPONENT).into()
    } else {
        Cow::Borrowed(text)
    };

    if space_to_plus {
        encoded.replace("%20", "+").replace(' ', "+")
    } else {
        encoded.into_owned()
    }
}
