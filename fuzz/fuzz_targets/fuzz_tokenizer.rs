#![no_main]

use libfuzzer_sys::fuzz_target;
use shallow_xml::{
    concatenate, expand_empty_tags, tokenize, wellformedness_check, HasAttributes, Token,
};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    assert_eq!(concatenate(tokenize(input), None), input);

    // Forced rebuilds must not panic on anything the lexer accepts.
    let rebuilt = tokenize(input).map(|mut token| {
        token.reserialize();

        if let Some(attributes) = token.as_attributes_mut() {
            attributes.set_attribute("fuzz", "\"&<");
        }

        token
    });

    let _ = concatenate(expand_empty_tags(rebuilt, &[]), None);
    let _ = wellformedness_check(tokenize(input)).count();
    let _: Vec<Token<'static>> = tokenize(input).map(Token::into_owned).collect();
});
