// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tokenizer and trimmer under arbitrary text and structured values.
//!
//! Item content is whatever authors wrote, in any script. Tokenizing must
//! never panic, and the terms that come out must be usable index keys.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lunrdex::engine::tokenizer::{is_separator, terms};
use lunrdex::{FieldInput, Value};

#[derive(Arbitrary, Debug)]
enum Input {
    Text(String),
    Values(Vec<String>),
}

fuzz_target!(|input: Input| {
    let field = match input {
        Input::Text(text) => FieldInput::Text(text),
        Input::Values(values) => FieldInput::Values(values.into_iter().map(Value::from).collect()),
    };
    let is_text = matches!(field, FieldInput::Text(_));

    let Ok(terms) = terms(&field, "body", "doc") else {
        // Only mappings are rejected, and strings never produce one.
        panic!("string input rejected");
    };

    for term in &terms {
        // INVARIANT 1: trimmed terms are never empty
        assert!(!term.is_empty());

        // INVARIANT 2: terms start and end on a word character
        let first = term.chars().next().unwrap();
        let last = term.chars().last().unwrap();
        assert!(first.is_alphanumeric() || first == '_');
        assert!(last.is_alphanumeric() || last == '_');

        // INVARIANT 3: split text never keeps a separator
        if is_text {
            assert!(!term.chars().any(is_separator));
        }
    }
});
