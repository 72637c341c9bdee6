// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Artifact decoding under adversarial input.
//!
//! `lunrdex inspect` reads whatever file it is pointed at. Garbage should give
//! an error, never a panic, and anything that decodes must re-encode.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lunrdex::artifact::{decode, detect_format, encode};

fuzz_target!(|data: &[u8]| {
    if let Ok(artifact) = decode(data) {
        let format = detect_format(data);
        let bytes = encode(&artifact, format).expect("decoded artifact must re-encode");
        let again = decode(&bytes).expect("re-encoded artifact must decode");
        assert_eq!(again.index, artifact.index);
        assert_eq!(again.baseurl, artifact.baseurl);
    }
});
