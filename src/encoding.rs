//! UTF-16 code units → UTF-8.
//!
//! PDFium hands back text as host-endian 16-bit code units, NUL-terminated.
//! Non-surrogate units map one-to-one onto UTF-8 sequences of 1, 2 or 3
//! bytes. A high/low surrogate pair becomes a single 4-byte sequence; an
//! unpaired surrogate becomes U+FFFD so the result is always a valid `String`.

use crate::config::NulHandling;
use std::char::REPLACEMENT_CHARACTER;
use tracing::debug;

/// Convert `units` to UTF-8.
///
/// With [`NulHandling::Terminate`] conversion stops at the first zero unit,
/// even when more units follow. With [`NulHandling::Keep`] every unit is
/// converted and zeros come out as U+0000.
pub fn utf16_to_utf8(units: &[u16], nul: NulHandling) -> String {
    let units = match nul {
        NulHandling::Terminate => {
            let end = units.iter().position(|&u| u == 0).unwrap_or(units.len());
            &units[..end]
        }
        NulHandling::Keep => units,
    };

    let mut out = String::with_capacity(units.len());
    let mut lone_surrogates = 0usize;

    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(c) => out.push(c),
            Err(_) => {
                lone_surrogates += 1;
                out.push(REPLACEMENT_CHARACTER);
            }
        }
    }

    if lone_surrogates > 0 {
        debug!(
            "Replaced {} unpaired surrogate(s) with U+FFFD",
            lone_surrogates
        );
    }

    out
}
