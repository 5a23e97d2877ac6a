#![allow(dead_code)]

use miucore::symbol::{MString, Symbol};
use strum::IntoEnumIterator;

/// Every string over the alphabet of length at most `max_len`, shortest first.
pub fn all_strings(max_len: usize) -> Vec<MString> {
    let mut out = vec![MString::new()];
    let mut layer = vec![MString::new()];
    for _ in 0..max_len {
        layer = layer
            .iter()
            .flat_map(|prefix| {
                Symbol::iter().map(move |symbol| {
                    let mut s = prefix.clone();
                    s.push(symbol);
                    s
                })
            })
            .collect();
        out.extend(layer.iter().cloned());
    }
    out
}

pub fn symbol_from_index(index: u8) -> Symbol {
    match index % 3 {
        0 => Symbol::M,
        1 => Symbol::I,
        _ => Symbol::U,
    }
}
