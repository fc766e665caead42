//! Text cleanup applied between extraction and the LLM call.
//!
//! Uploaded documents regularly carry smart typography and mojibake from
//! earlier encoding round-trips; both confuse the model and the PDF renderer.

/// Ordered replacement table. Mojibake sequences come first so the later
/// single-character rules cannot split them.
const REPLACEMENTS: &[(&str, &str)] = &[
    // UTF-8 read as Latin-1 artifacts
    ("\u{e2}\u{20ac}\u{201c}", "-"),  // corrupted en-dash
    ("\u{e2}\u{20ac}\u{2122}", "'"),  // corrupted right single quote
    ("\u{e2}\u{20ac}\u{2dc}", "'"),   // corrupted left single quote
    ("\u{e2}\u{20ac}\u{153}", "\""),  // corrupted left double quote
    ("\u{e2}\u{20ac}\u{9d}", "\""),   // corrupted right double quote
    ("\u{e2}\u{20ac}\u{a2}", "\u{2022}"), // corrupted bullet
    ("\u{e2}\u{20ac}\u{a6}", "..."),  // corrupted ellipsis
    // Smart typography
    ("\u{2013}", "-"),
    ("\u{2014}", "-"),
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{2026}", "..."),
];

pub fn clean_encoding(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (from, to) in REPLACEMENTS {
        if cleaned.contains(from) {
            cleaned = cleaned.replace(from, to);
        }
    }
    cleaned.chars().map(fold_super_subscript).collect()
}

/// Sub/superscript digits are not supported by the PDF renderer's fonts.
fn fold_super_subscript(c: char) -> char {
    match c {
        '\u{2070}' | '\u{2080}' => '0',
        '\u{00b9}' | '\u{2081}' => '1',
        '\u{00b2}' | '\u{2082}' => '2',
        '\u{00b3}' | '\u{2083}' => '3',
        '\u{2074}' | '\u{2084}' => '4',
        '\u{2075}' | '\u{2085}' => '5',
        '\u{2076}' | '\u{2086}' => '6',
        '\u{2077}' | '\u{2087}' => '7',
        '\u{2078}' | '\u{2088}' => '8',
        '\u{2079}' | '\u{2089}' => '9',
        other => other,
    }
}
