//! Answer normalization.
//!
//! [`normalize`] is the canonical form every comparison starts from: trimmed,
//! lowercased, with internal whitespace runs collapsed to one space.
//! [`fold_literal`] layers the loose text rules of a [`LiteralPolicy`] on top
//! of it for free-text questions.

use crate::model::LiteralPolicy;

const ARTICLES: [&str; 3] = ["a", "an", "the"];

/// Canonicalize a raw answer for comparison.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`normalize`] for input that may be absent. Absent input is `""`.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// Normalize, then apply the literal folding rules of `policy`.
///
/// Typographic quotes and dashes are always read as their ASCII forms.
pub fn fold_literal(raw: &str, policy: &LiteralPolicy) -> String {
    let mut text = normalize(&raw.chars().map(ascii_typography).collect::<String>());

    if policy.ignore_punctuation {
        text = strip_punctuation(&text);
    }
    if policy.hyphen_as_space {
        text = normalize(&text.replace('-', " "));
    }
    if policy.ignore_articles {
        if let Some((first, rest)) = text.split_once(' ') {
            if ARTICLES.contains(&first) {
                text = rest.to_string();
            }
        }
    }

    text
}

/// Compare two folded literals, honoring plural tolerance.
pub fn literal_eq(a: &str, b: &str, policy: &LiteralPolicy) -> bool {
    if a == b {
        return true;
    }
    if !policy.plural_tolerance {
        return false;
    }
    let (short, long) = if a.len() < b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= 3 && long.strip_suffix('s') == Some(short)
}

/// Map smart quotes, modifier apostrophes and typographic dashes to ASCII.
fn ascii_typography(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{02BC}' | '\u{2032}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{2033}' => '"',
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
        _ => c,
    }
}

fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_punctuation() {
            out.push(c);
            continue;
        }
        let decimal_point = c == '.'
            && i > 0
            && chars[i - 1].is_ascii_digit()
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
        if decimal_point || c == '-' {
            out.push(c);
        }
    }

    normalize(&out)
}
