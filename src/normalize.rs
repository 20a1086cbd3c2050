//! Text helpers shared by every extraction strategy: whitespace cleanup,
//! `HH:MM` time tokens, ISO date prefixes and cs-CZ title ordering.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}):([0-5]\d)").expect("valid time regex"));

/// Trims and collapses every run of whitespace (including NBSP) into one space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Finds the first `H:MM` / `HH:MM` token with a valid hour and returns it
/// zero-padded, e.g. `"od 9:30 h"` -> `"09:30"`.
pub fn extract_time_token(s: &str) -> Option<String> {
    TIME_TOKEN.captures_iter(s).find_map(|caps| {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute = caps.get(2)?.as_str();
        (hour <= 23).then(|| format!("{:02}:{}", hour, minute))
    })
}

/// Canonical `HH:MM` form of anything that carries a time of day:
/// `"19:30"`, `"9:05:00"`, `"2025-09-07 13:00:00"`, `"2025-09-07T19:30:00+02:00"`.
pub fn canonical_time(s: &str) -> Option<String> {
    let s = s.trim();
    // Skip the date part so its digits never pair up with a colon.
    let rest = match date_portion(s) {
        Some(date) => &s[date.len()..],
        None => s,
    };
    extract_time_token(rest)
}

/// Returns the leading `YYYY-MM-DD` of a date or datetime string.
pub fn date_portion(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let head = s.get(..10)?;
    let bytes = head.as_bytes();
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    shape_ok.then_some(head)
}

const CZECH_ALPHABET: [&str; 31] = [
    "a", "b", "c", "č", "d", "e", "f", "g", "h", "ch", "i", "j", "k", "l", "m", "n", "o", "p",
    "q", "r", "ř", "s", "š", "t", "u", "v", "w", "x", "y", "z", "ž",
];

const PUNCT_WEIGHT: u32 = 1;
const DIGIT_BASE: u32 = 100;
const LETTER_BASE: u32 = 1_000;
const FOREIGN_BASE: u32 = 10_000;

/// Strips accents that are not letters of their own in Czech.
fn fold_accent(c: char) -> (char, bool) {
    let base = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' | 'ě' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' | 'ů' => 'u',
        'ý' | 'ÿ' => 'y',
        'ď' => 'd',
        'ť' => 't',
        'ň' => 'n',
        'ç' => 'c',
        other => return (other, false),
    };
    (base, true)
}

fn letter_weight(letter: &str) -> Option<u32> {
    CZECH_ALPHABET
        .iter()
        .position(|l| *l == letter)
        .map(|pos| LETTER_BASE + pos as u32)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: Vec<u32>,
    accents: Vec<u8>,
    case: Vec<u8>,
}

fn collation_key(s: &str) -> CollationKey {
    let chars: Vec<char> = s.chars().collect();
    let mut key = CollationKey {
        primary: Vec::with_capacity(chars.len()),
        accents: Vec::with_capacity(chars.len()),
        case: Vec::with_capacity(chars.len()),
    };

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let upper = c.is_uppercase();
        let lower = c.to_lowercase().next().unwrap_or(c);

        if lower == 'c' && chars.get(i + 1).is_some_and(|n| n.to_lowercase().eq(['h'])) {
            key.primary.push(letter_weight("ch").unwrap_or(FOREIGN_BASE));
            key.accents.push(0);
            key.case.push(upper as u8);
            i += 2;
            continue;
        }

        let (base, accented) = fold_accent(lower);
        let weight = if let Some(d) = base.to_digit(10) {
            DIGIT_BASE + d
        } else if base.is_alphabetic() {
            let mut buf = [0u8; 4];
            letter_weight(base.encode_utf8(&mut buf)).unwrap_or(FOREIGN_BASE + base as u32)
        } else {
            PUNCT_WEIGHT
        };

        key.primary.push(weight);
        key.accents.push(accented as u8);
        key.case.push(upper as u8);
        i += 1;
    }
    key
}

/// Orders titles the way a Czech reader expects: `ch` after `h`, `č` after `c`,
/// accents and case only break ties.
pub fn czech_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_whitespace("  Sál \n\t 1\u{a0} "), "Sál 1");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn extracts_and_pads_time_tokens() {
        assert_eq!(extract_time_token("začátek 9:30").as_deref(), Some("09:30"));
        assert_eq!(extract_time_token("20:15 Sál A").as_deref(), Some("20:15"));
        assert_eq!(extract_time_token("bez času"), None);
        assert_eq!(extract_time_token("25:10 a 7:45").as_deref(), Some("07:45"));
    }

    #[test]
    fn canonical_time_ignores_date_digits() {
        assert_eq!(canonical_time("2025-09-07 13:00:00").as_deref(), Some("13:00"));
        assert_eq!(
            canonical_time("2025-09-07T19:30:00+02:00").as_deref(),
            Some("19:30")
        );
        assert_eq!(canonical_time("2025-09-07"), None);
        assert_eq!(canonical_time(" 9:05 ").as_deref(), Some("09:05"));
    }

    #[test]
    fn date_portion_requires_iso_shape() {
        assert_eq!(date_portion("2025-09-07T10:00"), Some("2025-09-07"));
        assert_eq!(date_portion("07.09.2025"), None);
        assert_eq!(date_portion("2025-9-7"), None);
    }

    #[test]
    fn czech_order_treats_ch_and_caron_letters_as_own_letters() {
        let mut titles = vec!["Chata", "Čas", "Cihla", "Žena", "Zima", "Hora", "Cukr"];
        titles.sort_by(|a, b| czech_cmp(a, b));
        assert_eq!(
            titles,
            vec!["Cihla", "Cukr", "Čas", "Hora", "Chata", "Zima", "Žena"]
        );
    }

    #[test]
    fn czech_order_breaks_ties_on_accent_then_case() {
        assert_eq!(czech_cmp("Dobrý den", "Dobry den"), Ordering::Greater);
        assert_eq!(czech_cmp("amélie", "Amélie"), Ordering::Less);
        assert_eq!(czech_cmp("Éra", "Eso"), Ordering::Less);
        assert_eq!(czech_cmp("2001", "Alien"), Ordering::Less);
    }
}
