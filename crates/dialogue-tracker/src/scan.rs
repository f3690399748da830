//! Token scanning for utterance text.
//!
//! Keyword and number detection works on lowercased tokens rather than raw
//! substrings: text is split on any non-alphanumeric character, and runs of
//! digits are separated from runs of letters so "8000ft" scans as the number
//! 8000 followed by the unit "ft".

/// Split `text` into lowercased alphanumeric tokens.
pub fn tokens(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            if !current.is_empty() && !current_is_digit {
                out.push(std::mem::take(&mut current));
            }
            current_is_digit = true;
            current.push(ch);
        } else if ch.is_alphabetic() {
            if !current.is_empty() && current_is_digit {
                out.push(std::mem::take(&mut current));
            }
            current_is_digit = false;
            for lower in ch.to_lowercase() {
                current.push(lower);
            }
        } else if !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// The first integer literal in token order, if any.
pub fn first_number(tokens: &[String]) -> Option<f64> {
    tokens
        .iter()
        .find(|t| t.chars().all(|c| c.is_ascii_digit()))
        .and_then(|t| t.parse::<f64>().ok())
}

/// True if `word` appears as a standalone token.
pub fn has_token(tokens: &[String], word: &str) -> bool {
    tokens.iter().any(|t| t == word)
}

/// True if any of `words` appears as a standalone token.
pub fn has_any_token(tokens: &[String], words: &[&str]) -> bool {
    tokens.iter().any(|t| words.contains(&t.as_str()))
}

/// The token following the first occurrence of any of `triggers`.
pub fn token_after_any<'a>(tokens: &'a [String], triggers: &[&str]) -> Option<&'a str> {
    tokens
        .iter()
        .position(|t| triggers.contains(&t.as_str()))
        .and_then(|i| tokens.get(i + 1))
        .map(String::as_str)
}

/// Ordinal references of the form "(the) first|second|third|last one".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    First,
    Second,
    Third,
    Last,
}

/// Detect an ordinal reference: an ordinal word directly followed by "one".
pub fn ordinal(tokens: &[String]) -> Option<Ordinal> {
    tokens.windows(2).find_map(|pair| {
        if pair[1] != "one" {
            return None;
        }
        match pair[0].as_str() {
            "first" => Some(Ordinal::First),
            "second" => Some(Ordinal::Second),
            "third" => Some(Ordinal::Third),
            "last" => Some(Ordinal::Last),
            _ => None,
        }
    })
}
