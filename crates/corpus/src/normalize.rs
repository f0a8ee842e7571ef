use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Fold one surface word down to the lexeme form the corpus indexes:
/// NFKC, lowercase, non-word characters stripped, plural suffix removed.
pub fn normalize_term(word: &str) -> String {
    let folded = word.nfkc().collect::<String>().to_lowercase();
    let stripped = NON_WORD.replace_all(&folded, "").into_owned();
    stem(stripped)
}

/// Whitespace-tokenize a phrase into non-empty lexemes.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_term)
        .filter(|term| !term.is_empty())
        .collect()
}

fn stem(word: String) -> String {
    if word.len() > 3 {
        if let Some(base) = word.strip_suffix("ies") {
            let mut out = base.to_string();
            out.push('y');
            return out;
        }
    }
    if word.len() > 2
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        let mut out = word;
        out.pop();
        return out;
    }
    word
}
