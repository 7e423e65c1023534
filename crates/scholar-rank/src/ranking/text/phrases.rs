use std::collections::BTreeSet;

/// Words that never belong to a keyword span; they split chunks like punctuation does.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "all", "also", "an", "and", "any", "apply", "are", "as",
    "at", "be", "been", "before", "being", "below", "between", "both", "but", "by", "can",
    "could", "did", "do", "does", "each", "either", "eligible", "every", "for", "from", "had",
    "has", "have", "he", "her", "his", "if", "in", "into", "is", "it", "its", "least", "may",
    "minimum", "more", "most", "must", "no", "nor", "not", "of", "on", "only", "or", "other",
    "our", "over", "per", "same", "shall", "she", "should", "so", "such", "than", "that",
    "the", "their", "them", "then", "there", "these", "they", "this", "those", "through",
    "to", "under", "up", "upto", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "whose", "will", "with", "within", "would", "you", "your",
];

/// Lower-cases `text` and returns the distinct multi-word keyword spans it contains.
///
/// Spans are runs of two or more consecutive content words. Punctuation that ends a
/// clause, stop words and purely numeric tokens close the current run.
pub fn extract_noun_phrases(text: &str) -> BTreeSet<String> {
    let mut phrases = BTreeSet::new();
    if text.trim().is_empty() {
        return phrases;
    }

    let lowered = text.to_lowercase();
    let mut chunk: Vec<&str> = Vec::new();

    for raw in lowered.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '.' && c != '-');
        let word = word.trim_end_matches('.');
        let closes_clause = raw.ends_with([',', ';', ':', '!', '?', ')', '(', '"'])
            || (raw.ends_with('.') && !word.contains('.'));

        if word.is_empty() || is_boundary_word(word) {
            flush(&mut chunk, &mut phrases);
        } else {
            if raw.starts_with(['(', '"']) {
                flush(&mut chunk, &mut phrases);
            }
            chunk.push(word);
        }

        if closes_clause {
            flush(&mut chunk, &mut phrases);
        }
    }
    flush(&mut chunk, &mut phrases);

    phrases
}

fn is_boundary_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
        || word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',' || c == '-')
}

fn flush(chunk: &mut Vec<&str>, phrases: &mut BTreeSet<String>) {
    if chunk.len() >= 2 {
        let phrase = chunk.join(" ");
        let phrase = phrase.trim();
        if !phrase.is_empty() {
            phrases.insert(phrase.to_string());
        }
    }
    chunk.clear();
}
