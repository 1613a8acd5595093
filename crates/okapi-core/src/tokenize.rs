/// Normalise `input` into a sequence of terms.
///
/// Splits on ASCII whitespace, lowercases ASCII letters, then splits each
/// word further at every non-alphabetic character. A word like `"it's"`
/// therefore yields `["it", "s"]` — there is no apostrophe handling, and
/// that is by design of the source algorithm, not an oversight.
///
/// The same function normalises both indexed document text and incoming
/// query text, so a query term matches an index term iff they tokenise to
/// the same string.
pub fn tokenise(input: &str) -> Vec<String> {
    let mut terms = Vec::new();

    for word in input.split_ascii_whitespace() {
        let mut current = String::new();
        for ch in word.chars() {
            if ch.is_ascii_alphabetic() {
                current.push(ch.to_ascii_lowercase());
            } else if !current.is_empty() {
                terms.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            terms.push(current);
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_lowercases() {
        assert_eq!(tokenise("Hello World"), vec!["hello", "world"]);
    }

    #[test]
    fn apostrophes_split_words_producing_lone_letters() {
        assert_eq!(
            tokenise("Hello, world! It's"),
            vec!["hello", "world", "it", "s"]
        );
    }

    #[test]
    fn empty_input_yields_no_terms() {
        assert!(tokenise("").is_empty());
        assert!(tokenise("   ").is_empty());
    }

    #[test]
    fn repeats_are_preserved_in_order() {
        assert_eq!(
            tokenise("the quick brown fox the quick dog"),
            vec!["the", "quick", "brown", "fox", "the", "quick", "dog"]
        );
    }

    #[test]
    fn non_ascii_letters_split_words() {
        // 'Ã©' is not classified as alphabetic by this tokeniser.
        let terms = tokenise("cafÃ©s");
        assert!(terms.iter().all(|t| t.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn idempotent_on_its_own_output() {
        let input = "The quick, brown fox! Jumps over; the lazy dog.";
        let once = tokenise(input);
        let rejoined = once.join(" ");
        let twice = tokenise(&rejoined);
        assert_eq!(once, twice);
    }

    #[test]
    fn digits_split_words_without_emitting_digit_tokens() {
        assert_eq!(tokenise("abc123def"), vec!["abc", "def"]);
    }
}
