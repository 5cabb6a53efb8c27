//! Search-string tokenizer.
//!
//! A raw search string mixes free-text title words and `#`-prefixed tags:
//! `"hello #a world #b"`. Splitting the two apart happens here; building the
//! actual filter query is the store's job.
//!
//! Every token is classified into exactly one bucket, never both, never
//! dropped. Any input string is valid; parsing never fails.

/// Leading character that marks a search token as a tag.
const TAG_MARKER: char = '#';

/// A search string split into its title part and its tag part.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchTerms {
    /// Title words re-joined into one phrase, matched as a substring.
    pub title_phrase: String,
    /// Tag tokens, marker included. Matched as a set downstream, so
    /// duplicates are allowed but add no filtering power.
    pub tags: Vec<String>,
}

impl SearchTerms {
    /// Split `input` on whitespace (runs collapse, edges trimmed) and classify
    /// each token: `#`-prefixed tokens become tags, the rest title words.
    ///
    /// NOTE: title words are concatenated with no separator, so
    /// `"hello world"` becomes the phrase `"helloworld"`. Looks odd, but the
    /// deployed clients rely on the current matching behavior; do not change
    /// it without a product decision.
    pub fn parse(input: &str) -> Self {
        let mut title_words: Vec<&str> = Vec::new();
        let mut tags: Vec<String> = Vec::new();

        for token in input.split_whitespace() {
            if token.starts_with(TAG_MARKER) {
                tags.push(token.to_string());
            } else {
                title_words.push(token);
            }
        }

        Self {
            title_phrase: title_words.concat(),
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_token_into_exactly_one_bucket() {
        let terms = SearchTerms::parse("hello #a world #b");

        assert_eq!(terms.title_phrase, "helloworld");
        assert_eq!(terms.tags, vec!["#a", "#b"]);
    }

    #[test]
    fn empty_input_yields_empty_terms() {
        assert_eq!(SearchTerms::parse(""), SearchTerms::default());
    }

    #[test]
    fn whitespace_only_input_yields_empty_terms() {
        assert_eq!(SearchTerms::parse("   "), SearchTerms::default());
        assert_eq!(SearchTerms::parse("\t \n"), SearchTerms::default());
    }

    #[test]
    fn tags_only() {
        let terms = SearchTerms::parse("#rust #blog");

        assert_eq!(terms.title_phrase, "");
        assert_eq!(terms.tags, vec!["#rust", "#blog"]);
    }

    #[test]
    fn words_only() {
        let terms = SearchTerms::parse("rust blog engine");

        assert_eq!(terms.title_phrase, "rustblogengine");
        assert!(terms.tags.is_empty());
    }

    #[test]
    fn whitespace_runs_collapse_before_tokenizing() {
        let terms = SearchTerms::parse("  hello \t\t #a  \n world ");

        assert_eq!(terms.title_phrase, "helloworld");
        assert_eq!(terms.tags, vec!["#a"]);
    }

    #[test]
    fn duplicate_tags_are_kept() {
        // Deduplication is pointless for a containment filter, so we don't.
        let terms = SearchTerms::parse("#a #a");

        assert_eq!(terms.tags, vec!["#a", "#a"]);
    }

    #[test]
    fn marker_in_the_middle_of_a_word_is_not_a_tag() {
        let terms = SearchTerms::parse("c#notes");

        assert_eq!(terms.title_phrase, "c#notes");
        assert!(terms.tags.is_empty());
    }
}
