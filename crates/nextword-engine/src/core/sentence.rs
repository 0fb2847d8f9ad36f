use crate::api::error::ConfigError;

/// The fixed sentence to reveal. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    words: Vec<String>,
}

impl Sentence {
    /// Split on whitespace. At least one word is required.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let words: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        if words.is_empty() {
            return Err(ConfigError::EmptySentence);
        }
        Ok(Self { words })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn first(&self) -> &str {
        // parse() guarantees at least one word
        &self.words[0]
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Words already shown, plus the position of the next one to reveal.
///
/// `next_index == revealed.len()` holds between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    revealed: Vec<String>,
    next_index: usize,
}

impl RevealState {
    /// Only the first word revealed.
    pub fn initial(sentence: &Sentence) -> Self {
        Self {
            revealed: vec![sentence.first().to_owned()],
            next_index: 1,
        }
    }

    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Revealed words joined with single spaces.
    pub fn text(&self) -> String {
        self.revealed.join(" ")
    }

    /// Append a word and move the index forward by one.
    pub(crate) fn advance(&mut self, word: impl Into<String>) {
        self.revealed.push(word.into());
        self.next_index += 1;
    }
}
