//! Coercer configuration

use serde::{Deserialize, Serialize};

/// How empty input is coerced into an array or list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySequence {
    /// Empty input yields an empty collection
    #[default]
    Empty,
    /// Empty input is one empty token, coerced like any other
    SingleToken,
}

/// Options controlling a [`Coercer`](crate::Coercer)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CoercerOptions {
    /// Empty-sequence policy
    pub empty_sequence: EmptySequence,
}

impl CoercerOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the empty-sequence policy
    pub fn with_empty_sequence(mut self, policy: EmptySequence) -> Self {
        self.empty_sequence = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_json() {
        let options: CoercerOptions =
            serde_json::from_str(r#"{"empty-sequence": "single-token"}"#).unwrap();
        assert_eq!(options.empty_sequence, EmptySequence::SingleToken);

        let options: CoercerOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CoercerOptions::new());
    }
}
