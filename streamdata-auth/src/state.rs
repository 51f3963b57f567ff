use oauth2::CsrfToken;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the generated `state` value
pub const STATE_LENGTH: usize = 30;

/// Anti-forgery `state` value for a single authorization attempt.
///
/// Generated fresh per sign-in, compared once against the value echoed back
/// by the provider, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNonce(String);

impl StateNonce {
    pub fn generate() -> Self {
        let value: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the provider echoed back this exact value
    pub fn matches(&self, returned: &str) -> bool {
        let expected = self.0.as_bytes();
        let returned = returned.as_bytes();
        expected.len() == returned.len()
            && expected
                .iter()
                .zip(returned)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }

    pub(crate) fn to_csrf_token(&self) -> CsrfToken {
        CsrfToken::new(self.0.clone())
    }
}

#[cfg(test)]
impl From<&str> for StateNonce {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_state_is_long_enough_and_url_safe() {
        let nonce = StateNonce::generate();
        assert_eq!(nonce.as_str().len(), STATE_LENGTH);
        assert!(nonce.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_states_differ() {
        assert_ne!(StateNonce::generate(), StateNonce::generate());
    }

    #[test]
    fn test_matches_only_exact_value() {
        let nonce = StateNonce::from("abc123abc123abc123abc123abc123");
        assert!(nonce.matches("abc123abc123abc123abc123abc123"));
        assert!(!nonce.matches("wrong"));
        assert!(!nonce.matches("abc123abc123abc123abc123abc124"));
        assert!(!nonce.matches(""));
    }
}
