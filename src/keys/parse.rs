//! Raw key intake: splitting, cleanup, and format filtering.

/// Recognizable prefix of a Gemini API key.
const KEY_PREFIX: &str = "AIza";

/// Minimum length of a plausible key, prefix included.
const KEY_MIN_LEN: usize = 21;

/// Extract plausible API keys from a raw paste blob.
///
/// Candidates are split on newlines and commas, trimmed, and stripped of
/// surrounding quote characters. Anything that does not carry the expected
/// prefix or is too short is discarded without ever being sent to the
/// backend. Exact duplicates are removed, first occurrence wins.
pub fn extract_keys(raw: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();

    for candidate in raw.replace('\n', ",").split(',') {
        let key = candidate.trim().replace(['"', '\''], "");
        if !key.starts_with(KEY_PREFIX) || key.len() < KEY_MIN_LEN {
            continue;
        }
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    keys
}

/// Render a key for display without revealing the secret.
pub fn mask_key(key: &str) -> String {
    if key.len() <= 12 {
        return "*".repeat(key.len());
    }
    format!("{}...{}", &key[..8], &key[key.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keys_splits_on_newlines_and_commas() {
        let raw = "AIzaSyA000000000000000001\nAIzaSyA000000000000000002,AIzaSyA000000000000000003";
        let keys = extract_keys(raw);
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_extract_keys_strips_quotes_and_whitespace() {
        let raw = " \"AIzaSyA000000000000000001\" , 'AIzaSyA000000000000000002' ";
        let keys = extract_keys(raw);
        assert_eq!(
            keys,
            vec![
                "AIzaSyA000000000000000001".to_string(),
                "AIzaSyA000000000000000002".to_string()
            ]
        );
    }

    #[test]
    fn test_extract_keys_rejects_wrong_prefix() {
        let keys = extract_keys("sk-proj-000000000000000000000000");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_extract_keys_rejects_too_short() {
        let keys = extract_keys("AIzaShort");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_extract_keys_dedups_preserving_order() {
        let raw = "AIzaSyA000000000000000002,AIzaSyA000000000000000001,AIzaSyA000000000000000002";
        let keys = extract_keys(raw);
        assert_eq!(
            keys,
            vec![
                "AIzaSyA000000000000000002".to_string(),
                "AIzaSyA000000000000000001".to_string()
            ]
        );
    }

    #[test]
    fn test_extract_keys_empty_input() {
        assert!(extract_keys("").is_empty());
        assert!(extract_keys("\n\n,,").is_empty());
    }

    #[test]
    fn test_mask_key_keeps_prefix_and_tail() {
        let masked = mask_key("AIzaSyA000000000000000001");
        assert_eq!(masked, "AIzaSyA0...0001");
        assert!(!masked.contains("000000000000"));
    }

    #[test]
    fn test_mask_key_short_input_fully_masked() {
        assert_eq!(mask_key("AIzaShort"), "*********");
    }
}
