//! Best-effort tokenizers for the raw list-like fields.
//!
//! Both synthesizers parse `ports`, `env_vars`, `dependencies` and
//! `startup_script` through these helpers so the two artifacts always agree
//! on which tokens survive. Malformed tokens are dropped, never reported.

/// Separator between tokens in a raw field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Whitespace,
}

/// Split `raw`, trim every token, skip empty ones, and keep the tokens for
/// which `transform` returns `Some`.
pub fn split_tokens<'a, T, F>(raw: &'a str, delimiter: Delimiter, transform: F) -> Vec<T>
where
    F: Fn(&'a str) -> Option<T>,
{
    let pieces: Box<dyn Iterator<Item = &'a str>> = match delimiter {
        Delimiter::Comma => Box::new(raw.split(',')),
        Delimiter::Whitespace => Box::new(raw.split_whitespace()),
    };

    pieces
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(transform)
        .collect()
}

/// Comma-separated items (ports, package specs).
pub fn list_items(raw: &str) -> Vec<&str> {
    split_tokens(raw, Delimiter::Comma, Some)
}

/// `KEY=VALUE` pairs split at the first `=`.
///
/// Tokens without `=`, with an empty key, or with whitespace inside the key
/// are dropped.
pub fn env_pairs(raw: &str) -> Vec<(&str, &str)> {
    split_tokens(raw, Delimiter::Comma, |token| {
        let (key, value) = token.split_once('=')?;
        let key = key.trim();
        let valid = !key.is_empty() && !key.contains(char::is_whitespace);
        valid.then(|| (key, value.trim()))
    })
}

/// Whitespace-separated command tokens, in order.
pub fn command_tokens(raw: &str) -> Vec<&str> {
    split_tokens(raw, Delimiter::Whitespace, Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_items_trims_and_skips_blanks() {
        assert_eq!(list_items(" 8080, ,9090 ,"), vec!["8080", "9090"]);
    }

    #[test]
    fn list_items_of_only_separators_is_empty() {
        assert!(list_items(" , ,, ").is_empty());
    }

    #[test]
    fn env_pairs_drop_malformed_tokens() {
        assert_eq!(env_pairs("A=1,BROKEN,C=3"), vec![("A", "1"), ("C", "3")]);
    }

    #[test]
    fn env_pairs_split_on_first_equals() {
        assert_eq!(
            env_pairs("DSN=postgres://u:p@h/db?sslmode=require"),
            vec![("DSN", "postgres://u:p@h/db?sslmode=require")]
        );
    }

    #[test]
    fn env_pairs_keep_empty_values_but_not_empty_keys() {
        assert_eq!(env_pairs("EMPTY=, =orphan"), vec![("EMPTY", "")]);
    }

    #[test]
    fn env_pairs_drop_keys_containing_whitespace() {
        assert_eq!(
            env_pairs("MY KEY=1,OK=2,TAB\tKEY=3"),
            vec![("OK", "2")]
        );
    }

    #[test]
    fn env_pairs_trim_around_equals() {
        assert_eq!(env_pairs(" MODE = prod "), vec![("MODE", "prod")]);
    }

    #[test]
    fn command_tokens_collapse_runs_of_whitespace() {
        assert_eq!(
            command_tokens("  python   app.py\t--port 80 "),
            vec!["python", "app.py", "--port", "80"]
        );
    }

    #[test]
    fn custom_transform_filters_tokens() {
        let numeric: Vec<u16> = split_tokens("80, http, 443", Delimiter::Comma, |t| t.parse().ok());
        assert_eq!(numeric, vec![80, 443]);
    }
}
