use std::borrow::Cow;

#[lobby_derive::lobby_error]
pub enum ResourceGuardError {
    #[error("Resource validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

const MAX_KEY_LEN: usize = 64;

/// Utilities for safe handling of record keys that arrive in request paths.
#[derive(Debug)]
pub struct ResourceGuard;

impl ResourceGuard {
    /// Reduces a client-supplied id to the bare record key of `expected_table`.
    ///
    /// Accepts `"slide:abc"` or `"abc"`. Rejects ids of another table (e.g. an `admin:` id sent
    /// to a slide endpoint) and keys outside `[A-Za-z0-9_-]{1,64}`, so a key can never smuggle
    /// query syntax.
    pub fn key<I, T>(id: I, expected_table: T) -> Result<String, ResourceGuardError>
    where
        I: AsRef<str>,
        T: AsRef<str>,
    {
        let id_ref = id.as_ref().trim();
        let table_ref = expected_table.as_ref();

        let key = match id_ref.split_once(':') {
            Some((table, key)) if table == table_ref => key,
            Some((table, _)) => {
                return Err(ResourceGuardError::Validation {
                    message: format!("Expected '{table_ref}', got '{table}'").into(),
                    context: Some("ID table mismatch".into()),
                });
            },
            None => id_ref,
        };

        if key.is_empty()
            || key.len() > MAX_KEY_LEN
            || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ResourceGuardError::Validation {
                message: format!("Malformed id '{id_ref}'").into(),
                context: Some(table_ref.to_owned().into()),
            });
        }

        Ok(key.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_prefix() {
        assert_eq!(ResourceGuard::key("slide:Ab3x", "slide").unwrap(), "Ab3x");
        assert_eq!(ResourceGuard::key("Ab3x", "slide").unwrap(), "Ab3x");
    }

    #[test]
    fn rejects_foreign_tables_and_odd_characters() {
        assert!(ResourceGuard::key("admin:root", "slide").is_err());
        assert!(ResourceGuard::key("a b", "slide").is_err());
        assert!(ResourceGuard::key("", "slide").is_err());
        assert!(ResourceGuard::key("x".repeat(65), "slide").is_err());
    }
}
