//! Parameter key resolution.
//!
//! Every parameter mapping starts with the transaction metadata keys
//! `sender` and `value`. Declared inputs that would shadow them, or that
//! are not legal identifiers in the generated code, are renamed here.

use std::collections::HashSet;

use lazy_static::lazy_static;

pub const SENDER_KEY: &str = "sender";
pub const VALUE_KEY: &str = "value";
pub const SENDER_ACCOUNT_KEY: &str = "sender_account";
pub const AMOUNT_VALUE_KEY: &str = "amount_value";

lazy_static! {
    /// Identifiers that cannot be used as names in generated strategies.
    pub static ref RESERVED_WORDS: HashSet<&'static str> = [
        "from", "to", "in", "import", "class", "def", "return", "pass",
    ]
    .into_iter()
    .collect();
}

/// Where a key in the parameter mapping comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRole {
    /// The account sending the transaction.
    TxSender,
    /// The native value attached to the transaction.
    TxValue,
    /// A declared function input.
    Input,
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(name)
}

pub fn resolve_key(name: &str, role: KeyRole) -> String {
    match role {
        KeyRole::TxSender => SENDER_KEY.to_string(),
        KeyRole::TxValue => VALUE_KEY.to_string(),
        KeyRole::Input => match name {
            SENDER_KEY => SENDER_ACCOUNT_KEY.to_string(),
            VALUE_KEY => AMOUNT_VALUE_KEY.to_string(),
            n if is_reserved(n) => format!("{}_", n),
            n => n.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_roles_ignore_name() {
        assert_eq!(resolve_key("whatever", KeyRole::TxSender), "sender");
        assert_eq!(resolve_key("", KeyRole::TxValue), "value");
    }

    #[test]
    fn test_metadata_names_are_renamed() {
        assert_eq!(resolve_key("sender", KeyRole::Input), "sender_account");
        assert_eq!(resolve_key("value", KeyRole::Input), "amount_value");
    }

    #[test]
    fn test_reserved_words_are_escaped() {
        for word in RESERVED_WORDS.iter() {
            assert_eq!(
                resolve_key(word, KeyRole::Input),
                format!("{}_", word)
            );
        }
        assert_eq!(RESERVED_WORDS.len(), 8);
    }

    #[test]
    fn test_plain_names_are_kept() {
        assert_eq!(resolve_key("amount", KeyRole::Input), "amount");
        assert_eq!(resolve_key("To", KeyRole::Input), "To");
        assert_eq!(resolve_key("from_", KeyRole::Input), "from_");
    }
}
