//! Proptest strategies for vault inputs.

use proptest::prelude::*;

/// Strategy for valid identifiers: printable, with at least one
/// non-whitespace character.
pub fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.@-]{1,64}"
}

/// Strategy for presented secrets: arbitrary printable strings, including
/// empty and whitespace-only input (secrets are never trusted).
pub fn secret_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~]{0,72}").expect("valid regex")
}

#[cfg(test)]
mod tests {
    use super::*;
    use idvault_core::Identifier;

    proptest! {
        #[test]
        fn generated_identifiers_are_valid(id in identifier_strategy()) {
            prop_assert!(Identifier::new(id).is_ok());
        }
    }
}
