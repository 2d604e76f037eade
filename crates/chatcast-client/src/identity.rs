//! User identity generation.

use sha2::{Digest, Sha256};

use chatcast_core::User;

/// Build a user whose id is `hex(sha256(timestamp + name))`.
///
/// The display name is title-cased.
pub fn generate_user(name: &str, timestamp: &str) -> User {
    let name = title_case(name.trim());
    let digest = Sha256::digest(format!("{timestamp}{name}").as_bytes());
    User::new(hex::encode(digest), name)
}

/// Upper-case the first letter of every whitespace-separated word.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_stable_hex_digest() {
        let a = generate_user("alice", "1700000000000");
        let b = generate_user("alice", "1700000000000");
        assert_eq!(a, b);
        assert_eq!(a.id.len(), 64);
        assert!(a.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a.name, "Alice");
    }

    #[test]
    fn different_timestamps_give_different_ids() {
        assert_ne!(generate_user("bob", "1").id, generate_user("bob", "2").id);
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("ada  lovelace"), "Ada Lovelace");
        assert_eq!(title_case(""), "");
    }
}
