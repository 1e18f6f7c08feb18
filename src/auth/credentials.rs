// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Static credential store
//!
//! The store maps each known username to its expected secret. It is filled
//! once from the configuration and never mutated afterwards.
//!
//! Secrets are kept and compared in plaintext with exact, case-sensitive
//! string equality. Hashing the secrets and comparing in constant time would
//! harden the store; neither is done here.

use std::collections::HashMap;

/// Immutable username to secret mapping
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(users: HashMap<String, String>) -> Self {
        CredentialStore { users }
    }

    /// Expected secret for `username`, if the user is known
    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }

    /// Check a username/password pair
    ///
    /// Returns `false` both for unknown users and for wrong passwords.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        matches!(self.lookup(username), Some(expected) if expected == password)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl From<HashMap<String, String>> for CredentialStore {
    fn from(users: HashMap<String, String>) -> Self {
        CredentialStore::new(users)
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CredentialStore {
            users: iter
                .into_iter()
                .map(|(user, secret)| (user.into(), secret.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CredentialStore {
        [("user1", "passwd"), ("user2", "otherpasswd")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_lookup() {
        let store = store();
        assert_eq!(store.lookup("user1"), Some("passwd"));
        assert_eq!(store.lookup("nobody"), None);
        assert_eq!(store.len(), 2);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_verify_is_exact() {
        let store = store();
        assert!(store.verify("user1", "passwd"));
        assert!(store.verify("user2", "otherpasswd"));

        // No normalization of any kind
        assert!(!store.verify("user1", "PASSWD"));
        assert!(!store.verify("user1", "passwd "));
        assert!(!store.verify("USER1", "passwd"));
        assert!(!store.verify("user1", "otherpasswd"));
        assert!(!store.verify("nobody", "passwd"));
        assert!(!store.verify("", ""));
    }

    #[test]
    fn test_empty_password_only_matches_empty_secret() {
        let store: CredentialStore = [("guest", "")].into_iter().collect();
        assert!(store.verify("guest", ""));
        assert!(!store.verify("guest", "x"));
    }
}
