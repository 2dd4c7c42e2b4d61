use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Fixed table of accepted username/password pairs.
pub struct Credentials {
    users: HashMap<String, SecretString>,
}

impl Credentials {
    /// Table holding exactly one user.
    #[must_use]
    pub fn single(username: String, password: SecretString) -> Self {
        let mut users = HashMap::with_capacity(1);
        users.insert(username, password);
        Self { users }
    }

    /// Exact string comparison of both username and password.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected.expose_secret() == password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("users", &self.users.keys().collect::<Vec<_>>())
            .finish()
    }
}
