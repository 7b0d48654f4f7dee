//! # User Repository
//!
//! Account storage (`usuarios.csv`), credential verification and
//! admin-gated account creation.
//!
//! Passwords are stored as lowercase hex SHA-256 digests of the raw
//! password. Verification hashes the presented password and compares
//! digests; the raw password is never persisted.

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use vivero_core::{validation, CoreError, Role, Session, User};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};

/// Seeded into a fresh store so an operator can always log in.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Default password for the seeded admin account. Change it in any
/// deployment that leaves the demo stage.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const HEADERS: [&str; 3] = ["username", "password", "role"];

/// Lowercase hex SHA-256 of a raw password.
pub fn hash_password(raw: &str) -> String {
    let digest = Sha256::digest(raw.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

/// Repository for the account file.
#[derive(Debug, Clone)]
pub struct UserRepository {
    config: StoreConfig,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(config: StoreConfig) -> Self {
        UserRepository { config }
    }

    /// Loads every account.
    ///
    /// A missing file is bootstrapped with the default admin account
    /// and persisted before returning, so a fresh store is always
    /// reachable.
    pub fn load(&self) -> StoreResult<Vec<User>> {
        let path = self.config.users_path();
        if !path.exists() {
            info!(username = DEFAULT_ADMIN_USERNAME, "Seeding default admin account");
            let users = vec![User {
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                password_hash: hash_password(DEFAULT_ADMIN_PASSWORD),
                role: Role::Admin,
            }];
            self.save(&users)?;
            return Ok(users);
        }
        let file = path.display().to_string();

        let mut reader = csv::Reader::from_path(&path)?;
        let mut users = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |i: usize| row.get(i).unwrap_or_default();
            let role: Role = field(2).parse().map_err(|_| {
                StoreError::corrupt(&file, format!("role '{}' is not recognised", field(2)))
            })?;
            users.push(User {
                username: field(0).to_string(),
                password_hash: field(1).to_string(),
                role,
            });
        }

        debug!(count = users.len(), "Loaded user accounts");
        Ok(users)
    }

    /// Persists the full account list, overwriting the file.
    pub fn save(&self, users: &[User]) -> StoreResult<()> {
        let mut writer = csv::Writer::from_path(self.config.users_path())?;
        writer.write_record(HEADERS)?;
        for user in users {
            writer.write_record([
                user.username.as_str(),
                user.password_hash.as_str(),
                user.role.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Verifies a credential pair and opens a session.
    ///
    /// Unknown usernames and wrong passwords both map to the same
    /// [`CoreError::AuthFailure`], so a caller cannot probe which
    /// usernames exist.
    pub fn verify(&self, username: &str, password: &str) -> StoreResult<Session> {
        let users = self.load()?;
        let presented = hash_password(password);
        match users
            .iter()
            .find(|user| user.username == username && user.password_hash == presented)
        {
            Some(user) => {
                info!(username = %user.username, role = %user.role, "Login succeeded");
                Ok(Session::new(user.username.clone(), user.role))
            }
            None => {
                warn!(username = %username, "Login failed");
                Err(CoreError::AuthFailure.into())
            }
        }
    }

    /// Creates an account. Admin sessions only.
    pub fn create(
        &self,
        session: &Session,
        username: &str,
        password: &str,
        role: Role,
    ) -> StoreResult<()> {
        if !session.role.can_manage_users() {
            return Err(CoreError::forbidden("create user accounts").into());
        }
        validation::validate_username(username)?;
        validation::validate_password(password)?;

        let mut users = self.load()?;
        if users.iter().any(|user| user.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }

        users.push(User {
            username: username.to_string(),
            password_hash: hash_password(password),
            role,
        });
        self.save(&users)?;

        info!(username = %username, role = %role, by = %session.username, "Created user account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, UserRepository) {
        let dir = TempDir::new().unwrap();
        let repo = UserRepository::new(StoreConfig::new(dir.path()));
        (dir, repo)
    }

    fn admin_session() -> Session {
        Session::new("admin", Role::Admin)
    }

    #[test]
    fn test_hash_password_is_hex_sha256() {
        // SHA-256("admin123"), independently computed.
        assert_eq!(
            hash_password("admin123"),
            "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
        );
    }

    #[test]
    fn test_fresh_store_seeds_default_admin() {
        let (dir, repo) = repo();
        let users = repo.load().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username, DEFAULT_ADMIN_USERNAME);
        assert_eq!(users[0].role, Role::Admin);
        // And the seeded account was persisted, not just returned.
        assert!(dir.path().join(crate::config::USERS_FILE).exists());
    }

    #[test]
    fn test_verify_accepts_seeded_admin() {
        let (_dir, repo) = repo();
        let session = repo
            .verify(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .unwrap();
        assert_eq!(session.username, "admin");
        assert_eq!(session.role, Role::Admin);
    }

    #[test]
    fn test_verify_rejects_wrong_password_and_unknown_user_alike() {
        let (_dir, repo) = repo();
        let wrong = repo.verify("admin", "letmein").unwrap_err();
        let unknown = repo.verify("nadie", "admin123").unwrap_err();
        assert!(matches!(wrong, StoreError::Core(CoreError::AuthFailure)));
        assert!(matches!(unknown, StoreError::Core(CoreError::AuthFailure)));
    }

    #[test]
    fn test_create_then_verify_round_trip() {
        let (_dir, repo) = repo();
        repo.create(&admin_session(), "marta", "clavel2024", Role::Vendedor)
            .unwrap();

        let session = repo.verify("marta", "clavel2024").unwrap();
        assert_eq!(session.role, Role::Vendedor);
    }

    #[test]
    fn test_create_rejects_duplicate_username() {
        let (_dir, repo) = repo();
        repo.create(&admin_session(), "marta", "clavel2024", Role::Vendedor)
            .unwrap();

        let err = repo
            .create(&admin_session(), "marta", "otra", Role::Bodega)
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername(name) if name == "marta"));
    }

    #[test]
    fn test_create_requires_admin_session() {
        let (_dir, repo) = repo();
        let vendedor = Session::new("marta", Role::Vendedor);
        let err = repo
            .create(&vendedor, "luis", "pala123", Role::Bodega)
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::Forbidden { .. })));
    }

    #[test]
    fn test_create_validates_credentials() {
        let (_dir, repo) = repo();
        assert!(repo
            .create(&admin_session(), "", "clavel2024", Role::Vendedor)
            .is_err());
        assert!(repo
            .create(&admin_session(), "marta", "   ", Role::Vendedor)
            .is_err());
    }
}
