// Session/identity collaborator. Supplies the user id and name attached to
// reviews and bookings and keeps the signed-in user in local storage. This is
// a demo login (one hardcoded account), not an authentication system.

use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::LatencyConfig,
    error::SessionError,
    latency::{LatencySimulator, Operation},
};

pub const SESSION_KEY: &str = "user";

pub const DEMO_EMAIL: &str = "user@example.com";
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    fn demo() -> Self {
        Self {
            id: "user123".to_string(),
            name: "John Doe".to_string(),
            email: DEMO_EMAIL.to_string(),
            role: "user".to_string(),
        }
    }
}

// String key/value storage holding JSON documents
pub trait SessionStorage: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_raw(&self, key: &str, value: String) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;

    // Missing, unreadable or malformed values all yield `default`
    fn read_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T
    where
        Self: Sized,
    {
        let raw = match self.get_raw(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(err) => {
                warn!(%key, error = %err, "error reading storage key");
                return default;
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(%key, error = %err, "error parsing storage key");
            default
        })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SessionError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.set_raw(key, raw)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: DashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), SessionError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        Ok(())
    }
}

// One `<key>.json` file per key under `dir`
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStorage for FileStorage {
    fn get_raw(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug)]
pub struct AuthService<S: SessionStorage> {
    storage: S,
    current: RwLock<Option<User>>,
    latency: LatencySimulator,
}

impl<S: SessionStorage> AuthService<S> {
    pub fn new(storage: S, latency: &LatencyConfig) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
            latency: LatencySimulator::new(latency),
        }
    }

    // Picks up a session saved by an earlier run
    pub fn restore(&self) -> Option<User> {
        let user: Option<User> = self.storage.read_or(SESSION_KEY, None);
        *self.current.write() = user.clone();
        user
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        self.latency.wait(Operation::Login).await;

        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            warn!(%email, "login rejected");
            return Err(SessionError::InvalidCredentials);
        }

        let user = User::demo();
        self.start_session(&user)?;
        info!(user_id = %user.id, "logged in");
        Ok(user)
    }

    // Any name/email is accepted; the password is not stored
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<User, SessionError> {
        self.latency.wait(Operation::Register).await;

        let user = User {
            id: format!("user{}", rand::random::<u32>()),
            name: name.to_string(),
            email: email.to_string(),
            role: "user".to_string(),
        };
        self.start_session(&user)?;
        info!(user_id = %user.id, "account created");
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        self.storage.remove(SESSION_KEY)?;
        if let Some(user) = self.current.write().take() {
            info!(user_id = %user.id, "logged out");
        }
        Ok(())
    }

    fn start_session(&self, user: &User) -> Result<(), SessionError> {
        self.storage.write(SESSION_KEY, user)?;
        *self.current.write() = Some(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService<MemoryStorage> {
        AuthService::new(MemoryStorage::new(), &LatencyConfig::disabled())
    }

    #[tokio::test]
    async fn test_login_with_demo_account() {
        let auth = service();
        let user = auth.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(user.id, "user123");
        assert_eq!(user.name, "John Doe");
        assert_eq!(auth.current_user(), Some(user.clone()));

        let stored: Option<User> = auth.storage().read_or(SESSION_KEY, None);
        assert_eq!(stored, Some(user));
    }

    #[tokio::test]
    async fn test_login_rejects_other_credentials() {
        let auth = service();

        let err = auth.login(DEMO_EMAIL, "hunter2").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));
        assert!(auth.login("someone@example.com", DEMO_PASSWORD).await.is_err());
        assert_eq!(auth.current_user(), None);
        assert_eq!(auth.storage().get_raw(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_then_logout() {
        let auth = service();
        let user = auth
            .register("Ada Lovelace", "ada@example.com", "engines")
            .await
            .unwrap();

        assert!(user.id.starts_with("user"));
        assert_eq!(user.role, "user");
        assert_eq!(auth.current_user().map(|u| u.email), Some("ada@example.com".to_string()));

        auth.logout().unwrap();
        assert_eq!(auth.current_user(), None);
        assert_eq!(auth.restore(), None);

        // logging out twice is harmless
        auth.logout().unwrap();
    }

    #[test]
    fn test_corrupt_value_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.set_raw(SESSION_KEY, "{not json".to_string()).unwrap();

        let user: Option<User> = storage.read_or(SESSION_KEY, None);
        assert_eq!(user, None);

        let count: u32 = storage.read_or("visits", 7);
        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn test_file_storage_survives_restart() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;

        let first = AuthService::new(FileStorage::new(dir.path()), &LatencyConfig::disabled());
        let user = first.login(DEMO_EMAIL, DEMO_PASSWORD).await?;
        assert!(dir.path().join("user.json").exists());

        let second = AuthService::new(FileStorage::new(dir.path()), &LatencyConfig::disabled());
        assert_eq!(second.current_user(), None);
        assert_eq!(second.restore(), Some(user));

        second.logout()?;
        assert!(!dir.path().join("user.json").exists());
        assert_eq!(first.storage().get_raw(SESSION_KEY)?, None);
        Ok(())
    }
}
