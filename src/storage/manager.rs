use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use super::error::StorageError;
use super::hasher::hash_password;
use crate::model::{Appearance, User};

/// Name, email and password of the account created on first run.
pub const SEED_NAME: &str = "Test User";
pub const SEED_EMAIL: &str = "test@example.com";
pub const SEED_PASSWORD: &str = "password";

const ACCOUNT_FILE: &str = "account.json";
const PREFERENCES_FILE: &str = "preferences.json";

/// The persisted account: the public user record plus its password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccount {
    pub user: User,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Client-side preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub appearance: Appearance,
}

/// Manages JSON persistence of the account and preferences.
///
/// Both live as single JSON documents under one directory. Writes go to a
/// temporary sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct AccountManager {
    base_path: PathBuf,
}

impl AccountManager {
    /// Creates a manager using the XDG data directory
    /// (`~/.local/share/acctdesk/`), creating it if needed.
    pub fn new() -> Result<Self, StorageError> {
        let data_dir = dirs::data_dir().ok_or(StorageError::NoDataDir)?;
        Self::with_path(data_dir.join("acctdesk"))
    }

    /// Creates a manager rooted at the given path.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Directory holding every file this manager writes.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn account_path(&self) -> PathBuf {
        self.base_path.join(ACCOUNT_FILE)
    }

    fn preferences_path(&self) -> PathBuf {
        self.base_path.join(PREFERENCES_FILE)
    }

    /// Loads the stored account.
    ///
    /// Returns [`StorageError::NoAccount`] if none has been saved.
    pub fn load_account(&self) -> Result<StoredAccount, StorageError> {
        let path = self.account_path();
        if !path.exists() {
            return Err(StorageError::NoAccount(path));
        }
        read_json(&path)
    }

    /// Writes the account, replacing any previous one.
    pub fn save_account(&self, account: &StoredAccount) -> Result<(), StorageError> {
        write_json(&self.account_path(), account)?;
        tracing::debug!(user_id = account.user.id, "account saved");
        Ok(())
    }

    /// Loads the account, seeding the default one on first run.
    pub fn load_or_seed(&self) -> Result<StoredAccount, StorageError> {
        match self.load_account() {
            Err(StorageError::NoAccount(path)) => {
                tracing::warn!(path = %path.display(), email = SEED_EMAIL, "no account found, seeding default");
                let now = Utc::now();
                let account = StoredAccount {
                    user: User {
                        id: 1,
                        name: SEED_NAME.to_string(),
                        email: SEED_EMAIL.to_string(),
                        email_verified_at: None,
                        created_at: now,
                        updated_at: now,
                    },
                    password_hash: hash_password(SEED_PASSWORD)?,
                };
                self.save_account(&account)?;
                Ok(account)
            }
            other => other,
        }
    }

    /// Loads preferences; a missing file yields defaults.
    pub fn load_preferences(&self) -> Result<Preferences, StorageError> {
        let path = self.preferences_path();
        if !path.exists() {
            return Ok(Preferences::default());
        }
        read_json(&path)
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), StorageError> {
        write_json(&self.preferences_path(), preferences)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let file = fs::File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        serde_json::to_writer_pretty(&mut file, value)?;
        writeln!(file)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::verify_password;

    fn make_manager() -> (tempfile::TempDir, AccountManager) {
        let dir = tempfile::tempdir().unwrap();
        let manager = AccountManager::with_path(dir.path().join("data")).unwrap();
        (dir, manager)
    }

    fn make_account() -> StoredAccount {
        let now = Utc::now();
        StoredAccount {
            user: User {
                id: 42,
                name: "Ada".into(),
                email: "ada@example.com".into(),
                email_verified_at: Some(now),
                created_at: now,
                updated_at: now,
            },
            password_hash: "$argon2id$stub".into(),
        }
    }

    #[test]
    fn with_path_creates_directory() {
        let (_dir, manager) = make_manager();
        assert!(manager.base_path().is_dir());
    }

    #[test]
    fn load_missing_account_is_no_account() {
        let (_dir, manager) = make_manager();
        assert!(matches!(
            manager.load_account(),
            Err(StorageError::NoAccount(_))
        ));
    }

    #[test]
    fn save_and_load_account() {
        let (_dir, manager) = make_manager();
        let account = make_account();
        manager.save_account(&account).unwrap();
        assert_eq!(manager.load_account().unwrap(), account);
    }

    #[test]
    fn save_overwrites_existing_account() {
        let (_dir, manager) = make_manager();
        let mut account = make_account();
        manager.save_account(&account).unwrap();
        account.user.name = "Grace".into();
        manager.save_account(&account).unwrap();
        assert_eq!(manager.load_account().unwrap().user.name, "Grace");
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let (_dir, manager) = make_manager();
        manager.save_account(&make_account()).unwrap();
        let names: Vec<String> = fs::read_dir(manager.base_path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![ACCOUNT_FILE.to_string()]);
    }

    #[test]
    fn corrupt_account_is_json_error() {
        let (_dir, manager) = make_manager();
        fs::write(manager.base_path().join(ACCOUNT_FILE), "{not json").unwrap();
        assert!(matches!(manager.load_account(), Err(StorageError::Json(_))));
    }

    #[test]
    fn load_or_seed_creates_default_account_once() {
        let (_dir, manager) = make_manager();
        let seeded = manager.load_or_seed().unwrap();
        assert_eq!(seeded.user.email, SEED_EMAIL);
        assert_eq!(seeded.user.name, SEED_NAME);
        assert!(!seeded.user.is_verified());
        assert!(verify_password(SEED_PASSWORD, &seeded.password_hash).unwrap());

        let again = manager.load_or_seed().unwrap();
        assert_eq!(again, seeded);
    }

    #[test]
    fn load_or_seed_keeps_existing_account() {
        let (_dir, manager) = make_manager();
        let account = make_account();
        manager.save_account(&account).unwrap();
        assert_eq!(manager.load_or_seed().unwrap(), account);
    }

    #[test]
    fn preferences_default_when_missing() {
        let (_dir, manager) = make_manager();
        assert_eq!(manager.load_preferences().unwrap(), Preferences::default());
    }

    #[test]
    fn preferences_round_trip() {
        let (_dir, manager) = make_manager();
        let prefs = Preferences {
            appearance: Appearance::Dark,
        };
        manager.save_preferences(&prefs).unwrap();
        assert_eq!(manager.load_preferences().unwrap(), prefs);
    }

    #[test]
    fn preferences_without_appearance_default_to_system() {
        let (_dir, manager) = make_manager();
        fs::write(manager.base_path().join(PREFERENCES_FILE), "{}").unwrap();
        assert_eq!(
            manager.load_preferences().unwrap().appearance,
            Appearance::System
        );
    }
}
