//! # Identity
//!
//! The signed-in user, as handed to the usage tracker and the premium access
//! gate. Identity is always passed in explicitly; nothing in the library reads
//! it from global state.
//!
//! ## Session File
//!
//! The CLI remembers who is signed in through a small JSON file:
//!
//! ```text
//! ~/.config/toolbox/session.json
//! ```
//!
//! A missing or unreadable session file means the viewer is anonymous.

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// The sign-in method an identity came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// Email and password
    Password,
    /// Google single sign-on
    Google,
    Other(String),
}

impl Provider {
    pub fn id(&self) -> &str {
        match self {
            Self::Password => "password",
            Self::Google => "google.com",
            Self::Other(id) => id,
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "password" => Self::Password,
            "google.com" | "google" => Self::Google,
            other => Self::Other(other.to_string()),
        }
    }

    /// Providers whose identities count as verified without an email check
    pub fn is_trusted(&self) -> bool {
        matches!(self, Self::Google)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::from_id(&id))
    }
}

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub provider: Provider,
}

impl CurrentUser {
    pub fn new(email: &str, provider: Provider, email_verified: bool) -> Self {
        Self {
            uid: email.to_lowercase(),
            email: email.to_string(),
            display_name: None,
            email_verified,
            provider,
        }
    }

    /// "Google" for the trusted provider, "Email" otherwise
    pub fn account_type(&self) -> &'static str {
        if self.provider == Provider::Google {
            "Google"
        } else {
            "Email"
        }
    }

    /// First word of the display name, falling back to the email's local part
    pub fn first_name(&self) -> &str {
        self.display_name
            .as_deref()
            .and_then(|name| name.split_whitespace().next())
            .unwrap_or_else(|| self.email.split('@').next().unwrap_or(self.email.as_str()))
    }
}

/// The persisted "who is signed in" record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Session {
    #[serde(default)]
    pub user: Option<CurrentUser>,
}

impl Session {
    /// Load from a specific path. A missing file is an anonymous session.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        let session: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
        Ok(session)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write session file: {}", path.display()))?;

        Ok(())
    }

    /// Forget the signed-in identity by removing the session file
    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
        }
        Ok(())
    }

    /// Return the path to the session file.
    pub fn session_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "toolbox")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("session.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_provider_ids() {
        assert_eq!(Provider::from_id("google.com"), Provider::Google);
        assert_eq!(Provider::from_id("password"), Provider::Password);
        assert_eq!(
            Provider::from_id("github.com"),
            Provider::Other("github.com".to_string())
        );
        assert!(Provider::Google.is_trusted());
        assert!(!Provider::Password.is_trusted());
        assert!(!Provider::Other("github.com".to_string()).is_trusted());
    }

    #[test]
    fn test_provider_serializes_as_id() {
        let json = serde_json::to_string(&Provider::Google).unwrap();
        assert_eq!(json, "\"google.com\"");
        let parsed: Provider = serde_json::from_str("\"password\"").unwrap();
        assert_eq!(parsed, Provider::Password);
    }

    #[test]
    fn test_first_name_and_account_type() {
        let mut user = CurrentUser::new("ada@example.com", Provider::Google, true);
        assert_eq!(user.first_name(), "ada");
        assert_eq!(user.account_type(), "Google");

        user.display_name = Some("  Ada Lovelace ".to_string());
        assert_eq!(user.first_name(), "Ada");

        let email_user = CurrentUser::new("bob@example.com", Provider::Password, false);
        assert_eq!(email_user.account_type(), "Email");
    }

    #[test]
    fn test_session_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        let session = Session {
            user: Some(CurrentUser::new("ada@example.com", Provider::Password, true)),
        };
        session.save_to(&path).unwrap();

        let loaded = Session::load_from(&path).unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_missing_session_is_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Session::load_from(&temp_dir.path().join("none.json")).unwrap();
        assert!(loaded.user.is_none());
    }

    #[test]
    fn test_clear_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        let session = Session {
            user: Some(CurrentUser::new("ada@example.com", Provider::Google, false)),
        };
        session.save_to(&path).unwrap();

        Session::clear(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(Session::load_from(&path).unwrap(), Session::default());

        // clearing twice is fine
        Session::clear(&path).unwrap();
    }

    #[test]
    fn test_corrupted_session_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");
        fs::write(&path, "not valid json").unwrap();
        assert!(Session::load_from(&path).is_err());
    }
}
