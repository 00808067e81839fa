use std::path::PathBuf;

use serde_json::Value;

use crate::context::AppPaths;
use crate::error::YtreportyError;

use super::token::{Secret, Token};

pub const TOKEN_FILENAME: &str = "token.json";

pub fn token_path(paths: &AppPaths) -> PathBuf {
    paths.data_dir.join(TOKEN_FILENAME)
}

/// Load the persisted OAuth2 token from the data directory.
pub fn load_token(paths: &AppPaths) -> Result<Token, YtreportyError> {
    let path = token_path(paths);
    let data = read_file(&path)?;
    let token: Token = serde_json::from_str(&data).map_err(|e| YtreportyError::Format {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    if token.access_token.is_empty() {
        return Err(YtreportyError::Format {
            path,
            detail: "access_token is empty".into(),
        });
    }
    Ok(token)
}

/// Write the token file, going through a temporary sibling and a rename so a
/// concurrent reader never observes a partially written file.
///
/// There is no cross-process locking: two invocations refreshing at the same
/// time can lose one of the updates. Single-process use is assumed.
pub fn save_token(paths: &AppPaths, token: &Token) -> Result<(), YtreportyError> {
    let path = token_path(paths);
    std::fs::create_dir_all(&paths.data_dir)?;
    let data = serde_json::to_string_pretty(token).map_err(|e| YtreportyError::Format {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, &path)?;
    tracing::info!("Wrote token file {}", path.display());
    Ok(())
}

/// Load the client secret from the config directory. Read-only; the secret
/// file is never rewritten.
///
/// The file is the standard Google "installed application" credential shape:
/// a JSON object whose `installed` member carries `client_id` and
/// `client_secret`.
pub fn load_secret(paths: &AppPaths, filename: &str) -> Result<Secret, YtreportyError> {
    let path = paths.config_dir.join(filename);
    let data = read_file(&path)?;
    let doc: Value = serde_json::from_str(&data).map_err(|e| YtreportyError::Format {
        path: path.clone(),
        detail: e.to_string(),
    })?;
    let installed = doc.get("installed").ok_or_else(|| YtreportyError::Format {
        path: path.clone(),
        detail: "missing `installed` object".into(),
    })?;
    serde_json::from_value(installed.clone()).map_err(|e| YtreportyError::Format {
        path,
        detail: e.to_string(),
    })
}

fn read_file(path: &PathBuf) -> Result<String, YtreportyError> {
    match std::fs::read_to_string(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(YtreportyError::NotFound { path: path.clone() })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_paths() -> (tempfile::TempDir, AppPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path().join("config"), dir.path().join("data"));
        (dir, paths)
    }

    #[test]
    fn load_token_missing_file() {
        let (_dir, paths) = temp_paths();
        let err = load_token(&paths).unwrap_err();
        assert!(matches!(err, YtreportyError::NotFound { .. }));
    }

    #[test]
    fn load_token_invalid_json() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(&paths.data_dir).unwrap();
        std::fs::write(token_path(&paths), "not json {").unwrap();
        let err = load_token(&paths).unwrap_err();
        assert!(matches!(err, YtreportyError::Format { .. }));
    }

    #[test]
    fn load_token_empty_access_token() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(&paths.data_dir).unwrap();
        std::fs::write(token_path(&paths), r#"{"access_token":""}"#).unwrap();
        let err = load_token(&paths).unwrap_err();
        assert!(matches!(err, YtreportyError::Format { .. }));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (_dir, paths) = temp_paths();
        let token = Token {
            access_token: "access-1".into(),
            refresh_token: Some("refresh-1".into()),
            expires_in: Some(3599),
            extra: serde_json::Map::new(),
        };
        save_token(&paths, &token).unwrap();
        let loaded = load_token(&paths).unwrap();
        assert_eq!(loaded.access_token, "access-1");
        assert_eq!(loaded.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(loaded.expires_in, Some(3599));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let (_dir, paths) = temp_paths();
        let token = Token {
            access_token: "a".into(),
            refresh_token: None,
            expires_in: None,
            extra: serde_json::Map::new(),
        };
        save_token(&paths, &token).unwrap();
        let entries: Vec<_> = std::fs::read_dir(&paths.data_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(TOKEN_FILENAME)]);
    }

    #[test]
    fn load_secret_from_installed() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(&paths.config_dir).unwrap();
        std::fs::write(
            paths.config_dir.join("client_secret.json"),
            r#"{"installed":{"client_id":"cid","client_secret":"cs","redirect_uris":[]}}"#,
        )
        .unwrap();
        let secret = load_secret(&paths, "client_secret.json").unwrap();
        assert_eq!(secret.client_id, "cid");
        assert_eq!(secret.client_secret, "cs");
    }

    #[test]
    fn load_secret_missing_installed() {
        let (_dir, paths) = temp_paths();
        std::fs::create_dir_all(&paths.config_dir).unwrap();
        std::fs::write(paths.config_dir.join("client_secret.json"), r#"{"web":{}}"#).unwrap();
        let err = load_secret(&paths, "client_secret.json").unwrap_err();
        assert!(err.to_string().contains("installed"));
    }
}
