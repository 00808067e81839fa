use tempfile::TempDir;
use wiremock::MockServer;

use ytreporty::oauth::store;
use ytreporty::oauth::token::{Secret, Token};
use ytreporty::{AppPaths, Client, Environment};

pub const INITIAL_ACCESS: &str = "initial-access";
pub const REFRESH_TOKEN: &str = "refresh-1";

/// Build an Environment backed by a temp directory, with the initial token
/// already persisted so the refresh path has a file to overwrite.
#[allow(dead_code)]
pub fn test_env() -> (TempDir, Environment) {
    let dir = tempfile::tempdir().unwrap();
    let paths = AppPaths::new(dir.path().join("config"), dir.path().join("data"));
    let token = Token {
        access_token: INITIAL_ACCESS.into(),
        refresh_token: Some(REFRESH_TOKEN.into()),
        expires_in: Some(3599),
        extra: serde_json::Map::new(),
    };
    store::save_token(&paths, &token).unwrap();
    let secret = Secret {
        client_id: "test-client-id".into(),
        client_secret: "test-client-secret".into(),
    };
    (dir, Environment { token, secret, paths })
}

/// A Client whose API base and token endpoint both point at the mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    let uri = server.uri();
    Client::with_urls(&uri, &format!("{uri}/oauth2/v4/token")).unwrap()
}
