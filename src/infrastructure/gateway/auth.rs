#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthSession;

#[derive(Serialize)]
struct LoginRequest {
    username: String,
    password: String,
}

/// Durable storage for the login token and user payload, the terminal analog
/// of the browser's local storage. Absence of the file means the user must
/// log in before chatting.
pub struct AuthStore {
    pub auth_file: path::PathBuf,
    url: String,
    timeout: Duration,
}

impl Default for AuthStore {
    fn default() -> AuthStore {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        return AuthStore {
            auth_file: dirs::cache_dir().unwrap().join("luminous/auth.json"),
            url: Config::get(ConfigKey::ServerUrl),
            timeout: Duration::from_millis(timeout),
        };
    }
}

impl AuthStore {
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/login", url = self.url))
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "login request failed");
            bail!("login request failed");
        }

        let payload = res.json::<serde_json::Value>().await?;
        if !payload["success"].as_bool().unwrap_or(false) {
            bail!("login was not successful");
        }

        let data = match payload.get("data") {
            Some(data) => data.clone(),
            None => bail!("login response is missing data"),
        };

        let token = match data["token"].as_str() {
            Some(token) => token.to_string(),
            None => bail!("login response is missing a token"),
        };

        // The rest of the data payload is the user blob, kept verbatim.
        let mut user = data;
        if let Some(obj) = user.as_object_mut() {
            obj.remove("token");
        }

        let session = AuthSession { token, user };
        self.save(&session).await?;

        return Ok(session);
    }

    pub async fn save(&self, session: &AuthSession) -> Result<()> {
        let payload = serde_json::to_string_pretty(session)?;

        if let Some(parent) = self.auth_file.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.auth_file).await?;
        file.write_all(payload.as_bytes()).await?;

        return Ok(());
    }

    pub async fn load(&self) -> Result<Option<AuthSession>> {
        if !self.auth_file.exists() {
            return Ok(None);
        }

        let payload = fs::read_to_string(&self.auth_file).await?;
        let session: AuthSession = serde_json::from_str(&payload)?;

        return Ok(Some(session));
    }

    pub async fn clear(&self) -> Result<()> {
        if !self.auth_file.exists() {
            return Ok(());
        }

        fs::remove_file(&self.auth_file).await?;
        return Ok(());
    }
}
