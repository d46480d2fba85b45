use serde::Serialize;

use super::{AppState, CommandError, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub role: String,
}

pub fn login(state: &AppState, username: &str, password: &str) -> CommandResult<LoginResponse> {
    let user = state
        .auth()
        .login(username, password)
        .map_err(CommandError::from)?;

    Ok(LoginResponse {
        username: user.username,
        role: user.role.as_str().to_string(),
    })
}
