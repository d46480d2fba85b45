use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::user::UserRecord;
use crate::store::repositories::user_repository::UserRepository;
use crate::store::DataDir;

/// Plain credential check against the user table. Deliberately unhardened:
/// this is an internal shop-floor tool, not a public login surface.
#[derive(Clone)]
pub struct AuthService {
    data: DataDir,
}

impl AuthService {
    pub fn new(data: DataDir) -> Self {
        Self { data }
    }

    pub fn login(&self, username: &str, password: &str) -> AppResult<UserRecord> {
        let user = UserRepository::find(&self.data, username)?
            .filter(|user| user.password == password)
            .ok_or_else(|| AppError::validation("账号或密码错误"))?;

        info!(target: "app::auth", %username, role = user.role.as_str(), "login ok");
        Ok(user)
    }
}
