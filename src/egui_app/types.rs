/**
 * Shared Types Module
 *
 * App view states and the signed-in user summary shown in the top bar.
 */

use crate::shared::user::Session;

/// Current app view/mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Sign-in / sign-up screen
    Auth,
    /// Users admin list
    Users,
}

/// User information shown once signed in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl UserInfo {
    /// Display name when set, email otherwise
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

impl From<&Session> for UserInfo {
    fn from(session: &Session) -> Self {
        Self {
            id: session.local_id.clone(),
            email: session.email.clone(),
            display_name: session.display_name.clone(),
        }
    }
}
