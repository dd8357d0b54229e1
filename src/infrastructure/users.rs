//! In-memory user directory
//!
//! Holds the demo users; the first entry is the signed-in user. There is no
//! authentication: the current user is a fixture of the mock environment.

use chrono::{Duration, TimeZone, Utc};
use tokio::sync::RwLock;

use crate::domain::models::{UserInfo, UserPatch};

pub struct UserDirectory {
    users: RwLock<Vec<UserInfo>>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::with_demo_users()
    }
}

impl UserDirectory {
    pub fn with_demo_users() -> Self {
        let users = vec![
            UserInfo {
                id: "1".to_string(),
                name: "Ahmed Ben Salem".to_string(),
                email: "ahmed@techsolutions.tn".to_string(),
                avatar: "/placeholder.svg?height=40&width=40".to_string(),
                company: Some("Tech Solutions SARL".to_string()),
                role: Some("CEO".to_string()),
                created_at: Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap(),
                last_active: Utc::now(),
            },
            UserInfo {
                id: "2".to_string(),
                name: "Fatima Mansouri".to_string(),
                email: "fatima@innovate.tn".to_string(),
                avatar: "/placeholder.svg?height=40&width=40".to_string(),
                company: Some("Innovate Tunisia".to_string()),
                role: Some("Legal Director".to_string()),
                created_at: Utc.with_ymd_and_hms(2023, 3, 20, 0, 0, 0).unwrap(),
                last_active: Utc::now() - Duration::days(1),
            },
        ];
        Self {
            users: RwLock::new(users),
        }
    }

    /// The signed-in user.
    pub async fn current(&self) -> UserInfo {
        let users = self.users.read().await;
        users[0].clone()
    }

    /// Merges `patch` into the signed-in user and bumps `last_active`.
    pub async fn update_current(&self, patch: &UserPatch) -> UserInfo {
        let mut users = self.users.write().await;
        let user = &mut users[0];
        patch.apply_to(user);
        user.last_active = Utc::now();
        user.clone()
    }
}
