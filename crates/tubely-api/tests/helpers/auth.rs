use super::TEST_JWT_SECRET;
use tubely_api::auth::issue_access_token;
use uuid::Uuid;

/// A caller with a valid access token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn test_user() -> TestUser {
    let user_id = Uuid::new_v4();
    let token = issue_access_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(1))
        .expect("Failed to issue test token");
    TestUser { user_id, token }
}

/// A token for a fresh user, signed with the wrong key.
pub fn foreign_token() -> String {
    issue_access_token(Uuid::new_v4(), "some-other-secret", chrono::Duration::hours(1))
        .expect("Failed to issue test token")
}

/// A correctly signed token that expired an hour ago.
pub fn expired_token(user_id: Uuid) -> String {
    issue_access_token(user_id, TEST_JWT_SECRET, chrono::Duration::hours(-1))
        .expect("Failed to issue test token")
}
