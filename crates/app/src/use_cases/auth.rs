//! Use cases for registration and login.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use showtrack_core::authorization::Role;
use showtrack_db::models::user::{CreateUser, User};
use tracing::{info, warn};

use crate::auth::{hash_password, issue_access_token, verify_password, AuthConfig};
use crate::error::AuthError;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Registration input with the default `USER` role.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

/// Registration input with an explicit role.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUserWithRole {
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Login input.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Storage capability for persisting new users.
#[async_trait]
pub trait AddUserRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::UserAlreadyExists`] if the username is taken.
    async fn add_user(&self, user: &CreateUser) -> Result<User, AuthError>;
}

/// Storage capability for looking up users by username.
#[async_trait]
pub trait GetUserByUsernameRepo: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] if no such username exists.
    async fn find_by_username(&self, username: &str) -> Result<User, AuthError>;
}

// ---------------------------------------------------------------------------
// RegisterUserWithRole
// ---------------------------------------------------------------------------

/// Register a user with an explicit role. The password is hashed here;
/// only the hash reaches storage.
pub struct RegisterUserWithRole<R> {
    repo: R,
}

impl<R: AddUserRepo> RegisterUserWithRole<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns [`AuthError::UserAlreadyExists`] if the username is taken.
    pub async fn execute(&self, input: &NewUserWithRole) -> Result<User, AuthError> {
        let username = &input.username;
        info!(%username, role = input.role.as_str(), "Registering user");

        let password_hash = hash_password(&input.password).map_err(AuthError::PasswordHash)?;
        let create = CreateUser {
            username: username.clone(),
            password_hash,
            role: input.role.as_str().to_string(),
        };

        match self.repo.add_user(&create).await {
            Ok(user) => {
                info!(%username, role = input.role.as_str(), "Registered user");
                Ok(user)
            }
            Err(err @ AuthError::UserAlreadyExists { .. }) => {
                warn!(%username, error = %err, "User already exists");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// RegisterUser
// ---------------------------------------------------------------------------

/// Register a user with the `USER` role. Pure composition: fixes the role
/// and delegates to [`RegisterUserWithRole`].
pub struct RegisterUser<R> {
    inner: RegisterUserWithRole<R>,
}

impl<R: AddUserRepo> RegisterUser<R> {
    pub fn new(repo: R) -> Self {
        Self {
            inner: RegisterUserWithRole::new(repo),
        }
    }

    /// # Errors
    ///
    /// Returns [`AuthError::UserAlreadyExists`] if the username is taken.
    pub async fn execute(&self, input: &NewUser) -> Result<User, AuthError> {
        let with_role = NewUserWithRole {
            username: input.username.clone(),
            password: input.password.clone(),
            role: Role::User,
        };
        self.inner.execute(&with_role).await
    }
}

// ---------------------------------------------------------------------------
// LogInUser
// ---------------------------------------------------------------------------

/// Verify credentials and issue an access token.
pub struct LogInUser<R> {
    repo: R,
    config: AuthConfig,
}

impl<R: GetUserByUsernameRepo> LogInUser<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self { repo, config }
    }

    /// # Errors
    ///
    /// - [`AuthError::UserNotFound`] if no such username exists.
    /// - [`AuthError::InvalidCredentials`] if the password does not verify
    ///   against the stored hash.
    pub async fn execute(&self, credentials: &Credentials) -> Result<String, AuthError> {
        let username = &credentials.username;
        info!(%username, "Logging in user");

        let user = match self.repo.find_by_username(username).await {
            Ok(user) => user,
            Err(err @ AuthError::UserNotFound { .. }) => {
                warn!(%username, error = %err, "User not found");
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        if !verify_password(&credentials.password, &user.password_hash) {
            let err = AuthError::InvalidCredentials {
                username: username.clone(),
            };
            warn!(%username, "Invalid password");
            return Err(err);
        }

        let token = issue_access_token(user.id, &user.role, Utc::now(), &self.config)?;

        info!(%username, "Logged in user");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::decode_access_token;
    use assert_matches::assert_matches;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    fn test_config() -> AuthConfig {
        AuthConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            token_ttl: Duration::seconds(900),
            algorithm: Algorithm::HS256,
        }
    }

    fn stored_user(username: &str, password: &str, role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: hash_password(password).expect("hashing should succeed"),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    struct RecordingUserStore {
        added: Arc<Mutex<Vec<CreateUser>>>,
    }

    #[async_trait]
    impl AddUserRepo for RecordingUserStore {
        async fn add_user(&self, user: &CreateUser) -> Result<User, AuthError> {
            self.added.lock().unwrap().push(CreateUser {
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
                role: user.role.clone(),
            });
            Ok(User {
                id: Uuid::new_v4(),
                username: user.username.clone(),
                password_hash: user.password_hash.clone(),
                role: user.role.clone(),
                created_at: Utc::now(),
            })
        }
    }

    struct TakenUserStore;

    #[async_trait]
    impl AddUserRepo for TakenUserStore {
        async fn add_user(&self, user: &CreateUser) -> Result<User, AuthError> {
            Err(AuthError::UserAlreadyExists {
                username: user.username.clone(),
            })
        }
    }

    struct SingleUserStore {
        user: User,
    }

    #[async_trait]
    impl GetUserByUsernameRepo for SingleUserStore {
        async fn find_by_username(&self, username: &str) -> Result<User, AuthError> {
            if username == self.user.username {
                Ok(self.user.clone())
            } else {
                Err(AuthError::UserNotFound {
                    username: username.to_string(),
                })
            }
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let added = Arc::new(Mutex::new(Vec::new()));
        let use_case = RegisterUserWithRole::new(RecordingUserStore {
            added: added.clone(),
        });

        let input = NewUserWithRole {
            username: "carol".to_string(),
            password: "open-sesame".to_string(),
            role: Role::Admin,
        };
        use_case.execute(&input).await.unwrap();

        let added = added.lock().unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].username, "carol");
        assert_eq!(added[0].role, "ADMIN");
        assert_ne!(added[0].password_hash, "open-sesame");
        assert!(verify_password("open-sesame", &added[0].password_hash));
    }

    #[tokio::test]
    async fn test_register_user_fixes_user_role() {
        let added = Arc::new(Mutex::new(Vec::new()));
        let use_case = RegisterUser::new(RecordingUserStore {
            added: added.clone(),
        });

        let input = NewUser {
            username: "dave".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        use_case.execute(&input).await.unwrap();

        assert_eq!(added.lock().unwrap()[0].role, "USER");
    }

    #[tokio::test]
    async fn test_register_reraises_taken_username_unchanged() {
        let use_case = RegisterUserWithRole::new(TakenUserStore);

        let input = NewUserWithRole {
            username: "taken".to_string(),
            password: "irrelevant".to_string(),
            role: Role::User,
        };
        let err = use_case.execute(&input).await.unwrap_err();
        assert_matches!(err, AuthError::UserAlreadyExists { username } if username == "taken");
    }

    #[tokio::test]
    async fn test_login_issues_decodable_token() {
        let user = stored_user("erin", "correct-password", "ADMIN");
        let user_id = user.id;
        let config = test_config();
        let use_case = LogInUser::new(SingleUserStore { user }, config.clone());

        let token = use_case
            .execute(&Credentials {
                username: "erin".to_string(),
                password: "correct-password".to_string(),
            })
            .await
            .unwrap();

        let claims = decode_access_token(&token, &config).expect("token should validate");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user.id, claims.sub);
        assert_eq!(claims.user.role, "ADMIN");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[tokio::test]
    async fn test_login_wrong_password_rejected() {
        let user = stored_user("erin", "correct-password", "USER");
        let use_case = LogInUser::new(SingleUserStore { user }, test_config());

        let err = use_case
            .execute(&Credentials {
                username: "erin".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_matches!(err, AuthError::InvalidCredentials { username } if username == "erin");
    }

    #[tokio::test]
    async fn test_login_unknown_user_rejected() {
        let user = stored_user("erin", "correct-password", "USER");
        let use_case = LogInUser::new(SingleUserStore { user }, test_config());

        let err = use_case
            .execute(&Credentials {
                username: "mallory".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();

        assert_matches!(err, AuthError::UserNotFound { username } if username == "mallory");
    }

    #[tokio::test]
    async fn test_login_corrupt_hash_is_invalid_credentials() {
        let mut user = stored_user("frank", "any-password", "USER");
        user.password_hash = "corrupt".to_string();
        let use_case = LogInUser::new(SingleUserStore { user }, test_config());

        let err = use_case
            .execute(&Credentials {
                username: "frank".to_string(),
                password: "any-password".to_string(),
            })
            .await
            .unwrap_err();

        assert_matches!(err, AuthError::InvalidCredentials { .. });
    }
}
