// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Identity comes from server-verified sessions, never from
//! client-supplied headers. A login checks the password against the
//! stored bcrypt hash and issues an opaque session token; every request
//! after that resolves the token back to a user.

use quarters_domain::Role;
use quarters_persistence::{Persistence, SessionData, UserData};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::error::AuthError;

/// An authenticated user resolved from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, name: String, role: Role) -> Self {
        Self {
            user_id,
            name,
            role,
        }
    }

    /// True for the roles with system-wide administrative authority.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::SystemAdmin | Role::Admin)
    }
}

/// Role-based access control checks.
///
/// Each check names the action it guards; handlers call exactly one
/// before touching persistence.
pub struct AuthorizationService;

impl AuthorizationService {
    fn forbidden(action: &str, required_role: &str) -> AuthError {
        AuthError::Forbidden {
            action: action.to_string(),
            required_role: required_role.to_string(),
        }
    }

    /// User CRUD is reserved for systemAdmin.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for any other role.
    pub fn authorize_manage_users(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::SystemAdmin => Ok(()),
            Role::Admin | Role::BlockHead => {
                Err(Self::forbidden("manage_users", Role::SystemAdmin.as_str()))
            }
        }
    }

    /// Block and room CRUD requires systemAdmin or admin.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for blockHead actors.
    pub fn authorize_manage_blocks(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::SystemAdmin | Role::Admin => Ok(()),
            Role::BlockHead => Err(Self::forbidden("manage_blocks", Role::Admin.as_str())),
        }
    }

    /// Bed CRUD and occupancy changes belong to the block's registered
    /// head, or to systemAdmin.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `block_head_id` - The registered head of the block that owns the bed
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the actor is neither.
    pub fn authorize_manage_beds(
        actor: &AuthenticatedActor,
        block_head_id: i64,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::SystemAdmin => Ok(()),
            Role::BlockHead if actor.user_id == block_head_id => Ok(()),
            Role::Admin | Role::BlockHead => {
                Err(Self::forbidden("manage_beds", Role::BlockHead.as_str()))
            }
        }
    }

    /// Deciding a request (assign, reject) belongs to the head of its
    /// preferred block, or to systemAdmin.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` when the actor is neither.
    pub fn authorize_handle_request(
        actor: &AuthenticatedActor,
        block_head_id: i64,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::SystemAdmin => Ok(()),
            Role::BlockHead if actor.user_id == block_head_id => Ok(()),
            Role::Admin | Role::BlockHead => {
                Err(Self::forbidden("handle_request", Role::BlockHead.as_str()))
            }
        }
    }

    /// Direct status changes and request deletion require systemAdmin or
    /// admin.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` for blockHead actors.
    pub fn authorize_administer_requests(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::SystemAdmin | Role::Admin => Ok(()),
            Role::BlockHead => Err(Self::forbidden(
                "administer_requests",
                Role::Admin.as_str(),
            )),
        }
    }
}

/// Session-based authentication.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session expiration duration (30 days).
    const DEFAULT_SESSION_EXPIRATION: Duration = Duration::days(30);

    /// Authenticates a user by email and password and creates a session.
    ///
    /// The failure reason is deliberately identical for an unknown email
    /// and a wrong password.
    ///
    /// # Returns
    ///
    /// A tuple of (`session_token`, `authenticated_actor`).
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are wrong, the account is
    /// deactivated, or a write fails.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthenticatedActor), AuthError> {
        debug!("Login attempt for email: {}", email);

        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            })?;

        let password_matches: bool =
            bcrypt::verify(password, &user.password_hash).map_err(|e| {
                AuthError::AuthenticationFailed {
                    reason: format!("Password verification failed: {e}"),
                }
            })?;
        if !password_matches {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Invalid email or password"),
            });
        }

        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let role: Role = Role::parse(&user.role).map_err(|e| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

        let session_token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Self::DEFAULT_SESSION_EXPIRATION;
        let expires_at_str: String = expires_at.format(&Iso8601::DEFAULT).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Failed to format expiration time: {e}"),
            }
        })?;

        persistence
            .create_session(&session_token, user.user_id, &expires_at_str)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to create session: {e}"),
            })?;
        persistence
            .update_last_login(user.user_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update last login: {e}"),
            })?;

        info!(user_id = user.user_id, "User logged in");
        Ok((
            session_token,
            AuthenticatedActor::new(user.user_id, user.name, role),
        ))
    }

    /// Validates a session token and returns the authenticated actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is unknown or expired, or the
    /// account behind it is deactivated.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
    ) -> Result<AuthenticatedActor, AuthError> {
        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Database error: {e}"),
            })?
            .ok_or_else(|| AuthError::AuthenticationFailed {
                reason: String::from("Invalid session token"),
            })?;

        let expires_at: OffsetDateTime = OffsetDateTime::parse(
            &session.expires_at,
            &Iso8601::DEFAULT,
        )
        .map_err(|e| AuthError::AuthenticationFailed {
            reason: format!("Failed to parse session expiration: {e}"),
        })?;
        if OffsetDateTime::now_utc() > expires_at {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Session expired"),
            });
        }

        let user: UserData = persistence.get_user(session.user_id).map_err(|e| {
            AuthError::AuthenticationFailed {
                reason: format!("Session user lookup failed: {e}"),
            }
        })?;
        if !user.is_active {
            return Err(AuthError::AuthenticationFailed {
                reason: String::from("Account is deactivated"),
            });
        }

        let role: Role = Role::parse(&user.role).map_err(|e| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

        persistence
            .update_session_activity(session.session_id)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to update session activity: {e}"),
            })?;

        Ok(AuthenticatedActor::new(user.user_id, user.name, role))
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), AuthError> {
        persistence
            .delete_session(session_token)
            .map_err(|e| AuthError::AuthenticationFailed {
                reason: format!("Failed to delete session: {e}"),
            })?;

        Ok(())
    }

    /// Generates an opaque session token from the current time and a
    /// random component.
    fn generate_session_token() -> String {
        let timestamp: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}
