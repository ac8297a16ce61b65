//! Field validation for user and medium writes.
//!
//! Every rule is a predicate plus a message. All rules are evaluated and the
//! violations are returned together, in a fixed order. Uniqueness inputs come
//! from the repository as [`UserConflicts`] / [`MediumConflicts`], computed in
//! the same transaction as the write that follows.

use serde::Serialize;

use rmuse_domain::media::Permission;
use rmuse_domain::user::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Ordered collection of rule violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self(vec![FieldError::new(field, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    /// Field names in report order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn rule(field: &'static str, violated: bool, message: impl FnOnce() -> String) -> Option<FieldError> {
    violated.then(|| FieldError::new(field, message()))
}

fn collect(rules: impl IntoIterator<Item = Option<FieldError>>) -> ValidationErrors {
    ValidationErrors(rules.into_iter().flatten().collect())
}

// ── User ─────────────────────────────────────────────────────────────────────

/// Whether another user already holds the email / username.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserConflicts {
    pub email_taken: bool,
    pub username_taken: bool,
}

impl UserConflicts {
    /// Uniqueness violations only. Rules are skipped for empty values.
    pub fn errors(self, email: &str, username: &str) -> ValidationErrors {
        collect(self.rules(email, username))
    }

    fn rules(self, email: &str, username: &str) -> [Option<FieldError>; 2] {
        [
            rule("email", !email.is_empty() && self.email_taken, || {
                format!("a user with email {email} already exists")
            }),
            rule("username", !username.is_empty() && self.username_taken, || {
                format!("username {username} is already in use")
            }),
        ]
    }
}

/// Validate a user write. `email` must already be normalised.
///
/// Order: email empty, username empty, type empty, type unknown, email taken,
/// username taken.
pub fn validate_user(
    email: &str,
    username: &str,
    role: &str,
    conflicts: UserConflicts,
) -> Result<UserRole, ValidationErrors> {
    let parsed = role.parse::<UserRole>();
    let [email_taken, username_taken] = conflicts.rules(email, username);
    collect([
        rule("email", email.is_empty(), || "email is empty".to_owned()),
        rule("username", username.is_empty(), || "username is empty".to_owned()),
        rule("type", role.is_empty(), || "type is empty".to_owned()),
        rule("type", !role.is_empty() && parsed.is_err(), || {
            "type must be artist or follower".to_owned()
        }),
        email_taken,
        username_taken,
    ])
    .into_result()?;
    parsed.map_err(|_| ValidationErrors::single("type", "type must be artist or follower"))
}

// ── Medium ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediumConflicts {
    pub uri_taken: bool,
}

impl MediumConflicts {
    pub fn errors(self, uri: &str) -> ValidationErrors {
        collect([self.rule(uri)])
    }

    fn rule(self, uri: &str) -> Option<FieldError> {
        rule("uri", !uri.is_empty() && self.uri_taken, || {
            format!("there is already a file with URI {uri}")
        })
    }
}

/// Validate a medium write and resolve its tier. A missing or empty
/// permission means [`Permission::Public`].
///
/// Order: uri empty, type empty, uri taken, permission unknown.
pub fn validate_medium(
    uri: &str,
    file_type: &str,
    permission: Option<&str>,
    conflicts: MediumConflicts,
) -> Result<Permission, ValidationErrors> {
    let tier = match permission {
        None | Some("") => Some(Permission::default()),
        Some(p) => Permission::parse(p),
    };
    collect([
        rule("uri", uri.is_empty(), || "uri is empty".to_owned()),
        rule("type", file_type.is_empty(), || "type is empty".to_owned()),
        conflicts.rule(uri),
        rule("permission", tier.is_none(), || {
            "permission must be public or follower".to_owned()
        }),
    ])
    .into_result()?;
    tier.ok_or_else(|| ValidationErrors::single("permission", "permission must be public or follower"))
}
