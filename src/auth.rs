//! Shared-password sign-in check. No sessions or tokens are issued.

use thiserror::Error;

/// Ranch hands allowed to sign in; also the pool of chute operators.
pub const USERS: [&str; 4] = ["jay", "kevin", "april", "ashley"];

pub const SHARED_PASSWORD: &str = "3strands";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Returns the normalized username when the pair is accepted.
pub fn authenticate(username: &str, password: &str) -> Result<String, AuthError> {
    let normalized = username.trim().to_lowercase();
    if USERS.contains(&normalized.as_str()) && password == SHARED_PASSWORD {
        Ok(normalized)
    } else {
        Err(AuthError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_normalized() {
        assert_eq!(authenticate("JAY", "3strands"), Ok("jay".to_string()));
        assert_eq!(authenticate("  April ", "3strands"), Ok("april".to_string()));
    }

    #[test]
    fn every_ranch_hand_signs_in() {
        for user in USERS {
            assert_eq!(authenticate(user, SHARED_PASSWORD), Ok(user.to_string()));
        }
    }

    #[test]
    fn wrong_password_rejected() {
        assert_eq!(
            authenticate("jay", "3Strands"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            authenticate("kevin", " 3strands"),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn unknown_user_rejected() {
        assert_eq!(
            authenticate("rustler", "3strands"),
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(authenticate("", ""), Err(AuthError::InvalidCredentials));
    }
}
