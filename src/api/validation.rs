//! Input validation for API requests.
//!
//! Request schemas are validated before any store access, so malformed
//! payloads fail fast with 422 instead of surfacing as store errors.

/// Recipes must carry a meaningful amount of instruction text
pub const MIN_INSTRUCTIONS_LEN: usize = 50;

const MAX_USERNAME_LEN: usize = 80;

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username is required".to_string());
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(format!(
            "Username is too long (max {} characters)",
            MAX_USERNAME_LEN
        ));
    }

    Ok(())
}

/// Validate a signup password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate a recipe title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.is_empty() {
        return Err("Title is required".to_string());
    }

    Ok(())
}

/// Validate recipe instructions
pub fn validate_instructions(instructions: &str) -> Result<(), String> {
    if instructions.len() < MIN_INSTRUCTIONS_LEN {
        return Err(format!(
            "Instructions must be at least {} characters",
            MIN_INSTRUCTIONS_LEN
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("kabir").is_ok());
        assert!(validate_username("a").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter2").is_ok());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Delicious Shed Ham").is_ok());
        assert!(validate_title("").is_err());
    }

    #[test]
    fn test_validate_instructions() {
        assert!(validate_instructions(&"a".repeat(50)).is_ok());
        assert!(validate_instructions(&"a".repeat(200)).is_ok());

        assert!(validate_instructions("").is_err());
        assert!(validate_instructions(&"a".repeat(49)).is_err());
    }
}
