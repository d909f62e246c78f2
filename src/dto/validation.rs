//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest team or player name accepted.
pub const MAX_NAME_LEN: usize = 64;
/// Longest innings a match can be created with.
pub const MAX_OVERS_LIMIT: u32 = 50;
/// Smallest squad that can field a batting pair.
pub const MIN_SQUAD_SIZE: usize = 2;

/// Build a [`ValidationError`] carrying a human readable message.
pub(crate) fn error(code: &'static str, message: String) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that an innings number is 1 or 2.
pub fn validate_innings(innings: u8) -> Result<(), ValidationError> {
    if !(1..=2).contains(&innings) {
        return Err(error(
            "innings_range",
            format!("innings must be 1 or 2 (got {innings})"),
        ));
    }
    Ok(())
}

/// Validates that an overs limit lies within `1..=MAX_OVERS_LIMIT`.
pub fn validate_overs_limit(overs: u32) -> Result<(), ValidationError> {
    if !(1..=MAX_OVERS_LIMIT).contains(&overs) {
        return Err(error(
            "overs_limit_range",
            format!("oversLimit must be between 1 and {MAX_OVERS_LIMIT} (got {overs})"),
        ));
    }
    Ok(())
}

/// Validates that a display name is non-blank and at most [`MAX_NAME_LEN`] characters.
///
/// # Examples
///
/// ```ignore
/// validate_name("Royal Strikers") // Ok
/// validate_name("   ")            // Err - blank
/// ```
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(error("name_blank", "name must not be blank".into()));
    }
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(error(
            "name_length",
            format!("name must be at most {MAX_NAME_LEN} characters (got {len})"),
        ));
    }
    Ok(())
}

/// Validates a squad: at least [`MIN_SQUAD_SIZE`] valid, distinct player names.
pub fn validate_squad(players: &[String]) -> Result<(), ValidationError> {
    if players.len() < MIN_SQUAD_SIZE {
        return Err(error(
            "squad_size",
            format!(
                "a squad needs at least {MIN_SQUAD_SIZE} players (got {})",
                players.len()
            ),
        ));
    }

    for (index, name) in players.iter().enumerate() {
        validate_name(name)?;
        let duplicate = players[..index]
            .iter()
            .any(|other| other.trim().eq_ignore_ascii_case(name.trim()));
        if duplicate {
            return Err(error(
                "squad_duplicate",
                format!("player `{}` appears twice in the squad", name.trim()),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_innings() {
        assert!(validate_innings(1).is_ok());
        assert!(validate_innings(2).is_ok());
        assert!(validate_innings(0).is_err());
        assert!(validate_innings(3).is_err());
    }

    #[test]
    fn test_validate_overs_limit() {
        assert!(validate_overs_limit(1).is_ok());
        assert!(validate_overs_limit(20).is_ok());
        assert!(validate_overs_limit(0).is_err());
        assert!(validate_overs_limit(51).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Royal Strikers").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_squad() {
        let squad = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert!(validate_squad(&squad(&["A. Opener", "B. Opener"])).is_ok());
        assert!(validate_squad(&squad(&["Solo"])).is_err()); // too small
        assert!(validate_squad(&squad(&["Same", "same "])).is_err()); // duplicate
        assert!(validate_squad(&squad(&["Named", " "])).is_err()); // blank
    }
}
