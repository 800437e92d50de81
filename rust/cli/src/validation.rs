//! Argument validation shared by the replay and sample commands.

use handreel_replay::Speed;

/// Resolve the replay speed: the flag when given, the configured default
/// otherwise. Only the supported multipliers are accepted.
///
/// # Example
///
/// ```rust
/// # use handreel_cli::validation::resolve_speed;
/// use handreel_replay::Speed;
///
/// assert_eq!(resolve_speed(Some(2.0), Speed::Normal), Ok(Speed::Double));
/// assert_eq!(resolve_speed(None, Speed::Half), Ok(Speed::Half));
/// assert!(resolve_speed(Some(3.0), Speed::Normal).is_err());
/// ```
pub fn resolve_speed(flag: Option<f64>, default: Speed) -> Result<Speed, String> {
    match flag {
        None => Ok(default),
        Some(s) => Speed::try_from(s).map_err(|e| e.to_string()),
    }
}

/// `--seek` is a fraction of the replay, inclusive on both ends.
pub fn validate_seek(seek: Option<f64>) -> Result<(), String> {
    if let Some(f) = seek
        && !(0.0..=1.0).contains(&f)
    {
        return Err(format!("seek must be between 0 and 1, got {}", f));
    }
    Ok(())
}

/// A run may touch at most `max` hands.
pub fn validate_hand_count(count: usize, max: usize) -> Result<(), String> {
    if count == 0 {
        return Err("at least one hand is required".into());
    }
    if count > max {
        return Err(format!(
            "{} hands requested, limit is {} (max_hands)",
            count, max
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_bounds() {
        assert!(validate_seek(None).is_ok());
        assert!(validate_seek(Some(0.0)).is_ok());
        assert!(validate_seek(Some(1.0)).is_ok());
        assert!(validate_seek(Some(1.01)).is_err());
        assert!(validate_seek(Some(-0.5)).is_err());
        assert!(validate_seek(Some(f64::NAN)).is_err());
    }

    #[test]
    fn hand_count_limits() {
        assert!(validate_hand_count(1, 1).is_ok());
        assert!(validate_hand_count(0, 10).is_err());
        let msg = validate_hand_count(11, 10).unwrap_err();
        assert!(msg.contains("limit is 10"));
    }

    #[test]
    fn speed_error_names_supported_values() {
        let msg = resolve_speed(Some(0.0), Speed::Normal).unwrap_err();
        assert!(msg.contains("0.5, 1, 1.5, 2"));
    }
}
