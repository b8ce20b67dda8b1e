//! Reviewer rating values.

/// Thumbs down.
pub const RATING_MINUS_ONE: i16 = -1;

/// No opinion (also the value reported when a reviewer has no meta row).
pub const RATING_NEUTRAL: i16 = 0;

/// Thumbs up.
pub const RATING_PLUS_ONE: i16 = 1;

/// All accepted rating values.
pub const VALID_RATINGS: &[i16] = &[RATING_MINUS_ONE, RATING_NEUTRAL, RATING_PLUS_ONE];

/// Validate that a submitted rating is one of the accepted values.
pub fn validate_rating(rating: i64) -> Result<i16, String> {
    i16::try_from(rating)
        .ok()
        .filter(|r| VALID_RATINGS.contains(r))
        .ok_or_else(|| format!("Invalid rating {rating}. Must be one of: -1, 0, 1"))
}
