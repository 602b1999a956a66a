use crate::random::RandomSource;

pub const STANDARD_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+";

pub const DEFAULT_LENGTH: usize = 12;

/// Random password of `length` characters drawn uniformly from `STANDARD_CHARSET`
pub fn generate_standard_password(rng: &mut dyn RandomSource, length: usize) -> String {
    let charset = STANDARD_CHARSET.as_bytes();
    (0..length)
        .map(|_| charset[rng.next_int(charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::RngSource;
    use crate::test_utils::ScriptedRandom;

    #[test]
    fn test_default_length_and_charset() {
        let mut rng = RngSource::seeded(7);
        let password = generate_standard_password(&mut rng, DEFAULT_LENGTH);
        assert_eq!(password.chars().count(), 12);
        assert!(password.chars().all(|c| STANDARD_CHARSET.contains(c)));
    }

    #[test]
    fn test_scripted_indices() {
        let mut rng = ScriptedRandom::new(vec![0, 26, 52, 62]);
        assert_eq!(generate_standard_password(&mut rng, 4), "aA0!");
    }

    #[test]
    fn test_zero_length() {
        let mut rng = RngSource::seeded(7);
        assert_eq!(generate_standard_password(&mut rng, 0), "");
    }
}
