//! Binding keys carry the weight of a binding

use crate::errors::RoutingError;

/// Check whether a key is shaped like an integer even if it does not fit in one
fn is_integer(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Parse the weight out of a binding key
///
/// # Arguments
///
/// * `key` - The binding key to parse
pub fn parse_weight(key: &str) -> Result<u32, RoutingError> {
    let trimmed = key.trim();
    // anything that isn't an integer is not a valid binding key at all
    if !is_integer(trimmed) {
        return Err(RoutingError::InvalidBindingKey(key.to_owned()));
    }
    match trimmed.parse::<u32>() {
        Ok(weight) if weight > 0 => Ok(weight),
        _ => Err(RoutingError::InvalidWeight(key.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_weights() {
        assert_eq!(parse_weight("1"), Ok(1));
        assert_eq!(parse_weight("10"), Ok(10));
        assert_eq!(parse_weight(" 3 "), Ok(3));
        assert_eq!(parse_weight("+4"), Ok(4));
    }

    #[test]
    fn zero_and_negative_are_invalid_weights() {
        assert_eq!(
            parse_weight("0"),
            Err(RoutingError::InvalidWeight("0".to_owned()))
        );
        assert_eq!(
            parse_weight("-1"),
            Err(RoutingError::InvalidWeight("-1".to_owned()))
        );
    }

    #[test]
    fn too_large_is_an_invalid_weight() {
        assert!(matches!(
            parse_weight("99999999999999999999999"),
            Err(RoutingError::InvalidWeight(_))
        ));
    }

    #[test]
    fn non_integers_are_invalid_keys() {
        for key in ["abc", "", "1.5", "12abc", "-", " "] {
            assert_eq!(
                parse_weight(key),
                Err(RoutingError::InvalidBindingKey(key.to_owned()))
            );
        }
    }
}
