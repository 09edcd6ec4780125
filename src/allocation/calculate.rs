use crate::errors::{AirdropError, AirdropResult};
use crate::pricing::is_valid_price;

/// Allocation derived from one participant's burn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub tokens_received: f64,
    pub airdrop_value: f64,
}

/// Parse the participant's burn amount from form input
///
/// Accepts any finite decimal number, including negative values.
pub fn parse_user_burn(raw: &str) -> AirdropResult<f64> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|e| AirdropError::InvalidInput(format!("user_burn '{}': {}", trimmed, e)))?;

    if !value.is_finite() {
        return Err(AirdropError::InvalidInput(format!(
            "user_burn '{}' is not a finite number",
            trimmed
        )));
    }
    Ok(value)
}

/// Proportional share of the token offering and its USD value
///
/// ```text
/// tokens_received = (total_token_offered / total_burnt) * user_burn
/// airdrop_value   = tokens_received * price
/// ```
///
/// The price guard runs before the stake total is inspected.
pub fn calculate_allocation(
    total_token_offered: f64,
    user_burn: f64,
    total_burnt: Option<f64>,
    price: Option<f64>,
) -> AirdropResult<Allocation> {
    let price = price
        .filter(|p| is_valid_price(*p))
        .ok_or(AirdropError::PriceUnavailable)?;

    let total_burnt = total_burnt
        .filter(|t| t.is_finite() && *t > 0.0)
        .ok_or(AirdropError::StakeUnavailable)?;

    let tokens_received = (total_token_offered / total_burnt) * user_burn;
    Ok(Allocation {
        tokens_received,
        airdrop_value: tokens_received * price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFERED: f64 = 50_000_000.0;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_reference_example() {
        let allocation = calculate_allocation(OFFERED, 10.0, Some(1_000_000.0), Some(0.05)).unwrap();
        assert!(approx_eq(allocation.tokens_received, 500.0));
        assert!(approx_eq(allocation.airdrop_value, 25.0));
    }

    #[test]
    fn test_formula_over_a_range_of_inputs() {
        let burns = [0.0, 0.5, 1.0, 123.456, 1e6];
        let totals = [1.0, 42.0, 1e3, 7.77e7];
        let prices = [1e-6, 0.05, 3.2, 1e4];

        for &user_burn in &burns {
            for &total_burnt in &totals {
                for &price in &prices {
                    let allocation =
                        calculate_allocation(OFFERED, user_burn, Some(total_burnt), Some(price))
                            .unwrap();
                    let expected_tokens = OFFERED * user_burn / total_burnt;
                    assert!(approx_eq(allocation.tokens_received, expected_tokens));
                    assert!(approx_eq(allocation.airdrop_value, expected_tokens * price));
                }
            }
        }
    }

    #[test]
    fn test_negative_burn_scales_linearly() {
        let allocation = calculate_allocation(OFFERED, -10.0, Some(1_000_000.0), Some(0.05)).unwrap();
        assert!(approx_eq(allocation.tokens_received, -500.0));
        assert!(approx_eq(allocation.airdrop_value, -25.0));
    }

    #[test]
    fn test_stake_guard() {
        for total in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
            assert_eq!(
                calculate_allocation(OFFERED, 10.0, total, Some(0.05)),
                Err(AirdropError::StakeUnavailable)
            );
        }
    }

    #[test]
    fn test_price_guard_runs_first() {
        for price in [None, Some(0.0), Some(-0.01)] {
            assert_eq!(
                calculate_allocation(OFFERED, 10.0, Some(1_000_000.0), price),
                Err(AirdropError::PriceUnavailable)
            );
            // Both missing: the price failure is reported
            assert_eq!(
                calculate_allocation(OFFERED, 10.0, None, price),
                Err(AirdropError::PriceUnavailable)
            );
        }
    }

    #[test]
    fn test_parse_user_burn() {
        assert_eq!(parse_user_burn("10"), Ok(10.0));
        assert_eq!(parse_user_burn(" 2.5 "), Ok(2.5));
        assert_eq!(parse_user_burn("1e3"), Ok(1000.0));
        assert_eq!(parse_user_burn("0"), Ok(0.0));
        assert_eq!(parse_user_burn("-10"), Ok(-10.0));
    }

    #[test]
    fn test_parse_user_burn_rejects_bad_input() {
        for raw in ["abc", "", "NaN", "inf", "-inf", "10 tokens"] {
            assert!(
                matches!(parse_user_burn(raw), Err(AirdropError::InvalidInput(_))),
                "expected InvalidInput for {:?}",
                raw
            );
        }
    }
}
