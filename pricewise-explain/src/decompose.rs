//! Split a subtotal into a base amount and percentage-driven modifiers.
//!
//! With modifier fractions `p_i` and subtotal `S`:
//! `base = S / (1 + Σp)`, `modifier_i = base × p_i`. Amounts are rounded to
//! cents and the rounding residual is folded into the base, so the
//! components always sum to `S` exactly (to the cent).

use pricewise_core::constants::round_cents;

/// Below this `1 + Σp` the modifiers cannot be backed out of the subtotal.
pub const MIN_DENOMINATOR: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub base: f64,
    pub modifiers: Vec<f64>,
}

/// `None` when the fractions cannot be reconciled with the subtotal.
pub fn decompose(subtotal: f64, fractions: &[f64]) -> Option<Decomposition> {
    let denominator = 1.0 + fractions.iter().sum::<f64>();
    if !denominator.is_finite() || denominator < MIN_DENOMINATOR {
        return None;
    }
    let raw_base = subtotal / denominator;
    let modifiers: Vec<f64> = fractions.iter().map(|p| round_cents(raw_base * p)).collect();
    let base = round_cents(subtotal - modifiers.iter().sum::<f64>());
    Some(Decomposition { base, modifiers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_modifier() {
        let d = decompose(11_500.0, &[0.15]).unwrap();
        assert_eq!(d.base, 10_000.0);
        assert_eq!(d.modifiers, vec![1_500.0]);
    }

    #[test]
    fn rounding_residual_goes_to_base() {
        let d = decompose(100.0, &[1.0 / 3.0, 0.1]).unwrap();
        let total = d.base + d.modifiers.iter().sum::<f64>();
        assert!((total - 100.0).abs() < 0.005);
    }

    #[test]
    fn no_modifiers_is_all_base() {
        let d = decompose(4_321.09, &[]).unwrap();
        assert_eq!(d.base, 4_321.09);
        assert!(d.modifiers.is_empty());
    }

    #[test]
    fn impossible_fractions_are_rejected() {
        assert!(decompose(1_000.0, &[-0.6, -0.5]).is_none());
    }
}
