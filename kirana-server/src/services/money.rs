//! 金额运算
//!
//! 模型与 DTO 中的金额保持 f64（与前端 JSON 对齐），所有算术经
//! [`Decimal`] 进行，出口统一保留两位小数、四舍五入远离零。

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

const DECIMAL_PLACES: u32 = 2;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// 单行小计 = 单价 × 数量
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_totals_avoid_float_drift() {
        // 0.1 * 3 in f64 arithmetic is 0.30000000000000004
        let total = line_total(0.1, 3);
        assert_eq!(to_f64(total), 0.3);

        let sum = line_total(10.55, 2) + line_total(4.95, 1);
        assert_eq!(to_f64(sum), 26.05);
    }

    #[test]
    fn export_rounds_half_away_from_zero() {
        assert_eq!(to_f64("2.345".parse::<Decimal>().unwrap()), 2.35);
        assert_eq!(to_f64("2.344".parse::<Decimal>().unwrap()), 2.34);
        assert_eq!(to_f64("-2.345".parse::<Decimal>().unwrap()), -2.35);
    }

    #[test]
    fn non_finite_inputs_collapse_to_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }
}
