//! Utility helpers shared across the WASM frontend.

/// Format an amount the way the cashier expects to read it: thousands
/// separated with dots, two decimals after a comma, e.g. `$ 12.345,60`.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}$ {},{:02}", sign, grouped, frac)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0.0), "$ 0,00");
        assert_eq!(format_money(7.5), "$ 7,50");
        assert_eq!(format_money(1234.56), "$ 1.234,56");
        assert_eq!(format_money(1_000_000.0), "$ 1.000.000,00");
    }

    #[test]
    fn money_handles_negative_and_rounding() {
        assert_eq!(format_money(3.456), "$ 3,46");
        assert_eq!(format_money(-7.567), "-$ 7,57");
        assert_eq!(format_money(-0.004), "$ 0,00");
    }
}
