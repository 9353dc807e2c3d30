//! INR currency formatting with Indian digit grouping (lakh/crore).

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Full amount, no decimals: `₹50,00,000`, `-₹4,500`.
pub fn format_inr(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_indian(rounded.abs() as u64))
}

/// Short axis label: `₹950`, `₹5K`, `₹4.5L`, `₹50L`, `₹1.2Cr`.
pub fn format_inr_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let (scaled, unit) = if abs >= CRORE {
        (abs / CRORE, "Cr")
    } else if abs >= LAKH {
        (abs / LAKH, "L")
    } else if abs >= 1_000.0 {
        (abs / 1_000.0, "K")
    } else {
        return format!("{}₹{}", sign, abs.round() as u64);
    };
    format!("{}₹{}{}", sign, two_significant(scaled), unit)
}

/// One decimal below 10, whole numbers above; trailing `.0` dropped.
fn two_significant(scaled: f64) -> String {
    if scaled < 10.0 {
        let s = format!("{:.1}", scaled);
        match s.strip_suffix(".0") {
            Some(whole) => whole.to_string(),
            None => s,
        }
    } else {
        format!("{}", scaled.round() as u64)
    }
}

/// `1234567` -> `12,34,567`: last three digits, then pairs.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(5_000_000.0), "₹50,00,000");
        assert_eq!(format_inr(123_456_789.0), "₹12,34,56,789");
        assert_eq!(format_inr(1_499.6), "₹1,500");
        assert_eq!(format_inr(-450_000.0), "-₹4,50,000");
    }

    #[test]
    fn test_format_inr_compact() {
        assert_eq!(format_inr_compact(950.0), "₹950");
        assert_eq!(format_inr_compact(5_000.0), "₹5K");
        assert_eq!(format_inr_compact(45_000.0), "₹45K");
        assert_eq!(format_inr_compact(450_000.0), "₹4.5L");
        assert_eq!(format_inr_compact(5_000_000.0), "₹50L");
        assert_eq!(format_inr_compact(12_000_000.0), "₹1.2Cr");
        assert_eq!(format_inr_compact(-200_000.0), "-₹2L");
    }
}
