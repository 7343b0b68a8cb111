//! Numeric presentation: decimal rounding rules and Chinese financial
//! amounts.

use std::sync::OnceLock;

use docket_core::number_string;
use regex::Regex;

/// How a value is brought to the configured number of decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundMode {
    /// Half away from zero.
    Nearest,
    /// `入`: away from zero.
    Up,
    /// `舍`: toward zero.
    Down,
}

/// A parsed number format such as `"2"`, `"2入"` or `"0舍"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimals: usize,
    pub mode: RoundMode,
}

impl NumberFormat {
    /// Parses a format spec. Anything unrecognized means zero decimals
    /// with standard rounding.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        let (digits, mode) = if let Some(d) = spec.strip_suffix('入') {
            (d, RoundMode::Up)
        } else if let Some(d) = spec.strip_suffix('舍') {
            (d, RoundMode::Down)
        } else {
            (spec, RoundMode::Nearest)
        };

        match digits.parse::<usize>() {
            Ok(decimals) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Self { decimals, mode }
            }
            _ => Self {
                decimals: 0,
                mode: RoundMode::Nearest,
            },
        }
    }

    pub fn apply(&self, value: f64) -> String {
        let decimals = self.decimals.min(20);
        let multiplier = 10f64.powi(decimals as i32);
        let scaled = value * multiplier;
        let rounded = match self.mode {
            RoundMode::Nearest => scaled.round(),
            RoundMode::Up if value < 0.0 => scaled.floor(),
            RoundMode::Up => scaled.ceil(),
            RoundMode::Down if value < 0.0 => scaled.ceil(),
            RoundMode::Down => scaled.floor(),
        };
        let result = rounded / multiplier;
        // avoid "-0.00"
        let result = if result == 0.0 { 0.0 } else { result };
        format!("{:.*}", decimals, result)
    }
}

/// Formats `value` with an optional format spec. Without a spec the plain
/// number is printed.
///
/// ```
/// use docket_render::number_config;
///
/// assert_eq!(number_config(3.14159, Some("2")), "3.14");
/// assert_eq!(number_config(-1.005, Some("2入")), "-1.01");
/// assert_eq!(number_config(15.5, None), "15.5");
/// ```
pub fn number_config(value: f64, spec: Option<&str>) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    match spec {
        Some(spec) if !spec.is_empty() => NumberFormat::parse(spec).apply(value),
        _ => number_string(value),
    }
}

const DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];
const UNITS: &str = "仟佰拾亿仟佰拾万仟佰拾元角分";
const MAX_AMOUNT: f64 = 999_999_999_999.99;

fn cleanup_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            ("零(仟|佰|拾|角)", "零"),
            ("(零)+", "零"),
            ("零(万|亿|元)", "$1"),
            ("(亿)万|壹(拾)", "$1$2"),
            ("^元零?|零分", ""),
            ("元$", "元整"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (Regex::new(pattern).expect("invalid regex pattern"), replacement)
        })
        .collect()
    })
}

/// Converts an amount to financial Chinese numerals, e.g. `1500` to
/// `壹仟伍佰元整`.
///
/// Fractions beyond cents are truncated. Negative amounts get a `负`
/// prefix. Magnitudes above 999,999,999,999.99 yield `数值过大`.
pub fn chinese_amount(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "零元整".to_string();
    }
    let magnitude = value.abs();
    if magnitude > MAX_AMOUNT {
        return "数值过大".to_string();
    }

    let text = number_string(magnitude);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let mut cents: String = frac_part.chars().take(2).collect();
    while cents.len() < 2 {
        cents.push('0');
    }
    let digits = format!("{}{}", int_part, cents);

    let units: Vec<char> = UNITS.chars().collect();
    let offset = units.len().saturating_sub(digits.len());
    let mut spelled = String::new();
    for (i, d) in digits.chars().enumerate() {
        let n = d.to_digit(10).unwrap_or(0) as usize;
        spelled.push(DIGITS[n]);
        if let Some(unit) = units.get(offset + i) {
            spelled.push(*unit);
        }
    }

    let mut result = spelled;
    for (re, replacement) in cleanup_rules() {
        result = re.replace_all(&result, *replacement).into_owned();
    }

    if value < 0.0 {
        format!("负{}", result)
    } else {
        result
    }
}
