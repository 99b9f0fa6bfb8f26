/// Renders amounts for display in the configured currency.
///
/// Display only: amounts are never converted between currencies.
pub struct FormatService {
    currency: String,
}

impl FormatService {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
        }
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Currency-style rendering with thousands grouping, e.g. `$1,234.56`.
    /// Codes without a known symbol are suffixed: `1,234.56 PLN`.
    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        let fixed = format_amount(amount.abs());
        let negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
        let sign = if negative { "-" } else { "" };

        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let grouped = group_thousands(int_part);

        match currency_symbol(&self.currency) {
            Some(symbol) => format!("{sign}{symbol}{grouped}.{frac_part}"),
            None => format!("{sign}{grouped}.{frac_part} {}", self.currency),
        }
    }
}

impl Default for FormatService {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// Two decimals, no grouping, no symbol (`12.50`).
#[must_use]
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
