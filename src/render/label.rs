//! Length labels: formatting, parsing and text measurement.

/// Significant digits shown in length labels
pub const LABEL_DIGITS: usize = 4;

/// Measures rendered text so label halos can be sized to fit
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_px: f32) -> f32;
}

/// Estimates every glyph with the same advance, a fraction of the font height
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub advance: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for FixedAdvance {
    fn text_width(&self, text: &str, font_px: f32) -> f32 {
        text.chars().count() as f32 * self.advance * font_px
    }
}

/// Format `value` with `digits` significant digits.
///
/// Switches to exponential notation (`1.235e+4`) when the exponent is below
/// -6 or does not fit in the requested digits.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    // Let the formatter round first so the exponent accounts for carries (9.9996 -> 10.00)
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -6 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{}", exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        format!("{value:.decimals$}")
    }
}

/// Label text for a length in user units
pub fn format_length(value: f64) -> String {
    format_significant(value, LABEL_DIGITS)
}

/// Parse the leading number of user input, ignoring anything after it
/// (`"50 cm"` parses as 50). Returns `None` when there is no leading number.
pub fn parse_length(input: &str) -> Option<f64> {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Optional exponent, only taken when it is complete
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}
