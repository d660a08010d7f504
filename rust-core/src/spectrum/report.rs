//! Plain-text tables of spectral bins

use std::fmt;

use super::bins::SpectralBin;

/// Significant digits for the magnitude column
pub const MAGNITUDE_PRECISION: usize = 2;

/// Significant digits for every other numeric column
pub const DECIMAL_PRECISION: usize = 6;

const HEADERS: [&str; 7] = [
    "Index",
    "Magnitude",
    "Magnitude²",
    "Angle θ (radians)",
    "Angle θ (degrees)",
    "Real Part",
    "Imaginary Part",
];

/// Enough fractional digits to print any finite f64 exactly
const EXACT_DIGITS: usize = 800;

/// Upper bound on significant digits, as in `toPrecision`
const MAX_PRECISION: usize = 100;

/// Round |value| to `digits` significant decimal digits
///
/// Returns the digits and the decimal exponent of the first one. Works on
/// the exact decimal expansion, so a tie such as 0.125 at 2 digits rounds
/// away from zero (0.13) rather than to even.
fn round_significant(value: f64, digits: usize) -> (Vec<u8>, i32) {
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent = exponent.parse::<i32>().unwrap_or(0);

    let all: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    let mut kept = all[..digits].to_vec();

    if all[digits] >= 5 {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        // 9.99 -> 10.0: shift in a leading 1
        if carry {
            kept.insert(0, 1);
            kept.pop();
            exponent += 1;
        }
    }

    (kept, exponent)
}

/// Format `value` with `digits` significant digits
///
/// Follows `Number.prototype.toPrecision`: fixed notation while the decimal
/// exponent e satisfies -6 <= e < digits, otherwise `d.ddde+X`.
pub fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.clamp(1, MAX_PRECISION);

    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    let (kept, exponent) = round_significant(value, digits);
    let text: String = kept.iter().map(|&d| char::from(b'0' + d)).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if exponent < -6 || exponent >= digits as i32 {
        let (lead, rest) = text.split_at(1);
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}{}e{}{}", sign, lead, exp_sign, exponent.abs())
        } else {
            format!("{}{}.{}e{}{}", sign, lead, rest, exp_sign, exponent.abs())
        }
    } else if exponent >= 0 {
        let (int_part, frac_part) = text.split_at(exponent as usize + 1);
        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, text)
    }
}

/// Tabular rendering of a bin sequence
pub struct SpectralReport<'a> {
    bins: &'a [SpectralBin],
}

impl<'a> SpectralReport<'a> {
    pub fn new(bins: &'a [SpectralBin]) -> Self {
        Self { bins }
    }

    fn cells(bin: &SpectralBin) -> [String; 7] {
        [
            bin.index.to_string(),
            to_precision(bin.magnitude, MAGNITUDE_PRECISION),
            to_precision(bin.magnitude_squared, DECIMAL_PRECISION),
            format!("{} rad", to_precision(bin.angle_radians, DECIMAL_PRECISION)),
            format!("{}°", to_precision(bin.angle_degrees, DECIMAL_PRECISION)),
            to_precision(bin.real_part, DECIMAL_PRECISION),
            to_precision(bin.imaginary_part, DECIMAL_PRECISION),
        ]
    }
}

impl fmt::Display for SpectralReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<[String; 7]> = self.bins.iter().map(Self::cells).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        // Index column is left-aligned, numbers right-aligned
        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[&str]| -> fmt::Result {
            for (col, (cell, &width)) in cells.iter().zip(widths.iter()).enumerate() {
                if col == 0 {
                    write!(f, "{:<width$}", cell, width = width)?;
                } else {
                    write!(f, " | {:>width$}", cell, width = width)?;
                }
            }
            writeln!(f)
        };

        write_row(f, &HEADERS[..])?;

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        write_row(f, rule.as_slice())?;

        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, cells.as_slice())?;
        }

        Ok(())
    }
}
