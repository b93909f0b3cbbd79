//! Tick label formatting and fitting.

use num_format::{Locale, ToFormattedString};

use super::text::estimate_text_width_px;

/// Largest magnitude printed with digit grouping; beyond it labels use scientific notation.
const MAX_GROUPED: f64 = 1.0e15;

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// Format a tick value: grouped integer part, up to 4 decimals with trailing zeros trimmed.
///
/// `12500.5` → `12,500.5` (en) or `12.500,5` (de).
pub fn format_tick(v: f64, locale: &Locale) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v.abs() >= MAX_GROUPED {
        return format!("{v:e}");
    }
    let s = format!("{:.4}", v.abs());
    let s = s.trim_end_matches('0').trim_end_matches('.');
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let int_val: u64 = int_part.parse().unwrap_or(0);

    let mut out = String::new();
    if v < 0.0 && (int_val != 0 || frac_part.is_some()) {
        out.push('-');
    }
    out.push_str(&int_val.to_formatted_string(locale));
    if let Some(f) = frac_part {
        out.push_str(locale.decimal());
        out.push_str(f);
    }
    out
}

/// How many x labels fit across `width_px` without overlapping, between 2 and 8.
pub fn fit_label_count(x0: f64, x1: f64, width_px: u32, font_px: u32, locale: &Locale) -> usize {
    let widest = [x0, x1, (x0 + x1) / 2.0]
        .iter()
        .map(|v| estimate_text_width_px(&format_tick(*v, locale), font_px))
        .max()
        .unwrap_or(font_px);
    let slot = (widest + 2 * font_px).max(1);
    ((width_px / slot) as usize).clamp(2, 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_group_and_trim() {
        let english = map_locale("en");
        assert_eq!(format_tick(0.0, english), "0");
        assert_eq!(format_tick(2.5, english), "2.5");
        assert_eq!(format_tick(100.0, english), "100");
        assert_eq!(format_tick(12500.5, english), "12,500.5");
        assert_eq!(format_tick(-0.25, english), "-0.25");
        assert_eq!(format_tick(-0.00001, english), "0");
    }

    #[test]
    fn ticks_follow_locale() {
        let german = map_locale("DE");
        assert_eq!(format_tick(12500.5, german), "12.500,5");
        assert_eq!(map_locale("xx"), &Locale::en);
    }

    #[test]
    fn label_count_is_bounded() {
        let english = map_locale("en");
        assert_eq!(fit_label_count(0.0, 100.0, 10, 12, english), 2);
        assert_eq!(fit_label_count(0.0, 1.0, 10_000, 12, english), 8);
    }
}
