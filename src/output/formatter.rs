use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::history::SavedDiagnostic;
use crate::progress::Frame;
use crate::scoring::{Catalog, EconomicImpact, ScoreResult};

const DEFAULT_BAR_WIDTH: usize = 30;
const MAX_BAR_WIDTH: usize = 40;
const MIN_BAR_WIDTH: usize = 10;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format whole euros the way es-ES does: `1234 €`, `12.345 €`.
///
/// Thousands are only grouped from five digits up, and a no-break space
/// separates the amount from the symbol.
pub fn format_eur(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let grouped = if digits.len() > 4 {
        group_thousands(&digits)
    } else {
        digits
    };
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{}\u{a0}€", sign, grouped)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Parse a CSS hex color ("#28A745" or "#2A4") into RGB.
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 16 + v;
            }
            Some((rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

fn paint(text: &str, color: &str) -> String {
    match parse_hex_color(color) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold().to_string(),
        None => text.bold().to_string(),
    }
}

/// Format a diagnostic result for the terminal
pub fn format_result(result: &ScoreResult, use_colors: bool) -> String {
    let heading = if result.economic_impact.is_some() {
        "Nivel de madurez"
    } else {
        "Perfil"
    };
    let score = format!("{}/10", result.score);
    let label = if use_colors {
        paint(&result.profile.label, &result.profile.color)
    } else {
        result.profile.label.clone()
    };

    let mut lines = vec![
        format!(
            "Puntuación: {}",
            if use_colors { score.bold().to_string() } else { score }
        ),
        format!("{}: {}", heading, label),
        format!("Área a mejorar: {}", result.primary_gap_label),
        format!("Acción sugerida: {}", result.suggested_action),
    ];

    if let Some(ref note) = result.impact_note {
        let note = if use_colors {
            note.dimmed().to_string()
        } else {
            note.clone()
        };
        lines.push(format!("Dato: {}", note));
    }

    if let Some(ref impact) = result.economic_impact {
        lines.extend(format_impact(impact, use_colors));
    }

    lines.join("\n")
}

fn format_impact(impact: &EconomicImpact, use_colors: bool) -> Vec<String> {
    let annual = format_eur(impact.total_annual);
    let annual = if use_colors {
        annual.red().bold().to_string()
    } else {
        annual
    };

    let mut lines = vec![format!(
        "Estás dejando de ganar: {} al año ({} al mes)",
        annual,
        format_eur(impact.total_monthly)
    )];

    lines.extend(
        impact
            .breakdown
            .iter()
            .filter(|line| line.annual_loss > 0)
            .map(|line| {
                format!(
                    "  - {}: {} al año {}",
                    line.label,
                    format_eur(line.annual_loss),
                    line.message
                )
            }),
    );
    lines
}

/// Pretty JSON for scripting
pub fn format_json(result: &ScoreResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Format a previously saved diagnostic with its age
pub fn format_saved(saved: &SavedDiagnostic, now: DateTime<Utc>, use_colors: bool) -> String {
    let header = format!(
        "Último diagnóstico ({}, {})",
        saved.result.vertical,
        saved.format_age(now)
    );
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };
    format!("{}\n{}", header, format_result(&saved.result, use_colors))
}

/// One line per vertical with its criteria and weights
pub fn format_vertical_list(catalog: &Catalog) -> String {
    catalog
        .iter()
        .map(|config| {
            let criteria = config
                .criteria
                .iter()
                .map(|c| format!("{} ({:.0}%, 0-{})", c.key, c.weight * 100.0, c.max_score))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} - {}: {}", config.id, config.display_name(), criteria)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Progress bar width derived from the terminal, defaulting for pipes
pub fn progress_bar_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize / 3).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH),
        None => DEFAULT_BAR_WIDTH,
    }
}

/// Format one animation frame, e.g. `[#####-----]  50% Analizando...`
pub fn format_progress(frame: &Frame<'_>, width: usize) -> String {
    let filled = ((frame.percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:>3.0}% {}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        frame.percent,
        frame.message.unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Answers;

    fn answers(pairs: &[(&str, u32)]) -> Answers {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_format_eur_small() {
        assert_eq!(format_eur(0), "0\u{a0}€");
        assert_eq!(format_eur(950), "950\u{a0}€");
    }

    #[test]
    fn test_format_eur_four_digits_not_grouped() {
        assert_eq!(format_eur(1234), "1234\u{a0}€");
    }

    #[test]
    fn test_format_eur_grouped() {
        assert_eq!(format_eur(12_345), "12.345\u{a0}€");
        assert_eq!(format_eur(108_000), "108.000\u{a0}€");
        assert_eq!(format_eur(1_234_567), "1.234.567\u{a0}€");
    }

    #[test]
    fn test_format_eur_negative() {
        assert_eq!(format_eur(-12_345), "-12.345\u{a0}€");
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#28A745"), Some((0x28, 0xA7, 0x45)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("green"), None);
        assert_eq!(parse_hex_color("#12345"), None);
    }

    #[test]
    fn test_format_result_empleabilidad() {
        let result = Catalog::builtin()
            .score(
                "empleabilidad",
                &answers(&[("linkedin", 2), ("cv", 1), ("search", 2)]),
                None,
            )
            .unwrap();
        let output = format_result(&result, false);
        assert!(output.contains("Puntuación: 6/10"));
        assert!(output.contains("Perfil: Profesional Pasivo"));
        assert!(output.contains("Área a mejorar: Tu currículum"));
        assert!(output.contains("Dato: Un CV personalizado aumenta las respuestas un 50%"));
        assert!(!output.contains("dejando de ganar"));
    }

    #[test]
    fn test_format_result_emprendimiento() {
        let result = Catalog::builtin()
            .score(
                "emprendimiento",
                &answers(&[
                    ("presence", 0),
                    ("operations", 3),
                    ("automation", 2),
                    ("ai_adoption", 1),
                ]),
                Some(9999.0),
            )
            .unwrap();
        let output = format_result(&result, false);
        assert!(output.contains("Nivel de madurez: Digital Intermedio"));
        assert!(output.contains("Estás dejando de ganar: 108.000\u{a0}€ al año (9000\u{a0}€ al mes)"));
        assert!(output.contains(
            "  - Tu presencia digital: 18.000\u{a0}€ al año clientes potenciales no alcanzados"
        ));
        assert!(!output.contains("  - presence"));
        // operations has no gap
        assert!(!output.contains("  - Tus operaciones"));
    }

    #[test]
    fn test_format_result_with_colors_keeps_text() {
        let result = Catalog::builtin()
            .score(
                "empleabilidad",
                &answers(&[("linkedin", 3), ("cv", 2), ("search", 3)]),
                None,
            )
            .unwrap();
        let output = format_result(&result, true);
        assert!(output.contains("Digital Champion"));
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_format_json() {
        let result = Catalog::builtin()
            .score(
                "empleabilidad",
                &answers(&[("linkedin", 0), ("cv", 0), ("search", 0)]),
                None,
            )
            .unwrap();
        let json = format_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["tier"], "low");
        assert_eq!(value["primary_gap"], "linkedin");
        assert!(value.get("economic_impact").is_none());
    }

    #[test]
    fn test_format_vertical_list() {
        let output = format_vertical_list(&Catalog::builtin());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "empleabilidad - Empleabilidad Digital: linkedin (40%, 0-3), cv (30%, 0-2), search (30%, 0-3)"
        );
    }

    #[test]
    fn test_format_progress() {
        let frame = Frame {
            step: 10,
            percent: 50.0,
            message: Some("Analizando..."),
        };
        assert_eq!(format_progress(&frame, 10), "[#####-----]  50% Analizando...");

        let done = Frame {
            step: 20,
            percent: 100.0,
            message: None,
        };
        assert_eq!(format_progress(&done, 4), "[####] 100% ");
    }
}
