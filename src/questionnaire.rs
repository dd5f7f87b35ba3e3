use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::scoring::{Answers, Criterion, VerticalConfig};

/// Answers collected by the stepper, ready to be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub answers: Answers,
    pub monthly_revenue: Option<f64>,
}

/// Parse a euro amount as typed by the user.
///
/// A plain number (`5000.50`) is read as is. A comma marks the decimal part
/// (`1.234,5`), and dots only count as thousands separators when they sit in
/// grouping positions (`12.000`, `1.234.567`).
pub fn parse_revenue(reply: &str) -> Option<f64> {
    let reply = reply.trim();
    let normalized = if reply.contains(',') {
        reply.replace('.', "").replace(',', ".")
    } else if is_grouped_thousands(reply) {
        reply.replace('.', "")
    } else {
        reply.to_string()
    };
    normalized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn is_grouped_thousands(s: &str) -> bool {
    let mut groups = s.split('.');
    let Some(head) = groups.next() else {
        return false;
    };
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());
    let head_ok = all_digits(head) && head.len() <= 3 && !head.starts_with('0');

    let mut tail_count = 0;
    for group in groups {
        if !(all_digits(group) && group.len() == 3) {
            return false;
        }
        tail_count += 1;
    }
    head_ok && tail_count > 0
}

/// Terminal stepper asking one question per criterion, in declared order.
pub struct Questionnaire<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and return the trimmed reply.
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the questionnaire was complete");
        }
        Ok(line.trim().to_string())
    }

    fn ask_value(&mut self, step: usize, total: usize, criterion: &Criterion) -> Result<u32> {
        loop {
            let reply = self.prompt(&format!(
                "[{}/{}] {} [0-{}]: ",
                step, total, criterion.question, criterion.max_score
            ))?;
            match reply.parse::<u32>() {
                Ok(v) if v <= criterion.max_score => return Ok(v),
                _ => writeln!(
                    self.output,
                    "  Respuesta no válida: escribe un número entre 0 y {}.",
                    criterion.max_score
                )
                .context("Failed to write output")?,
            }
        }
    }

    fn ask_revenue(&mut self, default: f64) -> Result<f64> {
        loop {
            let reply = self.prompt(&format!(
                "Facturación mensual estimada en euros [{}]: ",
                default
            ))?;
            if reply.is_empty() {
                return Ok(default);
            }
            match parse_revenue(&reply) {
                Some(v) => return Ok(v),
                None => writeln!(
                    self.output,
                    "  Cantidad no válida: escribe un número positivo."
                )
                .context("Failed to write output")?,
            }
        }
    }

    /// Walk through every question of `config`.
    ///
    /// Revenue is only asked for verticals with an economic model.
    pub fn run(&mut self, config: &VerticalConfig, default_revenue: f64) -> Result<Submission> {
        writeln!(self.output, "Diagnóstico Express - {}", config.display_name())
            .context("Failed to write output")?;
        writeln!(self.output).context("Failed to write output")?;

        let total = config.criteria.len();
        let mut answers = Answers::new();
        for (i, criterion) in config.criteria.iter().enumerate() {
            let value = self.ask_value(i + 1, total, criterion)?;
            answers.insert(criterion.key.clone(), value);
        }

        let monthly_revenue = if config.has_economic_model() {
            Some(self.ask_revenue(default_revenue)?)
        } else {
            None
        };

        Ok(Submission {
            answers,
            monthly_revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(config: &VerticalConfig, input: &str) -> (Result<Submission>, String) {
        let mut output = Vec::new();
        let result = Questionnaire::new(Cursor::new(input.as_bytes()), &mut output).run(config, 5000.0);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_collects_answers_in_order() {
        let (result, output) = run(&VerticalConfig::empleabilidad(), "2\n1\n3\n");
        let submission = result.unwrap();
        assert_eq!(submission.answers["linkedin"], 2);
        assert_eq!(submission.answers["cv"], 1);
        assert_eq!(submission.answers["search"], 3);
        assert!(submission.monthly_revenue.is_none());
        assert!(output.contains("[1/3]"));
        assert!(output.contains("[3/3]"));
    }

    #[test]
    fn test_reprompts_on_invalid_answer() {
        // cv only goes up to 2
        let (result, output) = run(&VerticalConfig::empleabilidad(), "0\n5\nx\n2\n0\n");
        let submission = result.unwrap();
        assert_eq!(submission.answers["cv"], 2);
        assert_eq!(output.matches("Respuesta no válida").count(), 2);
    }

    #[test]
    fn test_asks_revenue_for_economic_verticals() {
        let (result, _) = run(&VerticalConfig::emprendimiento(), "1\n1\n1\n1\n12.000\n");
        assert_eq!(result.unwrap().monthly_revenue, Some(12_000.0));
    }

    #[test]
    fn test_decimal_revenue_is_not_inflated() {
        let (result, _) = run(&VerticalConfig::emprendimiento(), "1\n1\n1\n1\n5000.50\n");
        assert_eq!(result.unwrap().monthly_revenue, Some(5000.5));
    }

    #[test]
    fn test_typing_back_the_default_keeps_it() {
        let mut output = Vec::new();
        let submission = Questionnaire::new(Cursor::new("0\n0\n0\n0\n7500.5\n".as_bytes()), &mut output)
            .run(&VerticalConfig::emprendimiento(), 7500.5)
            .unwrap();
        assert_eq!(submission.monthly_revenue, Some(7500.5));
        assert!(String::from_utf8(output).unwrap().contains("[7500.5]"));
    }

    #[test]
    fn test_parse_revenue() {
        assert_eq!(parse_revenue("5000.50"), Some(5000.5));
        assert_eq!(parse_revenue("7500.5"), Some(7500.5));
        assert_eq!(parse_revenue("1,5"), Some(1.5));
        assert_eq!(parse_revenue("12.000"), Some(12_000.0));
        assert_eq!(parse_revenue("1.234.567"), Some(1_234_567.0));
        assert_eq!(parse_revenue("1.234,56"), Some(1234.56));
        assert_eq!(parse_revenue("0.500"), Some(0.5));
        assert_eq!(parse_revenue("-10"), None);
        assert_eq!(parse_revenue("mucho"), None);
    }

    #[test]
    fn test_empty_revenue_uses_default() {
        let (result, _) = run(&VerticalConfig::emprendimiento(), "3\n3\n3\n3\n\n");
        assert_eq!(result.unwrap().monthly_revenue, Some(5000.0));
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = run(&VerticalConfig::empleabilidad(), "1\n");
        assert!(result.is_err());
    }
}
