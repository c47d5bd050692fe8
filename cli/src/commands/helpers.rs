use anyhow::{Context, Result, bail};
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use nosh_core::models::{FoodRecord, Meal};

/// Parse a portion size like "200" or "200g" into grams. Must be positive.
pub(crate) fn parse_grams(s: &str) -> Result<f64> {
    let trimmed = s.trim().trim_end_matches('g').trim();
    let value: f64 = trimmed.parse().with_context(|| {
        format!("Invalid portion size: '{s}'. Use a number like '200' or '200g'")
    })?;
    if value <= 0.0 {
        bail!("Portion size must be greater than 0");
    }
    Ok(value)
}

pub(crate) fn parse_meal(s: &str) -> Result<Meal> {
    Meal::parse(s).with_context(|| {
        let valid: Vec<&str> = Meal::ALL.iter().map(|m| m.as_str()).collect();
        format!("Invalid meal '{s}'. Must be one of: {}", valid.join(", "))
    })
}

/// Render a fixed-width progress bar for a 0-100 percentage.
pub(crate) fn progress_bar(pct: f64) -> String {
    const WIDTH: usize = 20;
    #[allow(clippy::cast_sign_loss)]
    let filled = ((pct.clamp(0.0, 100.0) / 100.0 * WIDTH as f64).round() as usize).min(WIDTH);
    let mut bar = String::with_capacity(WIDTH + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push('█');
    }
    for _ in filled..WIDTH {
        bar.push('░');
    }
    bar.push(']');
    bar
}

pub(crate) fn prompt_choice(count: usize) -> Result<usize> {
    eprint!("\nSelect a food (1-{count}): ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    let n: usize = line.trim().parse().context("Invalid number")?;
    if n < 1 || n > count {
        bail!("Selection out of range");
    }
    Ok(n - 1)
}

pub(crate) fn print_food_table(foods: &[&FoodRecord]) {
    #[derive(Tabled)]
    struct FoodRow {
        #[tabled(rename = "#")]
        idx: usize,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "kcal/100g")]
        kcal: String,
        #[tabled(rename = "P/100g")]
        protein: String,
        #[tabled(rename = "C/100g")]
        carbs: String,
        #[tabled(rename = "F/100g")]
        fat: String,
    }

    let rows: Vec<FoodRow> = foods
        .iter()
        .enumerate()
        .map(|(i, f)| FoodRow {
            idx: i + 1,
            name: truncate(&f.name, 35),
            kcal: format!("{:.0}", f.kcal),
            protein: format!("{:.1}", f.protein),
            carbs: format!("{:.1}", f.carbs),
            fat: format!("{:.1}", f.fat),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..6)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

/// First eight characters of a UUID, enough to address a log entry.
pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grams() {
        assert!((parse_grams("200").unwrap() - 200.0).abs() < f64::EPSILON);
        assert!((parse_grams("200g").unwrap() - 200.0).abs() < f64::EPSILON);
        assert!((parse_grams("200.5g").unwrap() - 200.5).abs() < f64::EPSILON);
        assert!((parse_grams(" 85 ").unwrap() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_grams_invalid() {
        assert!(parse_grams("abc").is_err());
        assert!(parse_grams("0").is_err());
        assert!(parse_grams("-50g").is_err());
    }

    #[test]
    fn test_parse_meal() {
        assert_eq!(parse_meal("lunch").unwrap(), Meal::Lunch);
        assert_eq!(parse_meal("BREAKFAST").unwrap(), Meal::Breakfast);
        assert!(parse_meal("brunch").is_err());
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0), format!("[{}]", "░".repeat(20)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "█".repeat(20)));
        assert_eq!(progress_bar(150.0), format!("[{}]", "█".repeat(20)));
        assert_eq!(progress_bar(-10.0), format!("[{}]", "░".repeat(20)));
        assert_eq!(progress_bar(50.0), format!("[{}{}]", "█".repeat(10), "░".repeat(10)));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        // Should not panic on multi-byte characters
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0b9d7c42-dead-beef-0000-000000000000"), "0b9d7c42");
        assert_eq!(short_id("abc"), "abc");
    }
}
