use anyhow::{Result, bail};
use std::process;

use nosh_core::Session;

use super::helpers::{parse_grams, parse_meal, short_id};
use super::resolve_food;

pub(crate) fn cmd_log(
    session: &mut Session,
    food: &str,
    grams: &str,
    meal: &str,
    json: bool,
) -> Result<()> {
    let grams = parse_grams(grams)?;
    let meal = parse_meal(meal)?;
    let record = resolve_food(session, food)?;

    let entry = session.add_entry(&record, grams, meal);

    if json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        let name = &entry.name;
        let g = entry.grams;
        let kcal = entry.kcal;
        let protein = entry.protein;
        let carbs = entry.carbs;
        let fat = entry.fat;
        let id = short_id(&entry.id);
        println!(
            "Logged {g:.0}g {name} ({meal}) — {kcal:.1} kcal | P:{protein:.1}g C:{carbs:.1}g F:{fat:.1}g  [{id}]"
        );
    }
    Ok(())
}

/// Delete a log entry, addressed by its id or any unique prefix of it.
pub(crate) fn cmd_delete(session: &mut Session, id: &str, json: bool) -> Result<()> {
    let matches: Vec<String> = session
        .log()
        .entries()
        .iter()
        .filter(|e| e.id.starts_with(id))
        .map(|e| e.id.clone())
        .collect();

    if matches.len() > 1 {
        bail!("Id prefix '{id}' is ambiguous ({} entries match)", matches.len());
    }

    let removed = matches
        .first()
        .is_some_and(|full_id| session.remove_entry(full_id));

    if json {
        println!("{}", serde_json::json!({ "removed": removed }));
        return Ok(());
    }

    if removed {
        println!("Entry removed");
    } else {
        eprintln!("No entry with id '{id}'");
        process::exit(2);
    }
    Ok(())
}

pub(crate) fn cmd_clear(session: &mut Session, json: bool) -> Result<()> {
    let count = session.log().len();
    session.clear_log();

    if json {
        println!("{}", serde_json::json!({ "cleared": count }));
    } else {
        println!("Log cleared ({count} entries removed)");
    }
    Ok(())
}
