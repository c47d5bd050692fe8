use anyhow::Result;
use std::process;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use nosh_core::Session;

use super::helpers::{progress_bar, short_id, truncate};

pub(crate) fn cmd_summary(session: &Session, json: bool) -> Result<()> {
    let totals = session.totals();
    let goal = session.goal();
    let progress = session.progress();

    if json {
        let payload = serde_json::json!({
            "entries": session.log().entries(),
            "totals": totals,
            "goal": goal,
            "progress": progress,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if session.log().is_empty() {
        eprintln!("Log is empty. Use `nosh log <food> <grams>` to add something.");
        process::exit(2);
    }

    #[derive(Tabled)]
    struct EntryRow {
        #[tabled(rename = "Id")]
        id: String,
        #[tabled(rename = "Food")]
        name: String,
        #[tabled(rename = "Meal")]
        meal: String,
        #[tabled(rename = "g")]
        grams: String,
        #[tabled(rename = "kcal")]
        kcal: String,
        #[tabled(rename = "P")]
        protein: String,
        #[tabled(rename = "C")]
        carbs: String,
        #[tabled(rename = "F")]
        fat: String,
    }

    let rows: Vec<EntryRow> = session
        .log()
        .entries()
        .iter()
        .map(|e| EntryRow {
            id: short_id(&e.id).to_string(),
            name: truncate(&e.name, 35),
            meal: e.meal.to_string(),
            grams: format!("{:.0}", e.grams),
            kcal: format!("{:.1}", e.kcal),
            protein: format!("{:.1}", e.protein),
            carbs: format!("{:.1}", e.carbs),
            fat: format!("{:.1}", e.fat),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..8)).with(Alignment::right()))
        .to_string();
    println!("{table}");

    println!();
    let lines = [
        ("kcal", totals.kcal, goal.kcal, progress.kcal, "kcal"),
        ("protein", totals.protein, goal.protein, progress.protein, "g"),
        ("carbs", totals.carbs, goal.carbs, progress.carbs, "g"),
        ("fat", totals.fat, goal.fat, progress.fat, "g"),
    ];
    for (label, total, target, pct, unit) in lines {
        let bar = progress_bar(pct);
        println!("  {label:<8} {bar} {pct:>3.0}%  {total:.1} / {target:.0} {unit}");
    }

    Ok(())
}
