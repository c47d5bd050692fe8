use anyhow::Result;
use std::process;

use nosh_core::Session;
use nosh_core::models::FoodDraft;

use super::helpers::print_food_table;

pub(crate) fn cmd_search(session: &Session, query: Option<&str>, json: bool) -> Result<()> {
    let query = query.unwrap_or_default();
    let results = session.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        eprintln!("No foods match '{query}'");
        process::exit(2);
    }

    print_food_table(&results);
    Ok(())
}

pub(crate) fn cmd_food_add(
    session: &mut Session,
    name: &str,
    kcal: Option<String>,
    protein: Option<String>,
    carbs: Option<String>,
    fat: Option<String>,
    json: bool,
) -> Result<()> {
    let draft = FoodDraft {
        name: name.to_string(),
        kcal: kcal.unwrap_or_default(),
        protein: protein.unwrap_or_default(),
        carbs: carbs.unwrap_or_default(),
        fat: fat.unwrap_or_default(),
    };
    let added = session.add_custom_food(&draft)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&added)?);
    } else {
        let name = &added.name;
        let kcal = added.kcal;
        let protein = added.protein;
        let carbs = added.carbs;
        let fat = added.fat;
        println!(
            "Added '{name}' — per 100g: {kcal:.0} kcal | P:{protein:.1}g C:{carbs:.1}g F:{fat:.1}g"
        );
    }
    Ok(())
}
