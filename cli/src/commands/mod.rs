mod goal;
mod helpers;
mod log;
mod prefs;
mod search;
mod summary;
mod transfer;

use anyhow::{Result, bail};

use nosh_core::Session;
use nosh_core::models::FoodRecord;

use helpers::{print_food_table, prompt_choice};

pub(crate) use goal::{cmd_goal_set, cmd_goal_show, cmd_needs};
pub(crate) use log::{cmd_clear, cmd_delete, cmd_log};
pub(crate) use prefs::{cmd_prefs_set, cmd_prefs_show};
pub(crate) use search::{cmd_food_add, cmd_search};
pub(crate) use summary::cmd_summary;
pub(crate) use transfer::{cmd_export, cmd_import};

/// Resolve a query to a single catalog record, prompting when the query
/// matches more than one food.
pub(super) fn resolve_food(session: &Session, query: &str) -> Result<FoodRecord> {
    let matches = session.search(query);

    if matches.is_empty() {
        bail!("No food found for '{query}'. Try `nosh search` or `nosh food add`.");
    }

    if matches.len() == 1 {
        return Ok(matches[0].clone());
    }

    print_food_table(&matches);
    let idx = prompt_choice(matches.len())?;
    Ok(matches[idx].clone())
}
