use anyhow::{Context, Result, bail};
use serde::Serialize;

use nosh_core::Session;
use nosh_core::goal::{ActivityLevel, BiometricProfile, DailyNeeds, Sex};
use nosh_core::models::Goal;
use nosh_core::numeric::coerce;
use nosh_core::session::GoalPatch;

fn print_goal(goal: Goal) {
    let kcal = goal.kcal;
    let protein = goal.protein;
    let carbs = goal.carbs;
    let fat = goal.fat;
    println!("Daily goal: {kcal:.0} kcal | P:{protein:.0}g C:{carbs:.0}g F:{fat:.0}g");
}

pub(crate) fn cmd_goal_show(session: &Session, json: bool) -> Result<()> {
    let goal = session.goal();
    if json {
        println!("{}", serde_json::to_string_pretty(&goal)?);
    } else {
        print_goal(goal);
    }
    Ok(())
}

/// Edit individual goal fields. Values are free-form and coerced, so
/// "2200" and "2200 kcal" both work; junk becomes 0.
pub(crate) fn cmd_goal_set(
    session: &mut Session,
    kcal: Option<String>,
    protein: Option<String>,
    carbs: Option<String>,
    fat: Option<String>,
    json: bool,
) -> Result<()> {
    let patch = GoalPatch {
        kcal: kcal.as_deref().map(coerce),
        protein: protein.as_deref().map(coerce),
        carbs: carbs.as_deref().map(coerce),
        fat: fat.as_deref().map(coerce),
    };
    if patch.is_empty() {
        bail!("Provide at least one of --kcal, --protein, --carbs, --fat");
    }

    let goal = session.edit_goal(patch);
    if json {
        println!("{}", serde_json::to_string_pretty(&goal)?);
    } else {
        print_goal(goal);
    }
    Ok(())
}

#[derive(Serialize)]
struct NeedsOutput {
    #[serde(flatten)]
    needs: DailyNeeds,
    committed: bool,
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn cmd_needs(
    session: &mut Session,
    sex: &str,
    age: f64,
    height: f64,
    weight: f64,
    activity: &str,
    protein_per_kg: f64,
    carb_pct: f64,
    fat_pct: f64,
    commit: bool,
    json: bool,
) -> Result<()> {
    let sex = Sex::parse(sex).with_context(|| format!("Invalid sex '{sex}'. Use male or female"))?;
    let activity = ActivityLevel::parse(activity).with_context(|| {
        format!(
            "Invalid activity '{activity}'. Use sedentary, light, moderate, very-active, or extra-active"
        )
    })?;

    let profile = BiometricProfile {
        sex,
        age,
        height_cm: height,
        weight_kg: weight,
        activity,
        protein_per_kg,
        carb_pct,
        fat_pct,
    };

    let needs = profile.daily_needs();
    if commit {
        session.commit_goal(&profile);
    }

    if json {
        let output = NeedsOutput {
            needs,
            committed: commit,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let bmr = needs.bmr;
    let tdee = needs.tdee;
    println!("BMR:  {bmr:.0} kcal   (Mifflin-St Jeor)");
    println!("TDEE: {tdee:.0} kcal   (activity ×{})", profile.activity.multiplier());
    println!();
    let protein = needs.goal.protein;
    let carbs = needs.goal.carbs;
    let fat = needs.goal.fat;
    println!("Protein: {protein:.0} g");
    println!("Carbs:   {carbs:.0} g");
    println!("Fat:     {fat:.0} g");
    println!();
    if commit {
        println!("Set as daily goal.");
    } else {
        println!("Preview only — re-run with --commit to set as your daily goal.");
    }
    Ok(())
}
