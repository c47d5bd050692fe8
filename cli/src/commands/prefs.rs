use anyhow::{Context, Result, bail};

use nosh_core::Session;
use nosh_core::models::{Theme, Unit};

pub(crate) fn cmd_prefs_show(session: &Session, json: bool) -> Result<()> {
    let prefs = session.prefs();
    if json {
        println!("{}", serde_json::to_string_pretty(&prefs)?);
    } else {
        let unit = prefs.unit;
        let theme = prefs.theme;
        println!("unit:  {unit}");
        println!("theme: {theme}");
    }
    Ok(())
}

pub(crate) fn cmd_prefs_set(
    session: &mut Session,
    unit: Option<&str>,
    theme: Option<&str>,
    json: bool,
) -> Result<()> {
    if unit.is_none() && theme.is_none() {
        bail!("Provide at least one of --unit, --theme");
    }

    if let Some(raw) = unit {
        let unit = Unit::parse(raw)
            .with_context(|| format!("Invalid unit '{raw}'. Use g or serving"))?;
        session.set_unit(unit);
    }
    if let Some(raw) = theme {
        let theme = Theme::parse(raw)
            .with_context(|| format!("Invalid theme '{raw}'. Use light or dark"))?;
        session.set_theme(theme);
    }

    cmd_prefs_show(session, json)
}
