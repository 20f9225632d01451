use anyhow::Result;
use owo_colors::OwoColorize;
use sundial_core::{CityRegistry, SundialError};

use super::{Context, show, timeline};

/// Click `position` along the bar of `city`, then show the new clocks and timeline.
pub fn run(context: &mut Context, city: &str, position: f64) -> Result<()> {
    let Some(target) = CityRegistry::builtin().find(city) else {
        anyhow::bail!("City '{}' not found. Run `sundial cities` to see the catalog", city);
    };

    let before = context.session.reference();
    match context.session.click_timeline(&target.id, position) {
        Err(SundialError::CityNotFound(_)) => anyhow::bail!(
            "{} is not on the timeline. Add it with --city \"{}\"",
            target.name,
            target.name
        ),
        other => other?,
    };

    let shift = context.session.reference() - before;
    println!(
        "{}",
        format!(
            "  Moved {}{}m on {}'s bar",
            if shift.num_minutes() < 0 { "-" } else { "+" },
            shift.num_minutes().abs(),
            target.name
        )
        .green()
    );
    println!();

    show::run(context)?;
    println!();
    timeline::run(context)
}
