use anyhow::Result;
use owo_colors::OwoColorize;
use sundial_core::CityRegistry;

use super::Context;

/// List the catalog, marking the home city and the compared cities.
pub fn run(context: Option<&Context>) -> Result<()> {
    let registry = CityRegistry::builtin();

    for city in registry.list_cities() {
        let mark = match context {
            Some(ctx) if ctx.session.home().id == city.id => "⌂".cyan().to_string(),
            Some(ctx) if ctx.session.cities().iter().any(|c| c.id == city.id) => {
                "✓".green().to_string()
            }
            _ => " ".to_string(),
        };

        println!(
            "{} {:>3}  {:<28} {:<28} {}",
            mark,
            city.id.dimmed(),
            city.name,
            city.country.dimmed(),
            city.utc_offset_label()
        );
    }

    Ok(())
}
