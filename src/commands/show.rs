use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::render_clock;

pub fn run(context: &Context) -> Result<()> {
    let session = &context.session;

    println!("{}", format!("  {}", session.reference().to_rfc3339()).dimmed());

    for (city, local) in session.clocks()? {
        let is_home = city.id == session.home().id;
        println!("{}", render_clock(&city, &local, context.clock, is_home));
    }

    Ok(())
}
