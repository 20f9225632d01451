use anyhow::Result;

use super::Context;
use crate::render::Render;

pub fn run(context: &Context) -> Result<()> {
    let timeline = context.session.timeline()?;
    println!("{}", timeline.render());
    Ok(())
}
