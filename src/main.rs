use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1);
    desk_showcase::run(path.as_deref()).context("desk-showcase failed")?;
    Ok(())
}
