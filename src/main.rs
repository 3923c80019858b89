use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = dircleaner::cli::parse();
    app::run(args)
}
