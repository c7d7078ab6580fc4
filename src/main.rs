use anyhow::Result;

fn main() -> Result<()> {
    metadata_explorer::cli::run()
}
