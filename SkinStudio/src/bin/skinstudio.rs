fn main() -> anyhow::Result<()> {
    skinstudio::cli::run_cli()
}
