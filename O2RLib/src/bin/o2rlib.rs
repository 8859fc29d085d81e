fn main() -> anyhow::Result<()> {
    o2rlib::cli::run_cli()
}
