fn main() -> anyhow::Result<()> {
    bootmac_installer::run()
}
