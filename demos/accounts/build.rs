fn main() -> Result<(), mrclean_build::Error> {
    mrclean_build::configure().generate()?;
    Ok(())
}
