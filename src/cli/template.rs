use crate::error::Result;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings()?;
    println!("{}", settings.template.to_json()?);
    Ok(())
}
