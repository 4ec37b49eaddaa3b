use anyhow::Result;

use crate::ai::prompt::{system_instruction, templates};
use crate::core::AppConfig;

pub fn run(config: AppConfig) -> Result<()> {
    let owner = &config.owner;
    let prompt = system_instruction(&templates(), &owner.name, owner.timezone.name())?;
    println!("{}", prompt.trim());
    Ok(())
}
