use anyhow::{Result, bail};
use chrono::Utc;
use serde_json::json;

use crate::ai::generator_from_config;
use crate::core::AppConfig;
use crate::twin::{FormInput, ResponseView, Twin};

pub async fn run(form: FormInput, json: bool, config: AppConfig) -> Result<()> {
    let twin = Twin::new(config.owner.clone(), generator_from_config(&config));

    let (request, response) = match twin.submit(form, Utc::now()).await {
        Ok(result) => result,
        Err(err) => bail!("{}", err.user_message()),
    };

    if json {
        let out = json!({"request": request, "response": response});
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let view = ResponseView::from_output(Some(&response), twin.owner.timezone.name());
        print!("{}", view);
    }

    Ok(())
}
