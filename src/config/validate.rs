// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{ContentError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ContentError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.llm, raw.run, raw.output))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_llm_section(cfg)?;
    validate_run_section(cfg)?;
    Ok(())
}

fn validate_llm_section(cfg: &RawConfigFile) -> Result<()> {
    let llm = &cfg.llm;

    for (field, value) in [
        ("base_url", &llm.base_url),
        ("model", &llm.model),
        ("api_key_env", &llm.api_key_env),
    ] {
        if value.trim().is_empty() {
            return Err(ContentError::ConfigError(format!(
                "[llm].{field} must not be empty"
            )));
        }
    }

    if llm.max_attempts == 0 {
        return Err(ContentError::ConfigError(
            "[llm].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&llm.temperature) {
        return Err(ContentError::ConfigError(format!(
            "[llm].temperature must be between 0 and 2 (got {})",
            llm.temperature
        )));
    }

    Ok(())
}

fn validate_run_section(cfg: &RawConfigFile) -> Result<()> {
    // execution mode is strongly typed and checked during deserialization.
    if cfg.run.faq_questions == 0 {
        return Err(ContentError::ConfigError(
            "[run].faq_questions must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
