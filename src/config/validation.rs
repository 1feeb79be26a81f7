use crate::config::types::{Config, EnumeratedConfig, HttpConfig, ListingConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_listing_config(&config.listing)?;
    validate_enumerated_config(&config.enumerated)?;
    validate_output_config(&config.output)?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    validate_template(&config.url_template, "{page}")?;
    validate_base(&config.link_base)?;

    if config.max_consecutive_failures < 1 {
        return Err(ConfigError::Validation(format!(
            "max_consecutive_failures must be >= 1, got {}",
            config.max_consecutive_failures
        )));
    }

    Ok(())
}

fn validate_enumerated_config(config: &EnumeratedConfig) -> Result<(), ConfigError> {
    validate_template(&config.url_template, "{id}")?;
    validate_base(&config.link_base)?;

    if config.first_id > config.last_id {
        return Err(ConfigError::Validation(format!(
            "first_id ({}) must not be greater than last_id ({})",
            config.first_id, config.last_id
        )));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.archive_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "archive_path cannot be empty".to_string(),
        ));
    }

    if config.channel_capacity == 0 {
        return Err(ConfigError::Validation(
            "channel_capacity must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Checks that a URL template carries its placeholder and parses once filled in
fn validate_template(template: &str, placeholder: &str) -> Result<(), ConfigError> {
    if !template.contains(placeholder) {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' does not contain {}",
            template, placeholder
        )));
    }

    let filled = template.replace(placeholder, "0");
    let url = Url::parse(&filled)
        .map_err(|e| ConfigError::InvalidTemplate(format!("'{}': {}", template, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidTemplate(format!(
            "'{}' must use http or https",
            template
        )));
    }

    Ok(())
}

/// Link bases must be absolute and end in a slash so relative hrefs land below them
fn validate_base(base: &str) -> Result<(), ConfigError> {
    Url::parse(base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid link base '{}': {}", base, e)))?;

    if !base.ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "Link base '{}' must end with '/'",
            base
        )));
    }

    Ok(())
}
