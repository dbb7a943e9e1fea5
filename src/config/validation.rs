use crate::config::types::{
    ArxivConfig, Config, CrawlerConfig, OutputConfig, OutputMode, ScirateConfig, UserAgentConfig,
};
use crate::date::CalendarDate;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;

    if config.arxiv.is_none() && config.scirate.is_none() {
        return Err(ConfigError::Validation(
            "at least one of [arxiv] or [scirate] must be configured".to_string(),
        ));
    }

    if let Some(arxiv) = &config.arxiv {
        validate_arxiv_config(arxiv)?;
    }
    if let Some(scirate) = &config.scirate {
        validate_scirate_config(scirate)?;
    }

    Ok(())
}

/// Validates pacing and worker limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "delay_ms must be >= 100ms, got {}ms",
            config.delay_ms
        )));
    }

    if config.max_item_workers < 1 || config.max_item_workers > 32 {
        return Err(ConfigError::Validation(format!(
            "max_item_workers must be between 1 and 32, got {}",
            config.max_item_workers
        )));
    }

    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    match (&config.mode, config.directory.as_deref()) {
        (OutputMode::Stream, None) => Err(ConfigError::Validation(
            "stream output mode requires an output directory".to_string(),
        )),
        (_, Some("")) => Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        )),
        _ => Ok(()),
    }
}

fn validate_arxiv_config(config: &ArxivConfig) -> Result<(), ConfigError> {
    validate_date_range("arxiv", &config.start, &config.end)?;
    validate_archive("arxiv", &config.archive)?;
    validate_base_url("arxiv", &config.base_url)
}

fn validate_scirate_config(config: &ScirateConfig) -> Result<(), ConfigError> {
    validate_date_range("scirate", &config.start, &config.end)?;
    validate_archive("scirate", &config.archive)?;
    validate_base_url("scirate", &config.base_url)
}

/// Both ends must be real dates and the range must not run backwards
fn validate_date_range(
    source: &str,
    start: &CalendarDate,
    end: &CalendarDate,
) -> Result<(), ConfigError> {
    if !start.is_valid() {
        return Err(ConfigError::InvalidDate(format!("{} start {:?}", source, start)));
    }
    if !end.is_valid() {
        return Err(ConfigError::InvalidDate(format!("{} end {:?}", source, end)));
    }

    if start.key() > end.key() {
        return Err(ConfigError::Validation(format!(
            "{} start date {} is after end date {}",
            source, start, end
        )));
    }

    Ok(())
}

fn validate_archive(source: &str, archive: &str) -> Result<(), ConfigError> {
    if archive.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} archive cannot be empty",
            source
        )));
    }
    Ok(())
}

fn validate_base_url(source: &str, base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid {} base-url '{}': {}", source, base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} base-url '{}' must use HTTP or HTTPS",
            source, base_url
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
