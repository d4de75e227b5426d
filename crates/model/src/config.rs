use crate::env::{ACCEPTED_RESOURCES, TABLE_NAME};
use thiserror::Error;

/// Settings read once at cold start and handed to the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    /// Destination table for accepted records
    pub table_name: String,
    /// Explicit allow-list; `None` means every FHIR R4 resource type
    pub accepted_resources: Option<Vec<String>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("{0} environment variable is empty")]
    Empty(&'static str),
}

impl IngestConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let table_name: String = lookup(TABLE_NAME).ok_or(ConfigError::Missing(TABLE_NAME))?;

        if table_name.trim().is_empty() {
            return Err(ConfigError::Empty(TABLE_NAME));
        }

        let accepted_resources: Option<Vec<String>> = match lookup(ACCEPTED_RESOURCES) {
            Some(raw) => {
                let names: Vec<String> = parse_resource_list(&raw);

                if names.is_empty() {
                    return Err(ConfigError::Empty(ACCEPTED_RESOURCES));
                }

                Some(names)
            }
            None => None,
        };

        Ok(IngestConfig {
            table_name,
            accepted_resources,
        })
    }
}

fn parse_resource_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_table_name() {
        let config: IngestConfig =
            IngestConfig::from_lookup(lookup(&[(TABLE_NAME, "fhir-records")])).unwrap();

        assert_eq!(config.table_name, "fhir-records");
        assert_eq!(config.accepted_resources, None);
    }

    #[test]
    fn missing_table_name_fails() {
        let result = IngestConfig::from_lookup(lookup(&[]));

        assert_eq!(result, Err(ConfigError::Missing(TABLE_NAME)));
    }

    #[test]
    fn blank_table_name_fails() {
        let result = IngestConfig::from_lookup(lookup(&[(TABLE_NAME, "  ")]));

        assert_eq!(result, Err(ConfigError::Empty(TABLE_NAME)));
    }

    #[test]
    fn accepted_resources_are_trimmed() {
        let config: IngestConfig = IngestConfig::from_lookup(lookup(&[
            (TABLE_NAME, "fhir-records"),
            (ACCEPTED_RESOURCES, " Patient, Observation ,,Encounter"),
        ]))
        .unwrap();

        assert_eq!(
            config.accepted_resources,
            Some(vec![
                "Patient".to_string(),
                "Observation".to_string(),
                "Encounter".to_string()
            ])
        );
    }

    #[test]
    fn empty_accepted_resources_fails() {
        let result = IngestConfig::from_lookup(lookup(&[
            (TABLE_NAME, "fhir-records"),
            (ACCEPTED_RESOURCES, " , "),
        ]));

        assert_eq!(result, Err(ConfigError::Empty(ACCEPTED_RESOURCES)));
    }
}
