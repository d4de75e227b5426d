use model::config::IngestConfig;
use model::resource_types::FHIR_R4_RESOURCE_TYPES;
use std::collections::HashSet;

/// Allow-list of FHIR resource types the endpoint will store.
///
/// Matching is exact and case-sensitive, `patient` is not `Patient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGate {
    accepted: HashSet<String>,
}

impl ResourceGate {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResourceGate {
            accepted: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Accept every resource type defined by FHIR R4.
    pub fn fhir_r4() -> Self {
        Self::new(FHIR_R4_RESOURCE_TYPES.iter().copied())
    }

    /// Use the configured allow-list, or FHIR R4 when none is set.
    pub fn from_config(config: &IngestConfig) -> Self {
        match &config.accepted_resources {
            Some(names) => Self::new(names.iter().cloned()),
            None => Self::fhir_r4(),
        }
    }

    pub fn accepts(&self, resource: &str) -> bool {
        self.accepted.contains(resource)
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ResourceGate {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
