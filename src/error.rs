use thiserror::Error;

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum EnvfigError {
    #[error(
        "The following environment variables are required but not set {}",
        json_list(.keys)
    )]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(envfig::missing_required),
            help("set the listed variables or declare a default for them")
        )
    )]
    MissingRequired { keys: Vec<String> },

    #[error("Malformed JSON in '{key}': {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::malformed_json)))]
    MalformedJson {
        key: String,
        source: serde_json::Error,
    },

    #[error("Resolved environment does not fit the target type: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::deserialize)))]
    Deserialize { source: serde_json::Error },

    #[error("Failed to render environment: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(envfig::render)))]
    Render { source: serde_json::Error },
}

impl EnvfigError {
    /// The keys this error is about: every missing key, or the one malformed key.
    pub fn keys(&self) -> Vec<String> {
        match self {
            EnvfigError::MissingRequired { keys } => keys.clone(),
            EnvfigError::MalformedJson { key, .. } => vec![key.clone()],
            EnvfigError::Deserialize { .. } | EnvfigError::Render { .. } => Vec::new(),
        }
    }
}

/// Keys as a compact JSON array, e.g. `["a","c"]`.
fn json_list(keys: &[String]) -> String {
    serde_json::to_string(keys).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_formats_json_list() {
        let err = EnvfigError::MissingRequired {
            keys: vec!["a".into(), "c".into()],
        };
        assert_eq!(
            err.to_string(),
            r#"The following environment variables are required but not set ["a","c"]"#
        );
    }

    #[test]
    fn missing_required_escapes_keys() {
        let err = EnvfigError::MissingRequired {
            keys: vec!["we\"ird".into()],
        };
        assert!(err.to_string().ends_with(r#"["we\"ird"]"#));
    }

    #[test]
    fn malformed_json_names_key() {
        let source = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = EnvfigError::MalformedJson {
            key: "settings".into(),
            source,
        };
        assert!(err.to_string().contains("settings"));
        assert_eq!(err.keys(), vec!["settings".to_string()]);
    }
}
