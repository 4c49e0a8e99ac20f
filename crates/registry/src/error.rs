use std::borrow::Cow;

/// Errors raised while building a registry or combining feature values.
#[fhub_derive::fhub_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// A name that is neither declared in the table nor predefined.
    #[error("Unknown feature {name:?}{}", format_context(.context))]
    UnknownFeature { name: String, context: Option<Cow<'static, str>> },

    /// The combined mask contains a forbidden pair.
    #[error("Incompatible features{}", format_context(.context))]
    IncompatibleFeatures { context: Option<Cow<'static, str>> },

    /// The descriptor graph reaches `name` again while resolving it.
    #[error("Circular definition of feature {name:?}{}", format_context(.context))]
    CyclicDefinition { name: String, context: Option<Cow<'static, str>> },
}

impl FeatureError {
    pub(crate) fn unknown(name: &str) -> Self {
        Self::UnknownFeature { name: name.to_owned(), context: None }
    }

    pub(crate) const fn incompatible() -> Self {
        Self::IncompatibleFeatures { context: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FeatureError::unknown("FOO").to_string(), r#"Unknown feature "FOO""#);
        assert_eq!(FeatureError::unknown("a\"b").to_string(), r#"Unknown feature "a\"b""#);
        assert_eq!(FeatureError::incompatible().to_string(), "Incompatible features");

        let err: Result<(), _> = Err(FeatureError::incompatible());
        assert_eq!(
            err.context("Building catalogue").unwrap_err().to_string(),
            "Incompatible features (Building catalogue)"
        );
    }
}
