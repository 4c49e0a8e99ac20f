use crate::feature::{Feature, PredefinedFeature};
use std::sync::Arc;

/// A single operand: a feature name or a feature value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRef<'a> {
    Name(&'a str),
    Value(&'a Feature),
}

impl<'a> From<&'a str> for FeatureRef<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a String> for FeatureRef<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl<'a> From<&'a Feature> for FeatureRef<'a> {
    fn from(feature: &'a Feature) -> Self {
        Self::Value(feature)
    }
}

impl<'a> From<&'a PredefinedFeature> for FeatureRef<'a> {
    fn from(feature: &'a PredefinedFeature) -> Self {
        Self::Value(feature.feature())
    }
}

impl<'a> From<&'a Arc<PredefinedFeature>> for FeatureRef<'a> {
    fn from(feature: &'a Arc<PredefinedFeature>) -> Self {
        Self::Value(feature.feature())
    }
}

/// An argument of the value algebra: a single operand or a group of operands.
///
/// A group with more than one member must itself be compatible wherever groups are validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureElement<'a> {
    One(FeatureRef<'a>),
    Group(Vec<FeatureRef<'a>>),
}

impl<'a> From<FeatureRef<'a>> for FeatureElement<'a> {
    fn from(feature: FeatureRef<'a>) -> Self {
        Self::One(feature)
    }
}

macro_rules! element_from_ref {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> From<$ty> for FeatureElement<'a> {
                fn from(feature: $ty) -> Self {
                    Self::One(feature.into())
                }
            }
        )*
    };
}

element_from_ref!(&'a str, &'a String, &'a Feature, &'a PredefinedFeature, &'a Arc<PredefinedFeature>);

impl<'a, T, const N: usize> From<[T; N]> for FeatureElement<'a>
where
    T: Into<FeatureRef<'a>>,
{
    fn from(group: [T; N]) -> Self {
        Self::Group(group.into_iter().map(Into::into).collect())
    }
}

impl<'a, T> From<Vec<T>> for FeatureElement<'a>
where
    T: Into<FeatureRef<'a>>,
{
    fn from(group: Vec<T>) -> Self {
        Self::Group(group.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(FeatureElement::from("A"), FeatureElement::One(FeatureRef::Name("A")));
        assert_eq!(
            FeatureElement::from(["A", "B"]),
            FeatureElement::Group(vec![FeatureRef::Name("A"), FeatureRef::Name("B")])
        );
        assert_eq!(FeatureElement::from(Vec::<&str>::new()), FeatureElement::Group(vec![]));

        let value = Feature::default();
        assert_eq!(FeatureElement::from(&value), FeatureElement::One(FeatureRef::Value(&value)));
    }
}
