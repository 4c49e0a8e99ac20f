use fhub_derive::fhub_error;
use std::borrow::Cow;

#[fhub_error]
pub enum DemoError {
    #[error("Unknown feature {name:?}{}", format_context(.context))]
    Unknown { name: String, context: Option<Cow<'static, str>> },

    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let err: DemoError = std::io::Error::other("disk").into();
    assert!(matches!(err, DemoError::Io { context: None, .. }));
}
