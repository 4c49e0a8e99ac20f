use fhub_derive::fhub_error;
use std::borrow::Cow;

#[fhub_error]
pub enum LookupError {
    #[error("Missing entry {name:?}{}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },
}

fn lookup(name: &str) -> Result<u32, LookupError> {
    Err(LookupError::Missing { name: name.to_owned(), context: None })
}

fn parse(raw: &str) -> Result<u32, LookupError> {
    raw.parse::<u32>().context("Parsing entry")
}

fn main() {
    let err = lookup("a").context("Resolving table").unwrap_err();
    assert_eq!(err.to_string(), "Missing entry \"a\" (Resolving table)");

    let err = parse("x").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (Parsing entry): "));
}
