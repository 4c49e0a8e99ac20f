//! Human-readable rendering of features.
//!
//! [`Registry::display`] and [`PredefinedFeature`]'s `Display` produce the short form
//! (`[Feature NAME]`, `[Feature <A, B>]`). [`Registry::inspect`] and
//! [`PredefinedFeature::inspect`] produce the detailed form, which lists the traits and, for
//! predefined entries, the engine and attributes:
//!
//! ```text
//! [Feature FILL (elementary) (check) { attributes: { since: 'ES2015' } }]
//! ```
//!
//! Parts that do not fit in [`InspectOptions::break_length`] are broken onto indented lines.

use crate::feature::{Feature, PredefinedFeature};
use crate::registry::Registry;
use fhub_domain::FeatureTraits;
use std::fmt;

/// Options of the detailed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// Maximum line length before parts are broken onto separate lines.
    pub break_length: usize,
    /// Keep parts on one line while they fit. When `false`, parts are always broken.
    pub compact: bool,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self { break_length: 80, compact: true }
    }
}

/// `Display` adapter of a feature value, returned by [`Registry::display`].
#[derive(Debug)]
pub struct DisplayFeature<'r> {
    registry: &'r Registry,
    feature: &'r Feature,
}

impl fmt::Display for DisplayFeature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Feature <{}>]", self.registry.canonical_names(self.feature).join(", "))
    }
}

impl fmt::Display for PredefinedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Feature {}]", self.name())
    }
}

impl Registry {
    /// Short form of a feature value: its canonical names in angle brackets.
    #[must_use]
    pub const fn display<'r>(&'r self, feature: &'r Feature) -> DisplayFeature<'r> {
        DisplayFeature { registry: self, feature }
    }

    /// Detailed form of a feature value.
    #[must_use]
    pub fn inspect(&self, feature: &Feature, options: &InspectOptions) -> String {
        let names: Vec<String> =
            self.canonical_names(feature).into_iter().map(str::to_owned).collect();
        let name = join_parts(options.compact, "<", "", &names, ",", ">", bracket_room(options, 3));
        join_parts(options.compact, "[Feature", " ", &[name], "", "]", bracket_room(options, 1))
    }
}

impl PredefinedFeature {
    /// Detailed form of a predefined entry.
    #[must_use]
    pub fn inspect(&self, options: &InspectOptions) -> String {
        let mut parts = vec![self.name().to_owned()];
        if self.traits().contains(FeatureTraits::ELEMENTARY) {
            parts.push(marker(FeatureTraits::ELEMENTARY));
        }
        if self.check().is_some() {
            parts.push(marker(FeatureTraits::CHECK));
        }
        parts.push(self.details(options));
        join_parts(options.compact, "[Feature", " ", &parts, "", "]", bracket_room(options, 1))
    }

    fn details(&self, options: &InspectOptions) -> String {
        let attributes = self
            .attributes()
            .iter()
            .map(|(key, value)| {
                let value = value.as_deref().map_or_else(|| "null".to_owned(), quote);
                property(key, &value, " ")
            })
            .collect::<Vec<_>>();

        // Compact output nests object values one column deeper.
        let nested = if options.compact { 3 } else { 2 };
        let attributes = render_object(&attributes, nested, options);
        let separator = if options.compact && width(&attributes) > options.break_length {
            format!("\n{}", " ".repeat(nested))
        } else {
            " ".to_owned()
        };

        let mut entries = Vec::new();
        if let Some(engine) = self.engine() {
            entries.push(property("engine", &quote(engine), " "));
        }
        entries.push(property("attributes", &attributes, &separator));
        render_object(&entries, 0, options)
    }
}

fn marker(flag: FeatureTraits) -> String {
    flag.markers().map(|marker| format!("({marker})")).collect()
}

const fn bracket_room(options: &InspectOptions, reserved: usize) -> usize {
    options.break_length.saturating_sub(reserved)
}

/// Joins `parts` between `intro` and `outro`, breaking them onto indented lines when `compact`
/// is off, a part spans several lines, or the result would exceed `max_length`.
fn join_parts(
    compact: bool,
    intro: &str,
    pre_separator: &str,
    parts: &[String],
    part_separator: &str,
    outro: &str,
    max_length: usize,
) -> String {
    let multiline = || {
        let mut length = intro.len()
            + pre_separator.len()
            + (parts.len() - 1) * (part_separator.len() + 1)
            + outro.len();
        for part in parts {
            if part.contains('\n') {
                return true;
            }
            length += part.chars().count();
            if length > max_length {
                return true;
            }
        }
        false
    };

    if !parts.is_empty() && (!compact || multiline()) {
        let body = indent(&parts.join(&format!("{part_separator}\n")));
        format!("{intro}\n{body}\n{outro}")
    } else {
        format!("{intro}{pre_separator}{}{outro}", parts.join(&format!("{part_separator} ")))
    }
}

fn indent(text: &str) -> String {
    text.split('\n').map(|line| format!("  {line}")).collect::<Vec<_>>().join("\n")
}

/// Renders `{ key: value, ... }` from rendered `entries`, indented by `level` columns.
///
/// Compact output stays on one line while `2 * entries` and `entries + sum(lengths)` both fit
/// the break length; otherwise each entry after the first starts a new line.
fn render_object(entries: &[String], level: usize, options: &InspectOptions) -> String {
    if entries.is_empty() {
        return "{}".to_owned();
    }
    let padding = " ".repeat(level);

    if !options.compact {
        let separator = format!(",\n{padding}  ");
        return format!("{{\n{padding}  {}\n{padding}}}", entries.join(&separator));
    }

    if fits_on_line(entries, options.break_length) {
        format!("{{ {} }}", entries.join(", "))
    } else {
        format!("{{ {} }}", entries.join(&format!(",\n{padding}  ")))
    }
}

fn fits_on_line(entries: &[String], break_length: usize) -> bool {
    let mut length = entries.len();
    if length + entries.len() > break_length {
        return false;
    }
    for entry in entries {
        length += entry.chars().count();
        if length > break_length {
            return false;
        }
    }
    true
}

/// Display width of rendered text; control characters such as line breaks take no room.
fn width(text: &str) -> usize {
    text.chars().filter(|c| !c.is_control()).count()
}

fn property(key: &str, value: &str, separator: &str) -> String {
    format!("{}:{separator}{value}", property_key(key))
}

fn property_key(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if identifier { key.to_owned() } else { quote(key) }
}

/// Quotes a string, preferring single quotes.
fn quote(text: &str) -> String {
    let delimiter = if !text.contains('\'') {
        '\''
    } else if !text.contains('"') {
        '"'
    } else if !text.contains('`') {
        '`'
    } else {
        '\''
    };

    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push(delimiter);
    for c in text.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            c if c == delimiter => {
                quoted.push('\\');
                quoted.push(c);
            },
            c => quoted.push(c),
        }
    }
    quoted.push(delimiter);
    quoted
}
