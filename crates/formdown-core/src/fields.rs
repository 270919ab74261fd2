use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::FormError;
use crate::types::{Field, SelectChoice, SpecificField};

// --- Regex patterns ---

// Whole-line shape: `label [*] = value-expression`. The value expression is
// delegated verbatim to the specific-field grammar.
static RE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<label>\w[\w \t\-]*)(?P<required>\*)?[ \t]*=[ \t]*(?P<pending>.*)$").unwrap()
});

static RE_STRING: LazyLock<Regex> = LazyLock::new(|| anchored(r"___(?:\[(?P<length>\d*)\])?"));
static RE_INTEGER: LazyLock<Regex> = LazyLock::new(|| anchored(r"###(?:\[(?P<range>[\d:]*)\])?"));
static RE_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"#\.#(?:\[(?P<range>[\d\.:]*)\])?"));
static RE_FLOAT: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"#\.#f(?:\[(?P<range>[\d\.:]*)\])?"));
static RE_TEXT_AREA: LazyLock<Regex> = LazyLock::new(|| anchored(r"AAA(?:\[(?P<length>\d*)\])?"));
static RE_DATE: LazyLock<Regex> = LazyLock::new(|| anchored(r"d/m/y"));
static RE_TIME: LazyLock<Regex> = LazyLock::new(|| anchored(r"hh:mm"));
static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| anchored(r"@"));
static RE_RADIO: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"(?P<content>\(x?\)[ \t]*[\w \t\-]+[\(\)\w \t\-]*)"));
static RE_RADIO_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((?P<is_default>x?)\)[ \t]*(?P<label>[a-zA-Z0-9 \t_\-]*)").unwrap()
});
static RE_CHECKBOX: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"(?P<content>\[x?\][ \t]*[\w \t\-]+[\[\]\w \t\-]*)"));
static RE_CHECKBOX_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<is_default>x?)\][ \t]*(?P<label>[a-zA-Z0-9 \t_\-]*)").unwrap()
});
static RE_SELECT: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"\{(?P<content>[\w \t\->_,\(\)\[\]]+)\}"));
static RE_FILE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"\.\.\.(?:\[(?P<allowed>[\w \t,;]*)\])?"));

/// Compile a value-expression pattern anchored against the entire trimmed
/// line: leading/trailing horizontal whitespace is ignored and the match
/// must reach the end.
fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!(r"^[ \t]*{pattern}[ \t]*$")).unwrap()
}

// --- Grammar dispatch ---

/// Result of one specific-field matcher: `Ok(None)` is a silent non-match,
/// `Err` is reserved for hard failures the author must fix.
pub type MatchResult = Result<Option<SpecificField>, FormError>;

/// Ordered matcher table. Registration order encodes priority; the first
/// matcher that succeeds wins. Built once at compile time, read-only forever.
static GRAMMAR: &[fn(&str) -> MatchResult] = &[
    match_string,
    match_integer,
    match_decimal,
    match_float,
    match_text_area,
    match_date,
    match_time,
    match_email,
    match_radio,
    match_checkbox,
    match_select,
    match_file,
];

/// Try every registered specific-field matcher on a value expression, in
/// registration order, and return the first success.
pub fn match_specific(text: &str) -> MatchResult {
    for matcher in GRAMMAR {
        if let Some(specific) = matcher(text)? {
            return Ok(Some(specific));
        }
    }
    Ok(None)
}

// --- Specific field matchers ---

/// `___[length]` — single-line string input.
pub fn match_string(text: &str) -> MatchResult {
    let Some(caps) = RE_STRING.captures(text) else {
        return Ok(None);
    };
    Ok(Some(SpecificField::String {
        length: parse_length(caps.name("length").map(|m| m.as_str())),
    }))
}

/// `###[min:max:step]` — integer input.
pub fn match_integer(text: &str) -> MatchResult {
    let Some(caps) = RE_INTEGER.captures(text) else {
        return Ok(None);
    };
    let Some((min, max, step)) = parse_range_args::<i64>(caps.name("range").map(|m| m.as_str()))
    else {
        return Ok(None);
    };
    Ok(Some(SpecificField::Integer { min, max, step }))
}

/// `#.#[min:max:step:places]` — decimal input with rounding precision.
pub fn match_decimal(text: &str) -> MatchResult {
    let Some(caps) = RE_DECIMAL.captures(text) else {
        return Ok(None);
    };
    let Some((min, max, step, places)) =
        parse_range_round_args(caps.name("range").map(|m| m.as_str()))
    else {
        return Ok(None);
    };
    Ok(Some(SpecificField::Decimal {
        min,
        max,
        step,
        places,
    }))
}

/// `#.#f[min:max:step]` — float input, no rounding.
pub fn match_float(text: &str) -> MatchResult {
    let Some(caps) = RE_FLOAT.captures(text) else {
        return Ok(None);
    };
    let Some((min, max, step)) = parse_range_args::<f64>(caps.name("range").map(|m| m.as_str()))
    else {
        return Ok(None);
    };
    Ok(Some(SpecificField::Float { min, max, step }))
}

/// `AAA[length]` — multi-line text input.
pub fn match_text_area(text: &str) -> MatchResult {
    let Some(caps) = RE_TEXT_AREA.captures(text) else {
        return Ok(None);
    };
    Ok(Some(SpecificField::TextArea {
        length: parse_length(caps.name("length").map(|m| m.as_str())),
    }))
}

/// `d/m/y` — date input. The format is fixed, not configurable.
pub fn match_date(text: &str) -> MatchResult {
    Ok(RE_DATE.is_match(text).then_some(SpecificField::Date))
}

/// `hh:mm` — time input. The format is fixed, not configurable.
pub fn match_time(text: &str) -> MatchResult {
    Ok(RE_TIME.is_match(text).then_some(SpecificField::Time))
}

/// `@` — string input with email semantics.
pub fn match_email(text: &str) -> MatchResult {
    Ok(RE_EMAIL.is_match(text).then_some(SpecificField::Email))
}

/// `(x) A () B` — mutually exclusive choices. A marked `x` selects the
/// default; when several are marked, the last one wins.
pub fn match_radio(text: &str) -> MatchResult {
    let Some(caps) = RE_RADIO.captures(text) else {
        return Ok(None);
    };
    let mut choices = Vec::new();
    let mut default = None;
    for item in RE_RADIO_ITEM.captures_iter(caps.name("content").unwrap().as_str()) {
        let label = item.name("label").unwrap().as_str().trim().to_string();
        if item.name("is_default").unwrap().as_str() == "x" {
            default = Some(label.clone());
        }
        choices.push(label);
    }
    Ok(Some(SpecificField::Radio { choices, default }))
}

/// `[x] A [] B` — non-exclusive choices. Every marked `x` joins the ordered
/// default set.
pub fn match_checkbox(text: &str) -> MatchResult {
    let Some(caps) = RE_CHECKBOX.captures(text) else {
        return Ok(None);
    };
    let mut choices = Vec::new();
    let mut default = Vec::new();
    for item in RE_CHECKBOX_ITEM.captures_iter(caps.name("content").unwrap().as_str()) {
        let label = item.name("label").unwrap().as_str().trim().to_string();
        if item.name("is_default").unwrap().as_str() == "x" {
            default.push(label.clone());
        }
        choices.push(label);
    }
    Ok(Some(SpecificField::Checkbox { choices, default }))
}

/// `{(A), B -> Bee, C[c]}` — dropdown. Parentheses mark the default item,
/// `->` separates stored value from displayed label, and at most one item may
/// carry a `[c]`/`[o]` collapse tag.
pub fn match_select(text: &str) -> MatchResult {
    let Some(caps) = RE_SELECT.captures(text) else {
        return Ok(None);
    };

    let mut choices = Vec::new();
    let mut default = None;
    let mut collapse_on: Option<String> = None;

    for raw_item in caps.name("content").unwrap().as_str().split(',') {
        let mut item = raw_item.trim();
        let mut is_default = false;
        if item.starts_with('(') && item.ends_with(')') {
            item = item[1..item.len() - 1].trim();
            is_default = true;
        }

        let (mut value, mut label) = match item.split_once("->") {
            Some((v, l)) => (v.trim().to_string(), l.trim().to_string()),
            None => (item.to_string(), item.to_string()),
        };

        if value.contains("[c]") {
            if collapse_on.is_some() {
                return Err(FormError::ConflictingCollapseDirective);
            }
            value = value.replace("[c]", "");
            label = label.replace("[c]", "");
            collapse_on = Some(value.clone());
        }
        if value.contains("[o]") {
            if collapse_on.is_some() {
                return Err(FormError::ConflictingCollapseDirective);
            }
            value = value.replace("[o]", "");
            label = label.replace("[o]", "");
            collapse_on = Some(format!("~{value}"));
        }

        if is_default {
            default = Some(value.clone());
        }
        choices.push(SelectChoice { value, label });
    }

    Ok(Some(SpecificField::Select {
        choices,
        default,
        collapse_on,
    }))
}

/// `...[ext,ext;description]` — file upload with optional extension list and
/// free-text description.
pub fn match_file(text: &str) -> MatchResult {
    let Some(caps) = RE_FILE.captures(text) else {
        return Ok(None);
    };

    let mut allowed = None;
    let mut description = None;
    if let Some(m) = caps.name("allowed") {
        let raw = m.as_str();
        if !raw.is_empty() {
            let (extensions, desc) = match raw.split_once(';') {
                Some((e, d)) => (e, Some(d.to_string())),
                None => (raw, None),
            };
            description = desc;
            let extensions = extensions.trim();
            if !extensions.is_empty() {
                allowed = Some(
                    extensions
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .collect(),
                );
            }
        }
    }

    Ok(Some(SpecificField::File {
        allowed,
        description,
    }))
}

// --- Argument helpers ---

fn parse_length(input: Option<&str>) -> Option<u32> {
    input.and_then(|s| if s.is_empty() { None } else { s.parse().ok() })
}

/// Split a bracketed range argument on `:` into `(min, max, step)`.
///
/// A missing bracket means all three unset. An empty part parses to unset,
/// not zero. One part present means "only max given". More than 3 parts, an
/// empty argument, or a part that fails to parse yields `None` so the whole
/// matcher degrades to a non-match.
fn parse_range_args<T>(input: Option<&str>) -> Option<(Option<T>, Option<T>, Option<T>)>
where
    T: Copy + FromStr,
{
    let raw = match input {
        None => return Some((None, None, None)),
        Some(s) => s.trim(),
    };
    if raw.is_empty() {
        return None;
    }

    let mut parts: Vec<Option<T>> = Vec::new();
    for piece in raw.split(':') {
        let piece = piece.trim();
        if piece.is_empty() {
            parts.push(None);
        } else {
            parts.push(Some(piece.parse::<T>().ok()?));
        }
    }

    match parts.len() {
        1 => Some((None, parts[0], None)),
        2 => Some((parts[0], parts[1], None)),
        3 => Some((parts[0], parts[1], parts[2])),
        _ => None,
    }
}

/// Range parsing for the decimal field: up to 4 parts, where a trailing 4th
/// part overrides the rounding precision (default 2).
#[allow(clippy::type_complexity)]
fn parse_range_round_args(
    input: Option<&str>,
) -> Option<(Option<f64>, Option<f64>, Option<f64>, u32)> {
    let raw = match input {
        None => return Some((None, None, None, 2)),
        Some(s) => s.trim(),
    };
    if raw.is_empty() {
        return None;
    }

    let pieces: Vec<&str> = raw.split(':').collect();
    if pieces.len() > 4 {
        return None;
    }

    let places = if pieces.len() == 4 {
        let p = pieces[3].trim();
        if p.is_empty() {
            return None;
        }
        p.parse::<u32>().ok()?
    } else {
        2
    };

    let mut parts: Vec<Option<f64>> = Vec::new();
    for piece in &pieces[..pieces.len().min(3)] {
        let piece = piece.trim();
        if piece.is_empty() {
            parts.push(None);
        } else {
            parts.push(Some(piece.parse::<f64>().ok()?));
        }
    }

    Some(match parts.len() {
        1 => (None, parts[0], None, places),
        2 => (parts[0], parts[1], None, places),
        _ => (parts[0], parts[1], parts[2], places),
    })
}

// --- Label-level matching ---

impl Field {
    /// Match a line containing (maybe) a labeled field declaration.
    ///
    /// Returns `Ok(None)` when the line is not a declaration — either the
    /// label shape is absent or the value expression matches no registered
    /// grammar. A label without a recognized value is defined as no match,
    /// not a partial result.
    pub fn matches(line: &str) -> Result<Option<(String, bool, SpecificField)>, FormError> {
        let Some(caps) = RE_LABEL.captures(line) else {
            return Ok(None);
        };
        let pending = caps.name("pending").unwrap().as_str().trim();
        let Some(specific) = match_specific(pending)? else {
            return Ok(None);
        };
        let label = caps.name("label").unwrap().as_str().trim().to_string();
        Ok(Some((label, caps.name("required").is_some(), specific)))
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Field::matches(s)? {
            Some((original_label, required, specific)) => Ok(Field {
                original_label,
                required,
                specific,
            }),
            None => Err(FormError::NoFieldMatched(s.to_string())),
        }
    }
}
