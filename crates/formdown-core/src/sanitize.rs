use regex::Regex;
use std::sync::LazyLock;

use crate::types::Field;

static RE_INVALID_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9a-zA-Z_]").unwrap());
static RE_LEADING_INVALID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^a-zA-Z_]+").unwrap());

/// Default label-to-variable sanitizer.
///
/// Transliterates to ASCII, replaces any character outside `[0-9a-zA-Z_]`
/// with `_`, and collapses a leading run of non-letter, non-underscore
/// characters into a single `_`, so the result is a valid identifier.
pub fn default_sanitizer(label: &str) -> String {
    let ascii = transliterate(label);
    let cleaned = RE_INVALID_CHARS.replace_all(&ascii, "_");
    RE_LEADING_INVALID.replace(&cleaned, "_").into_owned()
}

/// Default placeholder formatter: a generic property access on `form`.
pub fn default_formatter(variable_name: &str, _field: &Field) -> String {
    format!("{{{{ form.{variable_name} }}}}")
}

/// Best-effort ASCII transliteration covering the Latin-1 supplement and
/// Latin Extended-A. Unmapped non-ASCII characters pass through and are
/// caught by the invalid-character replacement afterwards.
fn transliterate(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' | 'ă' | 'ą' => out.push('a'),
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' | 'Ă' | 'Ą' => out.push('A'),
            'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => out.push('e'),
            'É' | 'È' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => out.push('E'),
            'í' | 'ì' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => out.push('i'),
            'Í' | 'Ì' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => out.push('I'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ō' | 'ŏ' | 'ő' | 'ø' => out.push('o'),
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ō' | 'Ŏ' | 'Ő' | 'Ø' => out.push('O'),
            'ú' | 'ù' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => out.push('u'),
            'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' => out.push('Y'),
            'ñ' | 'ń' | 'ņ' | 'ň' => out.push('n'),
            'Ñ' | 'Ń' | 'Ņ' | 'Ň' => out.push('N'),
            'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => out.push('c'),
            'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => out.push('C'),
            'ś' | 'ŝ' | 'ş' | 'š' => out.push('s'),
            'Ś' | 'Ŝ' | 'Ş' | 'Š' => out.push('S'),
            'ź' | 'ż' | 'ž' => out.push('z'),
            'Ź' | 'Ż' | 'Ž' => out.push('Z'),
            'ğ' | 'ĝ' | 'ġ' | 'ģ' => out.push('g'),
            'Ğ' | 'Ĝ' | 'Ġ' | 'Ģ' => out.push('G'),
            'ŕ' | 'ŗ' | 'ř' => out.push('r'),
            'Ŕ' | 'Ŗ' | 'Ř' => out.push('R'),
            'ť' | 'ţ' | 'ŧ' => out.push('t'),
            'Ť' | 'Ţ' | 'Ŧ' => out.push('T'),
            'ĺ' | 'ļ' | 'ľ' | 'ł' => out.push('l'),
            'Ĺ' | 'Ļ' | 'Ľ' | 'Ł' => out.push('L'),
            'ď' | 'đ' | 'ð' => out.push('d'),
            'Ď' | 'Đ' | 'Ð' => out.push('D'),
            'ŵ' => out.push('w'),
            'Ŵ' => out.push('W'),
            'ĥ' | 'ħ' => out.push('h'),
            'Ĥ' | 'Ħ' => out.push('H'),
            'ĵ' => out.push('j'),
            'Ĵ' => out.push('J'),
            'ķ' => out.push('k'),
            'Ķ' => out.push('K'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'þ' => out.push_str("th"),
            'Þ' => out.push_str("Th"),
            other => out.push(other),
        }
    }
    out
}
