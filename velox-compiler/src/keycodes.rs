use crate::template_codegen::string_lit;

/// Runtime helper resolving user-registered key aliases at dispatch time.
pub const CUSTOM_KEY_CHECK: &str = "_k";

/// Built-in key aliases. `delete` covers both Backspace and Delete.
static KEY_CODES: &[(&str, &[i64])] = &[
    ("esc", &[27]),
    ("tab", &[9]),
    ("enter", &[13]),
    ("space", &[32]),
    ("up", &[38]),
    ("left", &[37]),
    ("right", &[39]),
    ("down", &[40]),
    ("delete", &[8, 46]),
];

/// How a key modifier resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyCode {
    /// A single numeric keyCode.
    Code(i64),
    /// An alias covering several physical keys.
    Codes(&'static [i64]),
    /// Unknown alias, checked at runtime via `_k("<name>")`.
    Custom(String),
}

impl KeyCode {
    /// True when the key resolves to exactly one comparison operand.
    pub fn is_single(&self) -> bool {
        !matches!(self, KeyCode::Codes(_))
    }

    /// Code fragments to compare `$event.keyCode` against.
    pub fn operands(&self) -> Vec<String> {
        match self {
            KeyCode::Code(code) => vec![code.to_string()],
            KeyCode::Codes(codes) => codes.iter().map(i64::to_string).collect(),
            KeyCode::Custom(name) => vec![format!("{CUSTOM_KEY_CHECK}({})", string_lit(name))],
        }
    }
}

pub fn builtin_key_code(alias: &str) -> Option<&'static [i64]> {
    KEY_CODES
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, codes)| *codes)
}

/// Resolves a key modifier: a non-zero numeric prefix wins, then the
/// built-in aliases, and anything else is deferred to the runtime.
pub fn normalize_key_code(key: &str) -> KeyCode {
    if let Some(code) = leading_int(key).filter(|code| *code != 0) {
        return KeyCode::Code(code);
    }
    match builtin_key_code(key) {
        Some([code]) => KeyCode::Code(*code),
        Some(codes) => KeyCode::Codes(codes),
        None => KeyCode::Custom(key.to_string()),
    }
}

// Base-10 integer prefix, e.g. "13" or " 65abc".
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens_win() {
        assert_eq!(normalize_key_code("13"), KeyCode::Code(13));
        assert_eq!(normalize_key_code("65abc"), KeyCode::Code(65));
    }

    #[test]
    fn zero_is_not_a_code() {
        assert_eq!(normalize_key_code("0"), KeyCode::Custom("0".into()));
    }

    #[test]
    fn aliases() {
        assert_eq!(normalize_key_code("esc"), KeyCode::Code(27));
        assert_eq!(normalize_key_code("delete"), KeyCode::Codes(&[8, 46]));
        assert!(!normalize_key_code("delete").is_single());
    }

    #[test]
    fn custom_alias_defers_to_runtime() {
        let key = normalize_key_code("f2");
        assert_eq!(key, KeyCode::Custom("f2".into()));
        assert_eq!(key.operands(), vec![r#"_k("f2")"#.to_string()]);
    }
}
