//! Password redaction for log messages.
//!
//! Masks the values of password-like keys in the three shapes request bodies
//! arrive in: form/query (`senha=x`), JSON (`"password": "x"`) and
//! XML (`<password>x</password>`).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Replacement written in place of a secret value.
pub const MASK: &str = "****";

/// Regex fragment matching key names treated as secrets.
const SECRET_KEY: &str = r"[\w-]*(?:password|passwd|senha|pass|pwd|secret)[\w-]*";

static JSON_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?i)(["']{SECRET_KEY}["']\s*:\s*)(?:"(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*'|[^,}}\s]+)"#
    ))
    .expect("json secret pattern is valid")
});

static XML_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(<{SECRET_KEY}(?:\s[^>]*)?>)[^<]*(</)")).expect("xml secret pattern is valid")
});

static FORM_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(\b{SECRET_KEY}=)[^&\s,;]*")).expect("form secret pattern is valid")
});

/// Replace secret values in `msg` with [`MASK`].
pub fn hide_passwords(msg: &str) -> Cow<'_, str> {
    let passes: [(&Regex, &str); 3] = [
        (&*JSON_VALUE, "${1}\"****\""),
        (&*XML_VALUE, "${1}****${2}"),
        (&*FORM_VALUE, "${1}****"),
    ];

    let mut out = Cow::Borrowed(msg);
    for (pattern, replacement) in passes {
        let replaced = match pattern.replace_all(&out, replacement) {
            Cow::Owned(s) => Some(s),
            Cow::Borrowed(_) => None,
        };
        if let Some(s) = replaced {
            out = Cow::Owned(s);
        }
    }

    out
}
