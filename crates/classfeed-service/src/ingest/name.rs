//! Normalization of person names pulled from free text and calendar
//! addresses.

use regex::Regex;
use std::sync::LazyLock;

static CN_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CN=([^:;\r\n]*)").expect("valid CN regex"));
static MAILTO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*mailto:").expect("valid mailto regex"));
static ANGLE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*@[^<>]*>").expect("valid angle address regex"));
static BARE_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+").expect("valid address regex"));
static PAREN_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^()]*\)").expect("valid paren regex"));
static ESCAPED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+[nNr]").expect("valid escaped break regex"));

/// Replaces escaped line breaks (`\n`, `\N`, `\r`, also double-escaped
/// `\\n`) with a space.
pub(crate) fn replace_escaped_breaks(s: &str) -> String {
    ESCAPED_BREAK.replace_all(s, " ").into_owned()
}

/// ## Summary
/// Reduces a name-ish string to a plain `FIRST LAST` display name.
///
/// Accepts calendar-address renderings (`CN=...:mailto:...`), e-mail
/// decorated names, escaped text and `LAST, FIRST` ordering. The result may
/// be empty when nothing name-like is left.
///
/// Cleaning a cleaned name returns it unchanged.
#[must_use]
pub fn clean_name(s: &str) -> String {
    let mut current = clean_pass(s);
    loop {
        let next = clean_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(s: &str) -> String {
    let mut name = replace_escaped_breaks(s).replace(['\\', '"'], "");

    if let Some(caps) = CN_PARAM.captures(&name) {
        name = caps[1].to_string();
    }

    name = MAILTO.replace(&name, "").into_owned();

    if name.contains(':') {
        let segment = name
            .split(':')
            .find(|seg| seg.chars().any(char::is_alphabetic) && !seg.contains('@'))
            .or_else(|| name.split(':').next())
            .unwrap_or_default()
            .to_string();
        name = segment;
    }

    name = ANGLE_ADDRESS.replace_all(&name, " ").into_owned();
    name = BARE_ADDRESS.replace_all(&name, " ").into_owned();
    name = PAREN_GROUP.replace_all(&name, " ").into_owned();

    if let Some((last, first)) = name.split_once(',')
        && !first.contains(',')
        && !last.trim().is_empty()
        && !first.trim().is_empty()
    {
        name = format!("{} {}", first.trim(), last.trim());
    }

    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
