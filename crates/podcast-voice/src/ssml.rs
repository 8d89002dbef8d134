//! SSML helpers.

/// Escapes the five XML-significant characters.
///
/// Not idempotent: escaping an already escaped string escapes the `&` of each
/// entity again. Call exactly once, right before the text is embedded in
/// markup.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps raw turn text in a `<speak>` document with medium-rate prosody.
pub fn prosody_document(text: &str) -> String {
    format!(
        "<speak><prosody rate=\"medium\">{}</prosody></speak>",
        escape_markup(text)
    )
}
