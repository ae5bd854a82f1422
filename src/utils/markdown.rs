//! Helpers for Telegram MarkdownV2 output.
//!
//! Reminder text is user input and routinely contains `.`, `-` and `!`,
//! all of which are reserved in MarkdownV2.

/// Escapes markdown special characters for MarkdownV2 parsing mode
/// 
/// # Example
/// ```
/// use reminder_bot::utils::markdown::escape_markdown;
/// 
/// let text = "Hello *world* (test)";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Hello \\*world\\* \\(test\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}

/// Builds an inline MarkdownV2 link. Inside the URL part only `)` and `\`
/// need escaping.
pub fn markdown_link(label: &str, url: &str) -> String {
    let url = url.replace('\\', "\\\\").replace(')', "\\)");
    format!("[{}]({})", escape_markdown(label), url)
}
