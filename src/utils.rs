//! Common utility functions shared across the codebase.

/// Ellipsis GitHub uses when it moves the end of a long title into the body.
const TRUNCATION_MARK: char = '\u{2026}'; // …

/// Rejoins a pull request title that GitHub truncated into the body.
///
/// When a title is too long, GitHub ends it with `…` and starts the body with
/// `…` followed by the rest of the title on the first body line.
///
/// # Examples
///
/// ```
/// use issue_refs::utils::normalize_title;
///
/// assert_eq!(
///     normalize_title("Fix the crash when a very long…", "… title is parsed\r\n\nDetails"),
///     "Fix the crash when a very long title is parsed"
/// );
/// assert_eq!(normalize_title("Short title", "Body"), "Short title");
/// ```
pub fn normalize_title(title: &str, body: &str) -> String {
    let (Some(head), Some(rest)) = (
        title.strip_suffix(TRUNCATION_MARK),
        body.strip_prefix(TRUNCATION_MARK),
    ) else {
        return title.to_string();
    };

    let first_line = rest.split('\n').next().unwrap_or_default();
    format!("{}{}", head, first_line.trim_end_matches('\r'))
}

/// The part of `body` that [`normalize_title`] did not move into the title.
///
/// When the title was rejoined, the first body line belongs to the title, so
/// only the lines after it are returned. Otherwise `body` is returned whole.
pub fn body_after_title<'b>(title: &str, body: &'b str) -> &'b str {
    if !(title.ends_with(TRUNCATION_MARK) && body.starts_with(TRUNCATION_MARK)) {
        return body;
    }
    body.split_once('\n').map_or("", |(_, rest)| rest)
}
