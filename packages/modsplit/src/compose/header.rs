//! Header composition: preamble + block content → unit body.

use crate::spec::Header;
use crate::splitting::trim_blank_lines;

/// Render header lines as text, without surrounding blank lines.
#[must_use]
pub fn render_header(header: &Header) -> String {
    trim_blank_lines(&header.lines.join("\n")).to_string()
}

/// Compose a unit body.
///
/// Each part is trimmed of surrounding blank lines, empty parts are dropped,
/// and the remaining parts are joined with one blank line. The header is
/// separated from the content by exactly one blank line, and the result ends
/// with exactly one newline.
///
/// # Examples
/// ```
/// use modsplit::compose::compose;
/// use modsplit::spec::Header;
///
/// let header = Header::new(["use std::fmt;"]);
/// assert_eq!(compose(&header, &["\n\nstruct A;\n\n"]), "use std::fmt;\n\nstruct A;\n");
/// ```
#[must_use]
pub fn compose<S: AsRef<str>>(header: &Header, parts: &[S]) -> String {
    let content = parts
        .iter()
        .map(|part| trim_blank_lines(part.as_ref()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    let header = render_header(header);

    let mut body = match (header.is_empty(), content.is_empty()) {
        (true, _) => content,
        (false, true) => header,
        (false, false) => format!("{header}\n\n{content}"),
    };
    body.push('\n');
    body
}
