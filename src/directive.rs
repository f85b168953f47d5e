//! Directive scanning for documentation comments.
//!
//! A directive is a `@Tag value` token at the start of a comment line, e.g.
//! `// @Title Petstore API`. [`scan_line`] recognizes the tag, [`apply`]
//! folds the value into the document. Lines without a known tag are ignored,
//! not errors; free prose is allowed to share a comment block with directives.

use crate::document::{Contact, Document, Server};

/// Separator used when repeated `@Description` directives are concatenated.
pub const DESCRIPTION_SEPARATOR: &str = "<br>";

/// Top-level directive tags recognized in a manifest file's comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Version,
    Title,
    Description,
    TermsOfService,
    ContactEmail,
    ContactName,
    ServerUrl,
}

/// Ordered directive table. Scanning tries prefixes in this order and the
/// first hit wins; adding a tag means adding a row here and an arm in
/// [`apply`].
pub const TAGS: &[(&str, Tag)] = &[
    ("@Version", Tag::Version),
    ("@Title", Tag::Title),
    ("@Description", Tag::Description),
    ("@TermsOfServiceUrl", Tag::TermsOfService),
    ("@Contact", Tag::ContactEmail),
    ("@Name", Tag::ContactName),
    ("@URL", Tag::ServerUrl),
];

/// Scan one comment line (comment markers already stripped) for a directive.
///
/// The line is trimmed, then matched against [`TAGS`]. A tag only matches as
/// a whole token: `@Titlecase` does not match `@Title`. Returns the tag and
/// the trimmed remainder, or `None` for a line with no known directive.
pub fn scan_line(line: &str) -> Option<(Tag, &str)> {
    let line = line.trim();
    for (prefix, tag) in TAGS {
        if let Some(rest) = line.strip_prefix(prefix) {
            if rest.is_empty() {
                return Some((*tag, ""));
            }
            if rest.starts_with(char::is_whitespace) {
                return Some((*tag, rest.trim()));
            }
        }
    }
    None
}

/// Fold a scanned directive value into the document.
///
/// Aggregation policy: repeated `@Description` values are appended with
/// [`DESCRIPTION_SEPARATOR`]; `@URL` creates a single server entry on first
/// sight and only overwrites that entry's URL afterwards; every other tag is
/// last-write-wins.
pub fn apply(doc: &mut Document, tag: Tag, value: &str) {
    match tag {
        Tag::Version => doc.info.version = value.to_string(),
        Tag::Title => doc.info.title = value.to_string(),
        Tag::Description => match &mut doc.info.description {
            Some(desc) => {
                desc.push_str(DESCRIPTION_SEPARATOR);
                desc.push_str(value);
            }
            None => doc.info.description = Some(value.to_string()),
        },
        Tag::TermsOfService => doc.info.terms_of_service = Some(value.to_string()),
        Tag::ContactEmail => {
            doc.info.contact.get_or_insert_with(Contact::default).email =
                Some(value.to_string());
        }
        Tag::ContactName => {
            doc.info.contact.get_or_insert_with(Contact::default).name =
                Some(value.to_string());
        }
        Tag::ServerUrl => {
            if doc.servers.is_empty() {
                doc.servers.push(Server::default());
            }
            doc.servers[0].url = value.to_string();
        }
    }
}
