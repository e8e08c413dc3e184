//! Report download error documents
//!
//! ```xml
//! <reportDownloadError>
//!   <ApiError>
//!     <type>ReportDefinitionError.INVALID_FIELD_NAME_FOR_REPORT</type>
//!     <trigger>Foo</trigger>
//!     <fieldPath></fieldPath>
//!   </ApiError>
//! </reportDownloadError>
//! ```

use crate::error::Error;

/// Decode a `reportDownloadError` document into an API error
///
/// Returns `None` when the body is not such a document.
pub fn parse_api_error(body: &str) -> Option<Error> {
    if !body.contains("<reportDownloadError") {
        return None;
    }

    let error_type = element_text(body, "type")?;
    Some(Error::Api {
        error_type,
        trigger: element_text(body, "trigger").unwrap_or_default(),
        field_path: element_text(body, "fieldPath").unwrap_or_default(),
    })
}

/// Text of the first `<tag>...</tag>` element, `<tag/>` counting as empty
fn element_text(xml: &str, tag: &str) -> Option<String> {
    if xml.contains(&format!("<{tag}/>")) {
        return Some(String::new());
    }

    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open)? + open.len();
    let end = start + xml[start..].find(&close)?;

    Some(unescape(xml[start..end].trim()))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
