//! In-memory insertion of a fragment before the closing head and body tags.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::fragment::Fragment;

const HEAD_CLOSE: &str = "</head>";
const BODY_CLOSE: &str = "</body>";

static HEAD_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&regex::escape(HEAD_CLOSE)).expect("Invalid head close regex")
});

static BODY_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&regex::escape(BODY_CLOSE)).expect("Invalid body close regex")
});

/// What to do when a document lacks one of the closing tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialPolicy {
    /// Refuse the document, leaving it untouched.
    #[default]
    Reject,

    /// Insert whichever blocks have a matching tag, as long as one of the
    /// inserted blocks carries the sentinel.
    Allow,
}

/// Result of splicing a fragment into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spliced {
    /// Document with the fragment inserted
    pub content: String,

    /// Whether the style block went in before `</head>`
    pub style_inserted: bool,

    /// Whether the markup block went in before `</body>`
    pub markup_inserted: bool,
}

/// Insert the style block before the first `</head>` and the markup block
/// before the first `</body>`.
///
/// Tags are matched literally and case-sensitively; later occurrences are left
/// alone. Fragment text is inserted verbatim.
pub fn splice(
    content: &str,
    fragment: &Fragment,
    policy: PartialPolicy,
) -> Result<Spliced, SpliceError> {
    let has_head = HEAD_CLOSE_RE.is_match(content);
    let has_body = BODY_CLOSE_RE.is_match(content);

    if policy == PartialPolicy::Reject {
        if !has_head {
            return Err(SpliceError::MissingTag(HEAD_CLOSE));
        }
        if !has_body {
            return Err(SpliceError::MissingTag(BODY_CLOSE));
        }
    }

    // Without the sentinel in the output, every later run would inject again.
    let carries_sentinel = (has_head && fragment.style.contains(&fragment.sentinel))
        || (has_body && fragment.markup.contains(&fragment.sentinel));
    if !carries_sentinel {
        return Err(SpliceError::SentinelNotInserted(fragment.sentinel.clone()));
    }

    let style = format!("{}\n{}", fragment.style, HEAD_CLOSE);
    let content = HEAD_CLOSE_RE.replacen(content, 1, NoExpand(&style));

    let markup = format!("{}\n{}", fragment.markup, BODY_CLOSE);
    let content = BODY_CLOSE_RE.replacen(&content, 1, NoExpand(&markup));

    Ok(Spliced {
        content: content.into_owned(),
        style_inserted: has_head,
        markup_inserted: has_body,
    })
}

/// Errors that can occur when splicing.
#[derive(Debug, thiserror::Error)]
pub enum SpliceError {
    #[error("Document has no {0} tag")]
    MissingTag(&'static str),

    #[error("No inserted block carries the sentinel '{0}'")]
    SentinelNotInserted(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::{FOOTER_MARKUP, FOOTER_STYLE};
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = "<html><head></head><body></body></html>";

    #[test]
    fn injects_into_minimal_document() {
        let fragment = Fragment::default();

        let spliced = splice(MINIMAL, &fragment, PartialPolicy::Reject).unwrap();

        let expected = format!(
            "<html><head>{}\n</head><body>{}\n</body></html>",
            FOOTER_STYLE, FOOTER_MARKUP
        );
        assert_eq!(spliced.content, expected);
        assert!(spliced.style_inserted);
        assert!(spliced.markup_inserted);
    }

    #[test]
    fn only_first_closing_tag_is_used() {
        let fragment = Fragment::new("<style>/*f*/</style>", "<footer>f</footer>", "f").unwrap();
        let doc = "<head></head><template></head></template><body></body><!-- </body> -->";

        let spliced = splice(doc, &fragment, PartialPolicy::Reject).unwrap();

        assert_eq!(
            spliced.content,
            "<head><style>/*f*/</style>\n</head><template></head></template>\
             <body><footer>f</footer>\n</body><!-- </body> -->"
        );
    }

    #[test]
    fn tag_match_is_case_sensitive() {
        let fragment = Fragment::default();

        let result = splice(
            "<HTML><HEAD></HEAD><BODY></BODY></HTML>",
            &fragment,
            PartialPolicy::Reject,
        );

        assert!(matches!(result, Err(SpliceError::MissingTag("</head>"))));
    }

    #[test]
    fn replacement_text_is_not_expanded() {
        let fragment = Fragment::new("<style>$0 ${1}</style>", "<footer>$$</footer>", "footer")
            .unwrap();

        let spliced = splice(MINIMAL, &fragment, PartialPolicy::Reject).unwrap();

        assert!(spliced.content.contains("<style>$0 ${1}</style>\n</head>"));
        assert!(spliced.content.contains("<footer>$$</footer>\n</body>"));
    }

    #[test]
    fn rejects_document_without_head_close() {
        let fragment = Fragment::default();

        let result = splice("<html><body></body></html>", &fragment, PartialPolicy::Reject);

        assert!(matches!(result, Err(SpliceError::MissingTag("</head>"))));
    }

    #[test]
    fn rejects_document_without_body_close() {
        let fragment = Fragment::default();

        let result = splice("<html><head></head><body>", &fragment, PartialPolicy::Reject);

        assert!(matches!(result, Err(SpliceError::MissingTag("</body>"))));
    }

    #[test]
    fn allow_policy_skips_style_without_head_close() {
        let fragment = Fragment::default();

        let spliced = splice("<html><body></body></html>", &fragment, PartialPolicy::Allow).unwrap();

        assert!(!spliced.style_inserted);
        assert!(spliced.markup_inserted);
        assert!(!spliced.content.contains("<style>"));
        assert!(spliced.content.contains(&format!("{}\n</body>", FOOTER_MARKUP)));
    }

    #[test]
    fn allow_policy_skips_markup_without_body_close() {
        let fragment = Fragment::default();

        let spliced = splice("<html><head></head><body>", &fragment, PartialPolicy::Allow).unwrap();

        assert!(spliced.style_inserted);
        assert!(!spliced.markup_inserted);
        assert!(!spliced.content.contains("<footer"));
    }

    #[test]
    fn allow_policy_rejects_tagless_text() {
        let fragment = Fragment::default();

        let result = splice("plain text", &fragment, PartialPolicy::Allow);

        assert!(matches!(result, Err(SpliceError::SentinelNotInserted(_))));
    }

    #[test]
    fn allow_policy_rejects_when_sentinel_block_is_skipped() {
        let fragment =
            Fragment::new("<style>.x-foot{}</style>", "<footer>hi</footer>", "x-foot").unwrap();

        let result = splice("<html><body></body></html>", &fragment, PartialPolicy::Allow);

        assert!(matches!(result, Err(SpliceError::SentinelNotInserted(_))));
    }

    #[test]
    fn allow_policy_accepts_when_inserted_block_carries_sentinel() {
        let fragment =
            Fragment::new("<style>.x-foot{}</style>", "<footer>hi</footer>", "x-foot").unwrap();

        let spliced = splice("<html><head></head><body>", &fragment, PartialPolicy::Allow).unwrap();

        assert!(spliced.style_inserted);
        assert!(!spliced.markup_inserted);
        assert!(fragment.is_present_in(&spliced.content));
    }
}
