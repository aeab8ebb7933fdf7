//! Text escaping for man(7) roff output
//!
//! Everything that leaves the renderer as body text passes through
//! [`roffify`] exactly once. The pipeline is a fixed sequence of pure
//! string stages; the order is load-bearing (the ampersand reference must
//! resolve after every other character reference, hyphen escaping must
//! follow macro-line reflow, leader markers must survive until the final
//! unescape) and is therefore sealed inside this module rather than left
//! to callers.
//!
//! Inline renderers cannot emit raw roff control characters: a literal
//! backslash would be rewritten to `\(rs` and a line-leading period would
//! be neutralized. Instead they prefix control sequences with a private
//! leader byte (`ESC`), which shields them through the generic stages and
//! is converted to the real control character in the final unescape stage.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::data::constants::{AMPERSAND_REF, CHAR_REF_TABLE, EXPANDED_TAB};

/// Leader byte shielding not-yet-finalized control sequences.
pub const ESC: char = '\u{1b}';

/// Leader form standing in for "this begins a backslash escape".
pub const ESC_BS: &str = "\u{1b}\\";

/// Leader form standing in for "this begins a macro invocation line".
pub const ESC_FS: &str = "\u{1b}.";

/// Mock span-boundary markers. Emphasis renderers wrap their payload in a
/// balanced pair so whitespace collapsing cannot fuse the span with
/// adjacent words; the pipeline removes them without trace. Content
/// containing the literal marker text is not supported.
pub const BOUNDARY_OPEN: &str = "<BOUNDARY>";
pub const BOUNDARY_CLOSE: &str = "</BOUNDARY>";

/// Whitespace shaping applied by the first pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Expand horizontal tabs, keep everything else verbatim (literal and
    /// verse blocks).
    Preserve,
    /// Collapse a wrapped-line boundary (blank run around a line break) to
    /// a single line break.
    Normalize,
    /// Squeeze any run of space, tab and newline into one space.
    #[default]
    Collapse,
}

lazy_static! {
    /// Blank run surrounding a line break.
    static ref WRAPPED_INDENT_RX: Regex = Regex::new(r"[ \t]*\n[ \t]*").unwrap();
    /// Any run of horizontal or vertical whitespace.
    static ref WHITESPACE_RUN_RX: Regex = Regex::new(r"[ \t\n]+").unwrap();
    /// A backslash, with the leader byte captured if it precedes it.
    static ref LITERAL_BACKSLASH_RX: Regex = Regex::new("(\u{1b})?\\\\").unwrap();
    /// A literal period at the start of a line.
    static ref LEADING_PERIOD_RX: Regex = Regex::new(r"(?m)^\.").unwrap();
    /// A leader-marked hyperlink/mailto macro invocation, possibly glued
    /// behind a leader-marked `\c` continuation whose line break the
    /// collapse stage may have turned into a space.
    static ref INLINE_MACRO_RX: Regex =
        Regex::new("(?:\u{1b}\\\\c[ \n])?\u{1b}\\.(URL|MTO) \"([^\"]*)\" \"([^\"]*)\" ?([^\n]*)")
            .unwrap();
    /// A leader-marked break macro invocation.
    static ref BREAK_MACRO_RX: Regex = Regex::new("[ \n]?\u{1b}\\.br[ \n]?").unwrap();
}

/// Escape `text` for inclusion in the output stream.
///
/// Total over any input; there is no error path. Applying this function to
/// its own output is a correctness bug (control sequences activated by the
/// final unescape stage would be re-escaped), which is why renderers pass
/// each string through it exactly once.
pub fn roffify(text: &str, mode: WhitespaceMode, append_newline: bool) -> String {
    let shaped = shape_whitespace(text, mode);
    let escaped = escape_literal_backslashes(&shaped);
    let escaped = escape_leading_periods(&escaped);
    let reflowed = reflow_macro_lines(&escaped);
    let escaped = escape_hyphens(&reflowed);
    let substituted = substitute_char_refs(&escaped);
    let substituted = substitute_ampersands(&substituted);
    let quoted = escape_apostrophes(&substituted);
    let stripped = strip_boundary_markers(&quoted);
    let unescaped = unescape_leaders(&stripped);
    let mut result = unescaped.trim_end().to_string();
    if append_newline {
        result.push('\n');
    }
    result
}

fn shape_whitespace(text: &str, mode: WhitespaceMode) -> String {
    match mode {
        WhitespaceMode::Preserve => text.replace('\t', EXPANDED_TAB),
        WhitespaceMode::Normalize => WRAPPED_INDENT_RX.replace_all(text, "\n").into_owned(),
        WhitespaceMode::Collapse => WHITESPACE_RUN_RX.replace_all(text, " ").into_owned(),
    }
}

/// A backslash behind the leader byte introduces a roff escape and stays;
/// any other backslash is user text and becomes the literal-backslash
/// glyph.
fn escape_literal_backslashes(text: &str) -> String {
    LITERAL_BACKSLASH_RX
        .replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() {
                caps[0].to_string()
            } else {
                "\\(rs".to_string()
            }
        })
        .into_owned()
}

/// roff reads a line-leading period as a macro call; prefix it with the
/// zero-width `\&` so ordinary content cannot be misparsed. Macro lines
/// proper start with the leader byte and are unaffected.
fn escape_leading_periods(text: &str) -> String {
    LEADING_PERIOD_RX.replace_all(text, "\\&.").into_owned()
}

/// Rebuild leader-marked macro invocations (hyperlink, mailto, break) as
/// proper macro lines. The whitespace stage may have folded their line
/// breaks into spaces, so the macro is re-anchored at the start of a line,
/// its positional arguments are re-quoted, and any trailing text on the
/// same logical line moves to a continuation line so it cannot be read as
/// an extra macro argument.
fn reflow_macro_lines(text: &str) -> String {
    let reflowed = INLINE_MACRO_RX
        .replace_all(text, |caps: &Captures| {
            let at_line_start = {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                start == 0 || text.as_bytes()[start - 1] == b'\n'
            };
            let glued = caps[0].starts_with(ESC_BS);
            let mut out = String::new();
            if glued {
                out.push_str("\\c\n");
            } else if !at_line_start {
                out.push('\n');
            }
            out.push_str(&format!(".{} \"{}\" \"{}\"", &caps[1], &caps[2], &caps[3]));
            let rest = caps[4].trim_start();
            if !rest.is_empty() {
                out.push('\n');
                out.push_str(rest);
            }
            out
        })
        .into_owned();
    BREAK_MACRO_RX.replace_all(&reflowed, "\n.br\n").into_owned()
}

/// Typesetting hyphen vs. minus ambiguity: always emit the minus escape.
fn escape_hyphens(text: &str) -> String {
    text.replace('-', "\\-")
}

fn substitute_char_refs(text: &str) -> String {
    let mut result = text.to_string();
    for (from, to) in CHAR_REF_TABLE {
        if result.contains(from) {
            result = result.replace(from, to);
        }
    }
    result
}

/// Must run after every other character-reference substitution: those are
/// written with `&`-based source tokens that a premature ampersand pass
/// would re-expand.
fn substitute_ampersands(text: &str) -> String {
    text.replace(AMPERSAND_REF.0, AMPERSAND_REF.1)
}

/// Apostrophe is a control character at line start in roff.
fn escape_apostrophes(text: &str) -> String {
    text.replace('\'', "\\(aq")
}

fn strip_boundary_markers(text: &str) -> String {
    text.replace(BOUNDARY_OPEN, "").replace(BOUNDARY_CLOSE, "")
}

/// Activate the control sequences the earlier stages were forbidden from
/// touching.
fn unescape_leaders(text: &str) -> String {
    text.replace(ESC_BS, "\\").replace(ESC_FS, ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preserve_expands_tabs() {
        assert_eq!(
            shape_whitespace("a\tb", WhitespaceMode::Preserve),
            "a        b"
        );
    }

    #[test]
    fn test_normalize_collapses_wrap_boundary() {
        assert_eq!(
            shape_whitespace("first  \n   second", WhitespaceMode::Normalize),
            "first\nsecond"
        );
    }

    #[test]
    fn test_collapse_squeezes_all_whitespace() {
        assert_eq!(
            shape_whitespace("a \t b\n\nc", WhitespaceMode::Collapse),
            "a b c"
        );
    }

    #[test]
    fn test_literal_backslash_escaped() {
        assert_eq!(roffify("a\\b", WhitespaceMode::Collapse, false), "a\\(rsb");
    }

    #[test]
    fn test_leader_marked_backslash_survives() {
        let input = format!("{ESC_BS}fBx{ESC_BS}fP");
        assert_eq!(
            roffify(&input, WhitespaceMode::Collapse, false),
            "\\fBx\\fP"
        );
    }

    #[test]
    fn test_leading_period_neutralized() {
        assert_eq!(
            roffify(".config file", WhitespaceMode::Collapse, false),
            "\\&.config file"
        );
    }

    #[test]
    fn test_leading_period_mid_text_untouched() {
        assert_eq!(
            roffify("the .config file", WhitespaceMode::Collapse, false),
            "the .config file"
        );
    }

    #[test]
    fn test_hyphen_escaped() {
        assert_eq!(
            roffify("read-only", WhitespaceMode::Collapse, false),
            "read\\-only"
        );
    }

    #[test]
    fn test_entity_table_round_trip() {
        let cases = [
            ("&lt;", "<"),
            ("&gt;", ">"),
            ("&#160;", "\\~"),
            ("&#169;", "\\(co"),
            ("&#174;", "\\(rg"),
            ("&#8482;", "\\(tm"),
            ("&#8211;", "\\(en"),
            ("&#8212;", "\\(em"),
            ("&#8216;", "\\(oq"),
            ("&#8217;", "\\(cq"),
            ("&#8220;", "\\(lq"),
            ("&#8221;", "\\(rq"),
            ("&#8230;", "..."),
            // Arrow glyphs are produced after the hyphen stage ran, so
            // their minus sign is not re-escaped.
            ("&#8592;", "\\(<-"),
            ("&#8594;", "\\(->"),
            ("&#8656;", "\\(lA"),
            ("&#8658;", "\\(rA"),
            ("&#8203;", "\\:"),
            ("&amp;", "&"),
        ];
        for (reference, glyph) in cases {
            assert_eq!(
                roffify(reference, WhitespaceMode::Collapse, false),
                glyph,
                "reference {}",
                reference
            );
        }
    }

    #[test]
    fn test_thin_space_resolves_between_words() {
        // Standalone, the replacement space would be caught by the
        // trailing strip, so pin it between digits.
        assert_eq!(
            roffify("1&#8201;000", WhitespaceMode::Collapse, false),
            "1 000"
        );
    }

    #[test]
    fn test_em_dash_swallows_zero_width_space() {
        assert_eq!(
            roffify("a&#8212;&#8203;b", WhitespaceMode::Collapse, false),
            "a\\(emb"
        );
    }

    #[test]
    fn test_ampersand_resolves_last() {
        // A literal ampersand next to a named reference must not garble
        // either substitution.
        assert_eq!(
            roffify("x &amp; y&#8212;z", WhitespaceMode::Collapse, false),
            "x & y\\(emz"
        );
    }

    #[test]
    fn test_ampersand_is_not_reexpanded() {
        // "&amp;lt;" resolves to the literal text "&lt;", not to "<".
        assert_eq!(
            roffify("&amp;lt;", WhitespaceMode::Collapse, false),
            "&lt;"
        );
    }

    #[test]
    fn test_apostrophe_escaped() {
        assert_eq!(
            roffify("it's", WhitespaceMode::Collapse, false),
            "it\\(aqs"
        );
    }

    #[test]
    fn test_boundary_markers_removed() {
        let input = format!("a {BOUNDARY_OPEN}b{BOUNDARY_CLOSE} c");
        assert_eq!(roffify(&input, WhitespaceMode::Collapse, false), "a b c");
    }

    #[test]
    fn test_macro_line_reflow_with_continuation() {
        let input = format!("see {ESC_BS}c\n{ESC_FS}URL \"https://x.io\" \"docs\" now");
        assert_eq!(
            roffify(&input, WhitespaceMode::Collapse, false),
            "see \\c\n.URL \"https://x.io\" \"docs\"\nnow"
        );
    }

    #[test]
    fn test_macro_line_reflow_without_trailing_text() {
        let input = format!("see {ESC_BS}c\n{ESC_FS}MTO \"a@b.io\" \"mail\" ");
        assert_eq!(
            roffify(&input, WhitespaceMode::Collapse, false),
            "see \\c\n.MTO \"a@b.io\" \"mail\""
        );
    }

    #[test]
    fn test_break_macro_reflow() {
        let input = format!("one\n{ESC_FS}br\ntwo");
        assert_eq!(
            roffify(&input, WhitespaceMode::Collapse, false),
            "one\n.br\ntwo"
        );
    }

    #[test]
    fn test_trailing_whitespace_stripped_and_newline_appended() {
        assert_eq!(roffify("abc  ", WhitespaceMode::Collapse, true), "abc\n");
    }

    #[test]
    fn test_double_pass_diverges() {
        // Re-escaping output corrupts the activated control sequences, so
        // accidental double application must be visible.
        let once = roffify("a\\b it's", WhitespaceMode::Collapse, false);
        let twice = roffify(&once, WhitespaceMode::Collapse, false);
        assert_ne!(once, twice);
    }

    #[test]
    fn test_total_over_empty_input() {
        assert_eq!(roffify("", WhitespaceMode::Collapse, false), "");
        assert_eq!(roffify("", WhitespaceMode::Preserve, true), "\n");
    }
}
