//! Constants and substitution tables for man(7) roff output
//!
//! This module centralizes the fixed output fragments and the ordered
//! character-reference table used by the escape pipeline. The entity table
//! is a slice, not a map: substitutions run front to back and several
//! entries only work because of their position (the em dash variants must
//! precede nothing that re-reads `&`, and `&amp;` must come last of all,
//! which is why it lives in its own constant).

// ============================================================================
// Escape pipeline glyph substitutions
// ============================================================================

/// Ordered character-reference substitutions, applied front to back.
///
/// `&amp;` is deliberately absent; see [`AMPERSAND_REF`].
pub const CHAR_REF_TABLE: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&#160;", "\\~"),              // non-breaking space
    ("&#169;", "\\(co"),            // copyright sign
    ("&#174;", "\\(rg"),            // registered sign
    ("&#8482;", "\\(tm"),           // trademark sign
    ("&#8201;", " "),               // thin space
    ("&#8211;", "\\(en"),           // en dash
    ("&#8212;&#8203;", "\\(em"),    // em dash + zero-width space (swallowed)
    ("&#8212;", "\\(em"),           // em dash
    ("&#8216;", "\\(oq"),           // left single quotation mark
    ("&#8217;", "\\(cq"),           // right single quotation mark
    ("&#8220;", "\\(lq"),           // left double quotation mark
    ("&#8221;", "\\(rq"),           // right double quotation mark
    ("&#8230;", "..."),             // horizontal ellipsis
    ("&#8592;", "\\(<-"),           // leftwards arrow
    ("&#8594;", "\\(->"),           // rightwards arrow
    ("&#8656;", "\\(lA"),           // leftwards double arrow
    ("&#8658;", "\\(rA"),           // rightwards double arrow
    ("&#8203;", "\\:"),             // zero-width space
];

/// Literal ampersand reference. Must run after every entry in
/// [`CHAR_REF_TABLE`]: earlier replacements are written with `&`-based
/// source tokens that would otherwise be re-expanded.
pub const AMPERSAND_REF: (&str, &str) = ("&amp;", "&");

/// Expanded-tab run used by the preserve whitespace mode.
pub const EXPANDED_TAB: &str = "        ";

// ============================================================================
// Character references emitted by inline renderers
// ============================================================================

pub const REF_SINGLE_QUOTE_OPEN: &str = "&#8216;";
pub const REF_SINGLE_QUOTE_CLOSE: &str = "&#8217;";
pub const REF_DOUBLE_QUOTE_OPEN: &str = "&#8220;";
pub const REF_DOUBLE_QUOTE_CLOSE: &str = "&#8221;";

// ============================================================================
// Document preamble
// ============================================================================

/// tbl(1) preprocessor flag line; must be the very first output line so the
/// man pipeline routes the page through the table preprocessor.
pub const TBL_PREPROCESSOR_FLAG: &str = "'\\\" t";

/// Locale and formatting setup emitted after the `.TH` line: a portable
/// apostrophe string, sentence-space suppression, hyphenation off, left
/// justification.
pub const FORMATTING_SETUP: &str = "\
.ie \\n(.g .ds Aq \\(aq
.el       .ds Aq '
.ss \\n[.ss] 0
.nh
.ad l";

/// Portability-safe hyperlink macro definition plus the mailto alias.
/// Groff renders `.URL url text suffix` through this fallback on systems
/// without www.tmac.
pub const URL_MACRO_DEF: &str = "\
.de URL
\\fI\\\\$2\\fP <\\\\$1>\\\\$3
..
.als MTO URL";

// ============================================================================
// Table fragments
// ============================================================================

/// Opening of a tbl block, with the global table options line.
pub const TABLE_START: &str = ".TS\nallbox tab(:);";

/// Closing of a tbl block.
pub const TABLE_END: &str = ".TE";

/// Default per-column tag of the column-specification line: left-aligned,
/// plain.
pub const DEFAULT_COLUMN_TAG: &str = "lt";

/// Opening delimiter of a multi-line cell text block.
pub const CELL_BLOCK_OPEN: &str = "T{";

/// Closing delimiter of a multi-line cell text block.
pub const CELL_BLOCK_CLOSE: &str = "T}";

// ============================================================================
// Alias side channel
// ============================================================================

/// Directive that redirects an alias manpage to the primary one.
pub const SOURCE_REDIRECT_MACRO: &str = ".so";
