//! Parser options

use std::ops::{BitOr, BitOrAssign};

/// Parser behavior flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParseOptions(u32);

impl ParseOptions {
    pub const NONE: ParseOptions = ParseOptions(0);
    /// Drop Error-severity diagnostics; Fatal ones are always kept
    pub const NO_ERROR: ParseOptions = ParseOptions(0x1);
    /// Drop Warning-severity diagnostics
    pub const NO_WARNING: ParseOptions = ParseOptions(0x2);
    /// Drop whitespace-only text nodes
    pub const NO_BLANKS: ParseOptions = ParseOptions(0x4);
    pub const NO_DOCTYPE: ParseOptions = ParseOptions(0x8);
    pub const NO_COMMENTS: ParseOptions = ParseOptions(0x10);
    /// Parse as if scripting were disabled (`<noscript>` content is markup)
    pub const NO_SCRIPTING: ParseOptions = ParseOptions(0x20);
    /// Ignore the declared encoding and decode as UTF-8
    pub const IGNORE_ENCODING: ParseOptions = ParseOptions(0x40);

    const ALL_BITS: u32 = 0x7F;

    /// Raw flag bits
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Build from raw bits; unknown bits are discarded
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Check whether every flag in `other` is set
    pub fn contains(self, other: ParseOptions) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Union of two option sets
    pub fn union(self, other: ParseOptions) -> ParseOptions {
        ParseOptions(self.0 | other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ParseOptions {
    type Output = ParseOptions;

    fn bitor(self, rhs: ParseOptions) -> ParseOptions {
        self.union(rhs)
    }
}

impl BitOrAssign for ParseOptions {
    fn bitor_assign(&mut self, rhs: ParseOptions) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_flags() {
        let opts = ParseOptions::NO_BLANKS | ParseOptions::NO_COMMENTS;
        assert!(opts.contains(ParseOptions::NO_BLANKS));
        assert!(opts.contains(ParseOptions::NO_COMMENTS));
        assert!(!opts.contains(ParseOptions::NO_DOCTYPE));
        assert!(opts.contains(ParseOptions::NONE));
    }

    #[test]
    fn test_from_bits_masks_unknown() {
        assert_eq!(ParseOptions::from_bits(0xFF00 | 0x2), ParseOptions::NO_WARNING);
        assert!(ParseOptions::default().is_empty());
    }
}
