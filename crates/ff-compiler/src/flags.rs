//! Flags trailing a `/body/flags` directive.

use regex::{Regex, RegexBuilder};

use crate::parser::DirectiveError;

bitflags::bitflags! {
    /// Flags accepted after the closing `/` of a regex directive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegexFlags: u8 {
        /// `d` - match indices (no effect on matching)
        const INDICES = 1 << 0;
        /// `g` - global (no effect on a single test)
        const GLOBAL = 1 << 1;
        /// `i` - case-insensitive
        const IGNORE_CASE = 1 << 2;
        /// `m` - `^` and `$` match at line boundaries
        const MULTILINE = 1 << 3;
        /// `s` - `.` matches newlines
        const DOT_ALL = 1 << 4;
        /// `u` - unicode mode
        const UNICODE = 1 << 5;
        /// `v` - unicode sets mode
        const UNICODE_SETS = 1 << 6;
        /// `y` - sticky (no effect on a single test)
        const STICKY = 1 << 7;
    }
}

impl RegexFlags {
    /// Parse a flag string. Unknown or repeated flags, and `u` together
    /// with `v`, are rejected.
    pub fn parse(text: &str) -> Result<Self, DirectiveError> {
        let mut flags = Self::empty();

        for ch in text.chars() {
            let flag = match ch {
                'd' => Self::INDICES,
                'g' => Self::GLOBAL,
                'i' => Self::IGNORE_CASE,
                'm' => Self::MULTILINE,
                's' => Self::DOT_ALL,
                'u' => Self::UNICODE,
                'v' => Self::UNICODE_SETS,
                'y' => Self::STICKY,
                _ => return Err(DirectiveError::InvalidFlags(text.to_string())),
            };
            if flags.contains(flag) {
                return Err(DirectiveError::InvalidFlags(text.to_string()));
            }
            flags |= flag;
        }

        if flags.contains(Self::UNICODE | Self::UNICODE_SETS) {
            return Err(DirectiveError::InvalidFlags(text.to_string()));
        }

        if !flags.intersects(Self::UNICODE | Self::UNICODE_SETS) {
            flags |= Self::UNICODE;
        }

        Ok(flags)
    }

    /// Compile `body` under these flags.
    pub fn build(self, body: &str) -> Result<Regex, regex::Error> {
        RegexBuilder::new(body)
            .case_insensitive(self.contains(Self::IGNORE_CASE))
            .multi_line(self.contains(Self::MULTILINE))
            .dot_matches_new_line(self.contains(Self::DOT_ALL))
            .unicode(true)
            .build()
    }
}
