/// Limits on textual input, so a hostile expression cannot make parsing
/// arbitrarily expensive.
///
/// Real puzzles use six numbers and a handful of groups; the defaults leave
/// plenty of headroom.
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum input size in bytes
    /// Real usage: ~40 bytes, Limit: 4KB
    pub max_input_bytes: usize,

    /// Maximum nesting depth of parenthesized groups
    /// Real usage: ~3 levels, Limit: 32
    pub max_nesting_depth: usize,

    /// Maximum number of numbers and operators across all groups
    /// Real usage: 11, Limit: 256
    pub max_entries: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: 4 * 1024,
            max_nesting_depth: 32,
            max_entries: 256,
        }
    }
}

impl Limits {
    pub fn new() -> Self {
        Self::default()
    }
}
