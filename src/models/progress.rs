pub const FIRST_LEVEL: u8 = 1;
pub const FINAL_LEVEL: u8 = 10;

/// The part of a session that survives a restart of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub level: u8,
}

impl Progress {
    pub fn new(score: u32, level: u8) -> Self {
        Self { score, level }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            score: 0,
            level: FIRST_LEVEL,
        }
    }
}
