use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub struct Privileges: i32 {
        const PubliclyVisible = 1 << 0;
    }
}

impl Privileges {
    /// Privileges a score author needs for the score to appear on leaderboards.
    pub const fn leaderboard_visible() -> Privileges {
        Privileges::PubliclyVisible
    }
}
