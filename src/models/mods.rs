use bitflags::bitflags;

bitflags! {
    /// Modifier bitmask as sent by the osu! client.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Mods: u32 {
        const NoMod = 0;
        const NoFail = 1 << 0;
        const Easy = 1 << 1;
        const TouchDevice = 1 << 2;
        const Hidden = 1 << 3;
        const HardRock = 1 << 4;
        const SuddenDeath = 1 << 5;
        const DoubleTime = 1 << 6;
        const Relax = 1 << 7;
        const HalfTime = 1 << 8;
        const Nightcore = 1 << 9;
        const Flashlight = 1 << 10;
        const Autoplay = 1 << 11;
        const SpunOut = 1 << 12;
        const Autopilot = 1 << 13;
        const Perfect = 1 << 14;
        const Key4 = 1 << 15;
        const Key5 = 1 << 16;
        const Key6 = 1 << 17;
        const Key7 = 1 << 18;
        const Key8 = 1 << 19;
        const FadeIn = 1 << 20;
        const Random = 1 << 21;
        const Cinema = 1 << 22;
        const Target = 1 << 23;
        const Key9 = 1 << 24;
        const KeyCoop = 1 << 25;
        const Key1 = 1 << 26;
        const Key3 = 1 << 27;
        const Key2 = 1 << 28;
        const ScoreV2 = 1 << 29;
        const Mirror = 1 << 30;
    }
}

impl Mods {
    /// Clients send the mask as a signed integer; every bit is kept as-is.
    pub const fn from_client(value: i32) -> Self {
        Self::from_bits_retain(value as u32)
    }

    pub fn has_any(&self, other: Mods) -> bool {
        self.intersects(other)
    }
}
