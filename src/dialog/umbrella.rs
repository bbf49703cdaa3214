//! Umbrella decision rule

/// Rain chances strictly above this fraction call for an umbrella
pub const UMBRELLA_THRESHOLD: f64 = 0.5;

/// Probability of precipitation as a fraction in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RainChance(f64);

impl RainChance {
    /// Clamps into range; NaN counts as no rain
    pub fn new(fraction: f64) -> Self {
        if fraction.is_nan() {
            Self(0.0)
        } else {
            Self(fraction.clamp(0.0, 1.0))
        }
    }

    pub fn from_percent(percent: f64) -> Self {
        Self::new(percent / 100.0)
    }

    pub fn fraction(self) -> f64 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    TakeUmbrella,
    NoUmbrella,
}

impl Advice {
    pub fn as_str(self) -> &'static str {
        match self {
            Advice::TakeUmbrella => "Take an umbrella",
            Advice::NoUmbrella => "Don't take an umbrella",
        }
    }
}

/// Pure threshold comparison, nothing else
pub fn decide(chance: RainChance) -> Advice {
    if chance.fraction() > UMBRELLA_THRESHOLD {
        Advice::TakeUmbrella
    } else {
        Advice::NoUmbrella
    }
}
