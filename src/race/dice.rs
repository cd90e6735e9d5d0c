//! Dice rolling and the randomness capability used by training.

use rand::Rng;

/// Source of the random draws consumed by training.
///
/// Every `rand::Rng` implements this, so a seeded `StdRng` is the normal
/// source. Tests substitute a scripted sequence to drive episodes exactly.
pub trait Randomness {
    /// Roll a single die, uniform in `1..=n_sides`.
    fn roll_die(&mut self, n_sides: u32) -> u32;

    /// Draw a float uniform in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<R: Rng> Randomness for R {
    fn roll_die(&mut self, n_sides: u32) -> u32 {
        self.gen_range(1..=n_sides)
    }

    fn unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// A fixed, repeating sequence of draws.
///
/// Die faces and unit draws are served from two independent scripts, each
/// cycling back to its start when exhausted. Faces are clamped into
/// `1..=n_sides`; an empty face script rolls 1 and an empty unit script
/// draws 0.0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    faces: Vec<u32>,
    units: Vec<f64>,
    next_face: usize,
    next_unit: usize,
}

impl ScriptedDraws {
    /// Create a source that replays `faces` for die rolls and `units` for unit draws.
    pub fn new(faces: Vec<u32>, units: Vec<f64>) -> Self {
        Self {
            faces,
            units,
            next_face: 0,
            next_unit: 0,
        }
    }
}

impl Randomness for ScriptedDraws {
    fn roll_die(&mut self, n_sides: u32) -> u32 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next_face % self.faces.len()];
        self.next_face += 1;
        face.clamp(1, n_sides.max(1))
    }

    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let x = self.units[self.next_unit % self.units.len()];
        self.next_unit += 1;
        x
    }
}

/// Sum of `n_dice` independent rolls of an `n_sides`-sided die.
///
/// The result lies in `[n_dice, n_dice * n_sides]`. It is summed as `u64`,
/// which holds `u32::MAX` dice of `u32::MAX` sides.
pub fn roll<R: Randomness + ?Sized>(rng: &mut R, n_sides: u32, n_dice: u32) -> u64 {
    (0..n_dice).map(|_| u64::from(rng.roll_die(n_sides))).sum()
}
