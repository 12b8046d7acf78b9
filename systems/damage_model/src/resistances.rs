use path_defence_core::{CategoryTag, DamageType};

type Row = [f64; DamageType::COUNT];

// Column order: physical, fire, ice, lightning, poison, magic, holy.
const STANDARD_ROWS: [Row; CategoryTag::COUNT] = [
    // basic
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    // swarm
    [1.2, 1.4, 1.0, 1.1, 1.2, 0.9, 1.0],
    // fast
    [1.0, 1.0, 1.3, 1.2, 1.0, 1.0, 1.0],
    // armored
    [0.5, 1.0, 1.0, 1.5, 0.7, 1.3, 1.0],
    // flying
    [1.3, 0.9, 1.0, 1.4, 1.0, 1.0, 1.0],
    // undead
    [0.8, 1.4, 0.6, 1.0, 0.0, 1.0, 1.8],
    // construct
    [0.6, 0.9, 1.0, 1.8, 0.0, 1.1, 0.8],
    // tank
    [0.7, 1.0, 1.1, 1.0, 1.2, 1.0, 1.0],
    // elemental
    [0.8, 0.3, 1.5, 0.6, 0.0, 1.4, 1.0],
    // aquatic
    [1.0, 0.4, 0.7, 1.8, 1.0, 1.0, 1.0],
    // beast
    [1.2, 1.3, 0.9, 1.0, 1.3, 1.0, 0.8],
    // boss
    [0.9, 0.9, 0.9, 0.9, 0.9, 0.9, 0.9],
];

/// Per-tag damage multipliers, one column per [`DamageType`].
///
/// Values above 1 increase damage taken, values below 1 reduce it and 0 makes
/// the tag immune to that damage type.
#[derive(Clone, Debug, PartialEq)]
pub struct ResistanceTable {
    rows: [Row; CategoryTag::COUNT],
}

impl ResistanceTable {
    /// Table shipped with the game.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            rows: STANDARD_ROWS,
        }
    }

    /// Table in which every tag takes normal damage from every type.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            rows: [[1.0; DamageType::COUNT]; CategoryTag::COUNT],
        }
    }

    /// Returns a copy of the table with a single entry overridden.
    ///
    /// Negative and non-finite values are clamped to 0.
    #[must_use]
    pub fn with_multiplier(
        mut self,
        tag: CategoryTag,
        damage: DamageType,
        multiplier: f64,
    ) -> Self {
        let sanitized = if multiplier.is_finite() {
            multiplier.max(0.0)
        } else {
            0.0
        };
        self.rows[tag.index()][damage.index()] = sanitized;
        self
    }

    /// Multiplier applied when `damage` hits a unit tagged `tag`.
    #[must_use]
    pub const fn multiplier(&self, tag: CategoryTag, damage: DamageType) -> f64 {
        self.rows[tag.index()][damage.index()]
    }
}

impl Default for ResistanceTable {
    fn default() -> Self {
        Self::standard()
    }
}
