use crate::config::TowerKind;
use crate::world::TowerId;

/// Player commands, already translated from raw input.
#[derive(Clone, Debug)]
pub enum TdAction {
    /// Place a tower at the cell under the cursor position `(x, y)`.
    PlaceTower { x: f32, y: f32, kind: TowerKind },
    UpgradeTower { tower_id: TowerId },
    StartWave,
}
