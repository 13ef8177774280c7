//! Corrective edits derived from validation.
//!
//! These are the only operations in the workspace that mutate tooth
//! states. Locked states are never changed.

use std::collections::{BTreeMap, BTreeSet};

use dental_collision::{PosedTooth, detect_all_collisions_with};
use dental_types::{ToothId, ToothNode, ToothState, Vector3, VectorExt};
use tracing::{debug, info, warn};

use crate::ValidationParams;

/// Pushes colliding teeth apart in a single pass.
///
/// Each colliding pair is separated along its correction vector by the
/// penetration depth plus `min_proximal_distance`. The push is split
/// evenly when both teeth are unlocked and applied entirely to the
/// unlocked tooth otherwise; pairs with both teeth locked are left alone.
/// Missing states are created. Returns the ids that moved, sorted.
///
/// Each pair is pushed once, even when `params.broad_phase` reports raw
/// candidate multiplicity.
///
/// One pass may create new contacts further along the arch; run
/// validation again to confirm.
pub fn snap_apart(
    teeth: &BTreeMap<ToothId, ToothNode>,
    states: &mut BTreeMap<ToothId, ToothState>,
    params: &ValidationParams,
) -> Vec<ToothId> {
    let ids: Vec<ToothId> = teeth.keys().copied().collect();
    let pushes: Vec<(ToothId, ToothId, Vector3<f64>)> = {
        let posed: Vec<PosedTooth<'_>> = teeth
            .iter()
            .map(|(id, node)| PosedTooth::new(node, states.get(id)))
            .collect();
        let broad_phase = params.broad_phase.with_deduplicate(true);
        detect_all_collisions_with(&posed, &broad_phase)
            .into_iter()
            .map(|pair| {
                let push = pair.result.correction.normalize_or_zero()
                    * (pair.result.penetration_depth + params.min_proximal_distance);
                (ids[pair.first], ids[pair.second], push)
            })
            .collect()
    };

    let locked = |states: &BTreeMap<ToothId, ToothState>, id: &ToothId| {
        states.get(id).is_some_and(|s| s.locked)
    };

    let mut moved = BTreeSet::new();
    for (a, b, push) in pushes {
        let moves: Vec<(ToothId, Vector3<f64>)> = match (locked(states, &a), locked(states, &b)) {
            (false, false) => vec![(a, push * 0.5), (b, -push * 0.5)],
            (false, true) => vec![(a, push)],
            (true, false) => vec![(b, -push)],
            (true, true) => {
                warn!("Cannot separate {a} and {b}: both teeth are locked");
                continue;
            }
        };
        for (id, delta) in moves {
            if states.entry(id).or_default().translate(delta) {
                debug!(
                    "Snapped {id} by ({:.3}, {:.3}, {:.3})",
                    delta.x, delta.y, delta.z
                );
                moved.insert(id);
            }
        }
    }

    if !moved.is_empty() {
        info!(moved = moved.len(), "Snapping pass complete");
    }
    moved.into_iter().collect()
}

/// Copies the mirrored state of `id` onto its contralateral tooth.
///
/// A missing source state mirrors the identity. Returns `false` and
/// changes nothing when the counterpart is locked.
pub fn mirror_to_counterpart(states: &mut BTreeMap<ToothId, ToothState>, id: ToothId) -> bool {
    let target = id.counterpart();
    if states.get(&target).is_some_and(|s| s.locked) {
        warn!("Cannot mirror {id} onto {target}: target is locked");
        return false;
    }
    let mirrored = states.get(&id).copied().unwrap_or_default().mirrored();
    states.insert(target, mirrored);
    true
}
