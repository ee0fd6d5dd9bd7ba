//! Target motion system.

use hecs::{Entity, World};
use rand::Rng;

use multilat_core::components::{Position, Velocity};
use multilat_core::{Bounds, ObjectId};

use crate::motion::RandomWalk;

/// Advance every target in `targets` by `dt` seconds.
///
/// A rejected update leaves that target where it was and is logged; the
/// remaining targets still move.
pub fn run<R: Rng + ?Sized>(
    world: &mut World,
    targets: &[Entity],
    dt: f64,
    bounds: &Bounds,
    motion: &RandomWalk,
    rng: &mut R,
) {
    for &entity in targets {
        let Ok((id, pos, vel)) =
            world.query_one_mut::<(&ObjectId, &mut Position, &mut Velocity)>(entity)
        else {
            continue;
        };
        if let Err(e) = motion.advance(&mut pos.0, &mut vel.0, dt, bounds, rng) {
            tracing::warn!(target_id = %id, error = %e, "target update rejected");
        }
    }
}
