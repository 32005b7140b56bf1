//! Beam end-point resolution: двухфазный trace crosshair → muzzle
//!
//! Фаза 1: ray от камеры (crosshair) вдоль взгляда, дальность trace_range.
//! Фаза 2: если фаза 1 попала — второй ray от muzzle socket к hit point,
//! чтобы beam не прошивал геометрию между стволом и целью; берём
//! ближайший из двух hit'ов.
//!
//! Ничего не попало → beam уходит в far point crosshair trace (НЕ в muzzle).
//! Physics context недоступен → fallback far point + crosshair_evaluated=false;
//! выстрел всё равно производит все косметические эффекты.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::camera::CameraRig;
use crate::components::ViewRotation;
use crate::logger;

use super::weapon::{Weapon, WeaponFireIntent, WeaponFired};

/// Результат beam resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamEnd {
    /// Конечная точка beam (world space)
    pub end: Vec3,
    /// Entity в которую упёрся beam (None = far point)
    pub impact: Option<Entity>,
}

/// Чистая логика двухфазного trace
///
/// `cast(origin, dir, max_toi)` — обёртка над raycast'ом (в системе это
/// rapier context, в тестах — замыкание над фиктивной сценой).
pub fn beam_endpoint(
    crosshair_origin: Vec3,
    crosshair_dir: Vec3,
    trace_range: f32,
    muzzle: Vec3,
    mut cast: impl FnMut(Vec3, Vec3, f32) -> Option<(Entity, f32)>,
) -> BeamEnd {
    // Фаза 1: crosshair trace
    let Some((crosshair_entity, toi)) = cast(crosshair_origin, crosshair_dir, trace_range) else {
        return BeamEnd {
            end: crosshair_origin + crosshair_dir * trace_range,
            impact: None,
        };
    };
    let crosshair_hit = crosshair_origin + crosshair_dir * toi;

    // Фаза 2: от muzzle к hit point (перекрывающая геометрия)
    let to_hit = crosshair_hit - muzzle;
    let distance = to_hit.length();
    if distance <= f32::EPSILON {
        return BeamEnd {
            end: crosshair_hit,
            impact: Some(crosshair_entity),
        };
    }
    let muzzle_dir = to_hit / distance;

    match cast(muzzle, muzzle_dir, distance) {
        // Что-то стоит между muzzle и целью → beam останавливается раньше
        Some((blocker, blocker_toi)) => BeamEnd {
            end: muzzle + muzzle_dir * blocker_toi,
            impact: Some(blocker),
        },
        None => BeamEnd {
            end: crosshair_hit,
            impact: Some(crosshair_entity),
        },
    }
}

/// System: WeaponFireIntent → beam resolution → WeaponFired
///
/// Crosshair ray стартует из camera eye (boom позади персонажа) вдоль
/// look direction. Собственный коллайдер стрелка исключается из обоих
/// trace'ов — ray проходит сквозь персонажа, стоящего перед камерой.
pub fn process_fire_intents(
    mut intents: EventReader<WeaponFireIntent>,
    rapier: ReadRapierContext,
    shooters: Query<(&Transform, &ViewRotation, &CameraRig, &Weapon)>,
    mut fired: EventWriter<WeaponFired>,
) {
    for intent in intents.read() {
        let Ok((transform, view, rig, weapon)) = shooters.get(intent.shooter) else {
            logger::log_warning(&format!(
                "Fire intent rejected: shooter {:?} has no weapon rig",
                intent.shooter
            ));
            continue;
        };

        let eye = rig.camera_eye(transform.translation, view);
        let look = view.look_dir();
        let muzzle = weapon.muzzle_world(transform.translation, view.body_rotation());

        // Physics context может отсутствовать (headless без rapier plugin) —
        // аналог invalid viewport: crosshair trace невыполним, но выстрел
        // всё равно идёт с fallback far point.
        let (beam, crosshair_evaluated) = match rapier.single() {
            Ok(context) => {
                let beam = beam_endpoint(eye, look, weapon.trace_range, muzzle, |origin, dir, max_toi| {
                    context.cast_ray(
                        origin,
                        dir,
                        max_toi,
                        true,
                        QueryFilter::default().exclude_collider(intent.shooter),
                    )
                });
                (beam, true)
            }
            Err(_) => (
                BeamEnd {
                    end: eye + look * weapon.trace_range,
                    impact: None,
                },
                false,
            ),
        };

        logger::log(&format!(
            "WeaponFired: shooter={:?} beam_end=({:.1}, {:.1}, {:.1}) impact={:?}",
            intent.shooter, beam.end.x, beam.end.y, beam.end.z, beam.impact
        ));

        fired.write(WeaponFired {
            shooter: intent.shooter,
            muzzle,
            beam_end: beam.end,
            impact: beam.impact,
            crosshair_evaluated,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hit_ends_at_far_point() {
        let origin = Vec3::new(0.0, 1.6, 3.0);
        let dir = Vec3::NEG_Z;
        let muzzle = Vec3::new(0.3, 1.4, -0.6);

        let beam = beam_endpoint(origin, dir, 1000.0, muzzle, |_, _, _| None);

        // Far point crosshair trace, не muzzle
        assert_eq!(beam.end, origin + dir * 1000.0);
        assert_eq!(beam.impact, None);
        assert!((beam.end - muzzle).length() > 900.0);
    }

    #[test]
    fn test_crosshair_hit_clear_muzzle_path() {
        let origin = Vec3::new(0.0, 1.6, 3.0);
        let dir = Vec3::NEG_Z;
        let muzzle = Vec3::new(0.0, 1.6, -0.5);
        let target = Entity::from_raw(7);

        // Фаза 1 попадает на toi=13 (z = -10), фаза 2 — чисто
        let mut phase = 0;
        let beam = beam_endpoint(origin, dir, 1000.0, muzzle, |_, _, _| {
            phase += 1;
            if phase == 1 { Some((target, 13.0)) } else { None }
        });

        assert_eq!(phase, 2);
        assert!((beam.end - Vec3::new(0.0, 1.6, -10.0)).length() < 1e-4);
        assert_eq!(beam.impact, Some(target));
    }

    #[test]
    fn test_intervening_geometry_shortens_beam() {
        let origin = Vec3::new(0.0, 1.6, 3.0);
        let dir = Vec3::NEG_Z;
        let muzzle = Vec3::new(0.0, 1.6, -0.5);
        let target = Entity::from_raw(7);
        let wall = Entity::from_raw(8);

        // Фаза 1: цель на z=-10; фаза 2: стена в 2м от muzzle
        let mut phase = 0;
        let beam = beam_endpoint(origin, dir, 1000.0, muzzle, |_, _, _| {
            phase += 1;
            if phase == 1 { Some((target, 13.0)) } else { Some((wall, 2.0)) }
        });

        // Beam упирается в стену (ближе), не в цель
        assert!((beam.end - Vec3::new(0.0, 1.6, -2.5)).length() < 1e-4);
        assert_eq!(beam.impact, Some(wall));
    }

    #[test]
    fn test_second_trace_runs_towards_crosshair_hit() {
        let origin = Vec3::new(0.0, 2.0, 5.0);
        let dir = Vec3::NEG_Z;
        let muzzle = Vec3::new(1.0, 1.0, 0.0);
        let target = Entity::from_raw(3);

        let mut second_origin = Vec3::ZERO;
        let mut second_dir = Vec3::ZERO;
        let mut phase = 0;
        beam_endpoint(origin, dir, 100.0, muzzle, |o, d, _| {
            phase += 1;
            if phase == 1 {
                Some((target, 10.0))
            } else {
                second_origin = o;
                second_dir = d;
                None
            }
        });

        let expected_hit = Vec3::new(0.0, 2.0, -5.0);
        assert_eq!(second_origin, muzzle);
        assert!((second_dir - (expected_hit - muzzle).normalize()).length() < 1e-6);
    }
}
