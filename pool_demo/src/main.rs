//! Pool demo: a turret firing projectiles that burst into explosions
//!
//! Runs a fixed number of simulated frames against the in-memory scene
//! world and logs how many objects the pools had to construct.
//!
//! Usage: `pool_demo [settings.toml|settings.ron]`

use pool_manager::foundation::logging;
use pool_manager::prelude::*;
use rand::Rng;

const FRAMES: u32 = 600;
const SHOTS_PER_FRAME: usize = 3;
const PROJECTILE_LIFETIME: std::ops::Range<u32> = 20..90;
const EXPLOSION_LIFETIME: u32 = 12;
const EXPLOSION_CHANCE: f64 = 0.35;
const STATS_INTERVAL: u32 = 120;
const ARENA_HALF_EXTENT: f32 = 200.0;

static PROJECTILE: ObjectClass = ObjectClass::new("Projectile", &ACTOR);
static EXPLOSION: ObjectClass = ObjectClass::new("Explosion", &ACTOR);
static HIT_RECORD: ObjectClass = ObjectClass::new("HitRecord", &OBJECT);

/// A pooled object and the frame it goes back to its pool
struct Timed {
    handle: PoolHandle,
    expires_at: u32,
}

fn load_settings() -> Result<PoolSettings, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(PoolSettings::load_from_file(&path)?),
        None => Ok(PoolSettings::default()),
    }
}

fn random_transform(rng: &mut impl Rng) -> Transform {
    Transform::from_position(Vec3::new(
        rng.gen_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
        rng.gen_range(0.0..50.0),
        rng.gen_range(-ARENA_HALF_EXTENT..ARENA_HALF_EXTENT),
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    logging::init_with_level(&settings.log_level);

    let mut pools = PoolManager::with_settings(settings);
    pools.register_factory(ActorFactory::new())?;
    pools.register_factory(ObjectFactory::new())?;
    for class in [&PROJECTILE, &EXPLOSION, &HIT_RECORD] {
        pools.register_class(class);
    }
    pools.initialize(SceneWorld::new())?;

    let mut rng = rand::thread_rng();
    let mut projectiles: Vec<Timed> = Vec::new();
    let mut explosions: Vec<Timed> = Vec::new();
    let mut hits = Vec::new();

    for frame in 0..FRAMES {
        for _ in 0..SHOTS_PER_FRAME {
            let handle = pools.take_from_pool(&PROJECTILE, &random_transform(&mut rng));
            projectiles.push(Timed {
                handle,
                expires_at: frame + rng.gen_range(PROJECTILE_LIFETIME),
            });
        }

        let (expired, alive): (Vec<_>, Vec<_>) = projectiles.drain(..).partition(|p| p.expires_at <= frame);
        projectiles = alive;

        for projectile in expired {
            let impact = pools
                .find_object(projectile.handle)
                .and_then(|object| pools.world()?.get(object))
                .map(|object| object.transform.clone());
            pools.return_to_pool(projectile.handle);

            if let Some(impact) = impact.filter(|_| rng.gen_bool(EXPLOSION_CHANCE)) {
                let handle = pools.take_from_pool_with_callbacks(
                    &EXPLOSION,
                    &impact,
                    SpawnCallbacks::none().on_post_spawned(|data| {
                        log::debug!("New explosion {:?} joined the pool as {}", data.object, data.handle);
                    }),
                );
                explosions.push(Timed {
                    handle,
                    expires_at: frame + EXPLOSION_LIFETIME,
                });
                hits.push(pools.take_from_pool(&HIT_RECORD, &Transform::identity()));
            }
        }

        explosions.retain(|explosion| {
            if explosion.expires_at <= frame {
                pools.return_to_pool(explosion.handle);
                false
            } else {
                true
            }
        });

        if frame % STATS_INTERVAL == 0 {
            let stats = pools.stats();
            log::info!(
                "Frame {}: {} active, {} pooled, {} constructed, {} reused",
                frame,
                stats.active_objects,
                stats.inactive_objects,
                stats.total_constructed,
                stats.total_reused
            );
            for hit in hits.drain(..) {
                pools.return_to_pool(hit);
            }
        }
    }

    let stats = pools.stats();
    for entry in &stats.per_class {
        log::info!("{}: {} active, {} inactive", entry.class, entry.active, entry.inactive);
    }
    log::info!(
        "Served {} takes with {} constructions",
        stats.total_constructed + stats.total_reused,
        stats.total_constructed
    );

    if let Some(world) = pools.deinitialize() {
        log::info!(
            "Scene constructed {} objects and destroyed {}, {} left",
            world.constructed_count(),
            world.destroyed_count(),
            world.len()
        );
    }

    Ok(())
}
