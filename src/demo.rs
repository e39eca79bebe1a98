//! Seeded terrain and a walker that drives the mover
//!
//! Same seed, same terrain, same walk. Used by the binary and as a soak test
//! for the collision core.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY, JUMP_VELOCITY, MAX_FALL_SPEED, SIM_DT, TILE_SIZE, WALK_SPEED};
use crate::map::{GridMap, MapError, TileLayer, TileMap};
use crate::settings::MoverSettings;
use crate::sim::{CollisionObserver, CollisionState, MapMover, NoopObserver, Rect, TileKind};

const MIN_COLUMNS: i32 = 8;
const MIN_ROWS: i32 = 6;
/// Chance a column keeps the previous column's height
const FLAT_RUN_CHANCE: f64 = 0.5;
/// Chance a column starts a floating platform
const PLATFORM_CHANCE: f64 = 0.08;
/// Per grounded frame
const JUMP_CHANCE: f64 = 0.02;
const WALKER_SIZE: Vec2 = Vec2::new(12.0, 24.0);
const WALKER_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Terrain and run length for a demo walk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub seed: u64,
    pub columns: i32,
    pub rows: i32,
    pub frames: u32,
    /// Smooth single-tile height changes with slopes
    pub slopes: bool,
    /// Scatter one-way platforms above the ground
    pub one_way_platforms: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            columns: 64,
            rows: 16,
            frames: 1200,
            slopes: true,
            one_way_platforms: true,
        }
    }
}

/// Build a walled, floored heightmap terrain from `config.seed`
pub fn generate_terrain(config: &DemoConfig) -> Result<GridMap, MapError> {
    let columns = config.columns.max(MIN_COLUMNS);
    let rows = config.rows.max(MIN_ROWS);
    let mut rng = Pcg32::seed_from_u64(config.seed);
    let mut map = GridMap::new(columns, rows, TILE_SIZE, TILE_SIZE);

    // Row of the topmost solid cell per column
    let floor = rows - 1;
    let highest = rows / 2;
    let mut surface = Vec::with_capacity(columns as usize);
    let mut height = floor - 1;
    for _ in 0..columns {
        if !rng.random_bool(FLAT_RUN_CHANCE) {
            height = (height + rng.random_range(-1..=1)).clamp(highest, floor);
        }
        surface.push(height);
    }
    // Full-height walls keep the walker on the map
    surface[0] = 0;
    surface[(columns - 1) as usize] = 0;

    for (column, &top) in surface.iter().enumerate() {
        for row in top..rows {
            map.set_tile(column as i32, row, Some(TileKind::Flat))?;
        }
    }

    if config.slopes {
        let up = TileKind::slope_from_heights(TILE_SIZE, 0.0, TILE_SIZE);
        let down = TileKind::slope_from_heights(0.0, TILE_SIZE, TILE_SIZE);

        for column in 1..columns - 2 {
            let here = surface[column as usize];
            let next = surface[column as usize + 1];
            if next == here - 1 {
                place_slope(&mut map, column, next, up)?;
            } else if next == here + 1 {
                place_slope(&mut map, column + 1, here, down)?;
            }
        }
    }

    if config.one_way_platforms {
        let mut column = 2;
        while column < columns - 2 {
            if !rng.random_bool(PLATFORM_CHANCE) {
                column += 1;
                continue;
            }
            let row = surface[column as usize] - 3;
            let length = rng.random_range(2..=4);
            for c in column..(column + length).min(columns - 2) {
                if row >= 1 && row < surface[c as usize] - 1 && map.tile(c, row).is_none() {
                    map.set_tile(c, row, Some(TileKind::OneWayPlatform))?;
                }
            }
            column += length + 1;
        }
    }

    log::debug!("Generated {columns}x{rows} terrain from seed {}", config.seed);
    Ok(map)
}

/// A one-cell pit between two opposing slopes is filled in instead
fn place_slope(map: &mut GridMap, column: i32, row: i32, slope: TileKind) -> Result<(), MapError> {
    let kind = if map.tile(column, row).is_some() {
        TileKind::Flat
    } else {
        slope
    };
    map.set_tile(column, row, Some(kind))
}

/// What one walker frame ran into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkerStep {
    pub moved: Vec2,
    pub landed: bool,
    pub wall_bump: bool,
    pub ledge_bump: bool,
}

/// A box that walks until it hits a wall, then turns around. Jumps now and
/// then.
#[derive(Debug, Clone)]
pub struct Walker {
    pub bounds: Rect,
    pub velocity: Vec2,
    pub state: CollisionState,
    facing: f32,
    rng: Pcg32,
}

impl Walker {
    pub fn new(bounds: Rect, seed: u64) -> Self {
        Self {
            bounds,
            velocity: Vec2::ZERO,
            state: CollisionState::new(),
            facing: 1.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Drop a walker just above the ground in the third column
    pub fn spawn<M: TileMap + ?Sized>(map: &M, seed: u64) -> Self {
        let column = 2;
        let ground = (0..map.rows())
            .find(|&row| map.tile(column, row).is_some())
            .unwrap_or(map.rows());
        let bottom = map.tile_to_world_y(ground) - 4.0;
        let left = map.tile_to_world_x(column) + 2.0;
        Self::new(
            Rect::from_min_size(Vec2::new(left, bottom - WALKER_SIZE.y), WALKER_SIZE),
            seed,
        )
    }

    #[inline]
    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Advance one fixed frame
    pub fn step<M: TileMap + ?Sized>(&mut self, mover: &MapMover<'_, M>) -> WalkerStep {
        self.step_observed(mover, &mut NoopObserver)
    }

    pub fn step_observed<M: TileMap + ?Sized>(
        &mut self,
        mover: &MapMover<'_, M>,
        observer: &mut dyn CollisionObserver,
    ) -> WalkerStep {
        if self.state.below && self.rng.random_bool(JUMP_CHANCE) {
            self.velocity.y = -JUMP_VELOCITY;
        }
        self.velocity.x = self.facing * WALK_SPEED;
        self.velocity.y = (self.velocity.y + GRAVITY * SIM_DT).min(MAX_FALL_SPEED);

        let falling = self.velocity.y >= 0.0;
        let motion = self.velocity * SIM_DT;
        let (moved, state) =
            mover.test_collisions_observed(motion, self.bounds, self.state, observer);
        self.bounds.translate(moved);
        self.state = state;

        let wall_bump = (self.facing > 0.0 && state.right) || (self.facing < 0.0 && state.left);
        if wall_bump {
            self.facing = -self.facing;
        }
        if (state.below && self.velocity.y > 0.0) || (state.above && self.velocity.y < 0.0) {
            self.velocity.y = 0.0;
        }

        WalkerStep {
            moved,
            landed: state.became_grounded_this_frame,
            wall_bump,
            ledge_bump: falling && state.above,
        }
    }
}

/// Summary of a demo walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    pub frames: u32,
    pub landings: u32,
    pub wall_bumps: u32,
    pub ledge_bumps: u32,
    pub final_position: Vec2,
    /// Lowest point the walker's feet reached (largest Y)
    pub max_bottom: f32,
}

pub fn run(config: &DemoConfig, settings: &MoverSettings) -> Result<DemoReport, MapError> {
    run_observed(config, settings, &mut NoopObserver)
}

/// Generate the terrain and walk it for `config.frames` frames
pub fn run_observed(
    config: &DemoConfig,
    settings: &MoverSettings,
    observer: &mut dyn CollisionObserver,
) -> Result<DemoReport, MapError> {
    let map = generate_terrain(config)?;
    let mover = MapMover::new(&map, *settings);
    let mut walker = Walker::spawn(&map, config.seed ^ WALKER_STREAM);

    let mut report = DemoReport {
        frames: 0,
        landings: 0,
        wall_bumps: 0,
        ledge_bumps: 0,
        final_position: walker.bounds.min(),
        max_bottom: walker.bounds.bottom(),
    };

    for _ in 0..config.frames {
        let step = walker.step_observed(&mover, observer);
        report.frames += 1;
        report.landings += u32::from(step.landed);
        report.wall_bumps += u32::from(step.wall_bump);
        report.ledge_bumps += u32::from(step.ledge_bump);
        report.max_bottom = report.max_bottom.max(walker.bounds.bottom());
    }
    report.final_position = walker.bounds.min();

    log::info!(
        "Walked {} frames: {} landings, {} wall bumps, {} ledge bumps",
        report.frames,
        report.landings,
        report.wall_bumps,
        report.ledge_bumps
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileTransform;

    fn flat_config() -> DemoConfig {
        DemoConfig {
            slopes: false,
            one_way_platforms: false,
            frames: 3000,
            ..Default::default()
        }
    }

    #[test]
    fn test_terrain_is_walled_and_floored() {
        let config = DemoConfig::default();
        let map = generate_terrain(&config).unwrap();
        let floor = config.rows - 1;

        for column in 0..map.columns() {
            assert_eq!(map.tile(column, floor).map(|t| t.kind), Some(TileKind::Flat));
        }
        for row in 0..map.rows() {
            assert!(map.tile(0, row).is_some());
            assert!(map.tile(map.columns() - 1, row).is_some());
        }
    }

    #[test]
    fn test_slopes_rest_on_solid_ground() {
        let map = generate_terrain(&DemoConfig::default()).unwrap();
        let mut slopes = 0;
        for column in 0..map.columns() {
            for row in 0..map.rows() {
                if map.tile(column, row).is_some_and(|t| t.is_slope()) {
                    slopes += 1;
                    assert_eq!(map.tile(column, row + 1).map(|t| t.kind), Some(TileKind::Flat));
                }
            }
        }
        assert!(slopes > 0);
    }

    #[test]
    fn test_disabled_features_are_absent() {
        let map = generate_terrain(&flat_config()).unwrap();
        for column in 0..map.columns() {
            for row in 0..map.rows() {
                if let Some(tile) = map.tile(column, row) {
                    assert_eq!(tile.kind, TileKind::Flat);
                }
            }
        }
    }

    #[test]
    fn test_small_configs_are_clamped() {
        let config = DemoConfig {
            columns: 1,
            rows: 1,
            ..Default::default()
        };
        let map = generate_terrain(&config).unwrap();
        assert_eq!(map.columns(), MIN_COLUMNS);
        assert_eq!(map.rows(), MIN_ROWS);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same terrain and walk
        let config = DemoConfig {
            seed: 7,
            frames: 600,
            ..Default::default()
        };
        let settings = MoverSettings::default();

        let a = generate_terrain(&config).unwrap().to_json().unwrap();
        let b = generate_terrain(&config).unwrap().to_json().unwrap();
        assert_eq!(a, b);

        let first = run(&config, &settings).unwrap();
        let second = run(&config, &settings).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.frames, 600);
    }

    #[test]
    fn test_walker_never_sinks_below_floor() {
        let config = flat_config();
        let map = generate_terrain(&config).unwrap();
        let mover = MapMover::new(&map, MoverSettings::default());
        let mut walker = Walker::spawn(&map, 11);
        let floor_top = map.tile_to_world_y(config.rows - 1);
        let mut landed = false;

        for frame in 0..config.frames {
            let step = walker.step(&mover);
            landed |= step.landed;
            assert!(
                walker.bounds.bottom() <= floor_top,
                "frame {frame}: bottom {} below floor {floor_top}",
                walker.bounds.bottom()
            );
            assert!(walker.bounds.left() >= map.tile_to_world_x(1) - 2.0);
            assert!(walker.bounds.right() <= map.tile_to_world_x(map.columns() - 1) + 2.0);
        }
        assert!(landed);
    }

    #[test]
    fn test_walker_lands_after_spawn() {
        let map = generate_terrain(&flat_config()).unwrap();
        let mover = MapMover::new(&map, MoverSettings::default());
        let mut walker = Walker::spawn(&map, 3);

        let landed = (0..30).any(|_| walker.step(&mover).landed);
        assert!(landed);
        assert!(walker.state.below);
    }

    #[test]
    fn test_walker_turns_at_walls() {
        // Flat corridor between two walls taller than any jump
        let map = GridMap::parse(
            "\
#......#
#......#
#......#
#......#
#......#
#......#
#......#
########",
            TILE_SIZE,
            TILE_SIZE,
        )
        .unwrap();
        let mover = MapMover::new(&map, MoverSettings::default());
        let mut walker = Walker::new(Rect::new(20.0, 88.0, 12.0, 24.0), 0);
        let bumps = (0..400).filter(|_| walker.step(&mover).wall_bump).count();
        assert!(bumps >= 2);
    }
}
