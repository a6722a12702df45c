//! # Cavern Generation
//!
//! Places the fountain, the entrance and the hazards on an empty grid.
//!
//! The algorithm is deliberately simple:
//! 1. The fountain goes on any room
//! 2. The entrance goes on a random wall (north, east, south or west)
//! 3. Pits, maelstroms and amaroks are placed by rejection sampling onto empty rooms

use crate::{
    FountainError, FountainResult, GenerationConfig, Generator, MapLayout, Position, RoomType,
    World,
};
use rand::rngs::StdRng;
use rand::Rng;

/// Generator for a single cavern level.
#[derive(Debug, Clone, Default)]
pub struct CavernGenerator;

impl CavernGenerator {
    /// Creates a new cavern generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use fountain::{CavernGenerator, GenerationConfig, Generator, RoomType};
    /// use fountain::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::for_testing(7);
    /// let mut rng = create_rng(&config);
    /// let world = CavernGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(world.count(RoomType::Fountain), 1);
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Builds a cavern for an arbitrary layout.
    ///
    /// Fails if the layout is too small to hold the fountain, the entrance and
    /// every requested hazard.
    pub fn generate_layout(&self, layout: &MapLayout, rng: &mut StdRng) -> FountainResult<World> {
        if layout.rows == 0 || layout.columns == 0 {
            return Err(FountainError::InvalidLayout(
                "the cavern needs at least one row and one column".to_string(),
            ));
        }
        if layout.area() < layout.hazard_count() + 2 {
            return Err(FountainError::InvalidLayout(format!(
                "a {}x{} cavern cannot hold {} hazards plus the fountain and entrance",
                layout.rows,
                layout.columns,
                layout.hazard_count()
            )));
        }

        let fountain = random_room(layout, rng);
        let entrance = loop {
            let candidate = random_wall_room(layout, rng);
            if candidate != fountain {
                break candidate;
            }
        };
        log::debug!("fountain at {}, entrance at {}", fountain, entrance);

        let mut world = World::with_landmarks(layout.rows, layout.columns, fountain, entrance)?;

        place_hazards(&mut world, layout, layout.pits, RoomType::Pit, rng);
        place_hazards(&mut world, layout, layout.maelstroms, RoomType::Maelstrom, rng);
        place_hazards(&mut world, layout, layout.amaroks, RoomType::Amarok, rng);
        log::debug!("generated cavern:\n{}", world);

        Ok(world)
    }
}

impl Generator<World> for CavernGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> FountainResult<World> {
        let world = self.generate_layout(&config.layout(), rng)?;
        self.validate(&world, config)?;
        Ok(world)
    }

    fn validate(&self, world: &World, config: &GenerationConfig) -> FountainResult<()> {
        world.validate()?;

        let layout = config.layout();
        if world.rows() != layout.rows || world.columns() != layout.columns {
            return Err(FountainError::InvalidLayout(format!(
                "generated {}x{} cavern for a {} map",
                world.rows(),
                world.columns(),
                config.map_size
            )));
        }

        let expected = [
            (RoomType::Pit, layout.pits),
            (RoomType::Maelstrom, layout.maelstroms),
            (RoomType::Amarok, layout.amaroks),
        ];
        for (kind, count) in expected {
            if world.count(kind) != count {
                return Err(FountainError::InvalidLayout(format!(
                    "expected {} {:?} rooms, found {}",
                    count,
                    kind,
                    world.count(kind)
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "CavernGenerator"
    }
}

fn random_room(layout: &MapLayout, rng: &mut StdRng) -> Position {
    Position::new(
        rng.gen_range(0..layout.rows) as i32,
        rng.gen_range(0..layout.columns) as i32,
    )
}

/// Picks a wall uniformly, then a uniformly random room along it.
fn random_wall_room(layout: &MapLayout, rng: &mut StdRng) -> Position {
    let last_row = layout.rows as i32 - 1;
    let last_column = layout.columns as i32 - 1;
    match rng.gen_range(0..4) {
        0 => Position::new(0, rng.gen_range(0..layout.columns) as i32),
        1 => Position::new(rng.gen_range(0..layout.rows) as i32, last_column),
        2 => Position::new(last_row, rng.gen_range(0..layout.columns) as i32),
        _ => Position::new(rng.gen_range(0..layout.rows) as i32, 0),
    }
}

/// Drops `count` hazards of `kind` onto empty rooms, redrawing on collision.
///
/// The caller has already checked there is room for every hazard.
fn place_hazards(
    world: &mut World,
    layout: &MapLayout,
    count: usize,
    kind: RoomType,
    rng: &mut StdRng,
) {
    let mut placed = 0;
    while placed < count {
        let pos = random_room(layout, rng);
        if world.room_type(pos) != Some(RoomType::Empty) {
            log::trace!("{:?} draw at {} collided, retrying", kind, pos);
            continue;
        }
        world.set_room(pos, kind);
        placed += 1;
    }
    log::debug!("placed {} {:?} room(s)", count, kind);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;
    use crate::MapSize;

    #[test]
    fn test_generated_worlds_hold_invariants() {
        let generator = CavernGenerator::new();
        for size in [MapSize::Small, MapSize::Medium, MapSize::Large] {
            for seed in 0..200 {
                let config = GenerationConfig::new(seed, size);
                let mut rng = create_rng(&config);
                let world = generator.generate(&config, &mut rng).unwrap();
                let layout = size.layout();

                assert_eq!(world.count(RoomType::Fountain), 1);
                assert_eq!(world.count(RoomType::Entrance), 1);
                assert_eq!(world.count(RoomType::Pit), layout.pits);
                assert_eq!(world.count(RoomType::Maelstrom), layout.maelstroms);
                assert_eq!(world.count(RoomType::Amarok), layout.amaroks);
                assert_eq!(world.count(RoomType::DeadAmarok), 0);
                assert!(world.is_on_border(world.entrance_location()));
                assert_ne!(world.entrance_location(), world.fountain_location());
                assert!(!world.is_fountain_enabled());
            }
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let generator = CavernGenerator::new();
        let config = GenerationConfig::new(4242, MapSize::Large);
        let a = generator.generate(&config, &mut create_rng(&config)).unwrap();
        let b = generator.generate(&config, &mut create_rng(&config)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entrance_uses_every_wall() {
        let generator = CavernGenerator::new();
        let mut walls = [false; 4];
        for seed in 0..200 {
            let config = GenerationConfig::new(seed, MapSize::Large);
            let world = generator.generate(&config, &mut create_rng(&config)).unwrap();
            let e = world.entrance_location();
            walls[0] |= e.row == 0;
            walls[1] |= e.column == 7;
            walls[2] |= e.row == 7;
            walls[3] |= e.column == 0;
        }
        assert_eq!(walls, [true; 4]);
    }

    #[test]
    fn test_overfull_layout_is_rejected() {
        let layout = MapLayout::new(2, 2, 1, 1, 0);
        let mut rng = create_rng(&GenerationConfig::default());
        assert!(CavernGenerator::new().generate_layout(&layout, &mut rng).is_ok());

        let layout = MapLayout::new(2, 2, 2, 1, 0);
        assert!(matches!(
            CavernGenerator::new().generate_layout(&layout, &mut rng),
            Err(FountainError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(CavernGenerator::new().generator_type(), "CavernGenerator");
    }
}
