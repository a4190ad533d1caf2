use rand::prelude::*;

use super::*;

/// Purely random placement: draws uniform coordinates and rejects the ones that
/// already hold a mine, until the requested count is reached.
#[derive(Debug)]
pub struct RandomMineGenerator<'r, R: ?Sized> {
    rng: &'r mut R,
}

impl<'r, R: Rng + ?Sized> RandomMineGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> MineGenerator for RandomMineGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let config = config.validate()?;

        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        let mut mines_placed: CellCount = 0;
        let mut draws: u32 = 0;

        // `mines < rows * cols`, so a free cell always remains.
        while mines_placed < config.mines {
            let coords: Coord2 = (
                self.rng.random_range(0..config.rows),
                self.rng.random_range(0..config.cols),
            );
            draws += 1;

            let cell = &mut mines[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} board in {} draws",
            mines_placed,
            config.rows,
            config.cols,
            draws
        );
        Ok(MineLayout::from_mine_mask(mines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;

    #[test]
    fn places_exact_mine_count_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);

        for config in [
            GameConfig::new(1, 2, 1),
            GameConfig::new(3, 3, 8),
            GameConfig::new(8, 8, 10),
            GameConfig::new(5, 17, 40),
            GameConfig::default(),
        ] {
            let layout = RandomMineGenerator::new(&mut rng).generate(config).unwrap();

            assert_eq!(layout.size(), config.size());
            assert_eq!(layout.mine_count(), config.mines);
            assert_eq!(layout.mine_coords().len(), config.mines as usize);
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let config = GameConfig::new(8, 8, 10);

        let first = RandomMineGenerator::new(&mut SmallRng::seed_from_u64(42))
            .generate(config)
            .unwrap();
        let second = RandomMineGenerator::new(&mut SmallRng::seed_from_u64(42))
            .generate(config)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_invalid_config() {
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            RandomMineGenerator::new(&mut rng).generate(GameConfig::new(2, 2, 4)),
            Err(GameError::InvalidConfiguration)
        );
    }
}
