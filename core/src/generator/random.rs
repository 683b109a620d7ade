use super::*;

/// Seeded, purely random placement. No cell is kept safe, so the player's first reveal can hit a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: BoardConfig) -> Board {
        use rand::prelude::*;

        let mut board = Board::new(config.size());
        let mut rng = SmallRng::seed_from_u64(self.seed);

        if let Err(err) = board.place_mines(config.mines(), &mut rng) {
            log::warn!(
                "Could not place {} mines on {} cells: {}",
                config.mines(),
                config.total_cells(),
                err
            );
        }
        board.calculate_numbers();

        log::debug!(
            "generated {:?} board with {} mines from seed {}",
            config.size(),
            board.mine_count(),
            self.seed
        );
        board
    }
}
