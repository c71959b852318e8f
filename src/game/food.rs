use super::snake::Snake;
use crate::geometry::Bounds;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;

/// Pick a cell for the food uniformly at random from the cells in the food
/// region of `bounds` that `snake` does not occupy.  Returns `None` if every
/// such cell is taken.
pub(crate) fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: Bounds,
    snake: &Snake,
) -> Option<Position> {
    bounds
        .food_positions()
        .filter(|&p| !snake.occupies(p))
        .choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Size;
    use std::collections::{HashMap, VecDeque};

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[test]
    fn never_on_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let bounds = Bounds::from(Size::new(6, 6));
        let snake = Snake {
            cells: VecDeque::from([
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ]),
        };
        for _ in 0..500 {
            let food = spawn_food(&mut rng, bounds, &snake).unwrap();
            assert!(!snake.occupies(food), "food placed on snake at {food:?}");
            assert!(food.x < 5 && food.y < 5, "food outside region at {food:?}");
        }
    }

    #[test]
    fn only_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let bounds = Bounds::from(Size::new(3, 3));
        let snake = Snake {
            cells: VecDeque::from([
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(1, 1),
            ]),
        };
        assert_eq!(
            spawn_food(&mut rng, bounds, &snake),
            Some(Position::new(0, 1))
        );
    }

    #[test]
    fn no_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let bounds = Bounds::from(Size::new(2, 2));
        let snake = Snake::new(Position::new(0, 0));
        assert_eq!(spawn_food(&mut rng, bounds, &snake), None);
    }

    #[test]
    fn roughly_uniform() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let bounds = Bounds::from(Size::new(3, 3));
        let snake = Snake::new(Position::new(0, 0));
        let mut counts = HashMap::new();
        for _ in 0..3000 {
            let food = spawn_food(&mut rng, bounds, &snake).unwrap();
            *counts.entry(food).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), 3);
        for (pos, qty) in counts {
            assert!((800..1200).contains(&qty), "{pos:?} chosen {qty} times");
        }
    }
}
