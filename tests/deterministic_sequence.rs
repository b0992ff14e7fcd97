use classic_snake::config::{GridModel, HIGH_SCORE_KEY};
use classic_snake::game::{EndReason, GameEngine, GameStatus, SessionLayout, TickOutcome};
use classic_snake::input::Direction;
use classic_snake::score::{MemoryStore, ScoreStore};
use classic_snake::snake::{Position, Snake};
use proptest::prelude::*;

fn pos(x: i32, y: i32) -> Position {
    Position { x, y }
}

fn body(engine: &GameEngine<MemoryStore>) -> Vec<Position> {
    engine.snake().segments().copied().collect()
}

#[test]
fn stepwise_food_collection_turn_and_wall_collision() {
    let mut engine = GameEngine::from_layout(
        GridModel::default(),
        SessionLayout {
            snake: Snake::from_segments([pos(8, 10), pos(7, 10), pos(6, 10)]),
            direction: Direction::Right,
            food: Some(pos(9, 10)),
        },
        42,
        MemoryStore::new(),
    );

    assert_eq!(engine.tick(), TickOutcome::Ate { new_high_score: true });
    assert_eq!(body(&engine), vec![pos(9, 10), pos(8, 10), pos(7, 10), pos(6, 10)]);
    assert_eq!(engine.score(), 10);
    assert_eq!(engine.store().get(HIGH_SCORE_KEY).unwrap(), Some(10));

    assert!(engine.request_direction(Direction::Up));
    let mut ticks = 0;
    while engine.status() == GameStatus::Running {
        engine.tick();
        ticks += 1;
        assert!(ticks <= 11, "snake should reach the top wall");
    }

    assert_eq!(engine.end_reason(), Some(EndReason::WallCollision));
    assert_eq!(engine.snake().head(), pos(9, 0));
    assert_eq!(engine.high_score(), engine.store().get(HIGH_SCORE_KEY).unwrap().unwrap());
}

#[test]
fn full_session_cycle_through_controls() {
    let mut engine = GameEngine::new_with_seed(GridModel::default(), 9, MemoryStore::new());
    assert_eq!(engine.status(), GameStatus::Idle);

    engine.toggle();
    engine.tick();
    assert_eq!(body(&engine)[0], pos(9, 10));

    engine.toggle();
    assert_eq!(engine.status(), GameStatus::Paused);
    assert_eq!(engine.tick(), TickOutcome::Ignored);

    // A turn queued while paused applies on the first tick after resuming.
    assert!(engine.request_direction(Direction::Down));
    engine.toggle();
    engine.tick();
    assert_eq!(engine.snake().head(), pos(9, 11));

    engine.reset();
    assert_eq!(engine.status(), GameStatus::Idle);
    engine.start();
    assert_eq!(engine.snake().head(), pos(8, 10));
}

proptest! {
    #[test]
    fn ticks_keep_every_movement_invariant(
        seed in any::<u64>(),
        turns in proptest::collection::vec(0u8..5, 1..200),
    ) {
        let store = MemoryStore::new();
        let mut engine = GameEngine::new_with_seed(GridModel::default(), seed, store);
        engine.start();
        let mut best = engine.high_score();

        for turn in turns {
            let requested = match turn {
                0 => Some(Direction::Up),
                1 => Some(Direction::Down),
                2 => Some(Direction::Left),
                3 => Some(Direction::Right),
                _ => None,
            };
            if let Some(direction) = requested {
                let accepted = engine.request_direction(direction);
                prop_assert_eq!(accepted, direction != engine.direction().opposite());
            }

            let head = engine.snake().head();
            let length = engine.snake().len();
            let food = engine.food();
            let expected = head.step(engine.pending_direction());

            match engine.tick() {
                TickOutcome::Moved => {
                    prop_assert_eq!(engine.snake().head(), expected);
                    prop_assert_eq!(engine.snake().len(), length);
                }
                TickOutcome::Ate { .. } => {
                    prop_assert_eq!(Some(engine.snake().head()), food);
                    prop_assert_eq!(engine.snake().len(), length + 1);
                }
                TickOutcome::Ended(_) => break,
                TickOutcome::Ignored => prop_assert!(false, "tick ignored while running"),
            }

            if let Some(food) = engine.food() {
                prop_assert!(!engine.snake().occupies(food));
            }
            prop_assert!(engine.high_score() >= best);
            prop_assert!(engine.high_score() >= engine.score());
            best = engine.high_score();
        }
    }
}
