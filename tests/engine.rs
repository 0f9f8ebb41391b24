//! 对局状态机集成测试

use rand::prelude::*;
use xiangqi_engine::{Color, EngineConfig, GameState, LayoutBook, MoveStatus, STANDARD};

fn random_notation(rng: &mut StdRng) -> String {
    let files = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I'];
    format!(
        "{:02}{}{:02}{}",
        rng.gen_range(1..=10),
        files[rng.gen_range(0..files.len())],
        rng.gen_range(1..=10),
        files[rng.gen_range(0..files.len())]
    )
}

#[test]
fn test_opening_scenario() {
    let mut game = GameState::from_source(LayoutBook::builtin(), &EngineConfig::default());
    assert_eq!(*game.layout(), *STANDARD);

    let status = game.make_move("03H03E");
    assert_eq!(status, MoveStatus::Ok);
    assert_eq!(status.code(), 0);
    assert_eq!(game.current_player(), Color::Black);

    assert!(game.recall_move());
    assert_eq!(game.current_player(), Color::Red);
    assert_eq!(game.layout()[7][7], 13);
    assert_eq!(game.layout()[7][4], 0);
    assert_eq!(game.last_move(), "");
    assert!(!game.recall_move());
}

#[test]
fn test_short_game_to_king_capture() {
    let mut game = GameState::standard();
    let moves = [
        ("03H03E", MoveStatus::Ok),      // 炮二平五
        ("07E06E", MoveStatus::Ok),      // 卒 5 进 1
        ("03E06E", MoveStatus::Capture), // 炮打中卒
        ("10B08C", MoveStatus::Ok),      // 马 8 进 7
        ("06E10E", MoveStatus::Rejected), // 无炮架不能打将
    ];
    for (notation, expected) in moves {
        assert_eq!(game.make_move(notation), expected, "{}", notation);
    }
    assert_eq!(game.current_player(), Color::Red);
    assert!(!game.is_game_over());
}

#[test]
fn test_random_notation_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = GameState::standard();
    let mut accepted = 0;

    for _ in 0..20_000 {
        if game.is_game_over() {
            break;
        }
        let notation = random_notation(&mut rng);
        let before = game.snapshot();
        let status = game.make_move(&notation);

        if !status.is_accepted() {
            assert_eq!(game.snapshot(), before, "rejected {} changed state", notation);
            continue;
        }

        accepted += 1;
        assert_eq!(game.current_player().number(), 3 - before.current_player);
        assert_eq!(game.last_move(), notation);

        if game.is_game_over() {
            assert!(!game.recall_move());
            break;
        }

        // 悔棋后恢复原局面，再走回去
        if rng.gen_bool(0.3) {
            assert!(game.recall_move());
            assert_eq!(game.layout(), &before.layout);
            assert_eq!(game.current_player().number(), before.current_player);
            assert_eq!(game.last_move(), "");
            assert!(!game.recall_move());
            assert_eq!(game.make_move(&notation), status);
        }
    }

    assert!(accepted > 0);
}
