//! Turn controller state machine tests

use shifting_shapes::core::{
    AiOutcome, ControllerConfig, Effect, Grid, IgnoreReason, ObservedEvent, RecordingObserver,
    SavedShape, TurnController, UNEXPECTED_DATA_STATUS,
};
use shifting_shapes::types::{Cell, GameMode, Player, TurnOwner};

fn shift_config() -> ControllerConfig {
    ControllerConfig {
        idle_start_countdown_ms: None,
        ..ControllerConfig::default()
    }
}

fn build_config() -> ControllerConfig {
    ControllerConfig {
        mode: GameMode::Build,
        idle_start_countdown_ms: None,
        ..ControllerConfig::default()
    }
}

fn scheduled_token(effects: &[Effect]) -> u64 {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::ScheduleCountdown { token, .. } => Some(*token),
            _ => None,
        })
        .expect("no countdown scheduled")
}

fn requested_round(effects: &[Effect]) -> (u64, Grid) {
    effects
        .iter()
        .find_map(|e| match e {
            Effect::RequestAi { round, board } => Some((*round, board.clone())),
            _ => None,
        })
        .expect("no ai request")
}

/// Move the left end of the opening line up next to its neighbour.
fn commit_move(game: &mut TurnController) -> Vec<Effect> {
    game.click(Cell::new(0, 5));
    game.click(Cell::new(1, 6)).to_vec()
}

#[test]
fn test_idle_start_countdown() {
    let mut game = TurnController::new(ControllerConfig::default());
    let effects = game.start();
    assert_eq!(
        effects.as_slice(),
        &[Effect::ScheduleCountdown {
            token: 1,
            after_ms: 5000
        }]
    );
    assert_eq!(game.turn_owner(), TurnOwner::PendingAi);
}

#[test]
fn test_full_turn_cycle() {
    let mut game = TurnController::new(shift_config());
    assert!(game.start().is_empty());
    assert_eq!(game.turn_owner(), TurnOwner::User);

    let effects = commit_move(&mut game);
    assert_eq!(
        effects,
        vec![Effect::ScheduleCountdown {
            token: 1,
            after_ms: 2000
        }]
    );
    assert_eq!(game.turn_owner(), TurnOwner::PendingAi);

    let effects = game.countdown_elapsed(1);
    let (round, board) = requested_round(&effects);
    assert_eq!(game.turn_owner(), TurnOwner::Ai);
    assert_eq!(board, game.grid());

    game.ai_completed(
        round,
        AiOutcome::Failed {
            message: "AI request failed".to_string(),
        },
    );
    assert_eq!(game.turn_owner(), TurnOwner::User);
    assert_eq!(game.status(), Some("AI request failed"));
    assert!(game.is_shape_connected());
}

#[test]
fn test_second_action_restarts_countdown() {
    let mut game = TurnController::new(shift_config());
    let first = scheduled_token(&commit_move(&mut game));

    // Move the same tile back down beside the line.
    game.click(Cell::new(1, 6));
    let second = scheduled_token(&game.click(Cell::new(1, 4)));
    assert!(second > first);

    // The superseded timer fires late and is ignored.
    assert!(game.countdown_elapsed(first).is_empty());
    assert_eq!(game.turn_owner(), TurnOwner::PendingAi);

    let effects = game.countdown_elapsed(second);
    requested_round(&effects);
    assert_eq!(game.turn_owner(), TurnOwner::Ai);
}

#[test]
fn test_clicks_during_ai_turn_are_ignored() {
    let recorder = RecordingObserver::new();
    let mut game = TurnController::with_observer(shift_config(), Box::new(recorder.clone()));
    game.trigger_ai();
    assert_eq!(game.turn_owner(), TurnOwner::Ai);

    let before = game.tiles().clone();
    assert!(game.click(Cell::new(0, 5)).is_empty());
    assert_eq!(game.tiles(), &before);
    assert_eq!(game.selected(), None);

    assert!(recorder.events().contains(&ObservedEvent::Ignored {
        cell: Some(Cell::new(0, 5)),
        reason: IgnoreReason::AiTurn,
    }));
}

#[test]
fn test_only_one_round_in_flight() {
    let recorder = RecordingObserver::new();
    let mut game = TurnController::with_observer(shift_config(), Box::new(recorder.clone()));
    let (round, _) = requested_round(&game.trigger_ai());

    assert!(game.trigger_ai().is_empty());
    assert!(game.countdown_elapsed(1).is_empty());
    assert!(recorder.events().contains(&ObservedEvent::AiRoundDropped));

    // A completion for a round that was never started changes nothing.
    assert!(game
        .ai_completed(
            round + 1,
            AiOutcome::Board {
                board: Grid::empty(10),
                predict: Vec::new(),
            },
        )
        .is_empty());
    assert_eq!(game.turn_owner(), TurnOwner::Ai);
    assert_eq!(game.tiles().len(), 10);

    let unchanged = game.grid();
    game.ai_completed(
        round,
        AiOutcome::Board {
            board: unchanged,
            predict: Vec::new(),
        },
    );
    assert_eq!(game.turn_owner(), TurnOwner::User);
    assert_eq!(game.status(), Some("AI added 0 tile(s)"));

    // Late duplicate of the finished round.
    let effects = game.ai_completed(
        round,
        AiOutcome::Failed {
            message: "late".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(recorder
        .events()
        .contains(&ObservedEvent::StaleCompletion { round }));
}

#[test]
fn test_manual_trigger_cancels_pending_countdown() {
    let mut game = TurnController::new(shift_config());
    let token = scheduled_token(&commit_move(&mut game));

    let effects = game.trigger_ai();
    assert_eq!(effects.first(), Some(&Effect::CancelCountdown));
    requested_round(&effects);

    assert!(game.countdown_elapsed(token).is_empty());
    assert_eq!(game.turn_owner(), TurnOwner::Ai);
}

#[test]
fn test_ai_board_is_trusted_state_in_shift_mode() {
    let mut game = TurnController::new(shift_config());
    let (round, _) = requested_round(&game.trigger_ai());

    // The AI slides the right end of the line up.
    let mut cells = game.tiles().cells();
    cells.retain(|&c| c != Cell::new(9, 5));
    cells.push(Cell::new(9, 6));
    let board = Grid::from_cells(cells, 10);

    game.ai_completed(
        round,
        AiOutcome::Board {
            board: board.clone(),
            predict: vec!["line".to_string(), "hook".to_string()],
        },
    );

    assert_eq!(game.tiles().len(), 10);
    assert!(game.tiles().is_occupied(Cell::new(9, 6)));
    assert!(!game.tiles().is_occupied(Cell::new(9, 5)));
    assert!(game.tiles().iter().all(|t| t.owner.is_none()));
    assert_eq!(game.status(), Some("line, hook"));
    assert_eq!(game.predict_board(), board);
}

#[test]
fn test_malformed_board_leaves_tiles_alone() {
    let mut game = TurnController::new(shift_config());
    let (round, _) = requested_round(&game.trigger_ai());
    let before = game.tiles().clone();

    game.ai_completed(
        round,
        AiOutcome::Board {
            board: Grid::empty(4),
            predict: Vec::new(),
        },
    );
    assert_eq!(game.tiles(), &before);
    assert_eq!(game.status(), Some(UNEXPECTED_DATA_STATUS));
    assert_eq!(game.turn_owner(), TurnOwner::User);
}

#[test]
fn test_build_mode_placement_rules() {
    let recorder = RecordingObserver::new();
    let mut game = TurnController::with_observer(build_config(), Box::new(recorder.clone()));
    assert!(game.tiles().is_empty());

    // Anything goes on an empty board.
    game.click(Cell::new(4, 4));
    assert_eq!(game.tiles().len(), 1);
    assert_eq!(game.tiles().get(0).and_then(|t| t.owner), Some(Player::One));

    let token = scheduled_token(&game.click(Cell::new(4, 5)));
    assert_eq!(game.tiles().len(), 2);

    // Occupied, detached and off-board cells are refused without resetting the countdown.
    assert!(game.click(Cell::new(4, 5)).is_empty());
    assert!(game.click(Cell::new(8, 8)).is_empty());
    assert!(game.click(Cell::new(-1, 4)).is_empty());
    assert_eq!(game.tiles().len(), 2);
    assert_eq!(game.turn(), shifting_shapes::core::Turn::PendingAi { token });

    let reasons: Vec<IgnoreReason> = recorder
        .events()
        .into_iter()
        .filter_map(|e| match e {
            ObservedEvent::Ignored { reason, .. } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            IgnoreReason::Occupied,
            IgnoreReason::Disconnected,
            IgnoreReason::OutOfBounds
        ]
    );
}

#[test]
fn test_build_mode_ai_tile_is_tagged() {
    let mut game = TurnController::new(build_config());
    game.click(Cell::new(4, 4));
    let (round, sent) = requested_round(&game.trigger_ai());
    assert_eq!(sent.count(), 1);

    let reply = Grid::from_cells([Cell::new(4, 4), Cell::new(5, 4)], 10);
    game.ai_completed(
        round,
        AiOutcome::Board {
            board: reply,
            predict: vec!["line".to_string()],
        },
    );

    assert_eq!(game.tiles().len(), 2);
    let ai_tiles: Vec<_> = game
        .tiles()
        .iter()
        .filter(|t| t.owner == Some(Player::Two))
        .collect();
    assert_eq!(ai_tiles.len(), 1);
    assert_eq!(ai_tiles[0].cell, Cell::new(5, 4));
    assert_eq!(game.turn_owner(), TurnOwner::User);
}

#[test]
fn test_build_mode_save_clears_board() {
    let mut game = TurnController::new(build_config());
    game.click(Cell::new(2, 2));
    game.click(Cell::new(2, 3));
    assert_eq!(game.turn_owner(), TurnOwner::PendingAi);

    let effects = game.save();
    assert_eq!(effects.len(), 3);
    match &effects[0] {
        Effect::Save(SavedShape::Tiles { size, tiles }) => {
            assert_eq!(*size, 10);
            assert_eq!(tiles.len(), 2);
            assert!(tiles.iter().all(|t| t.owner == Some(Player::One)));
        }
        other => panic!("expected tagged save, got {:?}", other),
    }
    assert_eq!(effects[1], Effect::CancelCountdown);
    assert_eq!(effects[2], Effect::Status("shape saved".to_string()));

    assert!(game.tiles().is_empty());
    assert_eq!(game.turn_owner(), TurnOwner::User);
}

#[test]
fn test_shift_mode_save_keeps_board() {
    let mut game = TurnController::new(shift_config());
    let effects = game.save();
    match &effects[0] {
        Effect::Save(SavedShape::Grid(grid)) => {
            assert_eq!(grid.count(), 10);
            // y = 5 on a 10 board is row 4 from the top.
            assert!(grid.rows()[4].iter().all(|&v| v == 1));
        }
        other => panic!("expected grid save, got {:?}", other),
    }
    assert_eq!(game.tiles().len(), 10);
}

#[test]
fn test_save_refused_while_ai_thinks() {
    let mut game = TurnController::new(build_config());
    game.click(Cell::new(2, 2));
    game.trigger_ai();

    let effects = game.save();
    assert_eq!(
        effects.as_slice(),
        &[Effect::Status("wait for the AI to finish".to_string())]
    );
    assert_eq!(game.tiles().len(), 1);
}

#[test]
fn test_snapshot_reflects_selection() {
    let mut game = TurnController::new(shift_config());
    game.click(Cell::new(9, 5));
    let snap = game.snapshot();
    assert_eq!(snap.selected_cell(), Some(Cell::new(9, 5)));
    assert!(snap.is_candidate(Cell::new(8, 6)));
    assert!(snap.accepts_input());
    assert_eq!(snap.countdown_ms, None);
}
