//! Power tile tests - spawning on 4+ matches and chained activation

use match3::core::{EngineConfig, GameState, TileGrid, TileIdGen, TokenGrid};
use match3::types::{Coord, PowerType, TileId, TokenType};

const FOUR_IN_ROW: [&str; 5] = ["RRSRT", "STRAE", "AESTA", "TAETS", "ESASE"];
const THREE_IN_ROW: [&str; 5] = ["RRSTA", "EARSE", "SETAS", "TASET", "ASETA"];

fn powered_state(rows: &[&str], powers: &[(Coord, PowerType)], power_tiles: bool) -> GameState {
    let mut board = TileGrid::from_tokens(&TokenGrid::parse(rows).unwrap(), &mut TileIdGen::new());
    for &(cell, power) in powers {
        assert!(board.set_power(cell, power));
    }
    let config = EngineConfig::default().with_power_tiles(power_tiles);
    GameState::from_board(board, config, 7).unwrap()
}

#[test]
fn test_four_match_upgrades_the_middle_tile() {
    let state = powered_state(&FOUR_IN_ROW, &[], true);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    assert!(outcome.did_consume_move);

    let step = &outcome.steps[0];
    assert_eq!(step.points_added, 200);
    assert_eq!(step.powers_spawned.len(), 1);
    let spawn = step.powers_spawned[0];
    assert_eq!(spawn.cell, Coord::new(0, 2));
    assert_eq!(spawn.power, PowerType::RowClear);
    // The tile swapped up from (1,2) keeps its id
    assert_eq!(spawn.tile_id, TileId(7));

    // The spawn cell survives the clear
    assert_eq!(
        step.cleared_cells,
        vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 3)]
    );
    assert!(step.powers_activated.is_empty());

    let tile = outcome.next_state.board().tile(Coord::new(0, 2)).unwrap();
    assert_eq!(tile.id, TileId(7));
    assert_eq!(tile.token, TokenType::Ruby);
    assert_eq!(tile.power, Some(PowerType::RowClear));
    assert_eq!(outcome.next_state.score(), 200);
}

#[test]
fn test_power_tiles_off_clears_the_whole_run() {
    let state = powered_state(&FOUR_IN_ROW, &[], false);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));

    let step = &outcome.steps[0];
    assert!(step.powers_spawned.is_empty());
    assert_eq!(step.cleared_cells.len(), 4);
    assert!(outcome
        .next_state
        .board()
        .cells()
        .iter()
        .flatten()
        .all(|t| t.power.is_none()));
}

#[test]
fn test_activation_chains_through_other_powers() {
    let state = powered_state(
        &THREE_IN_ROW,
        &[
            (Coord::new(0, 1), PowerType::ColumnClear),
            (Coord::new(3, 1), PowerType::Bomb),
        ],
        true,
    );
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    let step = &outcome.steps[0];

    let fired: Vec<(Coord, PowerType)> = step
        .powers_activated
        .iter()
        .map(|a| (a.cell, a.power))
        .collect();
    assert_eq!(
        fired,
        vec![
            (Coord::new(0, 1), PowerType::ColumnClear),
            (Coord::new(3, 1), PowerType::Bomb),
        ]
    );
    assert_eq!(step.powers_activated[0].bonus, 150);
    assert_eq!(step.powers_activated[1].bonus, 250);

    // Match cells, then column 1, then the bomb's 3x3 around (3,1)
    let c = Coord::new;
    assert_eq!(
        step.cleared_cells,
        vec![
            c(0, 0), c(0, 1), c(0, 2),
            c(1, 1), c(2, 1), c(3, 1), c(4, 1),
            c(2, 0), c(2, 2), c(3, 0), c(3, 2), c(4, 0), c(4, 2),
        ]
    );

    // 100 for the run, bonuses added unmultiplied
    assert_eq!(step.points_added, 500);
    assert_eq!(outcome.steps.len(), 2);
    assert_eq!(outcome.steps[1].points_added, 125);
    assert_eq!(outcome.next_state.score(), 625);
}

#[test]
fn test_powered_spawn_cell_fires_instead_of_upgrading() {
    let state = powered_state(&FOUR_IN_ROW, &[(Coord::new(1, 2), PowerType::RowClear)], true);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    let step = &outcome.steps[0];

    assert!(step.powers_spawned.is_empty());
    assert_eq!(step.powers_activated.len(), 1);
    assert_eq!(step.powers_activated[0].cell, Coord::new(0, 2));
    assert_eq!(step.powers_activated[0].tile_id, TileId(7));
    assert_eq!(step.cleared_cells.len(), 5);
    assert!(step.cleared_cells.iter().all(|c| c.row == 0));
    assert_eq!(step.points_added, 350);
}

#[test]
fn test_existing_power_is_inert_when_disabled() {
    let state = powered_state(&FOUR_IN_ROW, &[(Coord::new(1, 2), PowerType::RowClear)], false);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    let step = &outcome.steps[0];

    assert!(step.powers_activated.is_empty());
    assert_eq!(step.cleared_cells.len(), 4);
    assert_eq!(step.points_added, 200);
}

#[test]
fn test_power_fields_skipped_in_json_when_empty() {
    let state = powered_state(&FOUR_IN_ROW, &[], false);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    let json = serde_json::to_value(&outcome.steps[0]).unwrap();
    assert!(json.get("powersSpawned").is_none());
    assert!(json.get("powersActivated").is_none());

    let state = powered_state(&FOUR_IN_ROW, &[], true);
    let outcome = state.apply_swap(Coord::new(0, 2), Coord::new(1, 2));
    let json = serde_json::to_value(&outcome.steps[0]).unwrap();
    assert_eq!(json["powersSpawned"][0]["power"], "rowClear");
    assert_eq!(json["powersSpawned"][0]["tileId"], 7);
}
