use crossterm::event::KeyCode;

use crate::game::Engine;

/// Maps the four directional keys onto engine operations. Anything else is
/// ignored here; quit/restart keys belong to the main loop.
pub fn handle_input(engine: &mut Engine, code: KeyCode) {
    // The engine treats calls after game over as caller bugs.
    if engine.is_game_over() {
        return;
    }

    match code {
        KeyCode::Left => engine.move_piece(-1, 0),
        KeyCode::Right => engine.move_piece(1, 0),
        KeyCode::Down => engine.move_piece(0, 1),
        KeyCode::Up => engine.rotate(),
        _ => {}
    }
}
