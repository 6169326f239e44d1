//! ASCII terminal renderer.
//!
//! Draws one character per grid cell, top row first:
//!
//! | Glyph | Meaning |
//! |-------|---------|
//! | `.` | walkable cell |
//! | ` ` | blocked cell without an obstacle |
//! | `#` `~` `*` `=` | wall, water, food, rest area |
//! | `R` `F` `W` `S` | goat, by state label |
//!
//! Goats are drawn over obstacles, obstacles over the grid. Below the map
//! sits a table with one row per entity.

use animalia_types::{EntitySnapshot, Vector2D, WorldSnapshot};

/// ANSI sequence that clears the screen and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Map a position to `(column, row)`, or `None` if off the grid.
fn cell_index(position: Vector2D, width: u32, height: u32) -> Option<(usize, usize)> {
    let x = position.x.floor();
    let y = position.y.floor();
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    if x >= f64::from(width) || y >= f64::from(height) {
        return None;
    }
    // Range-checked above: both values are non-negative and below a u32.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cell = (x as usize, y as usize);
    Some(cell)
}

fn put(rows: &mut [Vec<char>], (x, y): (usize, usize), glyph: char) {
    if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
        *cell = glyph;
    }
}

/// Draw the map as newline-terminated rows.
pub fn render_map(world: &WorldSnapshot) -> String {
    let mut rows: Vec<Vec<char>> = world
        .navigation_grid
        .iter()
        .map(|row| row.iter().map(|&open| if open { '.' } else { ' ' }).collect())
        .collect();

    for obstacle in world.static_obstacles.iter() {
        if let Some(cell) = cell_index(obstacle.position, world.width, world.height) {
            put(&mut rows, cell, obstacle.kind.glyph());
        }
    }
    for entity in &world.entities {
        if let Some(cell) = cell_index(entity.position, world.width, world.height) {
            put(&mut rows, cell, entity.state.glyph());
        }
    }

    let mut out = String::new();
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn format_position(position: Vector2D) -> String {
    format!("({:>6.2}, {:>6.2})", position.x, position.y)
}

fn entity_row(entity: &EntitySnapshot) -> String {
    let target = entity
        .target_pos
        .map_or_else(|| String::from("-"), format_position);
    format!(
        "{:>4}  {}  {:<10}  {:>3} {:>3} {:>3}  {}",
        entity.id.into_inner(),
        format_position(entity.position),
        entity.state.label(),
        entity.stats.hunger,
        entity.stats.thirst,
        entity.stats.tiredness,
        target,
    )
}

/// Draw the entity table with a header line.
pub fn render_table(entities: &[EntitySnapshot]) -> String {
    let mut out = String::from("  id  position          state       hun thi tir  target\n");
    for entity in entities {
        out.push_str(&entity_row(entity));
        out.push('\n');
    }
    out
}

/// Draw one full frame: status line, map, and entity table.
pub fn render_frame(world: &WorldSnapshot, paused: bool) -> String {
    let status = if paused { "  [paused]" } else { "" };
    let mut out = format!(
        "tick {}  {}x{}  goats {}{status}\n",
        world.tick,
        world.width,
        world.height,
        world.entities.len()
    );
    out.push_str(&render_map(world));
    out.push_str(&render_table(&world.entities));
    out.push_str("keys: c = cycle goat 0 state, p = pause/resume, q = quit\n");
    out
}
