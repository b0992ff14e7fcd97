use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::config::{GridModel, Theme};
use crate::game::{EndReason, GameStatus};
use crate::snake::{Position, Snake};

/// Minimal 2D drawing target: solid rectangles and single-line text.
///
/// Coordinates are surface units with the origin at the top-left corner.
/// Implementations clip anything outside [`Surface::size`].
pub trait Surface {
    fn size(&self) -> (u16, u16);

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color);

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color);
}

/// [`Surface`] over a rectangular region of a ratatui buffer.
pub struct BufferSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
}

impl<'a> BufferSurface<'a> {
    /// Wraps `area`, clipped to the buffer.
    pub fn new(buffer: &'a mut Buffer, area: Rect) -> Self {
        let area = area.intersection(buffer.area);
        Self { buffer, area }
    }
}

impl Surface for BufferSurface<'_> {
    fn size(&self) -> (u16, u16) {
        (self.area.width, self.area.height)
    }

    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Color) {
        let right = x.saturating_add(width).min(self.area.width);
        let bottom = y.saturating_add(height).min(self.area.height);

        for row in y..bottom {
            for column in x..right {
                if let Some(cell) = self
                    .buffer
                    .cell_mut((self.area.x + column, self.area.y + row))
                {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Color) {
        if x >= self.area.width || y >= self.area.height {
            return;
        }

        self.buffer.set_stringn(
            self.area.x + x,
            self.area.y + y,
            text,
            usize::from(self.area.width - x),
            Style::new().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}

/// Everything the renderer needs from one game, borrowed.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub grid: GridModel,
    pub snake: &'a Snake,
    pub food: Option<Position>,
    pub status: GameStatus,
    pub score: u32,
    pub end_reason: Option<EndReason>,
}

/// Paints one frame of `scene` onto `surface`.
pub fn render<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>, theme: &Theme) {
    let (width, height) = surface.size();
    surface.fill_rect(0, 0, width, height, theme.background);

    for (index, segment) in scene.snake.segments().enumerate() {
        let color = if index == 0 {
            theme.snake_head
        } else {
            theme.snake_body
        };
        paint_cell(surface, scene.grid, *segment, color);
    }

    if let Some(food) = scene.food {
        paint_cell(surface, scene.grid, food, theme.food);
    }

    match scene.status {
        GameStatus::Over => render_game_over(surface, scene, theme),
        GameStatus::Idle => draw_centered(surface, height / 2, "Press Space to start", theme.text),
        GameStatus::Paused => draw_centered(surface, height / 2, "Paused", theme.text),
        GameStatus::Running => {}
    }
}

fn render_game_over<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>, theme: &Theme) {
    let (width, height) = surface.size();
    surface.fill_rect(0, 0, width, height, theme.overlay);

    let title = match scene.end_reason {
        Some(EndReason::BoardFilled) => "Board cleared!",
        _ => "Game Over!",
    };
    let middle = height / 2;
    draw_centered(surface, middle, title, theme.text);
    draw_centered(
        surface,
        middle.saturating_add(2 * scene.grid.cell.height),
        &format!("Score: {}", scene.score),
        theme.text,
    );
}

fn paint_cell<S: Surface + ?Sized>(surface: &mut S, grid: GridModel, cell: Position, color: Color) {
    let Some((x, y)) = cell_origin(grid, cell) else {
        return;
    };

    surface.fill_rect(x, y, grid.cell.width, grid.cell.height, color);
}

fn draw_centered<S: Surface + ?Sized>(surface: &mut S, y: u16, text: &str, color: Color) {
    let (width, _) = surface.size();
    let text_width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    let x = width.saturating_sub(text_width) / 2;
    surface.draw_text(x, y, text, color);
}

/// Top-left surface coordinate of a grid cell, if it is on the board.
fn cell_origin(grid: GridModel, cell: Position) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(grid) {
        return None;
    }

    let x = u16::try_from(cell.x).ok()?.checked_mul(grid.cell.width)?;
    let y = u16::try_from(cell.y).ok()?.checked_mul(grid.cell.height)?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Color;

    use crate::config::{GridModel, THEME_CLASSIC};
    use crate::game::{EndReason, GameStatus};
    use crate::snake::{Position, Snake};

    use super::{render, BufferSurface, Scene, Surface};

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_owned())
            .collect()
    }

    fn draw(snake: &Snake, status: GameStatus, end_reason: Option<EndReason>) -> Buffer {
        let grid = GridModel::default();
        let area = Rect::new(0, 0, grid.surface_width(), grid.surface_height());
        let mut buffer = Buffer::empty(area);
        let scene = Scene {
            grid,
            snake,
            food: Some(pos(2, 3)),
            status,
            score: 40,
            end_reason,
        };

        render(&mut BufferSurface::new(&mut buffer, area), &scene, &THEME_CLASSIC);
        buffer
    }

    #[test]
    fn paints_head_body_and_food_in_distinct_colours() {
        let snake = Snake::from_segments([pos(8, 10), pos(7, 10)]);
        let buffer = draw(&snake, GameStatus::Running, None);

        // Cells are two columns wide.
        assert_eq!(buffer[(16, 10)].bg, THEME_CLASSIC.snake_head);
        assert_eq!(buffer[(17, 10)].bg, THEME_CLASSIC.snake_head);
        assert_eq!(buffer[(14, 10)].bg, THEME_CLASSIC.snake_body);
        assert_eq!(buffer[(4, 3)].bg, THEME_CLASSIC.food);
        assert_eq!(buffer[(0, 0)].bg, THEME_CLASSIC.background);
    }

    #[test]
    fn game_over_overlay_shows_message_and_score() {
        let snake = Snake::from_segments([pos(8, 10), pos(7, 10)]);
        let buffer = draw(&snake, GameStatus::Over, Some(EndReason::WallCollision));

        assert!(row_text(&buffer, 10).contains("Game Over!"));
        assert!(row_text(&buffer, 12).contains("Score: 40"));
        assert_eq!(buffer[(16, 9)].bg, THEME_CLASSIC.overlay);
    }

    #[test]
    fn filled_board_has_its_own_title() {
        let snake = Snake::from_segments([pos(8, 10)]);
        let buffer = draw(&snake, GameStatus::Over, Some(EndReason::BoardFilled));

        assert!(row_text(&buffer, 10).contains("Board cleared!"));
    }

    #[test]
    fn idle_and_paused_show_prompts() {
        let snake = Snake::from_segments([pos(1, 1)]);

        assert!(row_text(&draw(&snake, GameStatus::Idle, None), 10).contains("Press Space"));
        assert!(row_text(&draw(&snake, GameStatus::Paused, None), 10).contains("Paused"));
        assert!(!row_text(&draw(&snake, GameStatus::Running, None), 10).contains("Paused"));
    }

    #[test]
    fn surface_clips_to_its_area() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 10, 4));
        let mut surface = BufferSurface::new(&mut buffer, Rect::new(2, 1, 4, 2));

        assert_eq!(surface.size(), (4, 2));
        surface.fill_rect(0, 0, 100, 100, Color::Red);
        surface.draw_text(3, 1, "long text", Color::White);

        assert_eq!(buffer[(2, 1)].bg, Color::Red);
        assert_eq!(buffer[(5, 2)].bg, Color::Red);
        assert_eq!(buffer[(5, 2)].symbol(), "l");
        assert_eq!(buffer[(6, 2)].bg, Color::Reset);
        assert_eq!(buffer[(1, 1)].bg, Color::Reset);
    }
}
