//! Grid list of colored tiles

use crate::state::Tile;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

/// Where a tile sits in the grid, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePosition {
    pub row: u16,
    pub col: u16,
    pub rowspan: u16,
    pub colspan: u16,
}

/// Grid geometry in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub columns: u16,
    pub row_height: u16,
    pub gutter: u16,
}

/// Place tiles in order, each at the first position (row-major) where its
/// column span fits over free cells. Spans wider than the grid are clamped.
pub fn place_tiles(tiles: &[Tile], columns: u16) -> Vec<TilePosition> {
    let columns = columns.max(1);
    // Rows each column stays occupied for, counted from the current row
    let mut tracker = vec![0u16; columns as usize];
    let mut row = 0u16;
    let mut col = 0u16;
    let mut positions = Vec::with_capacity(tiles.len());

    for tile in tiles {
        let colspan = tile.cols.clamp(1, columns);
        let rowspan = tile.rows.max(1);

        loop {
            if col + colspan > columns {
                for occupied in tracker.iter_mut() {
                    *occupied = occupied.saturating_sub(1);
                }
                row += 1;
                col = 0;
                continue;
            }
            let span = col as usize..(col + colspan) as usize;
            if tracker[span].iter().all(|&occupied| occupied == 0) {
                break;
            }
            col += 1;
        }

        for occupied in &mut tracker[col as usize..(col + colspan) as usize] {
            *occupied = rowspan;
        }
        positions.push(TilePosition {
            row,
            col,
            rowspan,
            colspan,
        });
        col += colspan;
    }

    positions
}

/// Screen rectangle of a placed tile, clipped to `area`. `None` when the tile
/// falls entirely outside.
///
/// Metrics come from user config, so all arithmetic saturates.
pub fn tile_rect(area: Rect, position: TilePosition, metrics: GridMetrics) -> Option<Rect> {
    let columns = metrics.columns.max(1);
    let gutters = metrics.gutter.saturating_mul(columns - 1);
    let col_width = area.width.saturating_sub(gutters) / columns;

    let span = |cells: u16, size: u16| {
        cells
            .saturating_mul(size)
            .saturating_add(cells.saturating_sub(1).saturating_mul(metrics.gutter))
    };
    let x = area
        .x
        .saturating_add(position.col.saturating_mul(col_width.saturating_add(metrics.gutter)));
    let y = area.y.saturating_add(
        position
            .row
            .saturating_mul(metrics.row_height.saturating_add(metrics.gutter)),
    );
    let width = span(position.colspan, col_width);
    let height = span(position.rowspan, metrics.row_height);

    if y >= area.bottom() || x >= area.right() || width == 0 {
        return None;
    }
    Some(Rect {
        x,
        y,
        width: width.min(area.right() - x),
        height: height.min(area.bottom() - y),
    })
}

/// Map a CSS-style color name onto a terminal color
pub fn tile_color(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "lightblue" => Color::LightBlue,
        "lightgreen" => Color::LightGreen,
        "lightgray" | "lightgrey" => Color::Gray,
        other => other.parse().unwrap_or(Color::Gray),
    }
}

/// Draw the tile grid
pub fn draw(frame: &mut Frame, area: Rect, tiles: &[Tile], metrics: GridMetrics) {
    let positions = place_tiles(tiles, metrics.columns);

    for (tile, position) in tiles.iter().zip(positions) {
        let Some(rect) = tile_rect(area, position, metrics) else {
            continue;
        };
        let background = tile_color(&tile.color);
        let header = Line::from(Span::styled(
            format!(" {} ", tile.text),
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        let paragraph = Paragraph::new(header).block(Block::default().style(Style::default().bg(background)));
        frame.render_widget(paragraph, rect);
    }
}
