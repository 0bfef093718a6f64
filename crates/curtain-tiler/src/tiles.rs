//! Tile planning over the store's chunk index.

use curtain_store::ChunkEntry;

/// One planned tile: a contiguous row range and the time window it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    /// Zero-based tile index.
    pub index: usize,
    /// First row of the tile (inclusive).
    pub start_row: u64,
    /// One past the last row of the tile.
    pub end_row: u64,
    /// Half-open time window `[start, end)`: start is the tile's first row
    /// time, end is the next tile's first row time. The last tile's end is
    /// the dataset's maximum time.
    pub window: [i64; 2],
}

impl TileSpan {
    pub fn rows(&self) -> u64 {
        self.end_row - self.start_row
    }
}

/// Plan tiles by greedily accumulating whole chunks up to `max_points`.
///
/// Chunks are never split, so a chunk larger than `max_points` becomes a
/// tile on its own. Tiles cover the row space contiguously and their
/// half-open time windows chain from the first row's time up to `max_time`.
pub fn plan_tiles(
    chunks: &[ChunkEntry],
    total_rows: u64,
    max_time: i64,
    max_points: u64,
) -> Vec<TileSpan> {
    if chunks.is_empty() || total_rows == 0 {
        return Vec::new();
    }

    // (start_row, row_count, start_time) per chunk.
    let chunk_rows: Vec<(u64, u64, i64)> = chunks
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let end = chunks.get(i + 1).map_or(total_rows, |next| next.row_offset);
            (c.row_offset, end - c.row_offset, c.start_time)
        })
        .collect();

    let mut tiles: Vec<TileSpan> = Vec::new();
    let mut tile_start_row = 0u64;
    let mut tile_start_time = chunks[0].start_time;
    let mut tile_rows = 0u64;

    for &(start_row, rows, start_time) in &chunk_rows {
        if tile_rows > 0 && tile_rows + rows > max_points {
            tiles.push(TileSpan {
                index: tiles.len(),
                start_row: tile_start_row,
                end_row: start_row,
                window: [tile_start_time, start_time],
            });
            tile_start_row = start_row;
            tile_start_time = start_time;
            tile_rows = 0;
        }
        tile_rows += rows;
    }

    tiles.push(TileSpan {
        index: tiles.len(),
        start_row: tile_start_row,
        end_row: total_rows,
        window: [tile_start_time, max_time],
    });

    tiles
}
