use std::collections::VecDeque;

use super::grid::Grid;
use super::types::Position;

/// Maximal 4-connected region of same-colored tiles reachable from
/// `start`. Frozen tiles block traversal and cannot start a region;
/// obstacle and empty cells never match, so starting on one yields an
/// empty result. Pure with respect to the grid.
pub fn find_connected(grid: &Grid, start: Position) -> Vec<Position> {
    let origin = grid.get(start);
    if !origin.kind.is_color() || origin.frozen {
        return Vec::new();
    }

    let mut visited = vec![false; grid.rows() * grid.cols()];
    let mut connected = Vec::new();
    let mut queue = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        let slot = current.row * grid.cols() + current.col;
        if visited[slot] {
            continue;
        }
        visited[slot] = true;

        let tile = grid.get(current);
        if tile.kind != origin.kind || tile.frozen {
            continue;
        }

        connected.push(current);
        queue.extend(grid.neighbors(current));
    }

    connected
}
