//! Breadth-first search over the four cardinal directions.
//!
//! Both searches mark a cell when it is first queued, so the frontier never holds more than
//! `width * height` cells and every call terminates.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Whether `goal` can be reached from `start` through in-bounds, mine-free cells.
pub fn has_path(start: Position, goal: Position, minefield: &Minefield) -> bool {
    if start == goal {
        return true;
    }

    let bounds = minefield.bounds();
    let mut visited: Array2<bool> = Array2::default(bounds.nd_shape());
    if let Some(index) = bounds.to_nd_index(start) {
        visited[index] = true;
    }
    let mut to_visit = VecDeque::from([start]);

    while let Some(current) = to_visit.pop_front() {
        for next in current.cardinal_neighbors() {
            if next == goal {
                return true;
            }
            if !minefield.is_passable(next) {
                continue;
            }
            let Some(index) = bounds.to_nd_index(next) else {
                continue;
            };
            if !visited[index] {
                visited[index] = true;
                to_visit.push_back(next);
            }
        }
    }

    false
}

/// Shortest cardinal path from `start` to `goal`, both ends included.
///
/// Ties between equally short paths are broken by [`Direction::ALL`] order.
pub fn find_path(start: Position, goal: Position, minefield: &Minefield) -> Option<Vec<Position>> {
    if start == goal {
        return Some(vec![start]);
    }

    let bounds = minefield.bounds();
    let mut parent: Array2<Option<Position>> = Array2::from_elem(bounds.nd_shape(), None);
    let mut visited: Array2<bool> = Array2::default(bounds.nd_shape());
    if let Some(index) = bounds.to_nd_index(start) {
        visited[index] = true;
    }
    let mut to_visit = VecDeque::from([start]);

    while let Some(current) = to_visit.pop_front() {
        for next in current.cardinal_neighbors() {
            if next == goal {
                let mut path = vec![goal, current];
                let mut cursor = current;
                while let Some(prev) = bounds.to_nd_index(cursor).and_then(|index| parent[index]) {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            if !minefield.is_passable(next) {
                continue;
            }
            let Some(index) = bounds.to_nd_index(next) else {
                continue;
            };
            if !visited[index] {
                visited[index] = true;
                parent[index] = Some(current);
                to_visit.push_back(next);
            }
        }
    }

    None
}

/// Number of moves on the shortest path, `None` when unreachable.
pub fn shortest_distance(start: Position, goal: Position, minefield: &Minefield) -> Option<u32> {
    find_path(start, goal, minefield).map(|path| (path.len() - 1) as u32)
}
