use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::Cell;

/// The snake: an ordered run of cells plus its movement state
///
/// The body is kept tail-first, head-last. Direction changes are buffered
/// in a single slot and committed at the start of the next [`advance`];
/// a request pointing straight back at the committed direction is dropped
/// so one keystroke can never fold the snake onto its own neck.
///
/// [`advance`]: Snake::advance
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail at the front, head at the back
    pub body: VecDeque<Cell>,
    /// Committed movement direction
    pub direction: Direction,
    /// Buffered direction request, applied on the next advance
    pub pending_direction: Option<Direction>,
    growing: bool,
}

impl Snake {
    /// Create a snake with its head on `head` and `length` segments
    /// trailing away opposite to `direction`
    ///
    /// `length` must be at least 1; the body is never empty.
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        debug_assert!(length > 0, "snake length must be at least 1");
        let (dx, dy) = direction.delta();

        let body = (0..length)
            .map(|i| {
                let back = (length - 1 - i) as i32;
                head.offset(-dx * back, -dy * back)
            })
            .collect();

        Self {
            body,
            direction,
            pending_direction: None,
            growing: false,
        }
    }

    /// The head cell (always present; the body is never empty)
    pub fn head(&self) -> Cell {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Buffer a direction change for the next advance
    ///
    /// A request opposite to the committed direction is silently dropped;
    /// anything else overwrites whatever was buffered before, so the last
    /// request between two ticks wins.
    pub fn request_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.pending_direction = Some(direction);
        }
    }

    /// Flag the snake to keep its tail on the next advance
    ///
    /// Idempotent between ticks: however often it is called, the next
    /// advance adds exactly one segment.
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Move one cell in the committed direction, applying any buffered
    /// direction change first, and return the new head
    ///
    /// Performs no bounds checking: the returned head may lie outside the
    /// grid, and the caller decides what that means.
    pub fn advance(&mut self) -> Cell {
        if let Some(pending) = self.pending_direction.take() {
            self.direction = pending;
        }

        let new_head = self.head().neighbor(self.direction);
        self.body.push_back(new_head);

        if self.growing {
            self.growing = false;
        } else {
            self.body.pop_front();
        }

        new_head
    }

    /// Whether the head sits on any other body segment
    ///
    /// Meant to be called right after [`advance`](Snake::advance); the head
    /// slot itself is excluded from the comparison.
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body
            .iter()
            .take(self.body.len() - 1)
            .any(|&cell| cell == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(20, 20), Direction::Right, 5);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Cell::new(20, 20));
        // Tail trails away from the movement direction
        assert_eq!(snake.body[0], Cell::new(16, 20));
        assert_eq!(snake.body[1], Cell::new(17, 20));
        assert_eq!(snake.body[4], Cell::new(20, 20));
    }

    #[test]
    fn test_snake_creation_trails_each_direction() {
        let up = Snake::new(Cell::new(5, 5), Direction::Up, 2);
        assert_eq!(up.body[0], Cell::new(5, 6));

        let down = Snake::new(Cell::new(5, 5), Direction::Down, 2);
        assert_eq!(down.body[0], Cell::new(5, 4));

        let left = Snake::new(Cell::new(5, 5), Direction::Left, 2);
        assert_eq!(left.body[0], Cell::new(6, 5));
    }

    #[test]
    fn test_single_segment_snake() {
        let snake = Snake::new(Cell::new(3, 3), Direction::Up, 1);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(3, 3));
    }

    #[test]
    fn test_advance_keeps_length() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        let new_head = snake.advance();

        assert_eq!(new_head, Cell::new(6, 5));
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 3);
        // Old tail cell is gone
        assert!(!snake.body.contains(&Cell::new(3, 5)));
    }

    #[test]
    fn test_advance_while_growing() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.grow();
        snake.advance();
        assert_eq!(snake.len(), 4);
        // Tail stayed put
        assert_eq!(snake.body[0], Cell::new(3, 5));

        // Growth flag is spent after one advance
        snake.advance();
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_grow_is_idempotent_between_ticks() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.grow();
        snake.grow();
        snake.grow();
        snake.advance();

        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_request_commits_on_advance() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.request_direction(Direction::Up);
        assert_eq!(snake.pending_direction, Some(Direction::Up));

        let new_head = snake.advance();

        assert_eq!(snake.direction, Direction::Up);
        assert_eq!(snake.pending_direction, None);
        assert_eq!(new_head, Cell::new(5, 4));
    }

    #[test]
    fn test_opposite_request_is_dropped() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.request_direction(Direction::Left);

        assert_eq!(snake.pending_direction, None);
        let new_head = snake.advance();
        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(new_head, Cell::new(6, 5));
    }

    #[test]
    fn test_latest_request_wins() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);

        snake.advance();
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.head(), Cell::new(5, 6));
    }

    #[test]
    fn test_requesting_current_direction_is_harmless() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.request_direction(Direction::Right);
        snake.advance();

        assert_eq!(snake.direction, Direction::Right);
        assert_eq!(snake.head(), Cell::new(6, 5));
    }

    #[test]
    fn test_head_overlap_detection() {
        // Steer a length-5 snake into a tight loop: Right, Down, Left, Up
        // brings the head back onto a body segment.
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 5);

        snake.request_direction(Direction::Down);
        snake.advance();
        assert!(!snake.head_overlaps_body());

        snake.request_direction(Direction::Left);
        snake.advance();
        assert!(!snake.head_overlaps_body());

        snake.request_direction(Direction::Up);
        snake.advance();
        assert!(snake.head_overlaps_body());
    }

    #[test]
    fn test_no_bounds_checking_on_advance() {
        let mut snake = Snake::new(Cell::new(0, 0), Direction::Left, 1);

        let new_head = snake.advance();

        assert_eq!(new_head, Cell::new(-1, 0));
        assert_eq!(snake.head(), Cell::new(-1, 0));
    }
}
