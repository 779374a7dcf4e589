/// Grid indices owned by the snake, stored tail-first.
///
/// Entry 0 is the tail and the last entry is the head. The snake holds no
/// cell data; occupancy and directions live in the [`Grid`](crate::grid::Grid).
/// Movement rewrites entries in place, growth appends a new head.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    segments: Vec<usize>,
}

impl Snake {
    /// Creates a snake from explicit grid indices (front is tail).
    #[must_use]
    pub fn from_segments(segments: Vec<usize>) -> Self {
        debug_assert!(!segments.is_empty());
        Self { segments }
    }

    /// Returns the head index, if any.
    #[must_use]
    pub fn head(&self) -> Option<usize> {
        self.segments.last().copied()
    }

    /// Returns the tail index, if any.
    #[must_use]
    pub fn tail(&self) -> Option<usize> {
        self.segments.first().copied()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment occupies `index`.
    #[must_use]
    pub fn occupies(&self, index: usize) -> bool {
        self.segments.contains(&index)
    }

    /// Iterates over segment indices from tail to head.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.segments.iter().copied()
    }

    pub(crate) fn segment(&self, position: usize) -> usize {
        self.segments[position]
    }

    pub(crate) fn relocate(&mut self, position: usize, index: usize) {
        self.segments[position] = index;
    }

    pub(crate) fn push_head(&mut self, index: usize) {
        self.segments.push(index);
    }

    pub(crate) fn reset(&mut self, segments: impl IntoIterator<Item = usize>) {
        self.segments.clear();
        self.segments.extend(segments);
    }
}

#[cfg(test)]
mod tests {
    use super::Snake;

    #[test]
    fn head_is_the_last_entry() {
        let snake = Snake::from_segments(vec![50, 49, 48]);

        assert_eq!(snake.head(), Some(48));
        assert_eq!(snake.tail(), Some(50));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn growth_appends_a_new_head() {
        let mut snake = Snake::from_segments(vec![50, 49, 48]);

        snake.push_head(47);

        assert_eq!(snake.head(), Some(47));
        assert_eq!(snake.tail(), Some(50));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn relocation_rewrites_in_place() {
        let mut snake = Snake::from_segments(vec![50, 49, 48]);

        snake.relocate(0, 30);

        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![30, 49, 48]);
        assert!(snake.occupies(30));
        assert!(!snake.occupies(50));
    }

    #[test]
    fn reset_replaces_all_segments() {
        let mut snake = Snake::from_segments(vec![1, 2, 3, 4]);

        snake.reset([50, 49, 48]);

        assert_eq!(snake.segments().collect::<Vec<_>>(), vec![50, 49, 48]);
    }
}
