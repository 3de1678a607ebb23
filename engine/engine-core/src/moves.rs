//! Ordered move container produced by one node expansion.

/// Ordered, append-only sequence of moves.
///
/// Insertion order is generation order and is preserved; duplicates are kept.
/// A sequence owns its moves until they are cloned out or the sequence is
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSequence<M> {
    moves: Vec<M>,
}

impl<M> MoveSequence<M> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Create an empty sequence with room for `capacity` moves
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
        }
    }

    /// Append a move at the end of the sequence
    #[inline]
    pub fn push(&mut self, mv: M) {
        self.moves.push(mv);
    }

    /// Number of moves in the sequence
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when no moves were generated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Bounds-checked access; out-of-range indices yield `None`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&M> {
        self.moves.get(index)
    }

    /// Iterate moves in generation order
    pub fn iter(&self) -> std::slice::Iter<'_, M> {
        self.moves.iter()
    }

    /// View the moves as a slice
    pub fn as_slice(&self) -> &[M] {
        &self.moves
    }

    /// Consume the sequence, returning the underlying vector
    pub fn into_vec(self) -> Vec<M> {
        self.moves
    }
}

impl<M: PartialEq> MoveSequence<M> {
    /// Whether `mv` is one of the generated moves
    pub fn contains(&self, mv: &M) -> bool {
        self.moves.contains(mv)
    }
}

impl<M> Default for MoveSequence<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> From<Vec<M>> for MoveSequence<M> {
    fn from(moves: Vec<M>) -> Self {
        Self { moves }
    }
}

impl<M> FromIterator<M> for MoveSequence<M> {
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}

impl<M> Extend<M> for MoveSequence<M> {
    fn extend<I: IntoIterator<Item = M>>(&mut self, iter: I) {
        self.moves.extend(iter);
    }
}

impl<M> IntoIterator for MoveSequence<M> {
    type Item = M;
    type IntoIter = std::vec::IntoIter<M>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a, M> IntoIterator for &'a MoveSequence<M> {
    type Item = &'a M;
    type IntoIter = std::slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut moves = MoveSequence::new();
        moves.push(3u8);
        moves.push(1);
        moves.push(2);

        assert_eq!(moves.as_slice(), &[3, 1, 2]);
        assert_eq!(moves.iter().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicates_kept() {
        let moves: MoveSequence<u8> = vec![4, 4, 4].into();
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_bounds_checked_access() {
        let moves: MoveSequence<char> = "abc".chars().collect();
        assert_eq!(moves.get(0), Some(&'a'));
        assert_eq!(moves.get(2), Some(&'c'));
        assert_eq!(moves.get(3), None);
        assert_eq!(moves.get(usize::MAX), None);
    }

    #[test]
    fn test_empty_sequence() {
        let moves = MoveSequence::<u32>::default();
        assert!(moves.is_empty());
        assert_eq!(moves.len(), 0);
        assert_eq!(moves.get(0), None);
    }

    #[test]
    fn test_contains_and_extend() {
        let mut moves = MoveSequence::with_capacity(4);
        moves.extend([10u16, 20]);
        assert!(moves.contains(&20));
        assert!(!moves.contains(&30));
        assert_eq!(moves.into_vec(), vec![10, 20]);
    }
}
