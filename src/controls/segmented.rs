//! Segmented control state

use tokio::sync::RwLock;
use tracing::warn;

/// A fixed row of segments with at most one selected
pub struct SegmentedControl<T: Copy + Send + Sync + 'static> {
    segments: &'static [T],
    selected: RwLock<Option<usize>>,
}

impl<T: Copy + Send + Sync + 'static> SegmentedControl<T> {
    pub fn new(segments: &'static [T]) -> Self {
        Self {
            segments,
            selected: RwLock::new(None),
        }
    }

    pub fn segments(&self) -> &'static [T] {
        self.segments
    }

    /// Select a segment by index and return its value.
    ///
    /// Re-selecting the current segment still returns it.
    pub async fn select(&self, index: usize) -> Option<T> {
        match self.segments.get(index) {
            Some(value) => {
                *self.selected.write().await = Some(index);
                Some(*value)
            }
            None => {
                warn!("Segment {} out of range (0..{})", index, self.segments.len());
                None
            }
        }
    }

    /// Index of the selected segment, if any
    pub async fn selected_index(&self) -> Option<usize> {
        *self.selected.read().await
    }

    /// Value of the selected segment, if any
    pub async fn selected(&self) -> Option<T> {
        self.selected_index()
            .await
            .and_then(|i| self.segments.get(i).copied())
    }
}

impl<T: Copy + PartialEq + Send + Sync + 'static> SegmentedControl<T> {
    /// Highlight the segment holding `value` without emitting anything
    pub async fn show_value(&self, value: T) {
        let index = self.segments.iter().position(|s| *s == value);
        *self.selected.write().await = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LETTERS: [char; 3] = ['a', 'b', 'c'];

    #[tokio::test]
    async fn test_select_and_out_of_range() {
        let control = SegmentedControl::new(&LETTERS);
        assert_eq!(control.selected().await, None);

        assert_eq!(control.select(1).await, Some('b'));
        assert_eq!(control.selected_index().await, Some(1));

        assert_eq!(control.select(7).await, None);
        assert_eq!(control.selected().await, Some('b'));

        control.show_value('c').await;
        assert_eq!(control.selected_index().await, Some(2));
    }
}
