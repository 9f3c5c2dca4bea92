//! Row and section containers
//!
//! A container is what the editor renders items into and collects them back from.
//! Collecting normalizes the way reading a live form does: labels and titles come
//! back trimmed.

use crate::domain::{PatientField, Section};

/// Normalization applied when an item is read back from a container
pub trait Collect: Clone {
    /// The item as a reader of the rendered form would see it
    fn collected(&self) -> Self;
}

impl Collect for Section {
    fn collected(&self) -> Self {
        Section {
            title: self.title.trim().to_string(),
            content: self.content.clone(),
        }
    }
}

impl Collect for PatientField {
    fn collected(&self) -> Self {
        PatientField {
            label: self.label.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Ordered, renderable list of items
pub trait Container<T: Collect> {
    /// Replace everything with `items`
    fn render(&mut self, items: Vec<T>);

    /// Read every item back, in order, normalized
    fn collect(&self) -> Vec<T>;

    /// Append one item at the end
    fn push(&mut self, item: T);

    /// Remove the item at `index`
    fn remove(&mut self, index: usize) -> Option<T>;

    /// Mutable access to the item at `index`
    fn get_mut(&mut self, index: usize) -> Option<&mut T>;

    /// Items as currently held
    fn items(&self) -> &[T];

    /// Number of items
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Whether there are no items
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// In-memory container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryContainer<T> {
    items: Vec<T>,
}

impl<T> Default for MemoryContainer<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Collect> Container<T> for MemoryContainer<T> {
    fn render(&mut self, items: Vec<T>) {
        self.items = items;
    }

    fn collect(&self) -> Vec<T> {
        self.items.iter().map(Collect::collected).collect()
    }

    fn push(&mut self, item: T) {
        self.items.push(item);
    }

    fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    fn items(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldType;

    #[test]
    fn test_collect_trims_section_titles_only() {
        let mut container = MemoryContainer::default();
        container.render(vec![Section::new("  Plan ", "  keep spacing  ")]);
        let collected = container.collect();
        assert_eq!(collected[0].title, "Plan");
        assert_eq!(collected[0].content, "  keep spacing  ");
        // the held item is not rewritten by collecting
        assert_eq!(container.items()[0].title, "  Plan ");
    }

    #[test]
    fn test_collect_trims_field_labels() {
        let mut container = MemoryContainer::default();
        container.push(PatientField::new(" Peso ", "", FieldType::Number).with_value(" 70 "));
        let collected = container.collect();
        assert_eq!(collected[0].label, "Peso");
        assert_eq!(collected[0].value, " 70 ");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut container: MemoryContainer<Section> = MemoryContainer::default();
        assert!(container.remove(0).is_none());
        container.push(Section::titled("A"));
        assert_eq!(container.remove(0), Some(Section::titled("A")));
        assert!(container.is_empty());
    }
}
