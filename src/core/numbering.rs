//! Dotted section numbering
//!
//! Numbers are derived from the current sibling order on every render and
//! never stored on a section, so they cannot go stale after a reorder or a
//! deletion.

use crate::core::section::{Section, SectionId};

/// One section in render order with its derived outline number.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedSection<'a> {
    pub id: SectionId,
    /// Dotted 1-based number, e.g. `"2.1.3"`
    pub number: String,
    /// 0 at the root, +1 per nesting step
    pub depth: usize,
    pub section: &'a Section,
}

/// Flatten the forest in render order, deriving each section's number as
/// `<parent number>.<1-based sibling index>`.
pub fn number_sections(sections: &[Section]) -> Vec<NumberedSection<'_>> {
    let mut out = Vec::new();
    walk(sections, "", 0, &mut out);
    out
}

fn walk<'a>(list: &'a [Section], parent: &str, depth: usize, out: &mut Vec<NumberedSection<'a>>) {
    for (index, section) in list.iter().enumerate() {
        let number = if parent.is_empty() {
            format!("{}", index + 1)
        } else {
            format!("{parent}.{}", index + 1)
        };
        out.push(NumberedSection {
            id: section.id,
            number: number.clone(),
            depth,
            section,
        });
        walk(&section.subsections, &number, depth + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::DocumentStore;

    fn numbers(store: &DocumentStore) -> Vec<String> {
        number_sections(store.sections())
            .into_iter()
            .map(|n| n.number)
            .collect()
    }

    #[test]
    fn derivation_is_deterministic() {
        let mut store = DocumentStore::new();
        let root = store.add_section(None).unwrap();
        store.add_section(Some(&root));
        store.add_section(None);

        let first = numbers(&store);
        assert_eq!(first, vec!["1", "1.1", "2"]);
        assert_eq!(first, numbers(&store));
    }

    #[test]
    fn nested_numbers_carry_the_parent_prefix() {
        let mut store = DocumentStore::new();
        let a = store.add_section(None).unwrap();
        let a1 = store.add_section(Some(&a)).unwrap();
        store.add_section(Some(&a1));
        store.add_section(Some(&a));

        assert_eq!(numbers(&store), vec!["1", "1.1", "1.1.1", "1.2"]);
    }

    #[test]
    fn reordering_siblings_swaps_their_numbers() {
        let mut sections = vec![Section::new(1), Section::new(1)];
        let (first, second) = (sections[0].id, sections[1].id);

        let before = number_sections(&sections);
        assert_eq!((before[0].id, &*before[0].number), (first, "1"));

        sections.swap(0, 1);
        let after = number_sections(&sections);
        assert_eq!((after[0].id, &*after[0].number), (second, "1"));
        assert_eq!((after[1].id, &*after[1].number), (first, "2"));
    }

    #[test]
    fn deleting_a_middle_sibling_renumbers_later_ones() {
        let mut store = DocumentStore::new();
        store.add_section(None);
        let middle = store.add_section(None).unwrap();
        let last = store.add_section(None).unwrap();

        store.remove_section(&middle);
        let numbered = number_sections(store.sections());
        assert_eq!(numbered.len(), 2);
        assert_eq!(numbered[1].id, last);
        assert_eq!(numbered[1].number, "2");
    }
}
