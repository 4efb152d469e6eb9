//! Nesting-aware update order.

use crate::discovery::Module;

/// Order modules so containers are classified before what they contain.
///
/// Sorts by descendant count, largest first. The sort is stable, so modules
/// with equal counts stay in document order.
pub fn order_modules<N>(modules: &mut [Module<N>]) {
    modules.sort_by(|left, right| {
        right
            .descendant_match_count
            .cmp(&left.descendant_match_count)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::TableSource;
    use crate::table::BreakpointTable;

    fn module(element: u32, nested: usize) -> Module<u32> {
        Module {
            element,
            breakpoints: BreakpointTable::new(),
            source: TableSource::Default,
            descendant_match_count: nested,
        }
    }

    #[test]
    fn containers_first_ties_in_document_order() {
        let mut modules = vec![
            module(1, 0),
            module(2, 2),
            module(3, 1),
            module(4, 0),
            module(5, 2),
            module(6, 0),
        ];
        order_modules(&mut modules);
        let order: Vec<u32> = modules.iter().map(|module| module.element).collect();
        assert_eq!(order, vec![2, 5, 3, 1, 4, 6]);
    }

    #[test]
    fn empty_registry_is_fine() {
        let mut modules: Vec<Module<u32>> = Vec::new();
        order_modules(&mut modules);
        assert!(modules.is_empty());
    }
}
