use crate::Sortable;

/// A mutable slice paired with a "less" function.
pub struct LessSlice<'a, T, F> {
    items: &'a mut [T],
    less: F,
}

impl<'a, T, F> LessSlice<'a, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    pub fn new(items: &'a mut [T], less: F) -> Self {
        LessSlice { items, less }
    }
}

impl<T, F> Sortable for LessSlice<'_, T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn len(&self) -> usize {
        self.items.len()
    }

    fn less(&self, i: usize, j: usize) -> bool {
        (self.less)(&self.items[i], &self.items[j])
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.items.swap(i, j)
    }
}
