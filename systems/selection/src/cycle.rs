use std::iter::FusedIterator;

#[derive(Clone, Debug)]
struct Link<T> {
    value: T,
    next: usize,
    previous: usize,
}

/// Circular doubly-linked cursor over a growable set of values.
///
/// Links are stored as indices into a backing arena, so the ring owns every
/// value outright. Following `next` (or `previous`) [`Cycle::len`] times from
/// any element returns to it. New values are inserted immediately before the
/// current element, which makes insertion order the traversal order starting
/// from the first value ever added.
#[derive(Clone, Debug)]
pub struct Cycle<T> {
    links: Vec<Link<T>>,
    current: Option<usize>,
}

impl<T> Cycle<T> {
    /// Creates an empty ring.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            links: Vec::new(),
            current: None,
        }
    }

    /// Number of values in the ring.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Reports whether the ring holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Value under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.current.map(|index| &self.links[index].value)
    }

    /// Value one step right of the cursor.
    #[must_use]
    pub fn next(&self) -> Option<&T> {
        self.current
            .map(|index| &self.links[self.links[index].next].value)
    }

    /// Value one step left of the cursor.
    #[must_use]
    pub fn previous(&self) -> Option<&T> {
        self.current
            .map(|index| &self.links[self.links[index].previous].value)
    }

    /// Inserts `value` at the end of the ring, directly before the cursor.
    ///
    /// The first value added to an empty ring becomes the cursor.
    pub fn add(&mut self, value: T) {
        let index = self.links.len();
        match self.current {
            None => {
                self.links.push(Link {
                    value,
                    next: index,
                    previous: index,
                });
                self.current = Some(index);
            }
            Some(current) => {
                let previous = self.links[current].previous;
                self.links.push(Link {
                    value,
                    next: current,
                    previous,
                });
                self.links[previous].next = index;
                self.links[current].previous = index;
            }
        }
    }

    /// Inserts every value in iteration order.
    pub fn add_range<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.add(value);
        }
    }

    /// Moves the cursor one step right. Does nothing on an empty ring.
    pub fn cycle_right(&mut self) {
        if let Some(index) = self.current {
            self.current = Some(self.links[index].next);
        }
    }

    /// Moves the cursor one step left. Does nothing on an empty ring.
    pub fn cycle_left(&mut self) {
        if let Some(index) = self.current {
            self.current = Some(self.links[index].previous);
        }
    }

    /// Drops every value and resets the cursor.
    pub fn clear(&mut self) {
        self.links.clear();
        self.current = None;
    }

    /// Visits each value once, starting at the cursor and moving right.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            links: &self.links,
            cursor: self.current,
            remaining: self.links.len(),
        }
    }
}

impl<T> Default for Cycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for Cycle<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.add_range(values);
    }
}

impl<T> FromIterator<T> for Cycle<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut cycle = Self::new();
        cycle.add_range(values);
        cycle
    }
}

impl<'a, T> IntoIterator for &'a Cycle<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over the values of a [`Cycle`] in ring order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    links: &'a [Link<T>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor?;
        let link = &self.links[index];
        self.remaining -= 1;
        self.cursor = Some(link.next);
        Some(&link.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
