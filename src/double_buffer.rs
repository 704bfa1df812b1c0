// src/double_buffer.rs

use crate::grid::Grid2D;
use crate::scalar_field::ScalarField2D;

/// Two equally sized fields that alternate between "current" (read) and
/// "next" (write) roles.
///
/// Each slot carries the version of the step that last wrote it: the
/// initial state is version 0 and step k produces version k. Swapping only
/// toggles `front`, so no data is copied and no slot is ever reallocated.
pub struct DoubleBuffer {
    slots: [ScalarField2D; 2],
    versions: [u64; 2],
    front: usize,
}

impl DoubleBuffer {
    /// Both slots zero-filled; slot 0 is current.
    pub fn new(grid: Grid2D) -> Self {
        Self {
            slots: [ScalarField2D::new(grid), ScalarField2D::new(grid)],
            versions: [0, 0],
            front: 0,
        }
    }

    pub fn grid(&self) -> Grid2D {
        self.slots[0].grid
    }

    pub fn current(&self) -> &ScalarField2D {
        &self.slots[self.front]
    }

    /// Mutable access to the current field, for initialisation.
    pub fn current_mut(&mut self) -> &mut ScalarField2D {
        &mut self.slots[self.front]
    }

    /// Mutable access to the write side, for initialisation.
    pub fn next_mut(&mut self) -> &mut ScalarField2D {
        &mut self.slots[1 - self.front]
    }

    /// Version of the data in the current slot.
    pub fn current_version(&self) -> u64 {
        self.versions[self.front]
    }

    /// Index (0 or 1) of the slot currently holding the result.
    pub fn front_slot(&self) -> usize {
        self.front
    }

    /// Run one step: `write(current, next)` must fully populate `next`,
    /// after which the roles swap.
    pub fn advance<F>(&mut self, write: F)
    where
        F: FnOnce(&ScalarField2D, &mut ScalarField2D),
    {
        let (first, second) = self.slots.split_at_mut(1);
        let (read, dst) = if self.front == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        };
        write(read, dst);

        let back = 1 - self.front;
        self.versions[back] = self.versions[self.front] + 1;
        self.front = back;
    }

    /// Consume the buffer, returning the field that holds the latest data.
    pub fn into_current(self) -> ScalarField2D {
        let [a, b] = self.slots;
        if self.front == 0 {
            a
        } else {
            b
        }
    }
}
