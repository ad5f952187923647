use bevy::math::Vec3;

/// Multiple of the sphere radius at which a falling plate freezes.
pub const OFFSET_FACTOR: f32 = 4.;

/// Derived view of a plate's record. Transitions are one-way:
/// Resting -> Flying -> Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateState {
    /// Attached, tracking the surface point it is anchored to
    Resting,
    /// Detached, falling under constant gravity
    Flying,
    /// Crossed the termination offset, frozen for good
    Done,
}

/// Per-plate record, one per surface point with the same index.
#[derive(Debug, Clone, Copy)]
pub struct Plate {
    /// Index of the surface point this plate is anchored to
    pub index: usize,
    pub position: Vec3,
    /// Position at the previous tick, the rip velocity is derived from it
    pub previous_position: Vec3,
    pub velocity: Vec3,
    /// Armed by the hit-test. Arming a flying or done plate again is a no-op.
    pub flying: bool,
    ripped: bool,
    done: bool,
    offset: f32,
}

impl Plate {
    pub fn new(index: usize, anchor: Vec3, offset: f32) -> Self {
        Plate {
            index,
            position: anchor,
            previous_position: anchor,
            velocity: Vec3::ZERO,
            flying: false,
            ripped: false,
            done: false,
            offset,
        }
    }

    pub fn state(&self) -> PlateState {
        if self.done {
            PlateState::Done
        } else if self.flying {
            PlateState::Flying
        } else {
            PlateState::Resting
        }
    }

    pub fn ripped(&self) -> bool {
        self.ripped
    }

    pub fn done(&self) -> bool {
        self.done
    }

    /// Advances the plate one tick. `anchor` is its surface point after this
    /// tick's rotation, `gravity` the per-tick velocity decrement along Z.
    ///
    /// Branch order matters: `done` is checked first so a frozen plate can
    /// never revive, even if its flying flag is set again.
    pub fn update(&mut self, anchor: Vec3, gravity: f32) {
        if self.done {
            return;
        }
        if !self.flying {
            self.previous_position = self.position;
            self.position = anchor;
            return;
        }
        if !self.ripped {
            // Launch velocity is the displacement of the last resting tick,
            // the plate inherits the sphere's rotation at the moment it detaches
            self.velocity = self.position - self.previous_position;
            self.ripped = true;
        }
        self.velocity.z -= gravity;
        self.position += self.velocity;
        if self.position.z <= -self.offset {
            self.done = true;
            self.position.z = -self.offset;
        }
    }
}
