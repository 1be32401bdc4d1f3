use crate::runtime::SpaceHandle;
use openxr as xr;
use std::ops::{Index, IndexMut};
use vrsample_common::{ControllerInput, HAND_LEFT_PATH, HAND_RIGHT_PATH};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn user_path(self) -> &'static str {
        match self {
            Side::Left => HAND_LEFT_PATH,
            Side::Right => HAND_RIGHT_PATH,
        }
    }

    pub fn input_path(self, input: ControllerInput) -> &'static str {
        match self {
            Side::Left => input.left_path(),
            Side::Right => input.right_path(),
        }
    }
}

/// One value per controller side, addressed by [`Side`] instead of an ordinal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SidePair<T> {
    pub left: T,
    pub right: T,
}

impl<T> SidePair<T> {
    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            left: f(Side::Left),
            right: f(Side::Right),
        }
    }

    pub fn try_from_fn<E>(mut f: impl FnMut(Side) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            left: f(Side::Left)?,
            right: f(Side::Right)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Left, &self.left), (Side::Right, &self.right)].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(Side, &T) -> U) -> SidePair<U> {
        SidePair {
            left: f(Side::Left, &self.left),
            right: f(Side::Right, &self.right),
        }
    }
}

impl<T> Index<Side> for SidePair<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Side> for SidePair<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A physical controller position. Owns the spaces anchored to its pose actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerSlot {
    pub side: Side,
    pub path: xr::Path,
    pub aim_space: SpaceHandle,
    pub grip_space: SpaceHandle,
}
