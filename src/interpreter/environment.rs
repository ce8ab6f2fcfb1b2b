use std::{
    collections::{BTreeMap, HashMap},
    ops::{Deref, DerefMut},
};

use tracing::trace;

use crate::{
    ast::{
        ast::{Declarations, Variable},
        types::Value,
    },
    errors::errors::{Error, ErrorImpl},
};

/// One activation record: the values of every name it declares.
pub type Frame = HashMap<Variable, Value>;

/// The final global frame, ordered by name for output.
pub type Store = BTreeMap<String, Value>;

/// Builds a frame holding the undefined value of each declaration's type.
pub fn undefined_frame(declarations: &Declarations) -> Result<Frame, Error> {
    declarations
        .iter()
        .map(|declaration| {
            Value::undefined(&declaration.ty).map(|value| (declaration.variable.clone(), value))
        })
        .collect()
}

/// The runtime state: frame 0 holds the globals, the rest are call frames.
///
/// Lookup is two-level. A name is searched in the topmost call frame and then
/// in the globals; frames in between are never visible.
#[derive(Debug, Clone)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new(globals: Frame) -> Self {
        Environment {
            frames: vec![globals],
        }
    }

    /// Number of frames, globals included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    fn top(&self) -> Option<&Frame> {
        if self.frames.len() > 1 {
            self.frames.last()
        } else {
            None
        }
    }

    pub fn get(&self, variable: &Variable) -> Result<Value, Error> {
        self.top()
            .and_then(|frame| frame.get(variable))
            .or_else(|| self.frames[0].get(variable))
            .copied()
            .ok_or_else(|| {
                Error::unpositioned(ErrorImpl::Internal {
                    message: format!("{} has no slot in the environment", variable),
                })
            })
    }

    /// Overwrites the slot `get` would read.
    pub fn set(&mut self, variable: &Variable, value: Value) -> Result<(), Error> {
        let depth = self.frames.len();
        let index = if depth > 1 && self.frames[depth - 1].contains_key(variable) {
            depth - 1
        } else {
            0
        };

        match self.frames[index].get_mut(variable) {
            Some(slot) => {
                trace!(variable = %variable, %value, frame = index, "assigned");
                *slot = value;
                Ok(())
            }
            None => Err(Error::unpositioned(ErrorImpl::Internal {
                message: format!("{} has no slot in the environment", variable),
            })),
        }
    }

    /// Pushes `frame`; it is popped when the returned guard is dropped.
    pub fn push(&mut self, frame: Frame) -> FrameGuard<'_> {
        self.frames.push(frame);
        FrameGuard { environment: self }
    }

    /// A sorted copy of the global frame.
    pub fn store(&self) -> Store {
        self.frames[0]
            .iter()
            .map(|(variable, value)| (variable.to_string(), *value))
            .collect()
    }
}

/// Keeps a call frame on the stack for as long as it lives.
pub struct FrameGuard<'a> {
    environment: &'a mut Environment,
}

impl Deref for FrameGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.environment
    }
}

impl DerefMut for FrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Environment {
        self.environment
    }
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        self.environment.frames.pop();
    }
}
