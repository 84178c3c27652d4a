use regform_lib::Field;

/// Something on the form that can hold focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Input(Field),
    Submit,
}

impl FocusTarget {
    /// Focus order: the four inputs, then the submit button.
    pub const ORDER: [FocusTarget; 5] = [
        FocusTarget::Input(Field::Username),
        FocusTarget::Input(Field::Email),
        FocusTarget::Input(Field::Password),
        FocusTarget::Input(Field::ConfirmPassword),
        FocusTarget::Submit,
    ];

    fn position(self) -> usize {
        match self {
            Self::Input(field) => field.index(),
            Self::Submit => Self::ORDER.len() - 1,
        }
    }
}

/// Tracks which element is currently focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    focused: FocusTarget,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            focused: FocusTarget::ORDER[0],
        }
    }
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> FocusTarget {
        self.focused
    }

    /// The focused input, if focus is on an input.
    pub fn focused_field(&self) -> Option<Field> {
        match self.focused {
            FocusTarget::Input(field) => Some(field),
            FocusTarget::Submit => None,
        }
    }

    /// Returns true if focus changed.
    pub fn focus(&mut self, target: FocusTarget) -> bool {
        if self.focused == target {
            return false;
        }
        self.focused = target;
        true
    }

    /// Focus the next element (Tab navigation), wrapping around.
    pub fn focus_next(&mut self) -> FocusTarget {
        let order = FocusTarget::ORDER;
        self.focused = order[(self.focused.position() + 1) % order.len()];
        self.focused
    }

    /// Focus the previous element (Shift+Tab navigation), wrapping around.
    pub fn focus_prev(&mut self) -> FocusTarget {
        let order = FocusTarget::ORDER;
        self.focused = order[(self.focused.position() + order.len() - 1) % order.len()];
        self.focused
    }
}
