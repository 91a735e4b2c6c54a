//! Modal stack for managing overlays
//!
//! Only the top modal receives input. Modal payloads live in the workflow
//! state, the stack just records what is open and in which order.

/// A modal overlay drawn on top of the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Email subject/body editor for the current lead
    EmailEditor,
    /// Generic progress overlay for in-flight sends
    Progress,
    /// Keyboard shortcuts
    Help,
}

/// A stack of modal overlays
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<Modal> {
        self.stack.last().copied()
    }

    #[cfg(test)]
    pub fn is_open(&self, modal: Modal) -> bool {
        self.stack.contains(&modal)
    }

    /// Remove a modal wherever it sits in the stack
    pub fn close(&mut self, modal: Modal) {
        self.stack.retain(|m| *m != modal);
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::EmailEditor);
        stack.push(Modal::Help);
        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::EmailEditor));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_close_removes_buried_modal() {
        let mut stack = ModalStack::new();
        stack.push(Modal::EmailEditor);
        stack.push(Modal::Help);

        stack.close(Modal::EmailEditor);
        assert!(!stack.is_open(Modal::EmailEditor));
        assert_eq!(stack.top(), Some(Modal::Help));
    }
}
