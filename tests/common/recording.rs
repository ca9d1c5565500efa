//! Action sink that records everything dispatched into it.

use parking_lot::Mutex;
use postboard::blog::BlogAction;
use postboard::mvi::{Action, Dispatch};

#[derive(Default)]
pub struct RecordingSink {
    actions: Mutex<Vec<BlogAction>>,
}

impl RecordingSink {
    pub fn actions(&self) -> Vec<BlogAction> {
        self.actions.lock().clone()
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.actions.lock().iter().map(|a| a.type_name()).collect()
    }
}

impl Dispatch<BlogAction> for RecordingSink {
    fn dispatch(&self, action: BlogAction) {
        self.actions.lock().push(action);
    }
}
