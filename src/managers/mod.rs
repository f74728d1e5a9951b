// Sitelens state managers
// Managers own navigation state: the history stack, the viewer and the controller tying them to reviews.

pub mod history_stack;
pub mod navigation_controller;
pub mod page_viewer;
