//! PendingAction entity - a mutation awaiting explicit user confirmation

use super::app_item::AppItem;

/// The action currently held by the confirmation gate
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum PendingAction {
    /// Nothing is awaiting confirmation
    #[default]
    None,
    /// A delete gesture on a catalog entry
    Delete(AppItem),
    /// A dropped file that has not been validated by the backend yet
    Add { name: String, path: String },
}

impl PendingAction {
    /// Whether anything awaits confirmation
    pub fn is_pending(&self) -> bool {
        !matches!(self, PendingAction::None)
    }

    /// Short prompt for a confirmation dialog
    pub fn prompt(&self) -> Option<String> {
        match self {
            PendingAction::None => None,
            PendingAction::Delete(app) => {
                Some(format!("Are you sure you want to delete the app \"{}\"?", app.name))
            }
            PendingAction::Add { name, .. } => {
                Some(format!("Do you want to add the app \"{}\"?", name))
            }
        }
    }
}
