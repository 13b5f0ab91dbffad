use crate::model::session::loaded_dataset::*;

#[doc = r#"
    Per-session context passed explicitly to the experiment operations.
    Holds the last successfully loaded dataset; a failed load leaves it as it was.
"#]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub dataset: Option<LoadedDataset>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dataset(&self) -> Option<&LoadedDataset> {
        self.dataset.as_ref()
    }
}
