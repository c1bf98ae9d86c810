//! People that gifts are bought for.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A person who receives gifts. Identity is the `id`; the name is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub id: Uuid,
    pub name: String,
}

impl Recipient {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    pub fn with_id(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Recipient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Recipient {}

impl Hash for Recipient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Identifiable for Recipient {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Recipient {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Recipient {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
