//! Object knowledge
//!
//! The [`KnowledgeBase`] owns everything the player has learnt that is not
//! stored on an object itself: the kind table used to interpret objects,
//! flavor awareness and the identification options. Per-object knowledge
//! lives in each object's [`ObjectKnowledge`] record.
//!
//! Reads go through [`KnowledgeView`]; writes go through the `notice_*`
//! methods on [`KnowledgeBase`], which only ever add knowledge.

mod events;
mod flavor;
mod notice;
mod pseudo;
mod query;
mod record;

use serde::{Deserialize, Serialize};

pub use events::NoticeReport;
pub use flavor::{FlavorState, FlavorTable};
pub use pseudo::Feeling;
pub use query::KnowledgeView;
pub use record::{IdentFlags, IdentState, ObjectKnowledge};

use crate::object::{KindId, KindTable, Object, ObjectKind};
use crate::world::IdentifyOptions;

/// Game-wide identification context
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    kinds: KindTable,
    flavors: FlavorTable,
    options: IdentifyOptions,
}

impl KnowledgeBase {
    pub fn new(kinds: KindTable) -> Self {
        Self {
            kinds,
            flavors: FlavorTable::new(),
            options: IdentifyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: IdentifyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn kinds(&self) -> &KindTable {
        &self.kinds
    }

    pub fn flavors(&self) -> &FlavorTable {
        &self.flavors
    }

    pub fn options(&self) -> &IdentifyOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: IdentifyOptions) {
        self.options = options;
    }

    /// Kind template of an object
    pub fn kind_of(&self, obj: &Object) -> &ObjectKind {
        self.kinds.get(obj.kind)
    }

    /// Read-only knowledge queries for one object
    pub fn view<'a>(&'a self, obj: &'a Object) -> KnowledgeView<'a> {
        KnowledgeView::new(self, obj)
    }

    /// True if the player knows what objects of this kind are.
    ///
    /// Unflavored kinds are always aware.
    pub fn kind_is_aware(&self, kind: KindId) -> bool {
        let template = self.kinds.get(kind);
        !template.is_flavored() || self.flavors.is_aware(kind)
    }

    /// Name the player sees for an object: the flavor until it is aware.
    pub fn object_name(&self, obj: &Object) -> String {
        let kind = self.kind_of(obj);
        match &kind.flavor {
            Some(flavor) if !self.flavors.is_aware(kind.id) => {
                format!("{} {}", flavor, kind.category.to_string().to_lowercase())
            }
            _ => kind.name.clone(),
        }
    }
}
