//! State descriptor types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{ModalSpec, Resolve};
use crate::url::UrlPattern;

/// Registered navigation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    /// Abstract root shared by every entity screen
    #[serde(rename = "entity")]
    Entity,
    /// Paginated list
    #[serde(rename = "wechat-user")]
    List,
    /// Read-only detail page
    #[serde(rename = "wechat-user-detail")]
    Detail,
    /// Edit dialog opened from the detail page
    #[serde(rename = "wechat-user-detail.edit")]
    DetailEdit,
    /// Create dialog
    #[serde(rename = "wechat-user.new")]
    New,
    /// Edit dialog opened from the list
    #[serde(rename = "wechat-user.edit")]
    Edit,
    /// Delete confirmation dialog
    #[serde(rename = "wechat-user.delete")]
    Delete,
}

impl StateId {
    /// All states, parents before children
    pub fn all() -> &'static [StateId] {
        &[
            StateId::Entity,
            StateId::List,
            StateId::Detail,
            StateId::DetailEdit,
            StateId::New,
            StateId::Edit,
            StateId::Delete,
        ]
    }

    /// Registered state name
    pub fn name(self) -> &'static str {
        match self {
            StateId::Entity => "entity",
            StateId::List => "wechat-user",
            StateId::Detail => "wechat-user-detail",
            StateId::DetailEdit => "wechat-user-detail.edit",
            StateId::New => "wechat-user.new",
            StateId::Edit => "wechat-user.edit",
            StateId::Delete => "wechat-user.delete",
        }
    }

    /// Parse a registered state name
    pub fn from_name(name: &str) -> Option<StateId> {
        Self::all().iter().copied().find(|id| id.name() == name)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Template + controller pair rendered into the content area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewBinding {
    pub template: &'static str,
    pub controller: &'static str,
}

/// One node of the state tree
#[derive(Debug, Clone)]
pub struct StateDescriptor {
    pub id: StateId,
    pub parent: Option<StateId>,
    /// Own URL fragment, appended to the parent's
    pub url: Option<UrlPattern>,
    /// Abstract states only group children and cannot be entered
    pub is_abstract: bool,
    /// Authorities of which the session must hold at least one
    pub authorities: Vec<&'static str>,
    /// Translation key of the page title
    pub page_title: Option<&'static str>,
    pub view: Option<ViewBinding>,
    pub resolves: Vec<Resolve>,
    /// Dialog opened on entry
    pub modal: Option<ModalSpec>,
}

impl StateDescriptor {
    #[must_use]
    pub fn new(id: StateId) -> Self {
        Self {
            id,
            parent: None,
            url: None,
            is_abstract: false,
            authorities: Vec::new(),
            page_title: None,
            view: None,
            resolves: Vec::new(),
            modal: None,
        }
    }

    #[must_use]
    pub fn abstract_root(id: StateId) -> Self {
        Self {
            is_abstract: true,
            ..Self::new(id)
        }
    }

    #[must_use]
    pub fn parent(mut self, parent: StateId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn url(mut self, pattern: UrlPattern) -> Self {
        self.url = Some(pattern);
        self
    }

    #[must_use]
    pub fn authorities(mut self, authorities: &[&'static str]) -> Self {
        self.authorities = authorities.to_vec();
        self
    }

    #[must_use]
    pub fn page_title(mut self, key: &'static str) -> Self {
        self.page_title = Some(key);
        self
    }

    #[must_use]
    pub fn view(mut self, template: &'static str, controller: &'static str) -> Self {
        self.view = Some(ViewBinding {
            template,
            controller,
        });
        self
    }

    #[must_use]
    pub fn resolve(mut self, resolve: Resolve) -> Self {
        self.resolves.push(resolve);
        self
    }

    #[must_use]
    pub fn modal(mut self, spec: ModalSpec) -> Self {
        self.modal = Some(spec);
        self
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }
}
