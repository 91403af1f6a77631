//! Stored documents, folders and their access policies.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    ClientId, CompanyId, DocumentId, FolderId, FolderName, TypeConstraintError, UserId,
};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    #[default]
    Private,
    Public,
    Selected,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Private => "private",
            AccessType::Public => "public",
            AccessType::Selected => "selected",
        }
    }
}

impl FromStr for AccessType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "private" => Ok(AccessType::Private),
            "public" => Ok(AccessType::Public),
            "selected" => Ok(AccessType::Selected),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown access type `{other}`"
            ))),
        }
    }
}

/// Access control list; user ids only exist for [`AccessPolicy::Selected`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AccessPolicy {
    #[default]
    Private,
    Public,
    Selected(Vec<UserId>),
}

impl AccessPolicy {
    /// Builds a policy from the raw wire pair, dropping ids that do not apply.
    pub fn from_wire(access_type: AccessType, user_ids: Vec<UserId>) -> Self {
        match access_type {
            AccessType::Private => AccessPolicy::Private,
            AccessType::Public => AccessPolicy::Public,
            AccessType::Selected => AccessPolicy::Selected(user_ids),
        }
    }

    pub fn access_type(&self) -> AccessType {
        match self {
            AccessPolicy::Private => AccessType::Private,
            AccessPolicy::Public => AccessType::Public,
            AccessPolicy::Selected(_) => AccessType::Selected,
        }
    }

    pub fn user_ids(&self) -> &[UserId] {
        match self {
            AccessPolicy::Selected(ids) => ids,
            _ => &[],
        }
    }
}

/// Serializes as the `accessType` / `accessUserIds` pair.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessPolicyWire<'a> {
    access_type: AccessType,
    access_user_ids: &'a [UserId],
}

impl Serialize for AccessPolicy {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AccessPolicyWire {
            access_type: self.access_type(),
            access_user_ids: self.user_ids(),
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: u64,
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub owner_id: UserId,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    pub access_type: AccessType,
    #[serde(default)]
    pub access_user_ids: Vec<UserId>,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub owner_id: UserId,
    pub company_id: CompanyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::from_wire(self.access_type, self.access_user_ids.clone())
    }
}

/// Folder creation or full update payload.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    pub name: FolderName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
    #[serde(flatten)]
    pub access: AccessPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
}

/// A file received from the browser, forwarded to the backend as multipart.
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Walks `parent_id` links from `current` up to the root.
///
/// Returns the chain ordered root first. Cycles and dangling parents end the walk.
pub fn breadcrumbs(folders: &[Folder], current: Option<FolderId>) -> Vec<Folder> {
    let mut chain: Vec<Folder> = Vec::new();
    let mut cursor = current;
    while let Some(id) = cursor {
        if chain.iter().any(|folder| folder.id == id) {
            break;
        }
        let Some(folder) = folders.iter().find(|folder| folder.id == id) else {
            break;
        };
        cursor = folder.parent_id;
        chain.push(folder.clone());
    }
    chain.reverse();
    chain
}
