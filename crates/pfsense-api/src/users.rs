// User endpoints (v2): local users and user groups.

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::error::Error;

const USER_ENDPOINT: &str = "api/v2/user";
const USERS_ENDPOINT: &str = "api/v2/users";
const GROUP_ENDPOINT: &str = "api/v2/user/group";
const GROUPS_ENDPOINT: &str = "api/v2/user/groups";

/// Configurable fields of a local user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub name: String,
    /// Write-only; the appliance never echoes it back.
    pub password: String,
    pub scope: String,
    #[serde(rename = "priv")]
    pub privileges: Vec<String>,
    pub disabled: bool,
    pub descr: String,
    pub expires: Option<String>,
    pub cert: Vec<String>,
    #[serde(rename = "authorizedkeys")]
    pub authorized_keys: Option<String>,
    #[serde(rename = "ipsecpsk")]
    pub ipsec_psk: Option<String>,
}

/// A local user with its server-assigned IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub config: UserRequest,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub uid: i64,
}

/// Configurable fields of a user group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserGroupRequest {
    pub name: String,
    pub scope: String,
    pub description: String,
    pub member: Vec<String>,
    #[serde(rename = "priv")]
    pub privileges: Vec<String>,
}

/// A user group with its server-assigned IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserGroup {
    #[serde(flatten)]
    pub config: UserGroupRequest,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub gid: i64,
}

impl Client {
    /// List all local users.
    pub async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.get(USERS_ENDPOINT, &[]).await
    }

    /// Get one user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, Error> {
        self.get(USER_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// Create a new user.
    pub async fn create_user(&self, request: &UserRequest) -> Result<User, Error> {
        self.post(USER_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing user.
    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<User, Error> {
        let body = User {
            config: request.clone(),
            id,
            uid: 0,
        };
        self.patch(USER_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a user by ID, returning the deleted user.
    pub async fn delete_user(&self, id: i64) -> Result<User, Error> {
        self.delete(USER_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// List all user groups.
    pub async fn list_user_groups(&self) -> Result<Vec<UserGroup>, Error> {
        self.get(GROUPS_ENDPOINT, &[]).await
    }

    /// Get one user group by ID.
    pub async fn get_user_group(&self, id: i64) -> Result<UserGroup, Error> {
        self.get(GROUP_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// Create a new user group.
    pub async fn create_user_group(&self, request: &UserGroupRequest) -> Result<UserGroup, Error> {
        self.post(GROUP_ENDPOINT, &[], Some(request)).await
    }

    /// Update an existing user group.
    pub async fn update_user_group(
        &self,
        id: i64,
        request: &UserGroupRequest,
    ) -> Result<UserGroup, Error> {
        let body = UserGroup {
            config: request.clone(),
            id,
            gid: 0,
        };
        self.patch(GROUP_ENDPOINT, &[], Some(&body)).await
    }

    /// Delete a user group by ID, returning the deleted group.
    pub async fn delete_user_group(&self, id: i64) -> Result<UserGroup, Error> {
        self.delete(GROUP_ENDPOINT, &[("id", id.to_string())]).await
    }

    /// Replace the whole set of user groups.
    pub async fn put_user_groups(
        &self,
        groups: &[UserGroupRequest],
    ) -> Result<Vec<UserGroup>, Error> {
        self.put(GROUPS_ENDPOINT, &[], Some(groups)).await
    }
}
