//! Persistence for groups, memberships, and chat messages.

use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use uuid::Uuid;

use warren_types::{
    Group, GroupId, GroupMembership, GroupMessage, GroupMessageId, MembershipId, MembershipRole,
    MembershipStatus, UserId, Visibility,
};

use crate::codec::{
    membership_role_from_db, membership_role_to_db, membership_status_from_db,
    membership_status_to_db, visibility_from_db, visibility_to_db,
};
use crate::error::StoreError;

/// Operations on the `groups`, `group_memberships`, and `group_messages`
/// tables.
pub struct GroupStore;

/// A row from the `groups` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct GroupRow {
    id: Uuid,
    name: String,
    description: String,
    visibility: String,
    created_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_domain(self) -> Result<Group, StoreError> {
        Ok(Group {
            id: GroupId::from(self.id),
            name: self.name,
            description: self.description,
            visibility: visibility_from_db(&self.visibility)?,
            created_at: self.created_at,
        })
    }
}

/// A row from the `group_memberships` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: Uuid,
    group_id: Uuid,
    role: String,
    status: String,
    joined_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_domain(self) -> Result<GroupMembership, StoreError> {
        Ok(GroupMembership {
            id: MembershipId::from(self.id),
            user_id: UserId::from(self.user_id),
            group_id: GroupId::from(self.group_id),
            role: membership_role_from_db(&self.role)?,
            status: membership_status_from_db(&self.status)?,
            joined_at: self.joined_at,
        })
    }
}

/// A row from the `group_messages` table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MessageRow {
    id: Uuid,
    group_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<MessageRow> for GroupMessage {
    fn from(row: MessageRow) -> Self {
        Self {
            id: GroupMessageId::from(row.id),
            group_id: GroupId::from(row.group_id),
            user_id: UserId::from(row.user_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

const SELECT_GROUP: &str =
    r"SELECT id, name, description, visibility::TEXT as visibility, created_at FROM groups";

const SELECT_MEMBERSHIP: &str = r"SELECT id, user_id, group_id, role::TEXT as role,
       status::TEXT as status, joined_at
  FROM group_memberships";

impl GroupStore {
    /// Insert a new group row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails (including a
    /// unique violation on the name).
    pub async fn insert(conn: &mut PgConnection, group: &Group) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO groups (id, name, description, visibility, created_at)
              VALUES ($1, $2, $3, $4::visibility, $5)",
        )
        .bind(group.id.into_inner())
        .bind(&group.name)
        .bind(&group.description)
        .bind(visibility_to_db(group.visibility))
        .bind(group.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a group by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch(conn: &mut PgConnection, id: GroupId) -> Result<Option<Group>, StoreError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!("{SELECT_GROUP} WHERE id = $1"))
            .bind(id.into_inner())
            .fetch_optional(&mut *conn)
            .await?;
        row.map(GroupRow::into_domain).transpose()
    }

    /// Whether a group name is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn name_taken(conn: &mut PgConnection, name: &str) -> Result<bool, StoreError> {
        let row: Option<(Uuid,)> = sqlx::query_as(r"SELECT id FROM groups WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.is_some())
    }

    /// Update a group's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn update(
        conn: &mut PgConnection,
        id: GroupId,
        name: &str,
        description: &str,
        visibility: Visibility,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"UPDATE groups SET name = $2, description = $3, visibility = $4::visibility
               WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(name)
        .bind(description)
        .bind(visibility_to_db(visibility))
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Delete a group (memberships and messages cascade).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete(conn: &mut PgConnection, id: GroupId) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM groups WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// List all public groups, by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_public(conn: &mut PgConnection) -> Result<Vec<Group>, StoreError> {
        let rows = sqlx::query_as::<_, GroupRow>(&format!(
            "{SELECT_GROUP} WHERE visibility = 'public' ORDER BY name"
        ))
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(GroupRow::into_domain).collect()
    }

    /// List the groups a user belongs to (any status), by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_for_user(
        conn: &mut PgConnection,
        user_id: UserId,
    ) -> Result<Vec<Group>, StoreError> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r"SELECT g.id, g.name, g.description, g.visibility::TEXT as visibility, g.created_at
                FROM groups g
                JOIN group_memberships m ON m.group_id = g.id
               WHERE m.user_id = $1
               ORDER BY g.name",
        )
        .bind(user_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(GroupRow::into_domain).collect()
    }

    // -- memberships --------------------------------------------------------

    /// Insert a membership row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails (including the
    /// one-membership-per-user unique constraint).
    pub async fn insert_membership(
        conn: &mut PgConnection,
        membership: &GroupMembership,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO group_memberships (id, user_id, group_id, role, status, joined_at)
              VALUES ($1, $2, $3, $4::membership_role, $5::membership_status, $6)",
        )
        .bind(membership.id.into_inner())
        .bind(membership.user_id.into_inner())
        .bind(membership.group_id.into_inner())
        .bind(membership_role_to_db(membership.role))
        .bind(membership_status_to_db(membership.status))
        .bind(membership.joined_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// Fetch a user's membership in a group.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or the row is corrupt.
    pub async fn fetch_membership(
        conn: &mut PgConnection,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<Option<GroupMembership>, StoreError> {
        let row = sqlx::query_as::<_, MembershipRow>(&format!(
            "{SELECT_MEMBERSHIP} WHERE user_id = $1 AND group_id = $2"
        ))
        .bind(user_id.into_inner())
        .bind(group_id.into_inner())
        .fetch_optional(&mut *conn)
        .await?;
        row.map(MembershipRow::into_domain).transpose()
    }

    /// List a group's memberships.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the query fails or a row is corrupt.
    pub async fn list_memberships(
        conn: &mut PgConnection,
        group_id: GroupId,
    ) -> Result<Vec<GroupMembership>, StoreError> {
        let rows = sqlx::query_as::<_, MembershipRow>(&format!(
            "{SELECT_MEMBERSHIP} WHERE group_id = $1 ORDER BY joined_at"
        ))
        .bind(group_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        rows.into_iter().map(MembershipRow::into_domain).collect()
    }

    /// Set a membership's status (the approval transition).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn set_membership_status(
        conn: &mut PgConnection,
        id: MembershipId,
        status: MembershipStatus,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE group_memberships SET status = $2::membership_status WHERE id = $1")
            .bind(id.into_inner())
            .bind(membership_status_to_db(status))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Set a membership's role (owner-driven promotion/demotion).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the update fails.
    pub async fn set_membership_role(
        conn: &mut PgConnection,
        id: MembershipId,
        role: MembershipRole,
    ) -> Result<(), StoreError> {
        sqlx::query(r"UPDATE group_memberships SET role = $2::membership_role WHERE id = $1")
            .bind(id.into_inner())
            .bind(membership_role_to_db(role))
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    /// Delete a membership row (reject, leave, or kick).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the delete fails.
    pub async fn delete_membership(
        conn: &mut PgConnection,
        id: MembershipId,
    ) -> Result<(), StoreError> {
        sqlx::query(r"DELETE FROM group_memberships WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    // -- messages -----------------------------------------------------------

    /// Append a chat message.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the insert fails.
    pub async fn insert_message(
        conn: &mut PgConnection,
        message: &GroupMessage,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r"INSERT INTO group_messages (id, group_id, user_id, content, created_at)
              VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(message.id.into_inner())
        .bind(message.group_id.into_inner())
        .bind(message.user_id.into_inner())
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    /// List a group's messages, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Postgres`] if the query fails.
    pub async fn list_messages(
        conn: &mut PgConnection,
        group_id: GroupId,
    ) -> Result<Vec<GroupMessage>, StoreError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r"SELECT id, group_id, user_id, content, created_at
                FROM group_messages WHERE group_id = $1 ORDER BY created_at",
        )
        .bind(group_id.into_inner())
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows.into_iter().map(GroupMessage::from).collect())
    }
}
