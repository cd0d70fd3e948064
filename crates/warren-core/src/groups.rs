//! Group operations: lifecycle, membership moderation, and chat.
//!
//! The permission matrix lives in `warren-social`; this module enforces
//! it against the membership rows read inside each transaction. Creation
//! and deletion are gold-gated through the ledger.

use warren_db::GroupStore;
use warren_social::group::{
    can_chat, can_delete, can_update, validate_leave, GROUP_CREATION_COST, GROUP_DELETION_COST,
};
use warren_social::roles::{approve_transition, can_kick, can_moderate, join_status,
    validate_role_change};
use warren_social::SocialError;
use warren_types::{
    Currency, Group, GroupId, GroupMembership, GroupMessage, GroupMessageId, MembershipId,
    MembershipRole, MembershipStatus, UserId, Visibility,
};

use crate::engine::Engine;
use crate::error::EngineError;

/// Input for creating a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Globally unique name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Public groups admit joiners immediately.
    pub visibility: Visibility,
}

/// Input for updating a group.
#[derive(Debug, Clone)]
pub struct GroupUpdate {
    /// New name (still globally unique).
    pub name: String,
    /// New description.
    pub description: String,
    /// New visibility.
    pub visibility: Visibility,
}

impl Engine {
    /// Create a group: charge the creation fee and seat the creator as
    /// an active OWNER, atomically.
    ///
    /// # Errors
    ///
    /// Conflict when the name is taken or the fee is unaffordable.
    pub async fn create_group(
        &self,
        user_id: UserId,
        input: NewGroup,
    ) -> Result<Group, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        if GroupStore::name_taken(&mut tx, &input.name).await? {
            return Err(EngineError::Conflict(format!(
                "A group named \"{}\" already exists.",
                input.name
            )));
        }
        let user = Self::require_user(&mut tx, user_id).await?;

        let group = Group {
            id: GroupId::new(),
            name: input.name,
            description: input.description,
            visibility: input.visibility,
            created_at: now,
        };
        self.debit(
            &mut tx,
            &user,
            Currency::Gold,
            GROUP_CREATION_COST,
            "GROUP_CREATION",
            Some(group.id.into_inner()),
        )
        .await?;
        GroupStore::insert(&mut tx, &group).await?;

        let membership = GroupMembership {
            id: MembershipId::new(),
            user_id,
            group_id: group.id,
            role: MembershipRole::Owner,
            status: MembershipStatus::Active,
            joined_at: now,
        };
        GroupStore::insert_membership(&mut tx, &membership).await?;
        tx.commit().await?;

        tracing::info!(group = %group.id, owner = %user_id, "Group created");
        Ok(group)
    }

    /// Fetch a group by id.
    pub async fn get_group(&self, group_id: GroupId) -> Result<Group, EngineError> {
        let mut tx = self.pool().begin().await?;
        let group = Self::require_group(&mut tx, group_id).await?;
        tx.commit().await?;
        Ok(group)
    }

    /// List all public groups.
    pub async fn discover_groups(&self) -> Result<Vec<Group>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let groups = GroupStore::list_public(&mut tx).await?;
        tx.commit().await?;
        Ok(groups)
    }

    /// List the groups the caller belongs to.
    pub async fn my_groups(&self, user_id: UserId) -> Result<Vec<Group>, EngineError> {
        let mut tx = self.pool().begin().await?;
        let groups = GroupStore::list_for_user(&mut tx, user_id).await?;
        tx.commit().await?;
        Ok(groups)
    }

    /// Update a group's name/description/visibility (active OWNER or
    /// ADMIN only).
    pub async fn update_group(
        &self,
        group_id: GroupId,
        user_id: UserId,
        input: GroupUpdate,
    ) -> Result<Group, EngineError> {
        let mut tx = self.pool().begin().await?;
        let group = Self::require_group(&mut tx, group_id).await?;
        let membership = Self::require_membership(&mut tx, user_id, group_id).await?;

        if !can_update(membership.role, membership.status) {
            return Err(EngineError::Forbidden(
                "Only the owner or an admin may update the group.".to_owned(),
            ));
        }
        if input.name != group.name && GroupStore::name_taken(&mut tx, &input.name).await? {
            return Err(EngineError::Conflict(format!(
                "A group named \"{}\" already exists.",
                input.name
            )));
        }

        GroupStore::update(&mut tx, group_id, &input.name, &input.description, input.visibility)
            .await?;
        tx.commit().await?;

        Ok(Group {
            name: input.name,
            description: input.description,
            visibility: input.visibility,
            ..group
        })
    }

    /// Delete a group (owner only): charge the deletion fee and remove
    /// the group with its memberships and messages, atomically.
    pub async fn delete_group(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<String, EngineError> {
        let mut tx = self.pool().begin().await?;
        let _ = Self::require_group(&mut tx, group_id).await?;
        let membership = Self::require_membership(&mut tx, user_id, group_id).await?;

        if !can_delete(membership.role) {
            return Err(EngineError::Forbidden(
                "Only the owner may delete the group.".to_owned(),
            ));
        }

        let user = Self::require_user(&mut tx, user_id).await?;
        self.debit(
            &mut tx,
            &user,
            Currency::Gold,
            GROUP_DELETION_COST,
            "GROUP_DELETION",
            Some(group_id.into_inner()),
        )
        .await?;
        GroupStore::delete(&mut tx, group_id).await?;
        tx.commit().await?;

        tracing::info!(group = %group_id, owner = %user_id, "Group deleted");
        Ok(format!(
            "Group deleted for {GROUP_DELETION_COST} gold."
        ))
    }

    /// Join a group: public groups admit immediately, private ones queue
    /// a pending request.
    ///
    /// # Errors
    ///
    /// Conflict when a membership (of either status) already exists.
    pub async fn join_group(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<GroupMembership, EngineError> {
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let group = Self::require_group(&mut tx, group_id).await?;
        let _ = Self::require_user(&mut tx, user_id).await?;
        if GroupStore::fetch_membership(&mut tx, user_id, group_id)
            .await?
            .is_some()
        {
            return Err(EngineError::Conflict(
                "You are already a member of this group or have a pending request.".to_owned(),
            ));
        }

        let membership = GroupMembership {
            id: MembershipId::new(),
            user_id,
            group_id,
            role: MembershipRole::Member,
            status: join_status(group.visibility),
            joined_at: now,
        };
        GroupStore::insert_membership(&mut tx, &membership)
            .await
            .map_err(|err| {
                if err.is_unique_violation() {
                    EngineError::Conflict(
                        "You are already a member of this group or have a pending request."
                            .to_owned(),
                    )
                } else {
                    err.into()
                }
            })?;
        tx.commit().await?;

        tracing::info!(group = %group_id, user = %user_id, status = ?membership.status, "Joined group");
        Ok(membership)
    }

    /// Leave a group. The owner cannot leave (ownership transfer is
    /// unsupported); they delete the group instead.
    pub async fn leave_group(&self, group_id: GroupId, user_id: UserId) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;
        let membership = Self::require_membership(&mut tx, user_id, group_id).await?;
        validate_leave(membership.role)?;
        GroupStore::delete_membership(&mut tx, membership.id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Approve a pending join request (active OWNER or ADMIN only).
    pub async fn approve_request(
        &self,
        group_id: GroupId,
        target_user_id: UserId,
        acting_user_id: UserId,
    ) -> Result<GroupMembership, EngineError> {
        let mut tx = self.pool().begin().await?;

        let actor = Self::require_membership(&mut tx, acting_user_id, group_id).await?;
        if !can_moderate(actor.role, actor.status) {
            return Err(EngineError::Forbidden(
                "Only the owner or an admin may approve join requests.".to_owned(),
            ));
        }

        let target = Self::require_target_membership(&mut tx, target_user_id, group_id).await?;
        let next = approve_transition(target.status)?;
        GroupStore::set_membership_status(&mut tx, target.id, next).await?;
        tx.commit().await?;

        tracing::info!(group = %group_id, user = %target_user_id, "Join request approved");
        Ok(GroupMembership {
            status: next,
            ..target
        })
    }

    /// Reject a pending join request (active OWNER or ADMIN only); the
    /// membership row is removed.
    pub async fn reject_request(
        &self,
        group_id: GroupId,
        target_user_id: UserId,
        acting_user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;

        let actor = Self::require_membership(&mut tx, acting_user_id, group_id).await?;
        if !can_moderate(actor.role, actor.status) {
            return Err(EngineError::Forbidden(
                "Only the owner or an admin may reject join requests.".to_owned(),
            ));
        }

        let target = Self::require_target_membership(&mut tx, target_user_id, group_id).await?;
        if target.status != MembershipStatus::Pending {
            return Err(SocialError::NotPending {
                status: target.status,
            }
            .into());
        }
        GroupStore::delete_membership(&mut tx, target.id).await?;
        tx.commit().await?;

        tracing::info!(group = %group_id, user = %target_user_id, "Join request rejected");
        Ok(())
    }

    /// Promote or demote a member between MEMBER and ADMIN (owner only;
    /// the OWNER role itself is immutable).
    pub async fn manage_member_role(
        &self,
        group_id: GroupId,
        acting_user_id: UserId,
        target_user_id: UserId,
        new_role: MembershipRole,
    ) -> Result<GroupMembership, EngineError> {
        let mut tx = self.pool().begin().await?;

        let actor = Self::require_membership(&mut tx, acting_user_id, group_id).await?;
        let target = Self::require_target_membership(&mut tx, target_user_id, group_id).await?;
        validate_role_change(actor.role, target.role, new_role)?;

        GroupStore::set_membership_role(&mut tx, target.id, new_role).await?;
        tx.commit().await?;

        tracing::info!(
            group = %group_id,
            user = %target_user_id,
            role = ?new_role,
            "Member role changed"
        );
        Ok(GroupMembership {
            role: new_role,
            ..target
        })
    }

    /// Kick a member: the OWNER may kick an ADMIN or MEMBER, an ADMIN
    /// only a MEMBER, a MEMBER nobody.
    pub async fn kick_member(
        &self,
        group_id: GroupId,
        acting_user_id: UserId,
        target_user_id: UserId,
    ) -> Result<(), EngineError> {
        let mut tx = self.pool().begin().await?;

        let actor = Self::require_membership(&mut tx, acting_user_id, group_id).await?;
        let target = Self::require_target_membership(&mut tx, target_user_id, group_id).await?;

        if !can_kick(actor.role, target.role) {
            return Err(SocialError::InsufficientRole {
                actor: actor.role,
                target: target.role,
            }
            .into());
        }
        GroupStore::delete_membership(&mut tx, target.id).await?;
        tx.commit().await?;

        tracing::info!(group = %group_id, kicked = %target_user_id, by = %acting_user_id, "Member kicked");
        Ok(())
    }

    /// Post a chat message (active members only).
    pub async fn post_message(
        &self,
        group_id: GroupId,
        user_id: UserId,
        content: String,
    ) -> Result<GroupMessage, EngineError> {
        if content.trim().is_empty() {
            return Err(EngineError::BadRequest(
                "Message content must not be empty.".to_owned(),
            ));
        }
        let now = self.clock().now();
        let mut tx = self.pool().begin().await?;

        let membership = Self::require_membership(&mut tx, user_id, group_id).await?;
        if !can_chat(membership.status) {
            return Err(EngineError::Forbidden(
                "Only active members may post in the group chat.".to_owned(),
            ));
        }

        let message = GroupMessage {
            id: GroupMessageId::new(),
            group_id,
            user_id,
            content,
            created_at: now,
        };
        GroupStore::insert_message(&mut tx, &message).await?;
        tx.commit().await?;
        Ok(message)
    }

    /// Read a group's chat (active members only).
    pub async fn get_messages(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Vec<GroupMessage>, EngineError> {
        let mut tx = self.pool().begin().await?;

        let membership = Self::require_membership(&mut tx, user_id, group_id).await?;
        if !can_chat(membership.status) {
            return Err(EngineError::Forbidden(
                "Only active members may read the group chat.".to_owned(),
            ));
        }
        let messages = GroupStore::list_messages(&mut tx, group_id).await?;
        tx.commit().await?;
        Ok(messages)
    }

    /// Load a group or fail with `NotFound`.
    async fn require_group(
        conn: &mut sqlx::PgConnection,
        group_id: GroupId,
    ) -> Result<Group, EngineError> {
        GroupStore::fetch(conn, group_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("Group \"{group_id}\" not found.")))
    }

    /// Load the acting caller's membership in a group or fail.
    ///
    /// Absent membership is Forbidden, not `NotFound`: the caller simply
    /// is not in the group.
    async fn require_membership(
        conn: &mut sqlx::PgConnection,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<GroupMembership, EngineError> {
        GroupStore::fetch_membership(conn, user_id, group_id)
            .await?
            .ok_or_else(|| {
                EngineError::Forbidden("You are not a member of this group.".to_owned())
            })
    }

    /// Load a moderation target's membership or fail with `NotFound`.
    async fn require_target_membership(
        conn: &mut sqlx::PgConnection,
        user_id: UserId,
        group_id: GroupId,
    ) -> Result<GroupMembership, EngineError> {
        GroupStore::fetch_membership(conn, user_id, group_id)
            .await?
            .ok_or_else(|| {
                EngineError::NotFound("That user has no membership in this group.".to_owned())
            })
    }
}
