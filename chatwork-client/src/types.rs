//! Chatwork API payload types and role-set recomputation.

use serde::{Deserialize, Serialize};

/// Member role inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
    Readonly,
}

impl Role {
    /// The API's wire name, also used in user-facing replies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
            Role::Readonly => "readonly",
        }
    }
}

/// One row of `GET /rooms/{id}/members`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomMember {
    pub account_id: i64,
    pub name: String,
    pub role: Role,
}

/// One row of `GET /rooms` (also the shape of `GET /rooms/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummary {
    pub room_id: i64,
    pub name: String,
    #[serde(default)]
    pub message_num: i64,
    #[serde(default)]
    pub file_num: i64,
    #[serde(default)]
    pub task_num: i64,
    #[serde(default)]
    pub icon_path: String,
}

/// The three id sets accepted by `PUT /rooms/{id}/members`. The API replaces
/// all room roles at once, so every update must carry the full sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignment {
    pub admin_ids: Vec<i64>,
    pub member_ids: Vec<i64>,
    pub readonly_ids: Vec<i64>,
}

impl RoleAssignment {
    /// Recomputes the role sets with `target` demoted to readonly. Admins
    /// other than the target are carried over untouched; the target is
    /// removed from admin/member and appears in readonly exactly once.
    pub fn demote_to_readonly(members: &[RoomMember], target: i64) -> Self {
        let admin_ids = members
            .iter()
            .filter(|m| m.role == Role::Admin && m.account_id != target)
            .map(|m| m.account_id)
            .collect();
        let member_ids = members
            .iter()
            .filter(|m| m.role == Role::Member && m.account_id != target)
            .map(|m| m.account_id)
            .collect();
        let mut readonly_ids: Vec<i64> = members
            .iter()
            .filter(|m| m.role == Role::Readonly)
            .map(|m| m.account_id)
            .collect();
        if !readonly_ids.contains(&target) {
            readonly_ids.push(target);
        }
        Self {
            admin_ids,
            member_ids,
            readonly_ids,
        }
    }
}

/// True when `account_id` holds the admin role in `members`.
pub fn is_admin(members: &[RoomMember], account_id: i64) -> bool {
    members
        .iter()
        .any(|m| m.account_id == account_id && m.role == Role::Admin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(account_id: i64, role: Role) -> RoomMember {
        RoomMember {
            account_id,
            name: format!("user{}", account_id),
            role,
        }
    }

    #[test]
    fn demote_moves_member_into_readonly() {
        let members = vec![
            member(1, Role::Admin),
            member(2, Role::Member),
            member(3, Role::Member),
            member(4, Role::Readonly),
        ];

        let assignment = RoleAssignment::demote_to_readonly(&members, 2);

        assert_eq!(assignment.admin_ids, vec![1]);
        assert_eq!(assignment.member_ids, vec![3]);
        assert_eq!(assignment.readonly_ids, vec![4, 2]);
    }

    #[test]
    fn demote_leaves_other_admins_intact() {
        let members = vec![
            member(1, Role::Admin),
            member(5, Role::Admin),
            member(2, Role::Member),
        ];

        let assignment = RoleAssignment::demote_to_readonly(&members, 2);

        assert_eq!(assignment.admin_ids, vec![1, 5]);
        assert!(assignment.member_ids.is_empty());
        assert_eq!(assignment.readonly_ids, vec![2]);
    }

    #[test]
    fn demote_strips_admin_role_from_target() {
        let members = vec![member(1, Role::Admin), member(9, Role::Admin)];

        let assignment = RoleAssignment::demote_to_readonly(&members, 9);

        assert_eq!(assignment.admin_ids, vec![1]);
        assert_eq!(assignment.readonly_ids, vec![9]);
    }

    #[test]
    fn demote_is_idempotent_for_already_readonly_target() {
        let members = vec![member(1, Role::Admin), member(7, Role::Readonly)];

        let assignment = RoleAssignment::demote_to_readonly(&members, 7);

        assert_eq!(assignment.readonly_ids, vec![7]);
    }

    #[test]
    fn is_admin_checks_role_not_just_presence() {
        let members = vec![member(1, Role::Admin), member(2, Role::Member)];

        assert!(is_admin(&members, 1));
        assert!(!is_admin(&members, 2));
        assert!(!is_admin(&members, 999));
    }

    #[test]
    fn role_deserializes_from_api_strings() {
        let m: RoomMember =
            serde_json::from_str(r#"{"account_id":10,"name":"テスト","role":"readonly"}"#).unwrap();
        assert_eq!(m.role, Role::Readonly);
    }
}
